use std::path::Path;

use cfgdiff_core::{DiffStatus, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_OLD_VERSION_TITLE: &str = "Original Version";
pub const DEFAULT_NEW_VERSION_TITLE: &str = "Modified Version";

/// Color tokens for each semantic role in the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background_color: String,
    pub text_color: String,
    pub diff_added_color: String,
    pub diff_removed_color: String,
    pub diff_unchanged_color: String,
    pub diff_changed_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".into(),
            text_color: "#000000".into(),
            diff_added_color: "#E6FFE6".into(),
            diff_removed_color: "#FFE6E6".into(),
            diff_unchanged_color: "#F5F5F5".into(),
            diff_changed_color: "#FFF3E6".into(),
        }
    }
}

impl Theme {
    /// The default theme with any present overrides applied.
    pub fn with_overrides(overrides: ThemeOverrides) -> Self {
        let base = Self::default();
        Self {
            background_color: overrides.background_color.unwrap_or(base.background_color),
            text_color: overrides.text_color.unwrap_or(base.text_color),
            diff_added_color: overrides.diff_added_color.unwrap_or(base.diff_added_color),
            diff_removed_color: overrides.diff_removed_color.unwrap_or(base.diff_removed_color),
            diff_unchanged_color: overrides
                .diff_unchanged_color
                .unwrap_or(base.diff_unchanged_color),
            diff_changed_color: overrides.diff_changed_color.unwrap_or(base.diff_changed_color),
        }
    }

    /// Row background for a record with the given status.
    pub fn color_for(&self, status: DiffStatus) -> &str {
        match status {
            DiffStatus::Added => &self.diff_added_color,
            DiffStatus::Removed => &self.diff_removed_color,
            DiffStatus::Changed => &self.diff_changed_color,
            DiffStatus::Unchanged => &self.diff_unchanged_color,
        }
    }
}

/// Partial theme; absent fields keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeOverrides {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub diff_added_color: Option<String>,
    pub diff_removed_color: Option<String>,
    pub diff_unchanged_color: Option<String>,
    pub diff_changed_color: Option<String>,
}

/// Titles and theme for a side-by-side diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Title of the left (old) panel.
    pub old_version_title: String,
    /// Title of the right (new) panel.
    pub new_version_title: String,
    pub theme: Theme,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            old_version_title: DEFAULT_OLD_VERSION_TITLE.into(),
            new_version_title: DEFAULT_NEW_VERSION_TITLE.into(),
            theme: Theme::default(),
        }
    }
}

/// On-disk shape of a viewer config. Every field is optional.
///
/// ```toml
/// old_version_title = "Production"
///
/// [theme]
/// diff_added_color = "#00FF00"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfigFile {
    pub old_version_title: Option<String>,
    pub new_version_title: Option<String>,
    pub theme: ThemeOverrides,
}

impl From<ViewerConfigFile> for ViewerConfig {
    fn from(file: ViewerConfigFile) -> Self {
        Self {
            old_version_title: file
                .old_version_title
                .unwrap_or_else(|| DEFAULT_OLD_VERSION_TITLE.into()),
            new_version_title: file
                .new_version_title
                .unwrap_or_else(|| DEFAULT_NEW_VERSION_TITLE.into()),
            theme: Theme::with_overrides(file.theme),
        }
    }
}

impl ViewerConfig {
    /// Parse a TOML config, filling gaps with defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let file: ViewerConfigFile = toml::from_str(text)?;
        Ok(file.into())
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "viewer config loaded");
        Ok(config)
    }

    /// Panel title for the given side.
    pub fn title_for(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.old_version_title,
            Side::Right => &self.new_version_title,
        }
    }
}
