//! Presentation-side data for configuration diffs.
//!
//! Turns a diff result into two aligned panels (old on the left, new on the
//! right) and carries the titles and color theme a renderer applies. Nothing
//! here draws; the output is plain data.

pub mod config;
pub mod error;
pub mod panel;

pub use cfgdiff_core::Side;
pub use config::{Theme, ThemeOverrides, ViewerConfig, ViewerConfigFile};
pub use error::{ConfigError, ConfigResult};
pub use panel::{Panel, PanelRow, SplitView};
