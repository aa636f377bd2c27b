//! Ordering of flattened keys.
//!
//! Keys are compared with a Unicode collator rather than by bytes, so
//! `"Äpfel"` sorts next to `"apfel"` instead of after `"zebra"`.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;

use crate::error::{DiffError, DiffResult};

/// How diff records are ordered by key.
pub enum KeyOrder {
    /// Locale-aware comparison using the root-compatible `en` tailoring.
    Collated(Collator),
    /// Plain Unicode code point order.
    CodePoint,
}

impl KeyOrder {
    /// Build the locale-aware ordering.
    pub fn collated() -> DiffResult<Self> {
        let collator = Collator::try_new(&locale!("en").into(), CollatorOptions::new())
            .map_err(|e| DiffError::Collator(format!("{e:?}")))?;
        Ok(Self::Collated(collator))
    }

    /// Compare two keys.
    ///
    /// Distinct keys that collate equal fall back to code point order so the
    /// result is always total.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Collated(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
            Self::CodePoint => a.cmp(b),
        }
    }
}

impl fmt::Debug for KeyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collated(_) => f.write_str("KeyOrder::Collated"),
            Self::CodePoint => f.write_str("KeyOrder::CodePoint"),
        }
    }
}
