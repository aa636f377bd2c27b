//! Error types for the diff crate.

/// Errors that can occur while setting up a diff.
///
/// Diffing itself never fails; only construction of the key collator can.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The Unicode collator could not be built from its locale data.
    #[error("failed to construct key collator: {0}")]
    Collator(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
