use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StagingError {
    /// The geometry cannot produce a percentage (zero root length,
    /// non-positive scale, or non-finite coordinates).
    #[error("staging indeterminate: {0}")]
    Indeterminate(String),
}
