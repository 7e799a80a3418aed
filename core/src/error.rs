use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A corpus was requested from an unusable document list. The stored corpus is left untouched.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    /// The covariance eigen-solve could not produce a usable basis.
    #[error("numeric degenerate: {0}")]
    NumericDegenerate(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
