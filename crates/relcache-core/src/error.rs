use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// No usable entry exists for the requested key. This is an expected
    /// outcome, not a failure; callers fall back to the underlying source.
    #[error("entry not found")]
    NotFound,

    /// A row's width disagrees with the entry's column count.
    #[error("corrupt entry: row {row} has {found} values, expected {expected}")]
    Corrupt {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl CacheError {
    /// Whether this error is the not-found outcome rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
