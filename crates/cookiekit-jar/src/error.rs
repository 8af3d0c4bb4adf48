/// Errors raised by cookie jar operations.
#[derive(Debug, thiserror::Error)]
pub enum JarError {
    /// The cookie name is empty or contains characters outside the token set.
    #[error("invalid cookie name: {0:?}")]
    InvalidName(String),

    /// The encoded value exceeds the jar's per-cookie size limit.
    #[error("cookie {name} too large ({size} bytes, max {max})")]
    QuotaExceeded {
        name: String,
        size: usize,
        max: usize,
    },

    /// Adding the cookie would exceed the jar's entry limit.
    #[error("cookie jar full ({max} entries), cannot add {name}")]
    TooManyEntries { name: String, max: usize },

    /// The host could not provide a jar for the current request.
    #[error("cookie jar unavailable: {0}")]
    Unavailable(String),

    /// An I/O error occurred in a jar backed by external storage.
    #[error("cookie jar I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JarError>;
