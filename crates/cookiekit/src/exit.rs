use std::fmt;
use std::io;

use cookiekit_core::{CookieError, ManifestError};
use cookiekit_jar::JarError;

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn jar_error(context: &str, err: JarError) -> CliError {
    match err {
        JarError::Io(source) => io_error(context, source),
        JarError::InvalidName(_) => CliError::new(USAGE, format!("{context}: {err}")),
        JarError::QuotaExceeded { .. } | JarError::TooManyEntries { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        JarError::Unavailable(_) => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn cookie_error(context: &str, err: CookieError) -> CliError {
    match err {
        CookieError::Jar(err) => jar_error(context, err),
        CookieError::UnknownKey(_) => CliError::new(USAGE, format!("{context}: {err}")),
        CookieError::MalformedStoredValue { .. }
        | CookieError::Validation { .. }
        | CookieError::Encode { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}

pub fn manifest_error(context: &str, err: ManifestError) -> CliError {
    match err {
        ManifestError::Io { source, .. } => io_error(context, source),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}
