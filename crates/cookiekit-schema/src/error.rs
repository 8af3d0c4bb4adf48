/// Errors that can occur while loading or compiling schemas.
#[cfg(feature = "json-schema")]
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file could not be loaded.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// The schema could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The schema document is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[cfg(feature = "json-schema")]
pub type Result<T> = std::result::Result<T, SchemaError>;

/// A value rejected by a [`Validator`](crate::Validator).
///
/// Diagnostics are kept exactly as the underlying validator reported them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .diagnostics.join("; "))]
pub struct ValidationError {
    diagnostics: Vec<String>,
}

impl ValidationError {
    /// A failure with a single diagnostic.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            diagnostics: vec![message.into()],
        }
    }

    /// A failure with several diagnostics, in reporting order.
    ///
    /// An empty list is replaced by a generic diagnostic so the error is never
    /// silent.
    pub fn from_diagnostics(diagnostics: Vec<String>) -> Self {
        if diagnostics.is_empty() {
            return Self::new("value rejected by validator");
        }
        Self { diagnostics }
    }

    /// Every diagnostic, in reporting order.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}
