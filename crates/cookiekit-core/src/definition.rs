use std::fmt;
use std::sync::Arc;

use cookiekit_schema::Validator;
use serde::{Deserialize, Serialize};

/// How a cookie's stored string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    /// Opaque string, passed through unchanged.
    #[serde(rename = "string", alias = "raw-string")]
    RawString,
    /// JSON text, decoded before use.
    #[serde(rename = "json", alias = "structured")]
    Structured,
}

impl Representation {
    pub fn as_str(self) -> &'static str {
        match self {
            Representation::RawString => "string",
            Representation::Structured => "json",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registry entry: category, representation and optional validator.
#[derive(Clone)]
pub struct CookieDefinition {
    category: String,
    representation: Representation,
    validator: Option<Arc<dyn Validator>>,
}

impl CookieDefinition {
    pub fn new(category: impl Into<String>, representation: Representation) -> Self {
        Self {
            category: category.into(),
            representation,
            validator: None,
        }
    }

    /// A [`Representation::RawString`] definition.
    pub fn raw(category: impl Into<String>) -> Self {
        Self::new(category, Representation::RawString)
    }

    /// A [`Representation::Structured`] definition.
    pub fn structured(category: impl Into<String>) -> Self {
        Self::new(category, Representation::Structured)
    }

    /// Attach a validator run on every read.
    pub fn with_validator(self, validator: impl Validator + 'static) -> Self {
        self.with_shared_validator(Arc::new(validator))
    }

    /// Attach a validator shared with other definitions.
    pub fn with_shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Free-form grouping label. Never interpreted by the accessor.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn validator(&self) -> Option<&dyn Validator> {
        self.validator.as_deref()
    }
}

impl fmt::Debug for CookieDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieDefinition")
            .field("category", &self.category)
            .field("representation", &self.representation)
            .field("validated", &self.validator.is_some())
            .finish()
    }
}
