#[cfg(feature = "json-schema")]
use std::path::PathBuf;

use cookiekit_jar::JarError;
#[cfg(feature = "json-schema")]
use cookiekit_schema::SchemaError;
use cookiekit_schema::ValidationError;

/// Errors raised by cookie accessors.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// The key is not declared in the registry.
    #[error("unknown cookie key: {0}")]
    UnknownKey(String),

    /// A structured cookie's stored string is not valid JSON.
    #[error("cookie {key} holds malformed structured data: {source}")]
    MalformedStoredValue {
        key: String,
        source: serde_json::Error,
    },

    /// The decoded value was rejected by the key's validator.
    #[error("cookie {key} failed validation: {source}")]
    Validation {
        key: String,
        source: ValidationError,
    },

    /// A typed value could not be serialized for storage.
    #[error("cookie {key} could not be encoded: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    /// Error raised by the underlying jar.
    #[error(transparent)]
    Jar(#[from] JarError),
}

pub type Result<T> = std::result::Result<T, CookieError>;

/// Errors raised while loading a registry manifest.
#[cfg(feature = "json-schema")]
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or does not match the expected layout.
    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// A declared cookie name is not a valid cookie name.
    #[error("invalid cookie name in manifest: {0:?}")]
    InvalidName(String),

    /// A cookie declares both an inline schema and a schema reference.
    #[error("cookie {0} declares both schema and schema_ref")]
    ConflictingSchema(String),

    /// A cookie references a schema but the manifest has no schema_dir.
    #[error("cookie {0} uses schema_ref but the manifest has no schema_dir")]
    SchemaDirRequired(String),

    /// A referenced schema is not present in the schema directory.
    #[error("cookie {name} references unknown schema {schema_ref}")]
    MissingSchema { name: String, schema_ref: String },

    /// A schema failed to load or compile.
    #[error("schema error for {name}: {source}")]
    Schema { name: String, source: SchemaError },
}
