//! Pluggable validators for decoded cookie values.
//!
//! A [`Validator`] takes a decoded value and either returns a refined value or
//! fails with a [`ValidationError`] carrying its diagnostics. Always available:
//! - [`SerdeValidator`]: round-trip through a `serde` type
//! - [`FnValidator`]: any closure
//!
//! With the `json-schema` feature, `JsonSchemaValidator` compiles JSON Schema
//! 2020-12 documents via `jsonschema`, and `SchemaSet` loads named schemas
//! from a directory or from embedded strings.

#[cfg(feature = "json-schema")]
pub mod config;
pub mod error;
#[cfg(feature = "json-schema")]
pub mod json_schema;
#[cfg(feature = "json-schema")]
pub mod set;
pub mod validator;

pub use error::ValidationError;
pub use validator::{FnValidator, SerdeValidator, Validator};

#[cfg(feature = "json-schema")]
pub use config::SchemaConfig;
#[cfg(feature = "json-schema")]
pub use error::{Result, SchemaError};
#[cfg(feature = "json-schema")]
pub use json_schema::JsonSchemaValidator;
#[cfg(feature = "json-schema")]
pub use set::SchemaSet;
