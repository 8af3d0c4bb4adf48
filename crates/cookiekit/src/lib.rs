//! Typed, schema-validated access to request-scoped cookie jars.
//!
//! cookiekit turns a static registry of cookie definitions into a typed
//! accessor over whatever cookie jar the host framework provides per request.
//!
//! # Crate Structure
//!
//! - [`jar`]: Jar capability traits and the in-memory reference jar
//! - `schema` (feature `json-schema`): JSON Schema validators and schema sets
//! - [`cookies`]: Registry, accessor derivation, typed keys and manifests
//!
//! The most used types are re-exported at the root. The `Validator` trait and
//! its serde and closure implementations need no feature.

/// Re-export jar types.
pub mod jar {
    pub use cookiekit_jar::*;
}

/// Re-export validator types.
#[cfg(feature = "json-schema")]
pub mod schema {
    pub use cookiekit_schema::*;
}

/// Re-export registry and accessor types.
pub mod cookies {
    pub use cookiekit_core::*;
}

pub use cookiekit_core::{
    CookieDefinition, CookieError, CookieFactory, CookieKey, CookieRegistry, CookieValues,
    Cookies, Representation,
};
pub use cookiekit_jar::{CookieJar, JarSource, MemoryJar};
pub use cookiekit_schema::{FnValidator, SerdeValidator, ValidationError, Validator};
pub use serde_json::{json, Value};

#[cfg(feature = "json-schema")]
pub use cookiekit_core::load_manifest;
#[cfg(feature = "json-schema")]
pub use cookiekit_schema::JsonSchemaValidator;
