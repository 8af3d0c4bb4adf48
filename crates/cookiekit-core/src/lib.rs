//! Cookie definition registry and typed request-scoped accessors.
//!
//! Declare a [`CookieRegistry`] once, wrap it in a [`CookieFactory`], and
//! derive a [`Cookies`] accessor per request from that request's jar. Every
//! read decodes the stored string according to the key's [`Representation`]
//! and runs its validator; every write encodes without validating.
//!
//! ```
//! use cookiekit_core::{CookieDefinition, CookieFactory, CookieRegistry};
//! use cookiekit_jar::MemoryJar;
//! use serde_json::json;
//!
//! let registry = CookieRegistry::builder()
//!     .define("pref", CookieDefinition::structured("ui"))
//!     .define("session", CookieDefinition::raw("auth"))
//!     .build();
//! let factory = CookieFactory::new(registry);
//!
//! let mut cookies = factory.bind(MemoryJar::new());
//! cookies.set("pref", json!({"theme": "dark"}))?;
//! assert_eq!(cookies.get("pref")?, Some(json!({"theme": "dark"})));
//! # Ok::<(), cookiekit_core::CookieError>(())
//! ```

pub mod accessor;
pub mod codec;
pub mod definition;
pub mod error;
pub mod factory;
#[cfg(feature = "json-schema")]
pub mod manifest;
pub mod registry;
pub mod typed;

pub use accessor::{CookieValues, Cookies};
pub use definition::{CookieDefinition, Representation};
pub use error::{CookieError, Result};
pub use factory::CookieFactory;
pub use registry::{CookieRegistry, RegistryBuilder};
pub use typed::CookieKey;

#[cfg(feature = "json-schema")]
pub use error::ManifestError;
#[cfg(feature = "json-schema")]
pub use manifest::{load_manifest, load_shared_manifest, CookieSpec, RegistryManifest};
