//! Request-scoped cookie jar abstraction.
//!
//! Provides the storage contract that typed cookie accessors delegate to:
//! - [`CookieJar`]: per-request name/value primitives (has, get, set, delete,
//!   size, serialize)
//! - [`JarSource`]: asynchronous acquisition of a jar for the current request
//!
//! This is the lowest layer of cookiekit. Host frameworks implement these
//! traits over their own cookie stores; [`MemoryJar`] is the reference
//! implementation used by tests and the CLI.

pub mod error;
pub mod memory;
pub mod source;
pub mod traits;

pub use error::{JarError, Result};
pub use memory::{JarConfig, MemoryJar, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_VALUE_SIZE};
pub use source::{from_fn, FnSource, HeaderSource};
pub use traits::{is_valid_name, CookieJar, JarSource};
