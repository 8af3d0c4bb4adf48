use std::future::Future;

use crate::error::Result;

/// A request-scoped store of cookie name/value strings.
///
/// Implementations wrap whatever the host framework hands out per request.
/// The jar owns persistence and transport; callers only see plain strings.
/// A jar handle is used by one request at a time, so mutation takes
/// `&mut self` and no internal locking is expected.
pub trait CookieJar {
    /// Returns true if an entry named `name` exists.
    fn has(&self, name: &str) -> bool;

    /// Returns the raw stored value for `name`, if any.
    fn get(&self, name: &str) -> Option<String>;

    /// Stores `value` under `name`, replacing any previous value.
    fn set(&mut self, name: &str, value: &str) -> Result<()>;

    /// Removes the entry for `name`. Removing a missing entry is not an error.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// Total number of entries in the jar, managed or not.
    fn size(&self) -> usize;

    /// Full wire serialization of every entry in the jar.
    fn serialize(&self) -> String;
}

impl<J: CookieJar + ?Sized> CookieJar for &mut J {
    fn has(&self, name: &str) -> bool {
        (**self).has(name)
    }

    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).set(name, value)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        (**self).delete(name)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn serialize(&self) -> String {
        (**self).serialize()
    }
}

impl<J: CookieJar + ?Sized> CookieJar for Box<J> {
    fn has(&self, name: &str) -> bool {
        (**self).has(name)
    }

    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).set(name, value)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        (**self).delete(name)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn serialize(&self) -> String {
        (**self).serialize()
    }
}

/// Asynchronous provider of the current request's cookie jar.
///
/// Called exactly once per request context.
pub trait JarSource {
    /// The jar handle handed out for one request.
    type Jar: CookieJar;

    /// Acquire the jar for the current request.
    fn acquire(&self) -> impl Future<Output = Result<Self::Jar>> + Send;
}

/// Returns true if `name` is a valid RFC 6265 cookie name (an HTTP token).
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_token_byte)
}

fn is_token_byte(byte: u8) -> bool {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";
    byte.is_ascii_graphic() && !SEPARATORS.contains(&byte)
}
