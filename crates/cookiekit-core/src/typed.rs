use std::fmt;
use std::marker::PhantomData;

/// A registry key paired with the Rust type its value deserializes into.
///
/// Declare keys as constants next to the registry and use them with
/// [`Cookies::get_as`](crate::Cookies::get_as) and
/// [`Cookies::set_as`](crate::Cookies::set_as):
///
/// ```
/// use cookiekit_core::CookieKey;
///
/// const SESSION: CookieKey<String> = CookieKey::new("session");
/// assert_eq!(SESSION.name(), "session");
/// ```
pub struct CookieKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CookieKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for CookieKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CookieKey<T> {}

impl<T> fmt::Debug for CookieKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CookieKey").field(&self.name).finish()
    }
}
