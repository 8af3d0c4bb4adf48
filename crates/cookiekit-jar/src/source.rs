use std::future::{ready, Future};

use tracing::debug;

use crate::error::Result;
use crate::memory::{JarConfig, MemoryJar};
use crate::traits::{CookieJar, JarSource};

/// Acquires a fresh [`MemoryJar`] parsed from a `Cookie` request header.
#[derive(Debug, Clone)]
pub struct HeaderSource {
    header: String,
    config: JarConfig,
}

impl HeaderSource {
    /// Create a source for `header` with default jar limits.
    pub fn new(header: impl Into<String>) -> Self {
        Self::with_config(header, JarConfig::default())
    }

    /// Create a source for `header` with explicit jar limits.
    pub fn with_config(header: impl Into<String>, config: JarConfig) -> Self {
        Self {
            header: header.into(),
            config,
        }
    }

    /// The raw header this source parses.
    pub fn header(&self) -> &str {
        &self.header
    }
}

impl JarSource for HeaderSource {
    type Jar = MemoryJar;

    fn acquire(&self) -> impl Future<Output = Result<MemoryJar>> + Send {
        let jar = MemoryJar::parse_header_with_config(&self.header, self.config);
        debug!(entries = jar.size(), "acquired jar from request header");
        ready(Ok(jar))
    }
}

/// A [`JarSource`] backed by an async closure. See [`from_fn`].
#[derive(Debug, Clone)]
pub struct FnSource<F> {
    acquire: F,
}

/// Adapt a closure returning a jar future into a [`JarSource`].
///
/// ```
/// use cookiekit_jar::{from_fn, JarError, MemoryJar};
///
/// let source = from_fn(|| async { Ok::<_, JarError>(MemoryJar::new()) });
/// # let _ = source;
/// ```
pub fn from_fn<F, Fut, J>(acquire: F) -> FnSource<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<J>> + Send,
    J: CookieJar,
{
    FnSource { acquire }
}

impl<F, Fut, J> JarSource for FnSource<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<J>> + Send,
    J: CookieJar,
{
    type Jar = J;

    fn acquire(&self) -> impl Future<Output = Result<J>> + Send {
        (self.acquire)()
    }
}
