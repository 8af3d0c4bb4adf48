use std::sync::Arc;

use cookiekit_jar::{CookieJar, JarSource};
use tracing::debug;

use crate::accessor::Cookies;
use crate::error::Result;
use crate::registry::CookieRegistry;

/// Long-lived accessor factory over one registry.
///
/// Build it once at startup and derive a [`Cookies`] per request. Cloning is
/// cheap and every clone shares the same read-only registry.
#[derive(Debug, Clone)]
pub struct CookieFactory {
    registry: Arc<CookieRegistry>,
}

impl CookieFactory {
    pub fn new(registry: CookieRegistry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    pub fn from_shared(registry: Arc<CookieRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CookieRegistry> {
        &self.registry
    }

    /// Bind an already acquired jar handle.
    pub fn bind<J: CookieJar>(&self, jar: J) -> Cookies<J> {
        Cookies::new(Arc::clone(&self.registry), jar)
    }

    /// Acquire the current request's jar from `source` and bind it.
    ///
    /// Awaits the source exactly once. Acquisition errors are returned as
    /// [`CookieError::Jar`](crate::CookieError::Jar).
    pub async fn acquire<S: JarSource>(&self, source: &S) -> Result<Cookies<S::Jar>> {
        let jar = source.acquire().await?;
        debug!(
            entries = jar.size(),
            keys = self.registry.len(),
            "bound cookie accessor"
        );
        Ok(self.bind(jar))
    }
}

impl From<CookieRegistry> for CookieFactory {
    fn from(registry: CookieRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cookiekit_jar::{from_fn, HeaderSource, JarError, MemoryJar};
    use serde_json::json;

    use super::*;
    use crate::definition::CookieDefinition;
    use crate::error::CookieError;

    fn factory() -> CookieFactory {
        CookieRegistry::builder()
            .define("pref", CookieDefinition::structured("ui"))
            .define("session", CookieDefinition::raw("auth"))
            .build()
            .into()
    }

    #[tokio::test]
    async fn acquire_binds_request_jar() {
        let factory = factory();
        let source = HeaderSource::new("session=abc123; other=1");

        let cookies = factory.acquire(&source).await.unwrap();
        assert_eq!(cookies.get("session").unwrap(), Some(json!("abc123")));
        assert_eq!(cookies.size(), 2);
    }

    #[tokio::test]
    async fn acquire_awaits_source_once() {
        let calls = AtomicUsize::new(0);
        let source = from_fn(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, JarError>(MemoryJar::new()) }
        });

        let _cookies = factory().acquire(&source).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn acquire_failure_is_a_jar_error() {
        let source = from_fn(|| async {
            Err::<MemoryJar, _>(JarError::Unavailable("no request".to_string()))
        });

        assert!(matches!(
            factory().acquire(&source).await,
            Err(CookieError::Jar(JarError::Unavailable(_)))
        ));
    }

    #[test]
    fn clones_share_registry() {
        let factory = factory();
        let clone = factory.clone();

        assert!(Arc::ptr_eq(factory.registry(), clone.registry()));

        let first = factory.bind(MemoryJar::new());
        let second = clone.bind(MemoryJar::new());
        assert_eq!(
            first.registry().keys().collect::<Vec<_>>(),
            second.registry().keys().collect::<Vec<_>>()
        );
    }
}
