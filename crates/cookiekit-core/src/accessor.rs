use std::fmt;
use std::sync::Arc;

use cookiekit_jar::CookieJar;
use cookiekit_schema::ValidationError;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::codec;
use crate::definition::CookieDefinition;
use crate::error::{CookieError, Result};
use crate::registry::CookieRegistry;
use crate::typed::CookieKey;

/// Request-scoped typed view over one cookie jar.
///
/// Owns no storage. Every operation checks the key against the registry and
/// then delegates to the jar. `J` may be an owned jar or `&mut` to one.
pub struct Cookies<J> {
    registry: Arc<CookieRegistry>,
    jar: J,
}

impl<J: CookieJar> Cookies<J> {
    pub fn new(registry: Arc<CookieRegistry>, jar: J) -> Self {
        Self { registry, jar }
    }

    /// The registry this accessor was derived from.
    pub fn registry(&self) -> &CookieRegistry {
        &self.registry
    }

    /// Returns true if the jar holds an entry for `key`. Never decodes.
    pub fn has(&self, key: &str) -> Result<bool> {
        self.definition(key)?;
        Ok(self.jar.has(key))
    }

    /// Read, decode and validate the value for `key`.
    ///
    /// Returns `Ok(None)` when the jar has no entry. Without a validator the
    /// decoded value is returned as-is, with no guarantee about its shape.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let definition = self.definition(key)?;
        let Some(raw) = self.jar.get(key) else {
            trace!(key, "cookie absent");
            return Ok(None);
        };

        let decoded = codec::decode(definition.representation(), &raw).map_err(|source| {
            warn!(key, error = %source, "malformed stored cookie value");
            CookieError::MalformedStoredValue {
                key: key.to_string(),
                source,
            }
        })?;

        let Some(validator) = definition.validator() else {
            trace!(key, "cookie read without validator");
            return Ok(Some(decoded));
        };

        match validator.parse(decoded) {
            Ok(value) => Ok(Some(value)),
            Err(source) => {
                warn!(key, error = %source, "cookie value failed validation");
                Err(CookieError::Validation {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }

    /// Read every registry key, in declaration order.
    ///
    /// Keys outside the registry are never included. The first failing key
    /// aborts the whole read.
    pub fn get_all(&self) -> Result<CookieValues> {
        let mut entries = Vec::with_capacity(self.registry.len());
        for key in self.registry.keys() {
            entries.push((key.to_string(), self.get(key)?));
        }
        Ok(CookieValues { entries })
    }

    /// Encode and store `value` under `key`. No validation runs on write.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let representation = self.definition(key)?.representation();
        let encoded = codec::encode(representation, &value.into());
        self.jar.set(key, &encoded)?;
        debug!(key, %representation, bytes = encoded.len(), "cookie written");
        Ok(())
    }

    /// Remove the entry for `key`. Removing a missing entry is not an error.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.definition(key)?;
        self.jar.delete(key)?;
        debug!(key, "cookie deleted");
        Ok(())
    }

    /// Total entries in the jar, including cookies outside the registry.
    pub fn size(&self) -> usize {
        self.jar.size()
    }

    /// Read `key` through [`get`](Self::get) and deserialize it into `T`.
    ///
    /// A value that does not fit `T` is reported as a validation failure.
    pub fn get_as<T: DeserializeOwned>(&self, key: &CookieKey<T>) -> Result<Option<T>> {
        let Some(value) = self.get(key.name())? else {
            return Ok(None);
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|err| CookieError::Validation {
                key: key.name().to_string(),
                source: ValidationError::from(err),
            })
    }

    /// Serialize `value` and store it through [`set`](Self::set).
    pub fn set_as<T: Serialize>(&mut self, key: &CookieKey<T>, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|source| CookieError::Encode {
            key: key.name().to_string(),
            source,
        })?;
        self.set(key.name(), value)
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    /// Release the jar handle.
    pub fn into_jar(self) -> J {
        self.jar
    }

    fn definition(&self, key: &str) -> Result<&CookieDefinition> {
        self.registry
            .definition_for(key)
            .ok_or_else(|| CookieError::UnknownKey(key.to_string()))
    }
}

/// Renders the whole jar, unmanaged cookies included.
impl<J: CookieJar> fmt::Display for Cookies<J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.jar.serialize())
    }
}

impl<J> fmt::Debug for Cookies<J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cookies")
            .field("keys", &self.registry.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Result of [`Cookies::get_all`]: one slot per registry key, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieValues {
    entries: Vec<(String, Option<Value>)>,
}

impl CookieValues {
    /// The value for `key`, or `None` if absent or not a registry key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_ref())
    }

    /// True if `key` is one of the covered registry keys, present or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for CookieValues {
    type Item = (String, Option<Value>);
    type IntoIter = std::vec::IntoIter<(String, Option<Value>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Serializes as an ordered JSON object; absent cookies become `null`.
impl Serialize for CookieValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
