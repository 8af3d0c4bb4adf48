use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use crate::error::{JarError, Result};
use crate::traits::{is_valid_name, CookieJar};

/// Default maximum size of a single encoded cookie value: 4 KiB.
pub const DEFAULT_MAX_VALUE_SIZE: usize = 4096;

/// Default maximum number of entries per jar.
pub const DEFAULT_MAX_ENTRIES: usize = 180;

/// Characters left unescaped in serialized values, matching `encodeURIComponent`.
const VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Limits enforced by [`MemoryJar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JarConfig {
    /// Maximum bytes per stored value, measured after percent-encoding.
    pub max_value_size: usize,
    /// Maximum number of entries the jar accepts.
    pub max_entries: usize,
}

impl Default for JarConfig {
    fn default() -> Self {
        Self {
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    value: String,
    /// Header text the value was parsed from. Cleared on write.
    wire: Option<String>,
}

impl Entry {
    fn new(name: &str, value: String, wire: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            value,
            wire,
        }
    }
}

/// In-memory, insertion-ordered cookie jar.
///
/// Serializes as a `Cookie` request header: `name=value` pairs joined by
/// `"; "`, with values percent-encoded. [`MemoryJar::parse_header`] reads the
/// same form back. Entries that came from a header and were never rewritten
/// serialize exactly as they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryJar {
    entries: Vec<Entry>,
    config: JarConfig,
}

impl MemoryJar {
    /// Create an empty jar with default limits.
    pub fn new() -> Self {
        Self::with_config(JarConfig::default())
    }

    /// Create an empty jar with explicit limits.
    pub fn with_config(config: JarConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    /// Build a jar from a `Cookie` request header with default limits.
    pub fn parse_header(header: &str) -> Self {
        Self::parse_header_with_config(header, JarConfig::default())
    }

    /// Build a jar from a `Cookie` request header.
    ///
    /// Pairs with invalid names are skipped. A pair without `=` is read as a
    /// name with an empty value. Repeated names keep the last value. A value
    /// that does not decode to UTF-8 is kept in its encoded form.
    ///
    /// `config` limits later writes only. Whatever the client sent is loaded.
    pub fn parse_header_with_config(header: &str, config: JarConfig) -> Self {
        let mut jar = Self::with_config(config);

        for pair in header.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }

            let (name, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = name.trim();
            if !is_valid_name(name) {
                debug!(name, "skipping cookie with invalid name");
                continue;
            }

            let raw_value = raw_value.trim();
            let value = match percent_decode_str(raw_value).decode_utf8() {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => {
                    debug!(name, "cookie value is not UTF-8, keeping it encoded");
                    raw_value.to_string()
                }
            };
            jar.insert(Entry::new(name, value, Some(raw_value.to_string())));
        }

        jar
    }

    /// Get the jar limits.
    pub fn config(&self) -> &JarConfig {
        &self.config
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.value.as_str()))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    /// Overwrite in place or append, without checking limits.
    fn insert(&mut self, entry: Entry) {
        match self.position(&entry.name) {
            Some(index) => self.entries[index] = entry,
            None => self.entries.push(entry),
        }
    }
}

impl CookieJar for MemoryJar {
    fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn get(&self, name: &str) -> Option<String> {
        self.position(name)
            .map(|index| self.entries[index].value.clone())
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        if !is_valid_name(name) {
            return Err(JarError::InvalidName(name.to_string()));
        }

        let size = utf8_percent_encode(value, VALUE_ENCODE_SET)
            .map(str::len)
            .sum::<usize>();
        if size > self.config.max_value_size {
            return Err(JarError::QuotaExceeded {
                name: name.to_string(),
                size,
                max: self.config.max_value_size,
            });
        }

        if !self.has(name) && self.entries.len() >= self.config.max_entries {
            return Err(JarError::TooManyEntries {
                name: name.to_string(),
                max: self.config.max_entries,
            });
        }
        self.insert(Entry::new(name, value.to_string(), None));
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.entries.retain(|entry| entry.name != name);
        Ok(())
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MemoryJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            match &entry.wire {
                Some(wire) => write!(f, "{}={wire}", entry.name)?,
                None => write!(
                    f,
                    "{}={}",
                    entry.name,
                    utf8_percent_encode(&entry.value, VALUE_ENCODE_SET)
                )?,
            }
        }
        Ok(())
    }
}
