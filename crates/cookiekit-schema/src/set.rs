use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError};
use crate::json_schema::JsonSchemaValidator;

const SCHEMA_SUFFIX: &str = ".schema.json";

/// Name-keyed set of compiled JSON Schema validators.
///
/// Schemas are looked up by the name a cookie definition refers to. Loading
/// from a directory maps `<name>.schema.json` to `name`.
pub struct SchemaSet {
    validators: HashMap<String, Arc<JsonSchemaValidator>>,
    config: SchemaConfig,
}

impl SchemaSet {
    /// Create an empty set with default config.
    pub fn new() -> Self {
        Self::with_config(SchemaConfig::default())
    }

    /// Create an empty set with explicit config.
    pub fn with_config(config: SchemaConfig) -> Self {
        Self {
            validators: HashMap::new(),
            config,
        }
    }

    /// Register a schema under `name` from a JSON string.
    pub fn register(&mut self, name: &str, schema_json: &str) -> Result<()> {
        let schema: Value = serde_json::from_str(schema_json)?;
        self.register_value(name, &schema)
    }

    /// Register a schema under `name` from a JSON value.
    pub fn register_value(&mut self, name: &str, schema: &Value) -> Result<()> {
        let compiled = JsonSchemaValidator::with_config(schema, &self.config)?;
        self.validators.insert(name.to_string(), Arc::new(compiled));
        Ok(())
    }

    /// Load schemas from a directory.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, SchemaConfig::default())
    }

    /// Load schemas from a directory with explicit config.
    ///
    /// Only regular `<name>.schema.json` files are considered. Symlinks are
    /// refused, and the file count and per-file size are capped by `config`.
    pub fn from_directory_with_config(path: &Path, config: SchemaConfig) -> Result<Self> {
        let candidates = schema_files(path)?;
        if candidates.len() > config.max_schemas_from_directory {
            return Err(SchemaError::LoadFailed(format!(
                "{} holds {} schemas, limit is {}",
                path.display(),
                candidates.len(),
                config.max_schemas_from_directory
            )));
        }

        let mut set = Self::with_config(config);
        for (name, file_path) in candidates {
            let content = read_bounded(&file_path, config.max_schema_file_size)?;
            set.register(&name, &content)?;
            debug!(name = name.as_str(), "loaded cookie schema");
        }
        Ok(set)
    }

    /// Load only the listed schemas from a directory.
    ///
    /// Each name maps to `<name>.schema.json`. Names without a file are left
    /// out of the set, and other files in the directory are never opened.
    pub fn from_directory_named<S: AsRef<str>>(
        path: &Path,
        names: &[S],
        config: SchemaConfig,
    ) -> Result<Self> {
        let mut wanted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        wanted.sort_unstable();
        wanted.dedup();
        if wanted.len() > config.max_schemas_from_directory {
            return Err(SchemaError::LoadFailed(format!(
                "{} schemas requested, limit is {}",
                wanted.len(),
                config.max_schemas_from_directory
            )));
        }

        let mut set = Self::with_config(config);
        for name in wanted {
            if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
                return Err(SchemaError::LoadFailed(format!(
                    "{name:?} is not a schema name"
                )));
            }

            let file_path = path.join(format!("{name}{SCHEMA_SUFFIX}"));
            let file_type = match std::fs::symlink_metadata(&file_path) {
                Ok(metadata) => metadata.file_type(),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(SchemaError::LoadFailed(format!(
                        "{}: {err}",
                        file_path.display()
                    )))
                }
            };
            if file_type.is_symlink() {
                return Err(SchemaError::LoadFailed(format!(
                    "{} is a symlink",
                    file_path.display()
                )));
            }
            if !file_type.is_file() {
                continue;
            }

            let content = read_bounded(&file_path, config.max_schema_file_size)?;
            set.register(name, &content)?;
            debug!(name, "loaded cookie schema");
        }
        Ok(set)
    }

    /// Load from embedded schema strings.
    pub fn from_embedded(schemas: &[(&str, &str)]) -> Result<Self> {
        let mut set = Self::new();
        for (name, schema) in schemas {
            set.register(name, schema)?;
        }
        Ok(set)
    }

    /// Get the validator registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<JsonSchemaValidator>> {
        self.validators.get(name).cloned()
    }

    /// Check if `name` has a registered schema.
    pub fn has_schema(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered schema names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get set configuration.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }
}

impl Default for SchemaSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemaSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaSet")
            .field("names", &self.names())
            .field("config", &self.config)
            .finish()
    }
}

/// Collect `(name, path)` for every schema file in `dir`, sorted by name.
fn schema_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let load_err =
        |err: std::io::Error| SchemaError::LoadFailed(format!("{}: {err}", dir.display()));

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(load_err)? {
        let entry = entry.map_err(load_err)?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let Some(name) = file_name.strip_suffix(SCHEMA_SUFFIX) else {
            continue;
        };
        if name.is_empty() {
            return Err(SchemaError::LoadFailed(format!(
                "{file_name} does not name a schema"
            )));
        }

        // file_type() does not follow links.
        let file_type = entry.file_type().map_err(load_err)?;
        if file_type.is_symlink() {
            return Err(SchemaError::LoadFailed(format!("{file_name} is a symlink")));
        }
        if file_type.is_file() {
            found.push((name.to_string(), entry.path()));
        }
    }
    found.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}

/// Read at most `max_bytes` from `path`, failing if the file is larger.
fn read_bounded(path: &Path, max_bytes: usize) -> Result<String> {
    let load_err =
        |err: std::io::Error| SchemaError::LoadFailed(format!("{}: {err}", path.display()));

    let before = std::fs::symlink_metadata(path).map_err(load_err)?;
    let file = std::fs::File::open(path).map_err(load_err)?;
    let opened = file.metadata().map_err(load_err)?;
    if !same_file(&before, &opened) {
        return Err(SchemaError::LoadFailed(format!(
            "{} was replaced while loading",
            path.display()
        )));
    }

    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if opened.len() > limit {
        return Err(SchemaError::LoadFailed(format!(
            "{} is {} bytes, limit is {max_bytes}",
            path.display(),
            opened.len()
        )));
    }

    let mut content = String::new();
    file.take(limit.saturating_add(1))
        .read_to_string(&mut content)
        .map_err(load_err)?;
    if content.len() > max_bytes {
        return Err(SchemaError::LoadFailed(format!(
            "{} grew past {max_bytes} bytes while loading",
            path.display()
        )));
    }
    Ok(content)
}

#[cfg(unix)]
fn same_file(a: &std::fs::Metadata, b: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    (a.dev(), a.ino()) == (b.dev(), b.ino())
}

#[cfg(not(unix))]
fn same_file(a: &std::fs::Metadata, b: &std::fs::Metadata) -> bool {
    a.is_file() && b.is_file() && a.len() == b.len()
}
