//! JSON registry manifests.
//!
//! A manifest declares a registry as data so tools and services can share one
//! definition file:
//!
//! ```json
//! {
//!   "strict_mode": true,
//!   "schema_dir": "schemas",
//!   "cookies": [
//!     { "name": "pref", "category": "ui", "type": "json", "schema_ref": "pref" },
//!     { "name": "session", "category": "auth", "type": "string",
//!       "schema": { "type": "string", "minLength": 6 } }
//!   ]
//! }
//! ```
//!
//! `schema_ref` names a `<ref>.schema.json` file in `schema_dir`. A relative
//! `schema_dir` is resolved against the manifest's own directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cookiekit_jar::is_valid_name;
use cookiekit_schema::{JsonSchemaValidator, SchemaConfig, SchemaSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::definition::{CookieDefinition, Representation};
use crate::error::ManifestError;
use crate::registry::CookieRegistry;

/// Serialized form of a [`CookieRegistry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryManifest {
    /// Compile every schema in strict mode.
    #[serde(default)]
    pub strict_mode: bool,
    /// Directory holding `<name>.schema.json` files for `schema_ref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_dir: Option<PathBuf>,
    /// Cookie declarations, in registry order.
    pub cookies: Vec<CookieSpec>,
}

/// One cookie declaration in a [`RegistryManifest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CookieSpec {
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub representation: Representation,
    /// Inline JSON Schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Name of a schema in `schema_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_ref: Option<String>,
}

impl RegistryManifest {
    /// Parse a manifest from JSON text. `schema_dir` is kept as written.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a manifest file and resolve its `schema_dir`.
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::from_json(&content)?;

        if let Some(dir) = &manifest.schema_dir {
            if dir.is_relative() {
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                manifest.schema_dir = Some(base.join(dir));
            }
        }
        Ok(manifest)
    }

    /// Compile schemas and build the registry.
    pub fn build(&self) -> Result<CookieRegistry, ManifestError> {
        let config = SchemaConfig {
            strict_mode: self.strict_mode,
            ..SchemaConfig::default()
        };
        let schema_set = self.load_schema_set(&config)?;

        let mut builder = CookieRegistry::builder();
        for spec in &self.cookies {
            if !is_valid_name(&spec.name) {
                return Err(ManifestError::InvalidName(spec.name.clone()));
            }

            let mut definition = CookieDefinition::new(&spec.category, spec.representation);
            match (&spec.schema, &spec.schema_ref) {
                (Some(_), Some(_)) => {
                    return Err(ManifestError::ConflictingSchema(spec.name.clone()));
                }
                (Some(schema), None) => {
                    let validator =
                        JsonSchemaValidator::with_config(schema, &config).map_err(|source| {
                            ManifestError::Schema {
                                name: spec.name.clone(),
                                source,
                            }
                        })?;
                    definition = definition.with_validator(validator);
                }
                (None, Some(schema_ref)) => {
                    let Some(set) = &schema_set else {
                        return Err(ManifestError::SchemaDirRequired(spec.name.clone()));
                    };
                    let validator =
                        set.get(schema_ref)
                            .ok_or_else(|| ManifestError::MissingSchema {
                                name: spec.name.clone(),
                                schema_ref: schema_ref.clone(),
                            })?;
                    definition = definition.with_shared_validator(validator);
                }
                (None, None) => {}
            }

            builder = builder.define(spec.name.clone(), definition);
        }

        let registry = builder.build();
        debug!(
            cookies = registry.len(),
            strict = self.strict_mode,
            "built registry from manifest"
        );
        Ok(registry)
    }

    fn load_schema_set(&self, config: &SchemaConfig) -> Result<Option<SchemaSet>, ManifestError> {
        let Some(dir) = &self.schema_dir else {
            return Ok(None);
        };
        let refs: Vec<&str> = self
            .cookies
            .iter()
            .filter_map(|spec| spec.schema_ref.as_deref())
            .collect();
        if refs.is_empty() {
            return Ok(None);
        }

        // Only referenced files are read; the rest of schema_dir is ignored.
        SchemaSet::from_directory_named(dir, &refs, *config)
            .map(Some)
            .map_err(|source| ManifestError::Schema {
                name: dir.display().to_string(),
                source,
            })
    }
}

/// Read a manifest file and build its registry.
pub fn load_manifest(path: &Path) -> Result<CookieRegistry, ManifestError> {
    RegistryManifest::from_path(path)?.build()
}

/// Shared-registry convenience for [`load_manifest`].
pub fn load_shared_manifest(path: &Path) -> Result<Arc<CookieRegistry>, ManifestError> {
    load_manifest(path).map(Arc::new)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cookiekit-manifest-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn inline_manifest_builds_in_order() {
        let manifest = RegistryManifest::from_json(
            r#"{
                "cookies": [
                    {"name": "pref", "category": "ui", "type": "json"},
                    {"name": "session", "category": "auth", "type": "string",
                     "schema": {"type": "string", "minLength": 6}}
                ]
            }"#,
        )
        .unwrap();
        let registry = manifest.build().unwrap();

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["pref", "session"]);
        let session = registry.definition_for("session").unwrap();
        assert_eq!(session.representation(), Representation::RawString);
        let validator = session.validator().unwrap();
        assert!(validator.parse(json!("abc123")).is_ok());
        assert!(validator.parse(json!("abc")).is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            RegistryManifest::from_json(
                r#"{"cookies": [{"name": "a", "category": "c", "type": "json", "ttl": 5}]}"#
            ),
            Err(ManifestError::Json(_))
        ));
    }

    #[test]
    fn invalid_cookie_name_is_rejected() {
        let manifest = RegistryManifest::from_json(
            r#"{"cookies": [{"name": "bad name", "category": "c", "type": "string"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.build(),
            Err(ManifestError::InvalidName(name)) if name == "bad name"
        ));
    }

    #[test]
    fn conflicting_schema_sources_are_rejected() {
        let manifest = RegistryManifest::from_json(
            r#"{"cookies": [{"name": "a", "category": "c", "type": "json",
                "schema": {}, "schema_ref": "a"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.build(),
            Err(ManifestError::ConflictingSchema(_))
        ));
    }

    #[test]
    fn schema_ref_requires_schema_dir() {
        let manifest = RegistryManifest::from_json(
            r#"{"cookies": [{"name": "a", "category": "c", "type": "json", "schema_ref": "a"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.build(),
            Err(ManifestError::SchemaDirRequired(_))
        ));
    }

    #[test]
    fn invalid_inline_schema_names_the_cookie() {
        let manifest = RegistryManifest::from_json(
            r#"{"cookies": [{"name": "a", "category": "c", "type": "json",
                "schema": {"type": "nonsense"}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.build(),
            Err(ManifestError::Schema { name, .. }) if name == "a"
        ));
    }

    #[test]
    fn manifest_file_resolves_relative_schema_dir() {
        let dir = temp_dir("relative");
        std::fs::create_dir_all(dir.join("schemas")).unwrap();
        std::fs::write(
            dir.join("schemas").join("pref.schema.json"),
            r#"{"type": "object", "properties": {"theme": {"type": "string"}}}"#,
        )
        .unwrap();
        let manifest_path = dir.join("cookies.json");
        std::fs::write(
            &manifest_path,
            r#"{
                "strict_mode": true,
                "schema_dir": "schemas",
                "cookies": [
                    {"name": "pref", "category": "ui", "type": "json", "schema_ref": "pref"}
                ]
            }"#,
        )
        .unwrap();

        let registry = load_manifest(&manifest_path).unwrap();
        let validator = registry.definition_for("pref").unwrap().validator().unwrap();
        assert!(validator.parse(json!({"theme": "dark"})).is_ok());
        // strict_mode forbids undeclared properties.
        assert!(validator.parse(json!({"theme": "dark", "x": 1})).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_schema_ref_is_reported() {
        let dir = temp_dir("missing-ref");
        let manifest = RegistryManifest {
            strict_mode: false,
            schema_dir: Some(dir.clone()),
            cookies: vec![CookieSpec {
                name: "pref".to_string(),
                category: "ui".to_string(),
                representation: Representation::Structured,
                schema: None,
                schema_ref: Some("pref".to_string()),
            }],
        };

        assert!(matches!(
            manifest.build(),
            Err(ManifestError::MissingSchema { schema_ref, .. }) if schema_ref == "pref"
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_manifest_file_is_io_error() {
        let path = temp_dir("no-file").join("absent.json");
        assert!(matches!(
            load_shared_manifest(&path),
            Err(ManifestError::Io { .. })
        ));
    }

    #[test]
    fn unrelated_broken_schema_file_is_ignored() {
        let dir = temp_dir("unrelated");
        std::fs::write(dir.join("pref.schema.json"), r#"{"type": "object"}"#).unwrap();
        std::fs::write(dir.join("legacy.schema.json"), "{ not json").unwrap();
        let manifest = RegistryManifest {
            strict_mode: false,
            schema_dir: Some(dir.clone()),
            cookies: vec![CookieSpec {
                name: "pref".to_string(),
                category: "ui".to_string(),
                representation: Representation::Structured,
                schema: None,
                schema_ref: Some("pref".to_string()),
            }],
        };

        let registry = manifest.build().unwrap();
        let validator = registry.definition_for("pref").unwrap().validator().unwrap();
        assert!(validator.parse(json!({})).is_ok());
        assert!(validator.parse(json!([])).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
