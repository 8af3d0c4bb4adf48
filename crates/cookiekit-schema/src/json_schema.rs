use std::fmt;

use serde_json::{Map, Value};

use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError, ValidationError};
use crate::validator::Validator;

/// Compiled JSON Schema validator. Accepted values are returned unchanged.
pub struct JsonSchemaValidator {
    compiled: jsonschema::Validator,
    max_reported_errors: usize,
}

impl JsonSchemaValidator {
    /// Compile a schema from a JSON string with default config.
    pub fn from_json(schema_json: &str) -> Result<Self> {
        Self::from_json_with_config(schema_json, &SchemaConfig::default())
    }

    /// Compile a schema from a JSON string.
    pub fn from_json_with_config(schema_json: &str, config: &SchemaConfig) -> Result<Self> {
        let schema: Value = serde_json::from_str(schema_json)?;
        Self::with_config(&schema, config)
    }

    /// Compile a schema value with default config.
    pub fn new(schema: &Value) -> Result<Self> {
        Self::with_config(schema, &SchemaConfig::default())
    }

    /// Compile a schema value.
    pub fn with_config(schema: &Value, config: &SchemaConfig) -> Result<Self> {
        let compiled = if config.strict_mode {
            let mut closed = schema.clone();
            close_object_schemas(&mut closed);
            compile(&closed)?
        } else {
            compile(schema)?
        };

        Ok(Self {
            compiled,
            max_reported_errors: config.max_reported_errors.max(1),
        })
    }

    /// Returns true if `value` satisfies the schema.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.compiled.is_valid(value)
    }
}

impl Validator for JsonSchemaValidator {
    fn parse(&self, value: Value) -> std::result::Result<Value, ValidationError> {
        let diagnostics: Vec<String> = self
            .compiled
            .iter_errors(&value)
            .take(self.max_reported_errors)
            .map(|err| err.to_string())
            .collect();

        if diagnostics.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::from_diagnostics(diagnostics))
        }
    }
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator")
            .field("max_reported_errors", &self.max_reported_errors)
            .finish_non_exhaustive()
    }
}

fn compile(schema: &Value) -> Result<jsonschema::Validator> {
    jsonschema::validator_for(schema).map_err(|err| SchemaError::CompileFailed(err.to_string()))
}

/// How a keyword holds its subschemas.
#[derive(Clone, Copy)]
enum Nesting {
    /// One schema, or a tuple of schemas in older drafts.
    Single,
    /// An object whose values are schemas.
    Keyed,
    /// An array of schemas.
    List,
}

const SUBSCHEMA_KEYWORDS: [(&str, Nesting); 20] = [
    ("properties", Nesting::Keyed),
    ("patternProperties", Nesting::Keyed),
    ("dependentSchemas", Nesting::Keyed),
    ("$defs", Nesting::Keyed),
    ("definitions", Nesting::Keyed),
    ("propertyNames", Nesting::Single),
    ("additionalProperties", Nesting::Single),
    ("unevaluatedProperties", Nesting::Single),
    ("items", Nesting::Single),
    ("contains", Nesting::Single),
    ("additionalItems", Nesting::Single),
    ("unevaluatedItems", Nesting::Single),
    ("not", Nesting::Single),
    ("if", Nesting::Single),
    ("then", Nesting::Single),
    ("else", Nesting::Single),
    ("prefixItems", Nesting::List),
    ("allOf", Nesting::List),
    ("anyOf", Nesting::List),
    ("oneOf", Nesting::List),
];

/// Forbid undeclared properties on every object schema that leaves
/// `additionalProperties` unset.
fn close_object_schemas(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };
    if describes_object(map) {
        map.entry("additionalProperties").or_insert(Value::Bool(false));
    }

    for (keyword, nesting) in SUBSCHEMA_KEYWORDS {
        let Some(child) = map.get_mut(keyword) else {
            continue;
        };
        match (nesting, child) {
            (Nesting::Keyed, Value::Object(children)) => {
                children.values_mut().for_each(close_object_schemas);
            }
            (Nesting::Single | Nesting::List, Value::Array(children)) => {
                children.iter_mut().for_each(close_object_schemas);
            }
            (Nesting::Single, child) => close_object_schemas(child),
            _ => {}
        }
    }
}

fn describes_object(map: &Map<String, Value>) -> bool {
    let is_object = |kind: &Value| kind.as_str() == Some("object");
    match map.get("type") {
        Some(Value::Array(kinds)) => kinds.iter().any(is_object),
        Some(kind) => is_object(kind),
        None => [
            "properties",
            "patternProperties",
            "additionalProperties",
            "unevaluatedProperties",
            "required",
            "dependentRequired",
            "dependentSchemas",
            "propertyNames",
        ]
        .iter()
        .any(|keyword| map.contains_key(*keyword)),
    }
}
