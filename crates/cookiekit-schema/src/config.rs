/// Controls schema compilation and loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaConfig {
    /// When true, object schemas reject properties they do not declare.
    pub strict_mode: bool,
    /// Maximum number of diagnostics collected per failed validation.
    pub max_reported_errors: usize,
    /// Maximum number of schemas loaded from a directory.
    pub max_schemas_from_directory: usize,
    /// Maximum bytes allowed per schema file loaded from a directory.
    pub max_schema_file_size: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            max_reported_errors: 4,
            max_schemas_from_directory: 256,
            max_schema_file_size: 256 * 1024,
        }
    }
}
