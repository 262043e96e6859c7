//! Generator configuration options

use serde::{Deserialize, Serialize};

/// Header used when no header file is configured
pub const DEFAULT_HEADER: &str = "syntax = \"proto3\";";

/// Configuration for schema generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Hash field numbers from the ancestry chain and field name (default: true).
    /// When disabled, fields are numbered 1, 2, 3, ... per message.
    pub deterministic_field_numbers: bool,
    /// Emit IRIs, prefixes and parents as `owl.*` options (default: true).
    /// When disabled only the resource type names are emitted.
    pub full_semantic_mode: bool,
    /// Text placed verbatim after the generated-by line
    pub header: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            deterministic_field_numbers: true,
            full_semantic_mode: true,
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose between hashed and ascending field numbers
    pub fn deterministic_field_numbers(mut self, deterministic: bool) -> Self {
        self.deterministic_field_numbers = deterministic;
        self
    }

    /// Number fields 1, 2, 3, ... in emission order
    pub fn ascending_field_numbers(mut self) -> Self {
        self.deterministic_field_numbers = false;
        self
    }

    /// Choose between full semantic options and the condensed form
    pub fn full_semantic_mode(mut self, full: bool) -> Self {
        self.full_semantic_mode = full;
        self
    }

    /// Emit only `resource_type_names` options
    pub fn condensed(mut self) -> Self {
        self.full_semantic_mode = false;
        self
    }

    /// Set the header block
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}
