//! Configuration file for the `owl2proto` binary

use anyhow::{Context, Result};
use owl2proto_codegen::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output path of the `proto` command
pub const DEFAULT_PROTO_OUTPUT: &str = "api/ontology.proto";

/// Default output path of the `uml` command
pub const DEFAULT_UML_OUTPUT: &str = "api/ontology.puml";

/// Values read from `--config <file.yaml>`.
///
/// Every field is optional; flags given on the command line win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub root_resource_name: Option<String>,
    pub header_file: Option<PathBuf>,
    pub deterministic_field_numbers: Option<bool>,
    pub full_semantic_mode: Option<bool>,
    pub proto_output_path: Option<PathBuf>,
    pub uml_output_path: Option<PathBuf>,
}

impl CliConfig {
    /// Read a YAML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse YAML configuration text. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Root resource from the flag, falling back to the file
    pub fn root_resource_name(&self, flag: Option<String>) -> Result<String> {
        flag.or_else(|| self.root_resource_name.clone())
            .filter(|name| !name.is_empty())
            .context("No root resource given: pass --root-resource-name or set root_resource_name in the config file")
    }

    /// Generator settings with flags applied over file values.
    ///
    /// The header file, if any, is read here.
    pub fn generator_config(
        &self,
        header_file: Option<PathBuf>,
        deterministic_field_numbers: Option<bool>,
        full_semantic_mode: Option<bool>,
    ) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::new();

        if let Some(deterministic) =
            deterministic_field_numbers.or(self.deterministic_field_numbers)
        {
            config = config.deterministic_field_numbers(deterministic);
        }
        if let Some(full) = full_semantic_mode.or(self.full_semantic_mode) {
            config = config.full_semantic_mode(full);
        }
        if let Some(path) = header_file.or_else(|| self.header_file.clone()) {
            let header = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read header file {}", path.display()))?;
            config = config.header(header);
        }

        Ok(config)
    }

    pub fn proto_output_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.proto_output_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROTO_OUTPUT))
    }

    pub fn uml_output_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.uml_output_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UML_OUTPUT))
    }
}
