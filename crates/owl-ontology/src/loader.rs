//! OWL/XML loader

use crate::model::RawOntology;
use crate::normalizer::Normalizer;
use crate::{Error, Result};
use owl2proto_ir::Ontology;
use std::path::Path;
use tracing::{info, trace};

/// Reads OWL/XML documents and normalizes them into the IR
#[derive(Debug, Clone)]
pub struct OntologyLoader {
    root_resource: String,
}

impl OntologyLoader {
    /// Create a loader for the given root-resource identifier
    pub fn new(root_resource: impl Into<String>) -> Self {
        Self {
            root_resource: root_resource.into(),
        }
    }

    /// Load and normalize an ontology file
    pub fn load_from_file(&self, path: &Path) -> Result<Ontology> {
        let raw = self.load_raw_from_file(path)?;
        let ontology = Normalizer::new(&self.root_resource).normalize(&raw);

        info!(
            path = %path.display(),
            resources = ontology.len(),
            "Loaded ontology"
        );

        Ok(ontology)
    }

    /// Load and normalize an ontology from an OWL/XML string
    pub fn load_from_str(&self, xml: &str) -> Result<Ontology> {
        let raw = Self::parse_str(xml)?;
        Ok(Normalizer::new(&self.root_resource).normalize(&raw))
    }

    /// Read an ontology file without normalizing it
    pub fn load_raw_from_file(&self, path: &Path) -> Result<RawOntology> {
        trace!("Loading ontology from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    /// Deserialize an OWL/XML document
    pub fn parse_str(xml: &str) -> Result<RawOntology> {
        let raw: RawOntology = quick_xml::de::from_str(xml)
            .map_err(|e| Error::InvalidFormat(format!("OWL/XML parse error: {e}")))?;

        trace!(
            prefixes = raw.prefixes.len(),
            declarations = raw.declarations.len(),
            axioms = raw.sub_class_of.len(),
            annotations = raw.annotation_assertions.len(),
            "Parsed OWL/XML document"
        );

        Ok(raw)
    }

    /// The root-resource identifier used for normalization
    pub fn root_resource(&self) -> &str {
        &self.root_resource
    }
}
