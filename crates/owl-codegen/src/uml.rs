//! PlantUML class diagram emitter

use crate::{GENERATED_BY, Generator, Result};
use owl2proto_ir::Ontology;
use std::fmt::Write;
use tracing::info;

/// Renders the IR as a PlantUML class diagram.
///
/// Each class box lists only the class's own data properties; inheritance
/// and object properties are drawn as arrows.
#[derive(Debug, Clone, Copy, Default)]
pub struct UmlGenerator;

impl UmlGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for UmlGenerator {
    fn generate(&self, ontology: &Ontology) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "@startuml ontology")?;
        writeln!(out, "/' {GENERATED_BY} '/")?;

        for resource in ontology.resources() {
            writeln!(out)?;
            writeln!(out, "class {} {{", resource.name)?;
            for property in &resource.relationships {
                writeln!(out, "\t{}", property.name)?;
            }
            writeln!(out, "}}")?;

            let parent = resource.parent.as_deref().and_then(|iri| ontology.get(iri));
            if let Some(parent) = parent {
                writeln!(out)?;
                writeln!(out, "{} <|-- {}", parent.name, resource.name)?;
            }

            for object in &resource.object_relationships {
                writeln!(out)?;
                writeln!(
                    out,
                    "{} <-- {} : {}",
                    object.target_name, resource.name, object.property_name
                )?;
            }
        }

        writeln!(out, "@enduml")?;

        info!(classes = ontology.len(), "Generated PlantUML diagram");
        Ok(out)
    }
}
