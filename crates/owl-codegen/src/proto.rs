//! Protobuf schema emitter
//!
//! Every resource becomes one message, visited in canonical IRI order:
//!
//! - a leaf message carries its ancestry as message options, then all data
//!   properties and object properties flattened along the inheritance chain
//! - an abstract message is a single `oneof type` over its transitive leaves
//!
//! In full semantic mode IRIs, parents and prefixes are emitted as
//! `owl.*` options (see `owl/owl.proto`); otherwise only the
//! `resource_type_names` chain is emitted.

use crate::config::GeneratorConfig;
use crate::field_number::FieldNumberAssigner;
use crate::relation::RelationRole;
use crate::{GENERATED_BY, Generator, Result};
use owl2proto_ir::iri::OWL_THING_ABBREVIATED;
use owl2proto_ir::naming::to_snake_case;
use owl2proto_ir::{Hierarchy, ObjectRelationship, Ontology, Relationship, Resource};
use std::fmt::Write;
use tracing::{debug, info};

const TOP_DATA_PROPERTY: &str = "owl:topDataProperty";
const TOP_OBJECT_PROPERTY: &str = "owl:topObjectProperty";
const REQUIRED: &str = "(buf.validate.field).required = true";

/// Renders the IR as a `.proto` file
#[derive(Debug, Clone, Default)]
pub struct ProtoGenerator {
    config: GeneratorConfig,
}

impl ProtoGenerator {
    /// Create a generator with the given configuration
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn write_options_header(&self, out: &mut String, ontology: &Ontology) -> Result<()> {
        if self.config.full_semantic_mode {
            writeln!(out)?;
            writeln!(out, "import \"owl/owl.proto\";")?;
            writeln!(out)?;
            writeln!(out, "option (owl.meta) = {{")?;
            writeln!(out, "\tprefixes: [")?;
            let count = ontology.prefixes.len();
            for (i, (short, iri)) in ontology.prefixes.iter().enumerate() {
                let separator = if i + 1 < count { "," } else { "" };
                writeln!(out, "\t\t{{ prefix: \"{short}\" iri: \"{iri}\" }}{separator}")?;
            }
            writeln!(out, "\t]")?;
            writeln!(out, "}};")?;
        } else {
            writeln!(out)?;
            writeln!(out, "extend google.protobuf.MessageOptions {{")?;
            writeln!(out, "\trepeated string resource_type_names = 60000;")?;
            writeln!(out, "}}")?;
        }

        Ok(())
    }

    fn write_message(
        &self,
        out: &mut String,
        ontology: &Ontology,
        resource: &Resource,
    ) -> Result<()> {
        let hierarchy = ontology.hierarchy();

        writeln!(out)?;
        if resource.is_abstract() {
            writeln!(
                out,
                "// {} is an abstract class in our ontology, it cannot be instantiated but acts as an \"interface\".",
                resource.name
            )?;
        } else {
            writeln!(
                out,
                "// {} is an entity class in our ontology. It can be instantiated and contains all of its properties as well of its implemented interfaces.",
                resource.name
            )?;
        }
        for line in resource.comments.iter().flat_map(|c| c.lines()) {
            writeln!(out, "// {line}")?;
        }
        writeln!(out, "message {} {{", resource.name)?;

        // Counter is scoped to this message
        let mut numbers =
            FieldNumberAssigner::new(self.config.deterministic_field_numbers, &resource.name);

        if resource.is_abstract() {
            self.write_union(out, hierarchy, resource, &mut numbers)?;
        } else {
            let chain = hierarchy.resource_type_chain(&resource.iri)?;
            self.write_class_options(out, ontology, hierarchy, resource, &chain)?;
            self.write_data_fields(out, ontology, hierarchy, resource, &chain, &mut numbers)?;
            self.write_object_fields(out, ontology, hierarchy, resource, &chain, &mut numbers)?;
        }

        writeln!(out, "}}")?;
        Ok(())
    }

    fn write_union(
        &self,
        out: &mut String,
        hierarchy: Hierarchy<'_>,
        resource: &Resource,
        numbers: &mut FieldNumberAssigner,
    ) -> Result<()> {
        let leaves = hierarchy.leaves(&resource.iri)?;
        debug!(resource = %resource.name, leaves = leaves.len(), "Rendering union");

        writeln!(out, "\toneof type {{")?;
        for leaf in leaves {
            let field = to_snake_case(&leaf.name);
            let chain = hierarchy.resource_type_chain(&leaf.iri)?;
            let number = numbers.assign(&field, &chain)?;
            writeln!(out, "\t\t{} {field} = {number};", leaf.name)?;
        }
        writeln!(out, "\t}}")?;

        Ok(())
    }

    fn write_class_options(
        &self,
        out: &mut String,
        ontology: &Ontology,
        hierarchy: Hierarchy<'_>,
        resource: &Resource,
        chain: &[&str],
    ) -> Result<()> {
        if self.config.full_semantic_mode {
            writeln!(
                out,
                "\toption (owl.class).iri = \"{}\";",
                ontology.prefixes.abbreviate(&resource.iri)
            )?;
            for parent in hierarchy.parent_iris(&resource.iri)? {
                writeln!(
                    out,
                    "\toption (owl.class).parent = \"{}\";",
                    ontology.prefixes.abbreviate(parent)
                )?;
            }
            writeln!(out, "\toption (owl.class).parent = \"{OWL_THING_ABBREVIATED}\";")?;
        } else {
            for name in chain {
                writeln!(out, "\toption (resource_type_names) = \"{name}\";")?;
            }
        }

        Ok(())
    }

    fn write_data_fields(
        &self,
        out: &mut String,
        ontology: &Ontology,
        hierarchy: Hierarchy<'_>,
        resource: &Resource,
        chain: &[&str],
        numbers: &mut FieldNumberAssigner,
    ) -> Result<()> {
        let mut properties = hierarchy.all_data_properties(&resource.iri)?;
        properties.sort_by(|a, b| a.name.cmp(&b.name));

        for property in properties {
            if property.field_type.is_empty() || property.name.is_empty() {
                debug!(resource = %resource.name, iri = %property.iri, "Skipping untyped data property");
                continue;
            }

            let field = to_snake_case(&property.name);
            let number = numbers.assign(&field, &key(chain, &property.name))?;

            if let Some(comment) = &property.comment {
                for line in comment.lines() {
                    writeln!(out, "\t// {}", line.trim())?;
                }
            }
            writeln!(
                out,
                "\t{} {field} = {number}{};",
                property.field_type,
                field_options(&self.data_options(ontology, property))
            )?;
        }

        Ok(())
    }

    fn write_object_fields(
        &self,
        out: &mut String,
        ontology: &Ontology,
        hierarchy: Hierarchy<'_>,
        resource: &Resource,
        chain: &[&str],
        numbers: &mut FieldNumberAssigner,
    ) -> Result<()> {
        let mut properties = hierarchy.all_object_properties(&resource.iri)?;
        properties.sort_by(|a, b| {
            a.target_name
                .cmp(&b.target_name)
                .then_with(|| a.property_name.cmp(&b.property_name))
        });

        for property in properties {
            if property.target_name.is_empty() || property.property.is_empty() {
                continue;
            }

            let role = RelationRole::resolve(&property.property_name);
            let below_root = hierarchy.is_at_or_below_root(&property.target)?;
            let field = role.field(&property.target_name, below_root);
            let number = numbers.assign(&field.name, &key(chain, &property.target_name))?;

            if let Some(comment) = &property.comment {
                for line in comment.lines() {
                    writeln!(out, "\t// {}", line.trim())?;
                }
            }
            writeln!(
                out,
                "\t{field} = {number}{};",
                field_options(&self.object_options(ontology, property))
            )?;
        }

        Ok(())
    }

    fn data_options(&self, ontology: &Ontology, property: &Relationship) -> Vec<String> {
        let mut options = Vec::new();
        if property.name == "name" || property.name == "id" {
            options.push(REQUIRED.to_string());
        }

        if self.config.full_semantic_mode {
            options.extend(semantic_options(
                ontology,
                &property.iri,
                TOP_DATA_PROPERTY,
                &property.owner,
            ));
        }

        options
    }

    fn object_options(&self, ontology: &Ontology, property: &ObjectRelationship) -> Vec<String> {
        if self.config.full_semantic_mode {
            semantic_options(ontology, &property.property, TOP_OBJECT_PROPERTY, &property.owner)
        } else {
            Vec::new()
        }
    }
}

impl Generator for ProtoGenerator {
    fn generate(&self, ontology: &Ontology) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "// {GENERATED_BY}")?;
        writeln!(out)?;
        writeln!(out, "{}", self.config.header.trim_end())?;
        self.write_options_header(&mut out, ontology)?;

        for resource in ontology.resources() {
            self.write_message(&mut out, ontology, resource)?;
        }

        info!(
            messages = ontology.len(),
            deterministic = self.config.deterministic_field_numbers,
            full_semantic = self.config.full_semantic_mode,
            "Generated protobuf schema"
        );

        Ok(out)
    }
}

/// Field-number key: the ancestry chain followed by the field's last part
fn key<'a>(chain: &[&'a str], last: &'a str) -> Vec<&'a str> {
    let mut parts = chain.to_vec();
    parts.push(last);
    parts
}

fn semantic_options(ontology: &Ontology, iri: &str, parent: &str, owner: &str) -> Vec<String> {
    vec![
        format!("(owl.property).iri = \"{}\"", ontology.prefixes.abbreviate(iri)),
        format!("(owl.property).parent = \"{parent}\""),
        format!(
            "(owl.property).class_iri = \"{}\"",
            ontology.prefixes.abbreviate(owner)
        ),
    ]
}

/// ` [ a ]` for one option, a bracketed block for several, nothing for none
fn field_options(options: &[String]) -> String {
    match options {
        [] => String::new(),
        [single] => format!(" [ {single} ]"),
        many => format!(" [\n\t\t{}\n\t]", many.join(",\n\t\t")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owl2proto_ir::PrefixTable;

    const EX: &str = "http://example.com/";

    fn iri(name: &str) -> String {
        format!("{EX}{name}")
    }

    fn ontology() -> Ontology {
        let prefixes: PrefixTable = [("ex", EX), ("prop", "http://example.com/prop/")]
            .into_iter()
            .collect();

        let mut resource = Resource::new(iri("Resource"), "Resource")
            .with_comment("Anything deployable.")
            .with_relationship(Relationship::new("prop:name", "string", "name", iri("Resource")));
        resource.add_child(iri("Storage"));

        let storage = Resource::new(iri("Storage"), "Storage")
            .with_parent(iri("Resource"))
            .with_relationship(
                Relationship::new("prop:size", "int32", "size", iri("Storage"))
                    .with_comment("Size in GiB.\nRounded up."),
            )
            .with_object_relationship(ObjectRelationship::new(
                "prop:hasMultiple",
                "hasMultiple",
                iri("Storage"),
                iri("Resource"),
                "Resource",
            ));

        Ontology::new("Resource")
            .with_prefixes(prefixes)
            .with_resource(resource)
            .with_resource(storage)
    }

    fn condensed_ascending() -> ProtoGenerator {
        ProtoGenerator::new(GeneratorConfig::new().condensed().ascending_field_numbers())
    }

    #[test]
    fn test_condensed_leaf_message() {
        let output = condensed_ascending().generate(&ontology()).unwrap();

        let expected = "\
message Storage {
\toption (resource_type_names) = \"Storage\";
\toption (resource_type_names) = \"Resource\";
\tstring name = 1 [ (buf.validate.field).required = true ];
\t// Size in GiB.
\t// Rounded up.
\tint32 size = 2;
\trepeated string resource_ids = 3;
}
";
        assert!(output.contains(expected), "unexpected output:\n{output}");
    }

    #[test]
    fn test_abstract_message_is_union() {
        let output = condensed_ascending().generate(&ontology()).unwrap();

        let expected = "\
// Resource is an abstract class in our ontology, it cannot be instantiated but acts as an \"interface\".
// Anything deployable.
message Resource {
\toneof type {
\t\tStorage storage = 1;
\t}
}
";
        assert!(output.contains(expected), "unexpected output:\n{output}");
    }

    #[test]
    fn test_header_and_extension() {
        let output = condensed_ascending().generate(&ontology()).unwrap();

        assert!(output.starts_with(&format!("// {GENERATED_BY}\n\nsyntax = \"proto3\";\n")));
        assert!(output.contains("extend google.protobuf.MessageOptions {"));
        assert!(!output.contains("owl.meta"));
    }

    #[test]
    fn test_full_semantic_options() {
        let generator =
            ProtoGenerator::new(GeneratorConfig::new().ascending_field_numbers());
        let output = generator.generate(&ontology()).unwrap();

        assert!(output.contains("import \"owl/owl.proto\";"));
        assert!(output.contains("\t\t{ prefix: \"ex\" iri: \"http://example.com/\" },\n"));
        assert!(output.contains("\t\t{ prefix: \"prop\" iri: \"http://example.com/prop/\" }\n\t]\n};"));
        assert!(output.contains(
            "\toption (owl.class).iri = \"ex:Storage\";\n\
             \toption (owl.class).parent = \"ex:Resource\";\n\
             \toption (owl.class).parent = \"owl:Thing\";\n"
        ));
        assert!(output.contains(
            "\tint32 size = 2 [\n\
             \t\t(owl.property).iri = \"prop:size\",\n\
             \t\t(owl.property).parent = \"owl:topDataProperty\",\n\
             \t\t(owl.property).class_iri = \"ex:Storage\"\n\
             \t];"
        ));
        assert!(output.contains("(owl.property).parent = \"owl:topObjectProperty\""));
        assert!(!output.contains("resource_type_names"));
    }

    #[test]
    fn test_required_first_in_semantic_options() {
        let generator = ProtoGenerator::new(GeneratorConfig::new());
        let output = generator.generate(&ontology()).unwrap();

        assert!(output.contains("\tstring name = "));
        assert!(output.contains(" [\n\t\t(buf.validate.field).required = true,\n\t\t(owl.property).iri = \"prop:name\","));
    }

    #[test]
    fn test_deterministic_output_is_stable() {
        let generator = ProtoGenerator::new(GeneratorConfig::new());
        let first = generator.generate(&ontology()).unwrap();
        let second = generator.generate(&ontology()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cycle_is_an_error() {
        let mut ontology = ontology();
        ontology
            .get_mut(&iri("Resource"))
            .unwrap()
            .parent = Some(iri("Storage"));

        let result = condensed_ascending().generate(&ontology);
        assert!(matches!(
            result,
            Err(crate::Error::Ir(owl2proto_ir::Error::CycleDetected { .. }))
        ));
    }

    #[test]
    fn test_dangling_object_target_is_embedded() {
        let mut ontology = ontology();
        ontology
            .get_mut(&iri("Storage"))
            .unwrap()
            .object_relationships
            .push(ObjectRelationship::new(
                "prop:runsOn",
                "runsOn",
                iri("Storage"),
                iri("Gone"),
                "Gone",
            ));

        let output = condensed_ascending().generate(&ontology).unwrap();
        assert!(output.contains("\tGone gone = 3;\n\trepeated string resource_ids = 4;\n"));
    }

    #[test]
    fn test_field_options_layout() {
        assert_eq!(field_options(&[]), "");
        assert_eq!(field_options(&["a = 1".to_string()]), " [ a = 1 ]");
        assert_eq!(
            field_options(&["a = 1".to_string(), "b = 2".to_string()]),
            " [\n\t\ta = 1,\n\t\tb = 2\n\t]"
        );
    }
}
