//! Normalization of a raw OWL/XML document into the IR
//!
//! The IR is built in three ordered passes:
//!
//! 1. declarations create empty resources, property entries and individuals
//! 2. `rdfs:label` / `rdfs:comment` / `rdfs:seeAlso` annotations refine them
//! 3. subclass axioms attach parents, children and properties
//!
//! Entries that reference something never declared are skipped with a
//! warning; normalization itself never fails.

use crate::datatype::proto_type;
use crate::model::{
    AnnotationKind, AxiomShape, DataHasValue, DataSomeValuesFrom, EntityRef, ObjectHasValue,
    ObjectSomeValuesFrom, RawOntology,
};
use owl2proto_ir::iri::is_owl_thing;
use owl2proto_ir::naming::{clean_string, name_from_iri, name_without_prefix};
use owl2proto_ir::{
    AnnotationAssertion, Entity, NamedIndividual, ObjectRelationship, Ontology, Relationship,
    Resource,
};
use tracing::{debug, info, warn};

/// Builds the IR from a raw document
#[derive(Debug, Clone)]
pub struct Normalizer {
    root_resource: String,
}

impl Normalizer {
    /// Create a normalizer for the given root-resource identifier
    pub fn new(root_resource: impl Into<String>) -> Self {
        Self {
            root_resource: root_resource.into(),
        }
    }

    /// Run all three passes and return the frozen IR
    pub fn normalize(&self, raw: &RawOntology) -> Ontology {
        let mut ontology = Ontology::new(&self.root_resource).with_prefixes(raw.prefix_table());
        let base = raw.base();

        self.declare(raw, base, &mut ontology);
        self.annotate(raw, base, &mut ontology);
        self.attach_axioms(raw, base, &mut ontology);

        info!(
            resources = ontology.len(),
            properties = ontology.annotations.len(),
            individuals = ontology.individuals.len(),
            "Normalized ontology"
        );

        if !ontology.resources().any(|r| ontology.is_root(r)) {
            warn!(
                root = %self.root_resource,
                "No resource matches the root resource name"
            );
        }

        ontology
    }

    /// Pass 1: declarations
    fn declare(&self, raw: &RawOntology, base: Option<&str>, ontology: &mut Ontology) {
        for declaration in &raw.declarations {
            if let Some(class) = &declaration.class {
                let Some(iri) = canonical(ontology, base, class) else {
                    continue;
                };
                if ontology.contains(&iri) {
                    debug!(iri = %iri, "Class declared more than once");
                    continue;
                }

                let name = clean_string(name_from_iri(&iri));
                ontology.insert(Resource::new(iri, name));
            }

            for property in [&declaration.data_property, &declaration.object_property]
                .into_iter()
                .flatten()
            {
                let Some(identifier) = property.identifier() else {
                    warn!("Property declaration without IRI");
                    continue;
                };

                ontology
                    .annotations
                    .entry(identifier.to_string())
                    .or_insert_with(|| {
                        AnnotationAssertion::new(identifier, clean_string(derived_name(property)))
                    });
            }

            if let Some(individual) = &declaration.named_individual {
                let Some(identifier) = individual.identifier() else {
                    warn!("Named individual declaration without IRI");
                    continue;
                };

                ontology
                    .individuals
                    .entry(identifier.to_string())
                    .or_insert_with(|| NamedIndividual::new(identifier));
            }
        }
    }

    /// Pass 2: label, comment and seeAlso annotations
    fn annotate(&self, raw: &RawOntology, base: Option<&str>, ontology: &mut Ontology) {
        for assertion in &raw.annotation_assertions {
            let kind = assertion.kind();
            if kind == AnnotationKind::Other {
                continue;
            }

            let literal = assertion.literal.value.trim();
            let resource_iri = resolve(ontology, base, assertion)
                .filter(|iri| ontology.contains(iri));
            let keys = lookup_keys(ontology, assertion);

            match kind {
                AnnotationKind::Label => {
                    let name = clean_string(literal);
                    if let Some(resource) = resource_iri.and_then(|iri| ontology.get_mut(&iri)) {
                        resource.name = name;
                    } else if let Some(entry) = annotation_mut(ontology, &keys) {
                        entry.name = name;
                    } else {
                        debug!(subject = ?assertion.identifier(), "Label on undeclared entity");
                    }
                }
                AnnotationKind::Comment => {
                    if let Some(resource) = resource_iri.and_then(|iri| ontology.get_mut(&iri)) {
                        resource.comments.push(literal.to_string());
                    } else if let Some(entry) = annotation_mut(ontology, &keys) {
                        entry.comments.push(literal.to_string());
                    } else {
                        debug!(subject = ?assertion.identifier(), "Comment on undeclared entity");
                    }
                }
                AnnotationKind::SeeAlso => {
                    let key = keys
                        .iter()
                        .find(|k| ontology.individuals.contains_key(k.as_str()))
                        .cloned();
                    match key.and_then(|k| ontology.individuals.get_mut(&k)) {
                        Some(individual) => individual.type_name = Some(literal.to_string()),
                        None => {
                            debug!(subject = ?assertion.identifier(), "seeAlso on non-individual");
                        }
                    }
                }
                AnnotationKind::Other => {}
            }
        }
    }

    /// Pass 3: subclass axioms
    fn attach_axioms(&self, raw: &RawOntology, base: Option<&str>, ontology: &mut Ontology) {
        for axiom in &raw.sub_class_of {
            let Some(shape) = axiom.shape() else {
                debug!("Skipping unsupported subclass axiom");
                continue;
            };

            match shape {
                AxiomShape::SubClass { class, parent } => {
                    attach_parent(ontology, base, class, parent);
                }
                AxiomShape::DataSomeValuesFrom {
                    class,
                    restrictions,
                } => {
                    if let Some(owner) = declared_owner(ontology, base, class) {
                        for restriction in restrictions {
                            attach_data_some_values_from(ontology, &owner, restriction);
                        }
                    }
                }
                AxiomShape::DataHasValue {
                    class,
                    restrictions,
                } => {
                    if let Some(owner) = declared_owner(ontology, base, class) {
                        for restriction in restrictions {
                            attach_data_has_value(ontology, &owner, restriction);
                        }
                    }
                }
                AxiomShape::ObjectSomeValuesFrom {
                    class,
                    restrictions,
                } => {
                    if let Some(owner) = declared_owner(ontology, base, class) {
                        for restriction in restrictions {
                            attach_object_some_values_from(ontology, base, &owner, restriction);
                        }
                    }
                }
                AxiomShape::ObjectHasValue {
                    class,
                    restrictions,
                } => {
                    if let Some(owner) = declared_owner(ontology, base, class) {
                        for restriction in restrictions {
                            attach_object_has_value(ontology, &owner, restriction);
                        }
                    }
                }
            }
        }
    }
}

/// Canonical IRI of an entity; failures are logged and yield `None`.
fn canonical<E: Entity + ?Sized>(
    ontology: &Ontology,
    base: Option<&str>,
    entity: &E,
) -> Option<String> {
    let resolved = resolve(ontology, base, entity);
    if resolved.is_none() {
        warn!(
            iri = ?entity.iri(),
            abbreviated_iri = ?entity.abbreviated_iri(),
            "Cannot resolve IRI"
        );
    }
    resolved
}

/// Canonical IRI of an entity. Relative `#Fragment` IRIs are resolved
/// against the document base.
fn resolve<E: Entity + ?Sized>(ontology: &Ontology, base: Option<&str>, entity: &E) -> Option<String> {
    if let (Some(fragment), Some(base)) = (entity.iri().filter(|i| i.starts_with('#')), base) {
        return Some(match base.strip_suffix('#') {
            Some(stem) => format!("{stem}{fragment}"),
            None => format!("{base}{fragment}"),
        });
    }

    ontology.prefixes.normalize(entity).ok()
}

/// All identifiers under which a property or individual may have been
/// registered: the forms present in the document plus their
/// abbreviation/expansion.
fn lookup_keys<E: Entity + ?Sized>(ontology: &Ontology, entity: &E) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(4);
    let mut push = |key: String| {
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    };

    if let Some(iri) = entity.iri() {
        push(iri.to_string());
        push(ontology.prefixes.abbreviate(iri));
    }
    if let Some(abbreviated) = entity.abbreviated_iri() {
        push(abbreviated.to_string());
        if let Ok(expanded) = ontology.prefixes.expand(abbreviated) {
            push(expanded);
        }
    }

    keys
}

fn annotation_mut<'a>(ontology: &'a mut Ontology, keys: &[String]) -> Option<&'a mut AnnotationAssertion> {
    let key = keys
        .iter()
        .find(|k| ontology.annotations.contains_key(k.as_str()))?
        .clone();
    ontology.annotations.get_mut(&key)
}

/// Name derived from an identifier: the local part of an abbreviated IRI,
/// otherwise the last IRI segment.
fn derived_name(entity: &EntityRef) -> &str {
    match (entity.abbreviated_iri(), entity.iri()) {
        (Some(abbreviated), _) => name_without_prefix(abbreviated),
        (None, Some(iri)) => name_from_iri(iri),
        (None, None) => "",
    }
}

/// Resolved display name of a property: its annotation name if present,
/// otherwise a name derived from the identifier.
fn property_name(ontology: &Ontology, property: &EntityRef) -> String {
    let keys = lookup_keys(ontology, property);
    match ontology.annotation(keys.iter().map(String::as_str)) {
        Some(entry) if !entry.name.is_empty() => entry.name.clone(),
        _ => clean_string(derived_name(property)),
    }
}

fn property_comment(ontology: &Ontology, property: &EntityRef) -> Option<String> {
    let keys = lookup_keys(ontology, property);
    ontology
        .annotation(keys.iter().map(String::as_str))
        .and_then(AnnotationAssertion::comment)
}

/// Canonical IRI of the axiom subject if it was declared.
fn declared_owner(ontology: &Ontology, base: Option<&str>, class: &EntityRef) -> Option<String> {
    let iri = canonical(ontology, base, class)?;
    if ontology.contains(&iri) {
        Some(iri)
    } else {
        warn!(iri = %iri, "Subclass axiom references undeclared class, skipping");
        None
    }
}

fn attach_parent(ontology: &mut Ontology, base: Option<&str>, class: &EntityRef, parent: &EntityRef) {
    if parent.identifier().is_some_and(is_owl_thing) {
        return;
    }

    let Some(parent_iri) = canonical(ontology, base, parent) else {
        return;
    };
    if is_owl_thing(&parent_iri) {
        return;
    }

    let Some(child_iri) = declared_owner(ontology, base, class) else {
        return;
    };
    if !ontology.contains(&parent_iri) {
        warn!(
            child = %child_iri,
            parent = %parent_iri,
            "Parent class was never declared, skipping"
        );
        return;
    }
    if parent_iri == child_iri {
        warn!(iri = %child_iri, "Class declared as its own parent, skipping");
        return;
    }

    if let Some(child) = ontology.get_mut(&child_iri) {
        if let Some(existing) = child.parent.as_ref().filter(|p| **p != parent_iri) {
            warn!(
                child = %child_iri,
                kept = %existing,
                ignored = %parent_iri,
                "Multiple parents are not supported, keeping the first"
            );
            return;
        }
        child.parent = Some(parent_iri.clone());
    }

    if let Some(parent) = ontology.get_mut(&parent_iri) {
        parent.add_child(child_iri);
    }
}

fn attach_data_some_values_from(
    ontology: &mut Ontology,
    owner: &str,
    restriction: &DataSomeValuesFrom,
) {
    let property = &restriction.data_property;
    let Some(identifier) = property.identifier() else {
        warn!(owner = %owner, "Data property without IRI, skipping");
        return;
    };

    let datatype = restriction
        .datatype
        .as_ref()
        .and_then(|dt| match (dt.abbreviated_iri(), dt.iri()) {
            (Some(abbreviated), _) => Some(abbreviated.to_string()),
            (None, Some(iri)) => Some(ontology.prefixes.abbreviate(iri)),
            (None, None) => None,
        });
    let Some(datatype) = datatype else {
        warn!(owner = %owner, property = %identifier, "Data property without datatype, skipping");
        return;
    };

    let relationship = data_relationship(ontology, owner, property, identifier, &datatype);
    if let Some(resource) = ontology.get_mut(owner) {
        resource.relationships.push(relationship);
    }
}

fn attach_data_has_value(ontology: &mut Ontology, owner: &str, restriction: &DataHasValue) {
    let property = &restriction.data_property;
    let Some(identifier) = property.identifier() else {
        warn!(owner = %owner, "Data property without IRI, skipping");
        return;
    };

    let value = restriction.literal.value.trim();
    let relationship = data_relationship(ontology, owner, property, identifier, value);
    if let Some(resource) = ontology.get_mut(owner) {
        resource.relationships.push(relationship);
    }
}

fn data_relationship(
    ontology: &Ontology,
    owner: &str,
    property: &EntityRef,
    identifier: &str,
    datatype: &str,
) -> Relationship {
    let relationship = Relationship::new(
        identifier,
        proto_type(datatype),
        property_name(ontology, property),
        owner,
    );

    match property_comment(ontology, property) {
        Some(comment) => relationship.with_comment(comment),
        None => relationship,
    }
}

fn attach_object_some_values_from(
    ontology: &mut Ontology,
    base: Option<&str>,
    owner: &str,
    restriction: &ObjectSomeValuesFrom,
) {
    let property = &restriction.object_property;
    let Some(identifier) = property.identifier() else {
        warn!(owner = %owner, "Object property without IRI, skipping");
        return;
    };

    let Some(target_iri) = canonical(ontology, base, &restriction.class) else {
        return;
    };
    let Some(target) = ontology.get(&target_iri) else {
        warn!(
            owner = %owner,
            target = %target_iri,
            "Object property points at undeclared class, skipping"
        );
        return;
    };

    let relationship = ObjectRelationship::new(
        identifier,
        property_name(ontology, property),
        owner,
        target_iri.as_str(),
        target.name.as_str(),
    );
    let relationship = match property_comment(ontology, property) {
        Some(comment) => relationship.with_comment(comment),
        None => relationship,
    };

    if let Some(resource) = ontology.get_mut(owner) {
        resource.object_relationships.push(relationship);
    }
}

fn attach_object_has_value(ontology: &mut Ontology, owner: &str, restriction: &ObjectHasValue) {
    let property = &restriction.object_property;
    let Some(identifier) = property.identifier() else {
        warn!(owner = %owner, "Object property without IRI, skipping");
        return;
    };
    let Some(individual_id) = restriction.named_individual.identifier() else {
        warn!(owner = %owner, property = %identifier, "Object value without individual, skipping");
        return;
    };

    let keys = lookup_keys(ontology, &restriction.named_individual);
    let datatype = ontology
        .individual(keys.iter().map(String::as_str))
        .and_then(|individual| individual.type_name.clone())
        .unwrap_or_else(|| individual_id.to_string());

    let relationship = data_relationship(ontology, owner, property, identifier, &datatype);
    if let Some(resource) = ontology.get_mut(owner) {
        resource.relationships.push(relationship);
    }
}
