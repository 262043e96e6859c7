//! Raw OWL/XML document model
//!
//! These types mirror the subset of the OWL/XML serialization the
//! generator understands. Elements outside that subset are ignored while
//! deserializing.

use owl2proto_ir::{Entity, PrefixTable};
use serde::Deserialize;

/// An `<Ontology>` document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOntology {
    #[serde(rename = "@ontologyIRI", default)]
    pub ontology_iri: Option<String>,

    #[serde(rename = "@xml:base", default)]
    pub xml_base: Option<String>,

    #[serde(rename = "Prefix", default)]
    pub prefixes: Vec<Prefix>,

    #[serde(rename = "Declaration", default)]
    pub declarations: Vec<Declaration>,

    #[serde(rename = "SubClassOf", default)]
    pub sub_class_of: Vec<SubClassOf>,

    #[serde(rename = "AnnotationAssertion", default)]
    pub annotation_assertions: Vec<AnnotationAssertion>,
}

/// `<Prefix name="ex" IRI="http://example.com/"/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Prefix {
    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@IRI", default)]
    pub iri: String,
}

/// Reference to a class, property, individual or datatype by IRI or
/// abbreviated IRI
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "@IRI", default)]
    pub iri: Option<String>,

    #[serde(rename = "@abbreviatedIRI", default)]
    pub abbreviated_iri: Option<String>,
}

/// A single declaration; exactly one of the fields is normally set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Declaration {
    #[serde(rename = "Class", default)]
    pub class: Option<EntityRef>,

    #[serde(rename = "ObjectProperty", default)]
    pub object_property: Option<EntityRef>,

    #[serde(rename = "DataProperty", default)]
    pub data_property: Option<EntityRef>,

    #[serde(rename = "NamedIndividual", default)]
    pub named_individual: Option<EntityRef>,
}

/// An `<AnnotationAssertion>` whose subject is given as `<IRI>` or `<AbbreviatedIRI>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationAssertion {
    #[serde(rename = "AnnotationProperty", default)]
    pub property: EntityRef,

    #[serde(rename = "IRI", default)]
    pub subject_iri: Option<String>,

    #[serde(rename = "AbbreviatedIRI", default)]
    pub subject_abbreviated_iri: Option<String>,

    #[serde(rename = "Literal", default)]
    pub literal: Literal,
}

/// A literal value; attributes such as `datatypeIRI` or `xml:lang` are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Literal {
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// A `<SubClassOf>` axiom
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubClassOf {
    #[serde(rename = "Class", default)]
    pub classes: Vec<EntityRef>,

    #[serde(rename = "DataSomeValuesFrom", default)]
    pub data_some_values_from: Vec<DataSomeValuesFrom>,

    #[serde(rename = "DataHasValue", default)]
    pub data_has_value: Vec<DataHasValue>,

    #[serde(rename = "ObjectSomeValuesFrom", default)]
    pub object_some_values_from: Vec<ObjectSomeValuesFrom>,

    #[serde(rename = "ObjectHasValue", default)]
    pub object_has_value: Vec<ObjectHasValue>,
}

/// `<DataSomeValuesFrom>`: a data property with a declared datatype
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSomeValuesFrom {
    #[serde(rename = "DataProperty", default)]
    pub data_property: EntityRef,

    #[serde(rename = "Datatype", default)]
    pub datatype: Option<EntityRef>,
}

/// `<DataHasValue>`: a data property whose type is given as a literal
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataHasValue {
    #[serde(rename = "DataProperty", default)]
    pub data_property: EntityRef,

    #[serde(rename = "Literal", default)]
    pub literal: Literal,
}

/// `<ObjectSomeValuesFrom>`: an object property pointing at a class
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectSomeValuesFrom {
    #[serde(rename = "ObjectProperty", default)]
    pub object_property: EntityRef,

    #[serde(rename = "Class", default)]
    pub class: EntityRef,
}

/// `<ObjectHasValue>`: an object property pointing at a named individual
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectHasValue {
    #[serde(rename = "ObjectProperty", default)]
    pub object_property: EntityRef,

    #[serde(rename = "NamedIndividual", default)]
    pub named_individual: EntityRef,
}

/// The recognised shapes of a subclass axiom. The first class of the axiom
/// is the subject in every shape.
#[derive(Debug, Clone, Copy)]
pub enum AxiomShape<'a> {
    /// Two classes: `parent` is the superclass of `class`
    SubClass {
        class: &'a EntityRef,
        parent: &'a EntityRef,
    },

    /// Class plus data properties with datatypes
    DataSomeValuesFrom {
        class: &'a EntityRef,
        restrictions: &'a [DataSomeValuesFrom],
    },

    /// Class plus data properties typed by a literal
    DataHasValue {
        class: &'a EntityRef,
        restrictions: &'a [DataHasValue],
    },

    /// Class plus object properties pointing at classes
    ObjectSomeValuesFrom {
        class: &'a EntityRef,
        restrictions: &'a [ObjectSomeValuesFrom],
    },

    /// Class plus object properties pointing at named individuals
    ObjectHasValue {
        class: &'a EntityRef,
        restrictions: &'a [ObjectHasValue],
    },
}

/// Annotation properties the normalizer interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Label,
    Comment,
    SeeAlso,
    Other,
}

const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

impl RawOntology {
    /// Prefix table built from the `<Prefix>` elements
    pub fn prefix_table(&self) -> PrefixTable {
        self.prefixes
            .iter()
            .map(|p| (p.name.clone(), p.iri.clone()))
            .collect()
    }

    /// Base against which relative (`#Name`) IRIs are resolved
    pub fn base(&self) -> Option<&str> {
        self.xml_base
            .as_deref()
            .or(self.ontology_iri.as_deref())
            .filter(|s| !s.is_empty())
    }
}

impl EntityRef {
    /// Reference by absolute IRI
    pub fn iri(iri: impl Into<String>) -> Self {
        Self {
            iri: Some(iri.into()),
            abbreviated_iri: None,
        }
    }

    /// Reference by abbreviated IRI
    pub fn abbreviated(abbreviated_iri: impl Into<String>) -> Self {
        Self {
            iri: None,
            abbreviated_iri: Some(abbreviated_iri.into()),
        }
    }
}

impl Entity for EntityRef {
    fn iri(&self) -> Option<&str> {
        self.iri.as_deref().filter(|s| !s.is_empty())
    }

    fn abbreviated_iri(&self) -> Option<&str> {
        self.abbreviated_iri.as_deref().filter(|s| !s.is_empty())
    }
}

impl Entity for AnnotationAssertion {
    fn iri(&self) -> Option<&str> {
        self.subject_iri
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn abbreviated_iri(&self) -> Option<&str> {
        self.subject_abbreviated_iri
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl AnnotationAssertion {
    /// Which annotation property this assertion uses
    pub fn kind(&self) -> AnnotationKind {
        let local = match (
            self.property.abbreviated_iri(),
            self.property.iri(),
        ) {
            (Some(abbreviated), _) => abbreviated.strip_prefix("rdfs:"),
            (None, Some(iri)) => iri.strip_prefix(RDFS),
            (None, None) => None,
        };

        match local {
            Some("label") => AnnotationKind::Label,
            Some("comment") => AnnotationKind::Comment,
            Some("seeAlso") => AnnotationKind::SeeAlso,
            _ => AnnotationKind::Other,
        }
    }
}

impl SubClassOf {
    /// Classify the axiom; `None` for shapes the generator does not interpret.
    pub fn shape(&self) -> Option<AxiomShape<'_>> {
        match self.classes.as_slice() {
            [class, parent] => Some(AxiomShape::SubClass { class, parent }),
            [class] if !self.data_some_values_from.is_empty() => {
                Some(AxiomShape::DataSomeValuesFrom {
                    class,
                    restrictions: &self.data_some_values_from,
                })
            }
            [class] if !self.data_has_value.is_empty() => Some(AxiomShape::DataHasValue {
                class,
                restrictions: &self.data_has_value,
            }),
            [class] if !self.object_some_values_from.is_empty() => {
                Some(AxiomShape::ObjectSomeValuesFrom {
                    class,
                    restrictions: &self.object_some_values_from,
                })
            }
            [class] if !self.object_has_value.is_empty() => Some(AxiomShape::ObjectHasValue {
                class,
                restrictions: &self.object_has_value,
            }),
            _ => None,
        }
    }
}
