//! Resource and relationship types for the Intermediate Representation
#![allow(clippy::must_use_candidate)] // Constructor helpers are clear at call sites without #[must_use].
#![allow(clippy::return_self_not_must_use)] // Fluent setters are designed for chaining.

use serde::{Deserialize, Serialize};

/// An ontology class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Canonical (absolute) IRI, unique key in the IR
    pub iri: String,

    /// Display name, from the IRI or an `rdfs:label`
    pub name: String,

    /// `rdfs:comment` lines in document order
    #[serde(default)]
    pub comments: Vec<String>,

    /// Canonical IRI of the parent class; `None` for a top-level class
    #[serde(default)]
    pub parent: Option<String>,

    /// Data properties declared directly on this class
    #[serde(default)]
    pub relationships: Vec<Relationship>,

    /// Object properties declared directly on this class
    #[serde(default)]
    pub object_relationships: Vec<ObjectRelationship>,

    /// Canonical IRIs of direct subclasses
    #[serde(default)]
    pub children: Vec<String>,
}

/// A data property use on a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Property identifier (IRI or abbreviated IRI as written)
    pub iri: String,

    /// Target schema type, already mapped from the ontology datatype
    pub field_type: String,

    /// Field display name
    pub name: String,

    /// Property comment, lines separated by `\n`
    pub comment: Option<String>,

    /// Canonical IRI of the owning class
    pub owner: String,
}

/// An object property use on a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRelationship {
    /// Object property identifier (IRI or abbreviated IRI as written)
    pub property: String,

    /// Resolved display name of the object property (e.g. `runsOn`)
    pub property_name: String,

    /// Canonical IRI of the owning class
    pub owner: String,

    /// Canonical IRI of the referenced class
    pub target: String,

    /// Display name of the referenced class
    pub target_name: String,

    /// Property comment, lines separated by `\n`
    pub comment: Option<String>,
}

/// Name and comments of a property that is not itself a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationAssertion {
    /// Property identifier as declared
    pub iri: String,

    /// Display name, from the identifier or an `rdfs:label`
    pub name: String,

    /// `rdfs:comment` lines in document order
    #[serde(default)]
    pub comments: Vec<String>,
}

/// A concrete instance used as a typed value in object-has-value axioms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedIndividual {
    /// Individual identifier as declared
    pub iri: String,

    /// Type recorded via `rdfs:seeAlso`
    pub type_name: Option<String>,
}

impl Resource {
    /// Create a top-level resource without properties
    pub fn new(iri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            name: name.into(),
            comments: Vec::new(),
            parent: None,
            relationships: Vec::new(),
            object_relationships: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the parent IRI
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a comment line
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    /// Add a data property
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Add an object property
    pub fn with_object_relationship(mut self, relationship: ObjectRelationship) -> Self {
        self.object_relationships.push(relationship);
        self
    }

    /// Record a direct subclass; repeated registrations are ignored.
    pub fn add_child(&mut self, iri: impl Into<String>) -> &mut Self {
        let iri = iri.into();
        if !self.children.contains(&iri) {
            self.children.push(iri);
        }
        self
    }

    /// A class with subclasses is abstract and rendered as a union.
    pub fn is_abstract(&self) -> bool {
        !self.children.is_empty()
    }
}

impl Relationship {
    /// Create a data property owned by `owner`
    pub fn new(
        iri: impl Into<String>,
        field_type: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            iri: iri.into(),
            field_type: field_type.into(),
            name: name.into(),
            comment: None,
            owner: owner.into(),
        }
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl ObjectRelationship {
    /// Create an object property from `owner` to `target`
    pub fn new(
        property: impl Into<String>,
        property_name: impl Into<String>,
        owner: impl Into<String>,
        target: impl Into<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            property_name: property_name.into(),
            owner: owner.into(),
            target: target.into(),
            target_name: target_name.into(),
            comment: None,
        }
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl AnnotationAssertion {
    /// Create an entry with a derived name and no comments
    pub fn new(iri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            name: name.into(),
            comments: Vec::new(),
        }
    }

    /// All comment lines joined by newlines, or `None` when there are none
    pub fn comment(&self) -> Option<String> {
        if self.comments.is_empty() {
            None
        } else {
            Some(self.comments.join("\n"))
        }
    }
}

impl NamedIndividual {
    /// Create an individual without a recorded type
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            type_name: None,
        }
    }
}
