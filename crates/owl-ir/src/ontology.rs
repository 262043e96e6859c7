//! Container for the resolved ontology
#![allow(clippy::must_use_candidate)] // Accessors are clear at call sites without #[must_use].
#![allow(clippy::return_self_not_must_use)] // Fluent builder methods return Self for ergonomics.

use crate::iri::PrefixTable;
use crate::model::{AnnotationAssertion, NamedIndividual, Resource};
use crate::traversal::Hierarchy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The frozen IR produced by the normalizer.
///
/// Resources are kept in a sorted map so that every walk over them happens
/// in canonical IRI order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ontology {
    /// Classes keyed by canonical IRI
    pub resources: BTreeMap<String, Resource>,

    /// Property names and comments keyed by the identifier as declared
    pub annotations: BTreeMap<String, AnnotationAssertion>,

    /// Named individuals keyed by the identifier as declared
    pub individuals: BTreeMap<String, NamedIndividual>,

    /// Prefixes declared by the source document
    pub prefixes: PrefixTable,

    /// Designated root resource (IRI, abbreviated IRI or display name)
    pub root_resource: String,
}

impl Ontology {
    /// Create an empty ontology with the given root-resource identifier
    pub fn new(root_resource: impl Into<String>) -> Self {
        Self {
            root_resource: root_resource.into(),
            ..Self::default()
        }
    }

    /// Set the prefix table
    pub fn with_prefixes(mut self, prefixes: PrefixTable) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Add a resource, replacing any previous one with the same IRI
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.insert(resource);
        self
    }

    /// Insert a resource keyed by its IRI
    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        self.resources.insert(resource.iri.clone(), resource)
    }

    /// Look up a resource by canonical IRI
    pub fn get(&self, iri: &str) -> Option<&Resource> {
        self.resources.get(iri)
    }

    /// Mutable lookup by canonical IRI
    pub fn get_mut(&mut self, iri: &str) -> Option<&mut Resource> {
        self.resources.get_mut(iri)
    }

    /// Look up a resource that must exist
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] when the IRI is not in the IR.
    pub fn require(&self, iri: &str) -> Result<&Resource> {
        self.get(iri).ok_or_else(|| Error::resource_not_found(iri))
    }

    /// Whether a resource with this IRI exists
    pub fn contains(&self, iri: &str) -> bool {
        self.resources.contains_key(iri)
    }

    /// Iterate resources in canonical IRI order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Number of resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the ontology has no resources
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Whether `resource` is the designated root resource.
    pub fn is_root(&self, resource: &Resource) -> bool {
        let root = self.root_resource.as_str();
        !root.is_empty()
            && (resource.iri == root
                || resource.name == root
                || self.prefixes.abbreviate(&resource.iri) == root)
    }

    /// Look up the annotation entry of a property by any of its identifiers.
    pub fn annotation<'a, I>(&self, identifiers: I) -> Option<&AnnotationAssertion>
    where
        I: IntoIterator<Item = &'a str>,
    {
        identifiers
            .into_iter()
            .find_map(|id| self.annotations.get(id))
    }

    /// Look up a named individual by any of its identifiers.
    pub fn individual<'a, I>(&self, identifiers: I) -> Option<&NamedIndividual>
    where
        I: IntoIterator<Item = &'a str>,
    {
        identifiers
            .into_iter()
            .find_map(|id| self.individuals.get(id))
    }

    /// Traversal helpers over this ontology
    pub fn hierarchy(&self) -> Hierarchy<'_> {
        Hierarchy::new(self)
    }
}
