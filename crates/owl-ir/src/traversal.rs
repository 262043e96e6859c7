//! Hierarchy traversal for the IR
//!
//! Every walk carries the set of IRIs already visited on the current path
//! and fails with [`Error::CycleDetected`] instead of recursing forever.

use crate::model::{ObjectRelationship, Relationship, Resource};
use crate::ontology::Ontology;
use crate::{Error, Result};
use std::collections::HashSet;
use tracing::{trace, warn};

/// Read-only traversal view over an [`Ontology`]
#[derive(Debug, Clone, Copy)]
pub struct Hierarchy<'a> {
    ontology: &'a Ontology,
}

impl<'a> Hierarchy<'a> {
    /// Create a traversal view
    pub fn new(ontology: &'a Ontology) -> Self {
        Self { ontology }
    }

    /// The resource itself followed by its parent, grandparent, ... up to a
    /// top-level class.
    ///
    /// A parent IRI that is not in the IR ends the chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if `iri` is unknown and
    /// [`Error::CycleDetected`] if the parent relation loops.
    pub fn ancestry(&self, iri: &str) -> Result<Vec<&'a Resource>> {
        let start = self.ontology.require(iri)?;
        self.walk_up(start, |_| false)
    }

    /// Display names along [`Hierarchy::ancestry`], e.g.
    /// `["VirtualMachine", "Compute", "Resource"]`.
    ///
    /// # Errors
    ///
    /// See [`Hierarchy::ancestry`].
    pub fn resource_type_chain(&self, iri: &str) -> Result<Vec<&'a str>> {
        Ok(self
            .ancestry(iri)?
            .into_iter()
            .map(|r| r.name.as_str())
            .collect())
    }

    /// Canonical IRIs of all ancestors, nearest first, excluding the
    /// resource itself.
    ///
    /// # Errors
    ///
    /// See [`Hierarchy::ancestry`].
    pub fn parent_iris(&self, iri: &str) -> Result<Vec<&'a str>> {
        Ok(self
            .ancestry(iri)?
            .into_iter()
            .skip(1)
            .map(|r| r.iri.as_str())
            .collect())
    }

    /// Whether the resource is the designated root or one of its
    /// descendants at any depth.
    ///
    /// An unknown IRI is not below the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] if the parent relation loops.
    pub fn is_at_or_below_root(&self, iri: &str) -> Result<bool> {
        let Some(start) = self.ontology.get(iri) else {
            warn!(iri = %iri, "Could not find resource for root check");
            return Ok(false);
        };

        Ok(self
            .walk_up(start, |_| false)?
            .into_iter()
            .any(|r| self.ontology.is_root(r)))
    }

    /// Own data properties followed by those inherited up to (and including)
    /// the root resource or a top-level class.
    ///
    /// An unknown IRI yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] if the parent relation loops.
    pub fn all_data_properties(&self, iri: &str) -> Result<Vec<&'a Relationship>> {
        Ok(self
            .inheritance_chain(iri)?
            .into_iter()
            .flat_map(|r| r.relationships.iter())
            .collect())
    }

    /// Own object properties followed by those inherited up to (and
    /// including) the root resource or a top-level class.
    ///
    /// An unknown IRI yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] if the parent relation loops.
    pub fn all_object_properties(&self, iri: &str) -> Result<Vec<&'a ObjectRelationship>> {
        Ok(self
            .inheritance_chain(iri)?
            .into_iter()
            .flat_map(|r| r.object_relationships.iter())
            .collect())
    }

    /// All transitive leaf descendants of a resource, in child order.
    ///
    /// A resource without children is its own single leaf. Leaves reachable
    /// through more than one path are reported once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if `iri` is unknown and
    /// [`Error::CycleDetected`] if the child relation loops.
    pub fn leaves(&self, iri: &str) -> Result<Vec<&'a Resource>> {
        let start = self.ontology.require(iri)?;
        let mut leaves = Vec::new();
        let mut seen = HashSet::new();
        let mut path = Vec::new();
        self.collect_leaves(start, &mut path, &mut seen, &mut leaves)?;
        Ok(leaves)
    }

    fn collect_leaves(
        &self,
        resource: &'a Resource,
        path: &mut Vec<&'a str>,
        seen: &mut HashSet<&'a str>,
        leaves: &mut Vec<&'a Resource>,
    ) -> Result<()> {
        if path.contains(&resource.iri.as_str()) {
            path.push(&resource.iri);
            return Err(Error::cycle_detected(&resource.iri, path));
        }

        if !resource.is_abstract() {
            if seen.insert(&resource.iri) {
                leaves.push(resource);
            }
            return Ok(());
        }

        path.push(&resource.iri);
        for child_iri in &resource.children {
            match self.ontology.get(child_iri) {
                Some(child) => self.collect_leaves(child, path, seen, leaves)?,
                None => warn!(
                    parent = %resource.iri,
                    child = %child_iri,
                    "Skipping unknown subclass"
                ),
            }
        }
        path.pop();

        Ok(())
    }

    /// Resources whose properties a class inherits: itself, then parents
    /// until the root resource or a class without parent is reached.
    fn inheritance_chain(&self, iri: &str) -> Result<Vec<&'a Resource>> {
        match self.ontology.get(iri) {
            Some(start) => self.walk_up(start, |r| self.ontology.is_root(r)),
            None => {
                warn!(iri = %iri, "Could not find resource for property lookup");
                Ok(Vec::new())
            }
        }
    }

    /// Walk the parent relation starting at `start`. The walk includes the
    /// resource for which `stop` returns true and ends there.
    fn walk_up<F>(&self, start: &'a Resource, stop: F) -> Result<Vec<&'a Resource>>
    where
        F: Fn(&Resource) -> bool,
    {
        let mut chain = vec![start];
        let mut visited: HashSet<&str> = HashSet::from([start.iri.as_str()]);
        let mut current = start;

        while !stop(current) {
            let Some(parent_iri) = current.parent.as_deref() else {
                break;
            };

            if !visited.insert(parent_iri) {
                let mut path: Vec<&str> = chain.iter().map(|r| r.iri.as_str()).collect();
                path.push(parent_iri);
                return Err(Error::cycle_detected(parent_iri, &path));
            }

            match self.ontology.get(parent_iri) {
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => {
                    warn!(
                        iri = %current.iri,
                        parent = %parent_iri,
                        "Parent resource not found, ending traversal"
                    );
                    break;
                }
            }
        }

        trace!(
            start = %start.iri,
            depth = chain.len(),
            "Walked up class hierarchy"
        );

        Ok(chain)
    }
}
