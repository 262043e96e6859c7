#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # owl2proto-ir
//!
//! Intermediate Representation of an ontology class hierarchy.
//!
//! This crate holds the resolved, typed view of an ontology that the
//! emitters consume: resources keyed by canonical IRI, their data and
//! object relationships, the prefix table used to (un)abbreviate IRIs,
//! and the traversal helpers that walk the parent/child relation.

/// IRI normalization and abbreviation against a prefix table.
pub mod iri;
/// Resource and relationship types stored in the IR.
pub mod model;
/// Identifier helpers shared by the normalizer and the emitters.
pub mod naming;
/// Container for the frozen IR.
pub mod ontology;
/// Ancestry, leaf collection and property flattening.
pub mod traversal;

/// IRI helpers and the entity abstraction used by raw documents.
pub use iri::{Entity, PrefixTable};
/// IR node types.
pub use model::{AnnotationAssertion, NamedIndividual, ObjectRelationship, Relationship, Resource};
/// Primary IR container.
pub use ontology::Ontology;
/// Traversal entry point.
pub use traversal::Hierarchy;

use thiserror::Error;

/// Errors that can occur when working with the IR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Resource not found: {iri}")]
    ResourceNotFound { iri: String },

    #[error("Cycle detected in class hierarchy at '{iri}' (path: {path})")]
    CycleDetected { iri: String, path: String },

    #[error("Unknown prefix '{prefix}'")]
    UnknownPrefix { prefix: String },

    #[error("Invalid IRI '{iri}': {reason}")]
    InvalidIri { iri: String, reason: String },
}

impl Error {
    /// Build a resource-not-found error for the given IRI.
    pub fn resource_not_found(iri: impl Into<String>) -> Self {
        Self::ResourceNotFound { iri: iri.into() }
    }

    /// Build a cycle error from the IRI that was revisited and the walk so far.
    pub fn cycle_detected(iri: impl Into<String>, path: &[&str]) -> Self {
        Self::CycleDetected {
            iri: iri.into(),
            path: path.join(" -> "),
        }
    }

    /// Build an unknown-prefix error.
    pub fn unknown_prefix(prefix: impl Into<String>) -> Self {
        Self::UnknownPrefix {
            prefix: prefix.into(),
        }
    }

    /// Build an invalid-IRI error with the reason it could not be resolved.
    pub fn invalid_iri(iri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIri {
            iri: iri.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for IR operations.
pub type Result<T> = std::result::Result<T, Error>;
