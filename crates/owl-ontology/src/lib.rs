//! # owl2proto-ontology
//!
//! OWL/XML document model, loader and normalization into the IR.
//!
//! The normalizer builds the IR in three passes over a raw document:
//! declarations → label/comment annotations → subclass axioms.

pub mod datatype;
pub mod loader;
pub mod model;
pub mod normalizer;

pub use datatype::proto_type;
pub use loader::OntologyLoader;
pub use model::{AxiomShape, RawOntology};
pub use normalizer::Normalizer;

use thiserror::Error;

/// Errors that can occur when reading an ontology
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid ontology format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
