//! # owl2proto-codegen
//!
//! Renders the ontology IR into text artifacts.
//!
//! - [`ProtoGenerator`] emits a protobuf schema: one message per leaf
//!   class with its flattened fields, one `oneof` message per abstract
//!   class.
//! - [`UmlGenerator`] emits a PlantUML class diagram of the same hierarchy.
//!
//! Both walk resources in canonical IRI order, so output is byte-identical
//! for identical input and configuration.

pub mod config;
pub mod field_number;
pub mod proto;
pub mod relation;
pub mod uml;

pub use config::GeneratorConfig;
pub use field_number::{FieldNumberAssigner, MAX_FIELD_NUMBER, field_number};
pub use proto::ProtoGenerator;
pub use relation::{ObjectField, RelationRole};
pub use uml::UmlGenerator;

use owl2proto_ir::Ontology;
use thiserror::Error;

/// First line of every generated file
pub const GENERATED_BY: &str = "Auto-generated code by owl2proto (https://github.com/oxisto/owl2proto)";

/// A renderer from the IR to a text artifact
pub trait Generator {
    /// Render the whole ontology
    fn generate(&self, ontology: &Ontology) -> Result<String>;
}

/// Errors that can occur during generation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Field numbers exhausted: counter reached {counter}, numbers from 19000 on are reserved")]
    FieldNumbersExhausted { counter: u32 },

    #[error(transparent)]
    Ir(#[from] owl2proto_ir::Error),

    #[error("Failed to render output: {0}")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
