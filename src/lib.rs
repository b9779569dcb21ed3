//! JSON Schema → typed data model (Go structs, maps, slices and aliases).
//!
//! Pipeline per document: [`schema::Document::parse`] → [`resolve::Resolver`]
//! (inline every `$ref`) → [`synth::Synthesizer`] (declarations into a shared
//! [`registry::Registry`]) → [`codegen::Codegen`] for text. [`Processor`] runs
//! the first three for a whole batch of documents.
pub mod codegen;
pub mod error;
pub mod ir;
pub mod naming;
pub mod path_de;
pub mod processor;
pub mod registry;
pub mod resolve;
pub mod schema;
pub mod synth;

pub use error::{Error, ResolutionError};
pub use processor::{Options, Output, Processor};
