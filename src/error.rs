//! Error taxonomy for parsing, resolution and synthesis.
//!
//! Every failure is fatal for the document being processed; nothing in the
//! engine retries or recovers locally.
use thiserror::Error;

use crate::schema::SchemaKind;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON, or a keyword whose value has the wrong JSON shape.
    #[error("invalid schema document: {0}")]
    Parse(String),

    /// The `type` keyword carried a token outside the eight known kinds.
    #[error("unknown schema type \"{value}\" at {path}")]
    TypeDecode { path: String, value: String },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("cannot merge zero oneOf variants for {name:?}")]
    Merge { name: String },

    #[error("array schema {name:?} has no items")]
    MissingItems { name: String },

    #[error("cannot name {kind} schema: no title, id, description or enclosing name")]
    UnnamedType { kind: SchemaKind },

    #[error("type {name} is already declared with a different shape")]
    ConflictingDeclaration { name: String },
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("$ref {reference:?}: segment {segment:?} not found in document")]
    MissingSegment { reference: String, segment: String },

    #[error("$ref {reference:?} does not point at a schema")]
    NotASchema { reference: String },

    #[error("$ref {reference:?} refers back to itself")]
    Cycle { reference: String },
}
