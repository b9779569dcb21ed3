//! `$ref` inlining.
//!
//! A single depth-first pass rewrites every referencing node into an owned
//! copy of its (recursively resolved) target. Pointers are walked first over
//! the typed tree; segments the typed model has no slot for fall back to the
//! raw document, whose subtree is decoded as a fresh schema.
use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, ResolutionError};
use crate::schema::{Document, Schema};

/// Resolution context for one document. Targets are looked up in the document
/// as it was parsed, so the pass never reads a node it is rewriting.
pub struct Resolver<'a> {
    root: &'a Schema,
    raw: &'a Value,
    in_flight: Vec<String>,
}

#[derive(Clone, Copy)]
enum Cursor<'a> {
    Node(&'a Schema),
    Map(&'a BTreeMap<String, Schema>),
}

impl<'a> Resolver<'a> {
    pub fn new(document: &'a Document) -> Self {
        Resolver { root: &document.root, raw: &document.raw, in_flight: Vec::new() }
    }

    /// Inline every `$ref` at or below `node`.
    pub fn resolve(&mut self, node: &mut Schema) -> Result<(), Error> {
        for (key, child) in node.properties.iter_mut() {
            self.resolve(child)?;
            if child.name_hint().is_empty() {
                child.title = key.clone();
            }
        }
        for child in node.pattern_properties.values_mut() {
            self.resolve(child)?;
        }
        if let Some(items) = node.items.as_deref_mut() {
            self.resolve(items)?;
        }
        for child in node.one_of.iter_mut() {
            self.resolve(child)?;
        }

        if !node.reference.is_empty() {
            let target = self.dereference(&node.reference)?;
            *node = target;
        }
        Ok(())
    }

    /// Produce a resolved, owned copy of what `reference` points at.
    fn dereference(&mut self, reference: &str) -> Result<Schema, Error> {
        if self.in_flight.iter().any(|r| r == reference) {
            return Err(ResolutionError::Cycle { reference: reference.to_string() }.into());
        }
        let segments = split_pointer(reference);

        let mut target = match self.walk_structural(&segments) {
            Some(Cursor::Node(node)) => node.clone(),
            Some(Cursor::Map(_)) => {
                return Err(ResolutionError::NotASchema { reference: reference.to_string() }.into());
            }
            None => self.materialize(reference, &segments)?,
        };

        self.in_flight.push(reference.to_string());
        let resolved = self.resolve(&mut target);
        self.in_flight.pop();
        resolved?;
        Ok(target)
    }

    /// Walk the typed tree; `None` when some segment has no typed counterpart.
    fn walk_structural(&self, segments: &[String]) -> Option<Cursor<'a>> {
        let mut cursor = Cursor::Node(self.root);
        for segment in segments {
            cursor = match (cursor, segment.as_str()) {
                (_, "#") => Cursor::Node(self.root),
                (Cursor::Node(node), "definitions" | "$defs") => Cursor::Map(&node.definitions),
                (Cursor::Node(node), "properties") => Cursor::Map(&node.properties),
                (Cursor::Node(node), "patternProperties") => Cursor::Map(&node.pattern_properties),
                (Cursor::Node(node), "items") => Cursor::Node(node.items.as_deref()?),
                (Cursor::Map(map), key) => Cursor::Node(map.get(key)?),
                (Cursor::Node(_), _) => return None,
            };
        }
        Some(cursor)
    }

    /// Locate the pointer in the raw document and decode it as a schema. An
    /// untitled result is named after the last pointer segment.
    fn materialize(&self, reference: &str, segments: &[String]) -> Result<Schema, Error> {
        let mut cursor = self.raw;
        for segment in segments.iter().filter(|s| s.as_str() != "#") {
            let next = match cursor {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            cursor = next.ok_or_else(|| ResolutionError::MissingSegment {
                reference: reference.to_string(),
                segment: segment.clone(),
            })?;
        }
        let mut target = Schema::from_value(cursor, reference)?;
        if target.name_hint().is_empty() {
            if let Some(last) = segments.last() {
                target.description = last.clone();
            }
        }
        Ok(target)
    }
}

/// Resolve a whole document, returning the rewritten root.
pub fn resolve_document(document: &Document) -> Result<Schema, Error> {
    let mut root = document.root.clone();
    Resolver::new(document).resolve(&mut root)?;
    Ok(root)
}

fn split_pointer(reference: &str) -> Vec<String> {
    reference
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}
