//! At-most-once bookkeeping for emitted declarations.
//!
//! One registry spans a whole run so documents processed later reuse the types
//! earlier documents already declared. A repeated name is never compared
//! against the stored body here; the synthesizer decides whether that matters.
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::ir::TypeDecl;

#[derive(Debug, Default)]
pub struct Registry {
    declared: IndexMap<String, TypeDecl>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `decl`; true if its name was not declared yet. A repeat is dropped.
    pub fn register(&mut self, decl: TypeDecl) -> bool {
        match self.declared.entry(decl.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(decl);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.declared.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Declarations in first-registration order.
    pub fn declarations(&self) -> impl Iterator<Item = &TypeDecl> {
        self.declared.values()
    }

    /// Declarations registered after the first `mark` entries.
    pub fn since(&self, mark: usize) -> Vec<TypeDecl> {
        self.declared.values().skip(mark).cloned().collect()
    }

    /// Forget everything registered after the first `mark` entries.
    pub(crate) fn rollback(&mut self, mark: usize) {
        self.declared.truncate(mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{DeclBody, Scalar, TypeRef};

    fn slice_of(name: &str, scalar: Scalar) -> TypeDecl {
        TypeDecl {
            name: name.to_string(),
            body: DeclBody::Slice(TypeRef::Scalar(scalar)),
            doc: None,
        }
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = Registry::new();
        assert!(registry.register(slice_of("Foo", Scalar::String)));
        assert!(!registry.register(slice_of("Foo", Scalar::Int)));
        assert!(!registry.register(slice_of("Foo", Scalar::String)));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("Foo").unwrap().body,
            DeclBody::Slice(TypeRef::Scalar(Scalar::String))
        );
    }

    #[test]
    fn since_and_rollback_follow_registration_order() {
        let mut registry = Registry::new();
        registry.register(slice_of("A", Scalar::Bool));
        let mark = registry.len();
        registry.register(slice_of("B", Scalar::Bool));
        registry.register(slice_of("C", Scalar::Bool));

        let names: Vec<_> = registry.since(mark).into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["B", "C"]);

        registry.rollback(mark);
        assert!(registry.contains("A"));
        assert!(!registry.contains("B"));
        assert!(registry.register(slice_of("B", Scalar::Bool)));
    }
}
