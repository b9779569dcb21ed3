//! Type synthesis: schema node → type reference, emitting declarations on the way.
//!
//! Children are synthesized before the declaration that mentions them is
//! registered, so the registry order is always dependencies first. Map keys
//! are walked in sorted order, which makes the output independent of how the
//! input document happened to order its keys.
pub mod merge;

use std::collections::BTreeMap;

use crate::error::Error;
use crate::ir::{DeclBody, Field, Scalar, TypeDecl, TypeRef};
use crate::naming::{camel_case, pluralize};
use crate::registry::Registry;
use crate::schema::{Schema, SchemaKind};

pub struct Synthesizer {
    registry: Registry,
    comments: bool,
    strict_names: bool,
}

impl Synthesizer {
    pub fn new(comments: bool, strict_names: bool) -> Self {
        Synthesizer { registry: Registry::new(), comments, strict_names }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Synthesize a resolved node. Unnamed structs below it are an error.
    pub fn synthesize(&mut self, node: &Schema) -> Result<TypeRef, Error> {
        self.synthesize_with(node, "")
    }

    /// Synthesize a resolved node; `fallback` names it when it has no hint of its own.
    pub fn synthesize_with(&mut self, node: &Schema, fallback: &str) -> Result<TypeRef, Error> {
        match node.kind {
            SchemaKind::Object => self.synthesize_object(node, fallback),
            SchemaKind::Array => self.synthesize_array(node, fallback),
            SchemaKind::Any => self.synthesize_any(node, fallback),
            SchemaKind::Null => Ok(TypeRef::Scalar(Scalar::Any)),
            SchemaKind::Boolean => Ok(TypeRef::Scalar(Scalar::Bool)),
            SchemaKind::Integer => Ok(TypeRef::Scalar(Scalar::Int)),
            SchemaKind::Number => Ok(TypeRef::Scalar(Scalar::Float)),
            SchemaKind::String => Ok(TypeRef::Scalar(Scalar::String)),
        }
    }

    /// Synthesize a root `definitions` entry. Anything that does not come out
    /// as a named type gets a declaration of its own under the entry's name.
    pub fn synthesize_definition(&mut self, key: &str, node: &Schema) -> Result<TypeRef, Error> {
        let ty = self.synthesize_with(node, key)?;
        if ty.is_named() {
            return Ok(ty);
        }
        let name = self.type_name(node, key)?;
        self.declare(node, &name, DeclBody::Alias(ty))?;
        Ok(TypeRef::Named(name))
    }

    fn synthesize_object(&mut self, node: &Schema, fallback: &str) -> Result<TypeRef, Error> {
        if !node.properties.is_empty() {
            let name = self.type_name(node, fallback)?;
            let fields = self.property_fields(&node.properties)?;
            self.declare(node, &name, DeclBody::Struct(fields))?;
            return Ok(TypeRef::Pointer(name));
        }

        if !node.pattern_properties.is_empty() {
            let value_fallback = nested_hint(effective_hint(node, fallback), "value");
            let mut result = TypeRef::open_map();
            for value in node.pattern_properties.values() {
                let value_ty = self.synthesize_with(value, &value_fallback)?;
                result = match value_ty.declared_name() {
                    Some(base) => {
                        let name = format!("{base}Map");
                        self.declare(node, &name, DeclBody::Map(value_ty))?;
                        TypeRef::Named(name)
                    }
                    None => TypeRef::Map(Box::new(value_ty)),
                };
            }
            return Ok(result);
        }

        if node.additional_properties {
            Ok(TypeRef::open_map())
        } else {
            Ok(TypeRef::Scalar(Scalar::Any))
        }
    }

    fn synthesize_array(&mut self, node: &Schema, fallback: &str) -> Result<TypeRef, Error> {
        let items = node.items.as_deref().ok_or_else(|| Error::MissingItems {
            name: node.name_hint().to_string(),
        })?;
        let item_fallback = nested_hint(effective_hint(node, fallback), "item");
        let item_ty = self.synthesize_with(items, &item_fallback)?;

        let mut name = camel_case(node.name_hint());
        if name.is_empty() {
            if let Some(base) = item_ty.declared_name() {
                name = pluralize(base);
            }
        }
        if name.is_empty() {
            return Ok(TypeRef::Slice(Box::new(item_ty)));
        }
        self.declare(node, &name, DeclBody::Slice(item_ty))?;
        Ok(TypeRef::Named(name))
    }

    fn synthesize_any(&mut self, node: &Schema, fallback: &str) -> Result<TypeRef, Error> {
        if !node.one_of.is_empty() {
            return self.merge(node, &node.one_of, fallback);
        }
        // const and enum are only ever modelled as strings
        if node.has_const() || !node.enumeration.is_empty() {
            return Ok(TypeRef::Scalar(Scalar::String));
        }
        Ok(TypeRef::Scalar(Scalar::Any))
    }

    /// One field per property, in key order.
    fn property_fields(&mut self, properties: &BTreeMap<String, Schema>) -> Result<Vec<Field>, Error> {
        let mut fields = Vec::with_capacity(properties.len());
        for (key, value) in properties {
            let ty = self.synthesize_with(value, key)?;
            fields.push(Field::property(camel_case(key), key, ty));
        }
        Ok(fields)
    }

    fn type_name(&self, node: &Schema, fallback: &str) -> Result<String, Error> {
        let name = camel_case(effective_hint(node, fallback));
        if name.is_empty() {
            return Err(Error::UnnamedType { kind: node.kind });
        }
        Ok(name)
    }

    /// Register a declaration built from `node`. Repeats are dropped unless
    /// strict naming is on and the repeat has a different shape.
    fn declare(&mut self, node: &Schema, name: &str, body: DeclBody) -> Result<(), Error> {
        let doc = if self.comments {
            serde_json::to_string_pretty(node).ok()
        } else {
            None
        };
        let decl = TypeDecl { name: name.to_string(), body, doc };
        if self.registry.register(decl.clone()) || !self.strict_names {
            return Ok(());
        }
        match self.registry.get(name) {
            Some(existing) if existing.body != decl.body => {
                Err(Error::ConflictingDeclaration { name: decl.name })
            }
            _ => Ok(()),
        }
    }
}

fn effective_hint<'a>(node: &'a Schema, fallback: &'a str) -> &'a str {
    match node.name_hint() {
        "" => fallback,
        hint => hint,
    }
}

fn nested_hint(parent: &str, role: &str) -> String {
    if parent.is_empty() {
        String::new()
    } else {
        format!("{parent} {role}")
    }
}
