//! Flattening of `oneOf` into one struct.
//!
//! Properties shared by two or more variants move into a base struct named
//! after the parent; whatever is left of each variant becomes an extension
//! struct, inlined into the base as one field per non-empty extension.
use std::collections::{BTreeMap, HashMap};

use super::{Synthesizer, effective_hint};
use crate::error::Error;
use crate::ir::{DeclBody, Field, TypeRef};
use crate::naming::camel_case;
use crate::schema::{Schema, SchemaKind};

impl Synthesizer {
    pub fn merge(&mut self, parent: &Schema, variants: &[Schema], fallback: &str) -> Result<TypeRef, Error> {
        let parent_name = effective_hint(parent, fallback);
        match variants {
            [] => return Err(Error::Merge { name: parent_name.to_string() }),
            [only] => return self.synthesize_with(only, parent_name),
            _ => {}
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for variant in variants {
            for key in variant.properties.keys() {
                *counts.entry(key.as_str()).or_default() += 1;
            }
        }

        let mut base = Schema {
            description: parent_name.to_string(),
            kind: SchemaKind::Object,
            ..Schema::default()
        };
        let mut extensions: BTreeMap<String, Schema> = BTreeMap::new();
        for (index, variant) in variants.iter().enumerate() {
            let variant_name = match variant.name_hint() {
                "" => format!("{parent_name} variant {}", index + 1),
                hint => hint.to_string(),
            };
            let extension = extensions.entry(variant_name.clone()).or_insert_with(|| Schema {
                description: variant_name,
                kind: SchemaKind::Object,
                ..Schema::default()
            });
            for (key, property) in &variant.properties {
                if counts[key.as_str()] > 1 {
                    // the first variant to declare a shared property defines it
                    base.properties.entry(key.clone()).or_insert_with(|| property.clone());
                } else {
                    extension.properties.insert(key.clone(), property.clone());
                }
            }
        }

        let name = self.type_name(&base, "")?;
        let mut fields = self.property_fields(&base.properties)?;
        for (variant_name, extension) in &extensions {
            if extension.properties.is_empty() {
                continue;
            }
            let ty = self.synthesize_with(extension, variant_name)?;
            fields.push(Field::inline(camel_case(variant_name), ty));
        }
        self.declare(&base, &name, DeclBody::Struct(fields))?;
        Ok(TypeRef::Named(name))
    }
}
