//! In-memory model of a parsed JSON Schema document.
//!
//! Decoding is two-staged: serde reads the keywords into a loose wire shape
//! (`SchemaDoc`), then [`Schema::from_value`] turns that into the typed tree,
//! rejecting unknown `type` tokens with the location they were found at.
//!
//! The document root is never linked from its children. The raw untyped tree
//! lives next to the typed root in [`Document`] and is handed to the resolver
//! together with it.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::Error;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// The `type` keyword. `Any` is what an absent keyword decodes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    #[default]
    Any,
    Array,
    Boolean,
    Integer,
    Number,
    Null,
    Object,
    String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "SchemaKind::is_any")]
    pub kind: SchemaKind,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(rename = "additionalProperties", skip_serializing_if = "is_false")]
    pub additional_properties: bool,
    #[serde(rename = "patternProperties", skip_serializing_if = "BTreeMap::is_empty")]
    pub pattern_properties: BTreeMap<String, Schema>,
    #[serde(rename = "$ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(rename = "oneOf", skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub constant: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<Value>,
}

/// A parsed document: the typed root plus the untyped tree it came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Schema,
    pub raw: Value,
}

/// Loose wire shape; every keyword optional, `type` kept as text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SchemaDoc {
    title: String,
    #[serde(alias = "$id")]
    id: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    description: String,
    #[serde(alias = "$defs")]
    definitions: BTreeMap<String, SchemaDoc>,
    properties: BTreeMap<String, SchemaDoc>,
    #[serde(rename = "additionalProperties")]
    additional_properties: AdditionalProperties,
    #[serde(rename = "patternProperties")]
    pattern_properties: BTreeMap<String, SchemaDoc>,
    #[serde(rename = "$ref")]
    reference: String,
    items: Option<Box<SchemaDoc>>,
    #[serde(rename = "oneOf")]
    one_of: Vec<SchemaDoc>,
    #[serde(rename = "const")]
    constant: Option<Value>,
    #[serde(rename = "enum")]
    enumeration: Vec<Value>,
}

/// `additionalProperties` is either a flag or a schema; a schema means "open".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AdditionalProperties {
    Flag(bool),
    Schema(Value),
}

impl Default for AdditionalProperties {
    fn default() -> Self {
        AdditionalProperties::Flag(false)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Any => "any",
            SchemaKind::Array => "array",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Null => "null",
            SchemaKind::Object => "object",
            SchemaKind::String => "string",
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, SchemaKind::Any)
    }
}

/// Only the seven tokens a document may spell out; `any` is implicit.
impl FromStr for SchemaKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "array" => Ok(SchemaKind::Array),
            "boolean" => Ok(SchemaKind::Boolean),
            "integer" => Ok(SchemaKind::Integer),
            "number" => Ok(SchemaKind::Number),
            "null" => Ok(SchemaKind::Null),
            "object" => Ok(SchemaKind::Object),
            "string" => Ok(SchemaKind::String),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchemaKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Schema {
    /// Best human label: title, else id, else description.
    pub fn name_hint(&self) -> &str {
        [&self.title, &self.id, &self.description]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn has_const(&self) -> bool {
        match &self.constant {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Decode one schema object (and everything below it) from an untyped tree.
    /// `location` is the pointer of `value` in its document, used in errors.
    pub fn from_value(value: &Value, location: &str) -> Result<Schema, Error> {
        if !value.is_object() {
            return Err(Error::Parse(format!(
                "expected a schema object, found {}",
                json_kind(value)
            )));
        }
        let doc: SchemaDoc = crate::path_de::from_value_with_path(value).map_err(Error::Parse)?;
        doc.into_schema(location)
    }
}

impl Document {
    /// Parse raw bytes into the typed tree plus the untyped tree.
    pub fn parse(bytes: &[u8]) -> Result<Document, Error> {
        let raw: Value = crate::path_de::from_slice_with_path(bytes).map_err(Error::Parse)?;
        let root = Schema::from_value(&raw, "#")?;
        Ok(Document { root, raw })
    }
}

impl SchemaDoc {
    fn into_schema(self, path: &str) -> Result<Schema, Error> {
        let kind = match self.kind {
            None => SchemaKind::Any,
            Some(token) => token.parse().map_err(|_| Error::TypeDecode {
                path: path.to_string(),
                value: token,
            })?,
        };
        let items = match self.items {
            Some(items) => Some(Box::new(items.into_schema(&format!("{path}/items"))?)),
            None => None,
        };
        let one_of = self
            .one_of
            .into_iter()
            .enumerate()
            .map(|(i, doc)| doc.into_schema(&format!("{path}/oneOf/{i}")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Schema {
            title: self.title,
            id: self.id,
            kind,
            description: self.description,
            definitions: convert_map(self.definitions, path, "definitions")?,
            properties: convert_map(self.properties, path, "properties")?,
            additional_properties: match self.additional_properties {
                AdditionalProperties::Flag(flag) => flag,
                AdditionalProperties::Schema(_) => true,
            },
            pattern_properties: convert_map(self.pattern_properties, path, "patternProperties")?,
            reference: self.reference,
            items,
            one_of,
            constant: self.constant,
            enumeration: self.enumeration,
        })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn convert_map(
    docs: BTreeMap<String, SchemaDoc>,
    path: &str,
    keyword: &str,
) -> Result<BTreeMap<String, Schema>, Error> {
    docs.into_iter()
        .map(|(key, doc)| {
            let child = doc.into_schema(&format!("{path}/{keyword}/{key}"))?;
            Ok((key, child))
        })
        .collect()
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
