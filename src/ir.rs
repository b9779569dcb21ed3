// Language-neutral declarations produced by synthesis. No serde_json::Value here.

/// Leaf types every target language has a spelling for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Bool,
    Int,
    Float,
    String,
    Any,                     // open / untyped value
}

/// How a parent refers to the type of one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Scalar(Scalar),
    Named(String),           // by value, to a declared type
    Pointer(String),         // owned handle to a declared struct
    Slice(Box<TypeRef>),
    Map(Box<TypeRef>),       // string-keyed
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclBody {
    Struct(Vec<Field>),      // fields in emission order
    Map(TypeRef),
    Slice(TypeRef),
    Alias(TypeRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ident: String,
    pub ty: TypeRef,
    pub key: Option<String>, // serialized property name; None = inlined extension
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub body: DeclBody,
    pub doc: Option<String>, // pretty-printed originating schema fragment
}

impl TypeRef {
    pub fn open_map() -> Self {
        TypeRef::Map(Box::new(TypeRef::Scalar(Scalar::Any)))
    }

    /// Name of the declared type this refers to, if it refers to one directly.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) | TypeRef::Pointer(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        self.declared_name().is_some()
    }
}

impl Field {
    pub fn property(ident: String, key: &str, ty: TypeRef) -> Self {
        Field { ident, ty, key: Some(key.to_string()) }
    }

    pub fn inline(ident: String, ty: TypeRef) -> Self {
        Field { ident, ty, key: None }
    }
}
