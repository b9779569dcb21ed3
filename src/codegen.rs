//! Go source rendering for synthesized declarations.
//!
//! Struct bodies are column-aligned the way gofmt lays them out, so the text
//! is stable without piping it through an external formatter.
use crate::ir::{DeclBody, Field, Scalar, TypeDecl, TypeRef};

/// Accumulates rendered declarations, one blank line apart.
#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, decl: &TypeDecl) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(&render_declaration(decl));
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// One declaration, preceded by its schema comment when it carries one.
pub fn render_declaration(decl: &TypeDecl) -> String {
    let mut out = String::new();
    if let Some(doc) = &decl.doc {
        out.push_str(&format!("// {} defined from schema:\n", decl.name));
        for line in doc.lines() {
            out.push_str("// ");
            out.push_str(line);
            out.push('\n');
        }
    }
    match &decl.body {
        DeclBody::Struct(fields) => {
            out.push_str(&format!("type {} struct {{\n", decl.name));
            out.push_str(&render_fields(fields));
            out.push_str("}\n");
        }
        DeclBody::Map(value) => out.push_str(&format!("type {} map[string]{}\n", decl.name, render_type(value))),
        DeclBody::Slice(item) => out.push_str(&format!("type {} []{}\n", decl.name, render_type(item))),
        DeclBody::Alias(target) => out.push_str(&format!("type {} {}\n", decl.name, render_type(target))),
    }
    out
}

pub fn render_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Scalar(Scalar::Bool) => "bool".to_string(),
        TypeRef::Scalar(Scalar::Int) => "int".to_string(),
        TypeRef::Scalar(Scalar::Float) => "float64".to_string(),
        TypeRef::Scalar(Scalar::String) => "string".to_string(),
        TypeRef::Scalar(Scalar::Any) => "interface{}".to_string(),
        TypeRef::Named(name) => name.clone(),
        TypeRef::Pointer(name) => format!("*{name}"),
        TypeRef::Slice(item) => format!("[]{}", render_type(item)),
        TypeRef::Map(value) => format!("map[string]{}", render_type(value)),
    }
}

fn render_fields(fields: &[Field]) -> String {
    let rows: Vec<(&str, String, String)> = fields
        .iter()
        .map(|f| (f.ident.as_str(), render_type(&f.ty), struct_tag(f.key.as_deref())))
        .collect();
    let ident_width = rows.iter().map(|(ident, _, _)| ident.len()).max().unwrap_or(0);
    let type_width = rows.iter().map(|(_, ty, _)| ty.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (ident, ty, tag) in rows {
        out.push_str(&format!("\t{ident:<ident_width$} {ty:<type_width$} {tag}\n"));
    }
    out
}

fn struct_tag(key: Option<&str>) -> String {
    match key {
        Some(key) => format!("`json:\"{key},omitempty\" yaml:\"{key},omitempty\"`"),
        None => "`json:\",inline\" yaml:\",inline\"`".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, body: DeclBody) -> TypeDecl {
        TypeDecl { name: name.to_string(), body, doc: None }
    }

    #[test]
    fn renders_type_references() {
        let nested = TypeRef::Map(Box::new(TypeRef::Slice(Box::new(TypeRef::Pointer("Thing".into())))));
        assert_eq!(render_type(&nested), "map[string][]*Thing");
        assert_eq!(render_type(&TypeRef::open_map()), "map[string]interface{}");
        assert_eq!(render_type(&TypeRef::Scalar(Scalar::Float)), "float64");
    }

    #[test]
    fn aligns_struct_columns() {
        let thing = decl(
            "Thing",
            DeclBody::Struct(vec![
                Field::property("That".into(), "that", TypeRef::Scalar(Scalar::String)),
                Field::property("This".into(), "this", TypeRef::Scalar(Scalar::Int)),
            ]),
        );
        assert_eq!(
            render_declaration(&thing),
            "type Thing struct {\n\
             \tThat string `json:\"that,omitempty\" yaml:\"that,omitempty\"`\n\
             \tThis int    `json:\"this,omitempty\" yaml:\"this,omitempty\"`\n\
             }\n"
        );
    }

    #[test]
    fn inline_fields_use_inline_tags() {
        let shape = decl(
            "Shape",
            DeclBody::Struct(vec![Field::inline("Circle".into(), TypeRef::Pointer("Circle".into()))]),
        );
        assert_eq!(
            render_declaration(&shape),
            "type Shape struct {\n\tCircle *Circle `json:\",inline\" yaml:\",inline\"`\n}\n"
        );
    }

    #[test]
    fn comments_prefix_every_schema_line() {
        let stuff = TypeDecl {
            name: "Stuff".into(),
            body: DeclBody::Slice(TypeRef::Scalar(Scalar::String)),
            doc: Some("{\n  \"title\": \"stuff\"\n}".into()),
        };
        assert_eq!(
            render_declaration(&stuff),
            "// Stuff defined from schema:\n// {\n//   \"title\": \"stuff\"\n// }\ntype Stuff []string\n"
        );
    }

    #[test]
    fn codegen_separates_declarations() {
        let mut cg = Codegen::new();
        cg.emit(&decl("Tags", DeclBody::Slice(TypeRef::Scalar(Scalar::String))));
        cg.emit(&decl("Level", DeclBody::Alias(TypeRef::Scalar(Scalar::Int))));
        cg.emit(&decl("ThingMap", DeclBody::Map(TypeRef::Pointer("Thing".into()))));
        assert_eq!(
            cg.into_string(),
            "type Tags []string\n\ntype Level int\n\ntype ThingMap map[string]*Thing\n"
        );
    }
}
