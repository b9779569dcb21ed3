//! Per-run driver: parse, resolve and synthesize documents against one shared registry.
use crate::error::Error;
use crate::ir::{TypeDecl, TypeRef};
use crate::registry::Registry;
use crate::resolve::Resolver;
use crate::schema::Document;
use crate::synth::Synthesizer;

#[derive(Debug, Clone)]
pub struct Options {
    /// Attach the originating schema fragment to every declaration.
    pub comments: bool,
    /// Name hint for an untitled top-level schema.
    pub root_name: String,
    /// Also declare every root `definitions` entry, used or not.
    pub emit_definitions: bool,
    /// Fail when a type name is reused for a different shape.
    pub strict_names: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            comments: true,
            root_name: "Root".to_string(),
            emit_definitions: false,
            strict_names: false,
        }
    }
}

/// What one document contributed.
#[derive(Debug, Clone)]
pub struct Output {
    /// Type that stands for the whole document.
    pub root: TypeRef,
    /// Declarations first registered by this document, dependencies first.
    pub declarations: Vec<TypeDecl>,
}

pub struct Processor {
    options: Options,
    synth: Synthesizer,
}

impl Processor {
    pub fn new(options: Options) -> Self {
        let synth = Synthesizer::new(options.comments, options.strict_names);
        Processor { options, synth }
    }

    pub fn registry(&self) -> &Registry {
        self.synth.registry()
    }

    /// Process one schema document. On failure nothing it declared is kept.
    pub fn process(&mut self, bytes: &[u8]) -> Result<Output, Error> {
        let document = Document::parse(bytes)?;
        let mark = self.synth.registry().len();
        match self.synthesize_document(&document) {
            Ok(root) => Ok(Output { root, declarations: self.synth.registry().since(mark) }),
            Err(err) => {
                self.synth.registry_mut().rollback(mark);
                Err(err)
            }
        }
    }

    fn synthesize_document(&mut self, document: &Document) -> Result<TypeRef, Error> {
        let mut resolver = Resolver::new(document);

        if self.options.emit_definitions {
            for (key, definition) in &document.root.definitions {
                let mut definition = definition.clone();
                resolver.resolve(&mut definition)?;
                if definition.name_hint().is_empty() {
                    definition.title = key.clone();
                }
                self.synth.synthesize_definition(key, &definition)?;
            }
        }

        let mut root = document.root.clone();
        resolver.resolve(&mut root)?;
        self.synth.synthesize_with(&root, &self.options.root_name)
    }
}
