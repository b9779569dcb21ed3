//! Minimal CLI: schema files → Go type declarations (files or stdout)
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser};
use colored::Colorize;
use slipschema::codegen::render_declaration;
use slipschema::ir::TypeDecl;
use slipschema::{Options, Processor};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Go structs, maps and slices from JSON Schema documents
#[derive(Parser, Debug)]
#[command(name = "slipschema", version)]
pub struct CommandLineInterface {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    #[command(flatten)]
    type_settings: TypeSettings,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema files. May be literal paths, quoted glob patterns or '-' for stdin
    #[arg(num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output directory for go files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// package namespace for go files
    #[arg(long, default_value = "main")]
    pkg: String,

    /// force overwriting existing go files
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// print go code to stdout rather than files
    #[arg(long, default_value_t = false)]
    stdout: bool,

    /// enable/disable schema comments on each type
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    comments: bool,
}

#[derive(Args, Debug, Clone)]
struct TypeSettings {
    /// name for an untitled top-level schema
    #[arg(long, default_value = "Root")]
    root_type: String,

    /// also declare every entry under the root `definitions`
    #[arg(long, default_value_t = false)]
    definitions: bool,

    /// fail when one type name is produced for two different shapes
    #[arg(long, default_value_t = false)]
    strict_names: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(&str, &[u8]) -> Result<()>) -> Result<()> {
        for source in &self.input {
            if source == "-" {
                let mut bytes = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut bytes)
                    .context("failed to read schema from stdin")?;
                apply("<stdin>", &bytes)?;
                continue;
            }
            for source_path in resolve_file_path_patterns([source])? {
                let source_path_str = source_path.to_string_lossy().to_string();
                let bytes = std::fs::read(&source_path)
                    .with_context(|| format!("failed to read source file ({source_path_str})"))?;
                apply(&source_path_str, &bytes)?;
            }
        }
        Ok(())
    }
}

impl OutputSettings {
    fn write(&self, declarations: &[TypeDecl], command: &str) -> Result<()> {
        if self.stdout {
            for decl in declarations {
                println!("{}", render_declaration(decl));
            }
            return Ok(());
        }

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output directory {}", self.dir.display()))?;
        for decl in declarations {
            let path = self.dir.join(format!("{}.go", decl.name));
            if !self.overwrite && path.exists() {
                eprintln!(
                    "{} {} already exists, skipping without --overwrite",
                    "warning:".yellow().bold(),
                    path.display()
                );
                continue;
            }
            std::fs::write(&path, go_file(&self.pkg, command, decl))
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{} {}", "wrote".green(), path.display());
        }
        Ok(())
    }
}

impl TypeSettings {
    fn options(&self, comments: bool) -> Options {
        Options {
            comments,
            root_name: self.root_type.clone(),
            emit_definitions: self.definitions,
            strict_names: self.strict_names,
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        let command = std::env::args().collect::<Vec<_>>().join(" ");
        let mut processor = Processor::new(self.type_settings.options(self.output_settings.comments));
        self.input_settings.load_process(|source_name, bytes| {
            let output = processor
                .process(bytes)
                .with_context(|| format!("failed to process schema ({source_name})"))?;
            self.output_settings.write(&output.declarations, &command)
        })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn go_file(package: &str, command: &str, decl: &TypeDecl) -> String {
    format!(
        "// Code generated by slipschema. DO NOT EDIT.\n// Command: {command}\n\npackage {package}\n\n{}",
        render_declaration(decl)
    )
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(Path::new(pattern).to_path_buf());
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STRUCT_SLICE: &str = r#"{
        "title": "stuff",
        "type": "array",
        "items": {
            "title": "thing",
            "type": "object",
            "properties": {
                "this": { "type": "integer" },
                "that": { "type": "string" }
            }
        }
    }"#;

    fn cli(args: &[&str]) -> CommandLineInterface {
        CommandLineInterface::try_parse_from(std::iter::once("slipschema").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn writes_one_file_per_declaration() {
        let tmp = TempDir::new().unwrap();
        let schema = tmp.path().join("stuff.json");
        std::fs::write(&schema, STRUCT_SLICE).unwrap();
        let out = tmp.path().join("gen");

        cli(&["--dir", out.to_str().unwrap(), "--pkg", "models", "--comments=false", schema.to_str().unwrap()])
            .run()
            .unwrap();

        let thing = std::fs::read_to_string(out.join("Thing.go")).unwrap();
        assert!(thing.starts_with("// Code generated by slipschema. DO NOT EDIT.\n"));
        assert!(thing.contains("\npackage models\n\ntype Thing struct {\n"));
        let stuff = std::fs::read_to_string(out.join("Stuff.go")).unwrap();
        assert!(stuff.ends_with("type Stuff []*Thing\n"));
    }

    #[test]
    fn existing_files_are_kept_without_overwrite() {
        let tmp = TempDir::new().unwrap();
        let schema = tmp.path().join("stuff.json");
        std::fs::write(&schema, STRUCT_SLICE).unwrap();
        std::fs::write(tmp.path().join("Thing.go"), "keep me").unwrap();
        let dir = tmp.path().to_str().unwrap();

        cli(&["--dir", dir, schema.to_str().unwrap()]).run().unwrap();
        assert_eq!(std::fs::read_to_string(tmp.path().join("Thing.go")).unwrap(), "keep me");
        assert!(tmp.path().join("Stuff.go").exists());

        cli(&["--dir", dir, "--overwrite", schema.to_str().unwrap()]).run().unwrap();
        let thing = std::fs::read_to_string(tmp.path().join("Thing.go")).unwrap();
        assert!(thing.contains("// Thing defined from schema:\n"));
    }

    #[test]
    fn schema_errors_name_the_source() {
        let tmp = TempDir::new().unwrap();
        let schema = tmp.path().join("broken.json");
        std::fs::write(&schema, r##"{ "$ref": "#/definitions/Missing" }"##).unwrap();

        let err = cli(&["--dir", tmp.path().to_str().unwrap(), schema.to_str().unwrap()])
            .run()
            .unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
        assert!(std::fs::read_dir(tmp.path()).unwrap().count() == 1);
    }

    #[test]
    fn glob_patterns_expand_and_must_match() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("b.json"), "{}").unwrap();
        let pattern = format!("{}/*.json", tmp.path().display());

        let mut found = resolve_file_path_patterns([pattern.as_str()]).unwrap();
        found.sort();
        assert_eq!(found, [tmp.path().join("a.json"), tmp.path().join("b.json")]);

        let missing = format!("{}/*.yaml", tmp.path().display());
        assert!(resolve_file_path_patterns([missing.as_str()]).is_err());
        assert_eq!(resolve_file_path_patterns(["plain.json"]).unwrap(), [PathBuf::from("plain.json")]);
    }

    #[test]
    fn flags_map_onto_options() {
        let parsed = cli(&["--root-type", "Config", "--definitions", "--strict-names", "--comments", "false", "x.json"]);
        let options = parsed.type_settings.options(parsed.output_settings.comments);
        assert_eq!(options.root_name, "Config");
        assert!(options.emit_definitions);
        assert!(options.strict_names);
        assert!(!options.comments);
        assert_eq!(parsed.output_settings.pkg, "main");
        assert_eq!(parsed.output_settings.dir, PathBuf::from("."));
    }
}
