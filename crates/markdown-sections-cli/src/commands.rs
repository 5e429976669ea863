use anyhow::{Context, Result, bail};
use markdown_sections_config::Config;
use markdown_sections_engine::io::resolve_document_path;
use markdown_sections_engine::{
    AddOptions, Document, MarkdownFile, PandocConverter, RenderOptions, parse_document, render,
};
use std::path::PathBuf;

use crate::AddArgs;

/// Resolves document paths and applies the configured options.
pub struct Workspace {
    config: Config,
}

impl Workspace {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn path(&self, file: &str) -> PathBuf {
        resolve_document_path(file, self.config.documents_dir.as_deref())
    }

    fn open(&self, file: &str) -> Result<MarkdownFile> {
        let path = self.path(file);
        MarkdownFile::open(&path, self.config.parse.clone())
            .with_context(|| format!("opening {}", path.display()))
    }

    pub fn tree(&self, file: &str, paths: bool) -> Result<String> {
        let file = self.open(file)?;
        let doc = file.document();
        Ok(outline(doc, paths))
    }

    pub fn render(&self, file: &str, toc: bool, write: bool) -> Result<String> {
        let file = self.open(file)?;
        let options = self.render_options(toc);
        if write {
            file.save(&options)?;
            return Ok(String::new());
        }
        Ok(render(file.document(), &options)?)
    }

    /// Returns the path of the new section.
    pub fn add(&self, args: &AddArgs, content: &str) -> Result<String> {
        let mut file = self.open(&args.file)?;
        let options = AddOptions::default()
            .replace_if_exists(args.replace)
            .demote_subheadings(args.demote);
        let id = file
            .document_mut()
            .add_section_by_name(&args.under, &args.name, content, options)?;
        let path = file.document().path(id).to_string();
        file.save(&self.render_options(false))?;
        Ok(path)
    }

    pub fn delete(&self, file: &str, name: &str) -> Result<bool> {
        let mut file = self.open(file)?;
        let deleted = file.document_mut().delete_section(name)?;
        if deleted {
            file.save(&self.render_options(false))?;
        }
        Ok(deleted)
    }

    pub fn toc(&self, file: &str) -> Result<()> {
        let mut file = self.open(file)?;
        file.document_mut()
            .insert_table_of_contents(&self.config.render.toc)?;
        file.save(&self.render_options(false))?;
        Ok(())
    }

    /// Parses, renders and re-parses; fails if the trees differ.
    pub fn check(&self, file: &str) -> Result<String> {
        let file = self.open(file)?;
        let doc = file.document();
        let options = self.render_options(false);
        let text = render(doc, &options)?;
        let reparsed = parse_document(&text, &self.config.parse)?.with_name(doc.name());
        if !same_sections(doc, &reparsed) {
            bail!("{} does not survive a render round trip", file.path().display());
        }
        let canonical = std::fs::read_to_string(file.path())
            .map(|on_disk| on_disk.ends_with(&text))
            .unwrap_or(false);
        Ok(format!(
            "{}: {} sections, {}",
            file.path().display(),
            doc.len(),
            if canonical { "canonical" } else { "not canonical (run `render --write`)" }
        ))
    }

    pub fn export(
        &self,
        file: &str,
        format: Option<&str>,
        output: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let file = self.open(file)?;
        let export = &self.config.export;
        let format = format.unwrap_or(export.format.as_str());
        let output = output.unwrap_or_else(|| file.path().with_extension(format));
        let converter = PandocConverter::new()
            .with_program(&export.converter)
            .with_args(export.args.iter().cloned());
        file.export(&converter, format, &output)?;
        Ok(output)
    }

    fn render_options(&self, toc: bool) -> RenderOptions {
        let options = self.config.render.clone();
        if toc { options.with_toc(true) } else { options }
    }
}

fn same_sections(a: &Document, b: &Document) -> bool {
    a.sections()
        .map(|(_, s)| (s.name(), s.level(), s.content()))
        .eq(b.sections().map(|(_, s)| (s.name(), s.level(), s.content())))
}

fn outline(doc: &Document, paths: bool) -> String {
    let mut out = String::new();
    for (id, section) in doc.sections() {
        if paths {
            out.push_str(doc.path(id));
        } else {
            out.push_str(&"  ".repeat(section.level() - 1));
            out.push_str(&doc.display_name(id));
        }
        out.push('\n');
    }
    out
}
