use std::path::{Path, PathBuf};

use crate::error::{DocumentError, StructureError};
use crate::export::DocumentConverter;
use crate::frontmatter;
use crate::parsing::{ParseOptions, parse_document};
use crate::render::{RenderOptions, render};
use crate::tree::{Document, invariants};

use super::{read_document, validate_document_path, write_document};

/// A markdown document bound to a file on disk.
///
/// The document name (first path segment) is the file stem, so
/// `notes/test.md` yields paths like `test/Cache/Default Prompts`.
#[derive(Debug, Clone)]
pub struct MarkdownFile {
    path: PathBuf,
    options: ParseOptions,
    document: Document,
}

impl MarkdownFile {
    /// Reads and parses `path`. Non-`.md` paths are rejected before any I/O.
    pub fn open(path: impl Into<PathBuf>, options: ParseOptions) -> Result<Self, DocumentError> {
        let path = path.into();
        validate_document_path(&path)?;
        let document = load(&path, &options)?;
        Ok(Self {
            path,
            options,
            document,
        })
    }

    /// Like [`MarkdownFile::open`], but a file without any heading becomes a
    /// single root section named after the file stem.
    ///
    /// Files that do have headings but no level-1 root still fail.
    pub fn open_or_default(
        path: impl Into<PathBuf>,
        options: ParseOptions,
    ) -> Result<Self, DocumentError> {
        let path = path.into();
        validate_document_path(&path)?;
        let document = match load(&path, &options) {
            Err(DocumentError::Structure(StructureError::MissingRoot)) => {
                default_document(&path, &options)?
            }
            other => other?,
        };
        Ok(Self {
            path,
            options,
            document,
        })
    }

    /// Binds an in-memory document to `path` without touching the disk.
    pub fn create(path: impl Into<PathBuf>, document: Document) -> Result<Self, DocumentError> {
        let path = path.into();
        validate_document_path(&path)?;
        let options = ParseOptions::default().with_name_style(document.name_style());
        let name = stem(&path);
        Ok(Self {
            path,
            options,
            document: document.with_name(name),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem, used as the document name.
    pub fn name(&self) -> &str {
        self.document.name()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Discards in-memory changes and re-reads the file.
    ///
    /// On failure the current document is left untouched.
    pub fn refresh(&mut self) -> Result<(), DocumentError> {
        self.document = load(&self.path, &self.options)?;
        Ok(())
    }

    /// Serializes the document, front matter first, and overwrites the file.
    pub fn save(&self, options: &RenderOptions) -> Result<(), DocumentError> {
        let body = render(&self.document, options)?;
        let text = frontmatter::join(self.document.front_matter(), &body)?;
        write_document(&self.path, &text)?;
        log::info!(
            "saved {} ({} sections)",
            self.path.display(),
            self.document.len()
        );
        Ok(())
    }

    /// Converts the file as last saved into `format` at `output`.
    pub fn export(
        &self,
        converter: &dyn DocumentConverter,
        format: &str,
        output: &Path,
    ) -> Result<(), DocumentError> {
        log::debug!("exporting {} with {}", self.path.display(), converter.name());
        converter.convert(&self.path, format, output)?;
        Ok(())
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

fn document_name(path: &Path, options: &ParseOptions) -> String {
    options
        .document_name
        .clone()
        .unwrap_or_else(|| stem(path))
}

fn load(path: &Path, options: &ParseOptions) -> Result<Document, DocumentError> {
    let text = read_document(path)?;
    let parsed = frontmatter::split(&text)?;
    let options = options
        .clone()
        .with_document_name(document_name(path, options));
    let mut document = parse_document(&parsed.body, &options)?;
    document.set_front_matter(parsed.front_matter);
    log::debug!("loaded {} ({} sections)", path.display(), document.len());
    Ok(document)
}

fn default_document(path: &Path, options: &ParseOptions) -> Result<Document, DocumentError> {
    let text = read_document(path)?;
    let parsed = frontmatter::split(&text)?;
    if invariants::first_heading_line(&parsed.body).is_some() {
        return Err(StructureError::MissingRoot.into());
    }
    let name = document_name(path, options);
    let mut document = Document::from_content(&stem(path), &parsed.body, options.name_style)
        .with_name(name);
    document.set_front_matter(parsed.front_matter);
    log::warn!("{} has no root heading; using the file name", path.display());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidPathError;
    use crate::export::ConvertError;
    use crate::tests::{create_test_dir, create_test_file};
    use crate::tree::NameStyle;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::fs;

    const NOTES: &str = "# Cache\n\n## Default Prompts\n\n### Create Agent\n\nYou are an agent.\n";

    #[test]
    fn open_names_document_after_file_stem() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "test.md", NOTES);

        let file = MarkdownFile::open(&path, ParseOptions::default()).unwrap();
        let doc = file.document();
        let agent = doc.find("create agent").unwrap();

        assert_eq!(file.name(), "test");
        assert_eq!(doc.path(agent), "test/Cache/Default Prompts/Create Agent");
        assert_eq!(doc[agent].content(), "You are an agent.");
    }

    #[test]
    fn non_markdown_path_is_rejected_before_io() {
        let err = MarkdownFile::open("/definitely/not/here.txt", ParseOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DocumentError::InvalidPath(InvalidPathError { expected: "md", .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = create_test_dir();
        let err = MarkdownFile::open(dir.path().join("gone.md"), ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }

    #[test]
    fn structure_errors_surface() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "bad.md", "# A\n\n# B\n");
        let err = MarkdownFile::open(&path, ParseOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Structure(StructureError::DuplicateRoot { .. })
        ));
    }

    #[test]
    fn open_or_default_wraps_heading_free_text() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "scratch.md", "just some notes\n");

        assert!(MarkdownFile::open(&path, ParseOptions::default()).is_err());
        let file = MarkdownFile::open_or_default(&path, ParseOptions::default()).unwrap();
        let doc = file.document();

        assert_eq!(doc.root().name(), "scratch");
        assert_eq!(doc.root().content(), "just some notes");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn open_or_default_still_rejects_orphan_headings() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "orphan.md", "## Child\n\ntext\n");
        let err = MarkdownFile::open_or_default(&path, ParseOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Structure(StructureError::MissingRoot)
        ));
    }

    #[test]
    fn front_matter_survives_save() {
        let dir = create_test_dir();
        let text = "---\ntitle: Notes\ntags:\n- a\n---\n\n# Notes\n\n## Todo\n\nbuy milk\n";
        let path = create_test_file(&dir, "notes.md", text);

        let mut file = MarkdownFile::open(&path, ParseOptions::default()).unwrap();
        let todo = file.document().find("todo").unwrap();
        file.document_mut()
            .add_section(todo, "Later", "call bob", Default::default())
            .unwrap();
        file.save(&RenderOptions::default()).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.starts_with("---\ntitle: Notes\n"));
        assert!(saved.contains("### Later\n\ncall bob\n"));

        let reopened = MarkdownFile::open(&path, ParseOptions::default()).unwrap();
        assert_eq!(reopened.document(), file.document());
    }

    #[test]
    fn refresh_discards_unsaved_edits() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "test.md", NOTES);
        let mut file = MarkdownFile::open(&path, ParseOptions::default()).unwrap();

        file.document_mut().delete_section("Default Prompts").unwrap();
        assert!(file.document().find("create agent").is_none());

        file.refresh().unwrap();
        assert!(file.document().find("create agent").is_some());
    }

    #[test]
    fn refresh_failure_keeps_current_document() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "test.md", NOTES);
        let mut file = MarkdownFile::open(&path, ParseOptions::default()).unwrap();

        fs::write(&path, "no headings").unwrap();
        assert!(file.refresh().is_err());
        assert_eq!(file.document().len(), 3);
    }

    #[test]
    fn create_then_save_writes_new_file() {
        let dir = create_test_dir();
        let path = dir.path().join("sub/new.md");
        let doc = Document::new("Fresh Start", NameStyle::SnakeCase);

        let file = MarkdownFile::create(&path, doc).unwrap();
        file.save(&RenderOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# Fresh Start\n\n");
        assert_eq!(file.name(), "new");
    }

    struct Recording(RefCell<Vec<(PathBuf, String, PathBuf)>>);

    impl DocumentConverter for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn convert(&self, source: &Path, format: &str, output: &Path) -> Result<(), ConvertError> {
            self.0
                .borrow_mut()
                .push((source.to_path_buf(), format.to_string(), output.to_path_buf()));
            Ok(())
        }
    }

    struct Broken;

    impl DocumentConverter for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn convert(&self, _: &Path, _: &str, _: &Path) -> Result<(), ConvertError> {
            Err(ConvertError::NotFound("broken".into()))
        }
    }

    #[test]
    fn export_hands_file_path_to_converter() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "test.md", NOTES);
        let file = MarkdownFile::open(&path, ParseOptions::default()).unwrap();
        let out = dir.path().join("test.pdf");

        let converter = Recording(RefCell::new(Vec::new()));
        file.export(&converter, "pdf", &out).unwrap();

        assert_eq!(
            converter.0.into_inner(),
            vec![(path.clone(), "pdf".to_string(), out)]
        );
    }

    #[test]
    fn export_failure_passes_through() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "test.md", NOTES);
        let file = MarkdownFile::open(&path, ParseOptions::default()).unwrap();

        let err = file
            .export(&Broken, "html", &dir.path().join("x.html"))
            .unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Convert(ConvertError::NotFound(_))
        ));
    }
}
