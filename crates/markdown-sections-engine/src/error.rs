use std::path::PathBuf;
use thiserror::Error;

/// Malformed section structure. Fatal to the parse or mutation that hit it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("duplicate root: `{name}` is a second level-1 heading")]
    DuplicateRoot { name: String },

    #[error("missing root: no level-1 heading precedes the first section")]
    MissingRoot,

    #[error("incorrect nesting order: `{name}` (level {level}) has no level {} ancestor", .level - 1)]
    IncorrectNesting { name: String, level: usize },

    #[error("duplicate section name: `{name}`")]
    DuplicateName { name: String },

    #[error("heading on line {line} has an empty name")]
    EmptyName { line: usize },

    #[error("content found before the root heading on line {line}")]
    ContentBeforeRoot { line: usize },

    #[error("content of `{section}` contains heading line `{line}`")]
    HeadingInContent { section: String, line: String },

    #[error("content of `{section}` leaves a code fence open")]
    UnterminatedFence { section: String },

    #[error("cannot replace `{name}`: it is the target section or one of its ancestors")]
    ReplacesAncestor { name: String },

    #[error("the root section cannot be removed")]
    RootRemoval,

    #[error("`{name}` is level {level} but its parent is level {parent_level}")]
    LevelMismatch {
        name: String,
        level: usize,
        parent_level: usize,
    },

    #[error("section index out of sync: {0}")]
    IndexMismatch(String),
}

/// A mutation would create a second section whose name collides case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("section `{name}` already exists as `{existing}`")]
pub struct DuplicateNameError {
    pub name: String,
    pub existing: String,
}

/// Only markdown documents can be opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a markdown document (expected a .{expected} extension): {}", .path.display())]
pub struct InvalidPathError {
    pub path: PathBuf,
    pub expected: &'static str,
}

/// Failure of a structural edit on an existing document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateNameError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("section not found: {0}")]
    UnknownSection(String),

    #[error("section names cannot be blank")]
    BlankName,

    #[error("section name `{name}` would not read back from its heading line")]
    InvalidName { name: String },
}

/// Failure while opening, saving or exporting a document on disk.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),

    #[error(transparent)]
    Io(#[from] crate::io::IoError),

    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] crate::frontmatter::FrontMatterError),

    #[error("invalid document structure: {0}")]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("export failed: {0}")]
    Convert(#[from] crate::export::ConvertError),
}
