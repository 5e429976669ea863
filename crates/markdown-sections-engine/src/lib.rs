//! Section tree engine for heading-structured markdown documents.
//!
//! A document is one level-1 root heading and a tree of nested sections
//! beneath it. The engine parses flat text into that tree, edits it without
//! breaking its invariants, and renders it back to canonical text.
//!
//! ```rust
//! use markdown_sections_engine::{AddOptions, ParseOptions, RenderOptions, parse_document, render};
//!
//! let mut doc = parse_document("# Notes\n\n## Todo\n\nbuy milk", &ParseOptions::default()).unwrap();
//! doc.add_section_by_name("Todo", "Later", "call bob", AddOptions::default()).unwrap();
//!
//! let text = render(&doc, &RenderOptions::default()).unwrap();
//! assert_eq!(text, "# Notes\n\n## Todo\n\nbuy milk\n\n### Later\n\ncall bob\n\n");
//! ```

pub mod editing;
pub mod error;
pub mod export;
pub mod frontmatter;
pub mod io;
pub mod parsing;
pub mod render;
pub mod tree;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{AddOptions, TocOptions, demote_headings, table_of_contents};
pub use error::{
    DocumentError, DuplicateNameError, EditError, InvalidPathError, StructureError,
};
pub use export::{ConvertError, DocumentConverter, PandocConverter};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use io::{IoError, MarkdownFile};
pub use parsing::{ParseOptions, parse_document};
pub use render::{RenderOptions, render};
pub use tree::{Document, NameStyle, PATH_DELIMITER, Section, SectionId};
