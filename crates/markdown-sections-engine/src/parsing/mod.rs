//! # Parsing
//!
//! Turns flat text into a [`Document`] in two phases:
//!
//! 1. **Line Classification** (`classify`): each line becomes a heading, a
//!    fence delimiter or opaque content, with fence state carried between lines
//! 2. **Tree Construction** (`builder`): a [`SectionTreeBuilder`] keeps a
//!    cursor on the most recently opened section and attaches each heading to
//!    the nearest ancestor one level above it
//!
//! Delimiter knowledge (`#`, fences, list bullets) lives in `kinds`.

pub mod builder;
pub mod classify;
pub mod kinds;

use serde::{Deserialize, Serialize};

use crate::error::StructureError;
use crate::tree::{Document, NameStyle};

pub use builder::{CONTINUATION, SectionTreeBuilder};
pub use classify::{FenceState, LineClass, LineKind, MarkdownLineClassifier, classify};

/// Knobs for [`parse_document`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// How heading text is turned into stored section names.
    pub name_style: NameStyle,
    /// Document name used as the first path segment. Defaults to the root's name.
    pub document_name: Option<String>,
}

impl ParseOptions {
    pub fn with_name_style(mut self, name_style: NameStyle) -> Self {
        self.name_style = name_style;
        self
    }

    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self
    }
}

/// Parses `text` (without front matter) into a section tree.
///
/// Fails with a [`StructureError`] on a skipped level, a second root, a
/// repeated name, or when there is no heading at all. Never returns a tree
/// that violates the section invariants.
pub fn parse_document(text: &str, options: &ParseOptions) -> Result<Document, StructureError> {
    let mut classifier = MarkdownLineClassifier::new();
    let mut builder = SectionTreeBuilder::new(options.clone());

    for line in text.lines() {
        let class = classifier.classify(line);
        builder.push(line, &class)?;
    }

    let doc = builder.finish()?;
    Ok(match &options.document_name {
        Some(name) => doc.with_name(name.clone()),
        None => doc,
    })
}
