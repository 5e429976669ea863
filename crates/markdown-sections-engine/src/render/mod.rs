//! # Rendering
//!
//! Serializes a [`Document`] back to canonical flat text: each section in
//! depth-first pre-order as a heading line, a blank line, and its escaped
//! content followed by a blank line.

pub mod escape;

use serde::{Deserialize, Serialize};

use crate::editing::TocOptions;
use crate::error::EditError;
use crate::parsing::kinds::Heading;
use crate::tree::Document;

pub use escape::escape_content;

/// Knobs for [`render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Prepend a generated table of contents as the root's first child.
    pub include_toc: bool,
    /// Mark soft line breaks inside paragraphs with the continuation marker.
    pub soft_wrap: bool,
    pub toc: TocOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_toc: false,
            soft_wrap: true,
            toc: TocOptions::default(),
        }
    }
}

impl RenderOptions {
    pub fn with_toc(mut self, include_toc: bool) -> Self {
        self.include_toc = include_toc;
        self
    }
}

/// Renders `doc` to text. Deterministic for a given tree and options.
///
/// With `include_toc` the table of contents is inserted into a copy of the
/// document, so `doc` itself is left untouched. The only failure is a table
/// of contents title that collides with a nested section.
pub fn render(doc: &Document, options: &RenderOptions) -> Result<String, EditError> {
    if options.include_toc {
        let mut with_toc = doc.clone();
        with_toc.insert_table_of_contents(&options.toc)?;
        return Ok(render_sections(&with_toc, options.soft_wrap));
    }
    Ok(render_sections(doc, options.soft_wrap))
}

fn render_sections(doc: &Document, soft_wrap: bool) -> String {
    let mut out = String::new();
    for (id, section) in doc.sections() {
        out.push_str(&Heading::render(section.level(), &doc.display_name(id)));
        out.push_str("\n\n");
        if !section.content().is_empty() {
            out.push_str(&escape_content(section.content(), soft_wrap));
            out.push_str("\n\n");
        }
    }
    out
}
