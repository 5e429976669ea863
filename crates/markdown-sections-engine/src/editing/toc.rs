use serde::{Deserialize, Serialize};

use crate::error::{DuplicateNameError, EditError};
use crate::parsing::kinds::ListItem;
use crate::tree::names::slug;
use crate::tree::{Document, SectionId};

/// Settings for the generated table of contents section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocOptions {
    /// Heading of the generated section.
    pub title: String,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            title: "Table of Contents".to_string(),
        }
    }
}

/// Nested bullet list with one linked entry per section, indented two spaces per level.
pub fn table_of_contents(doc: &Document) -> String {
    doc.sections()
        .map(|(id, section)| {
            let display = doc.display_name(id);
            format!(
                "{}{}[{display}](#{})",
                "  ".repeat(section.level() - 1),
                ListItem::BULLET,
                slug(&display)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl Document {
    /// Inserts a freshly computed table of contents as the root's first child.
    ///
    /// A previous table with the same title directly under the root is
    /// replaced, so running this repeatedly always leaves exactly one.
    pub fn insert_table_of_contents(&mut self, options: &TocOptions) -> Result<SectionId, EditError> {
        let level = self.root().level() + 1;
        let stored = super::checked_name(self.name_style(), &options.title, level)?;
        self.transaction(|doc| {
            let root = doc.root_id();
            if let Some(old) = doc.find_stored(&stored) {
                if doc[old].parent() != Some(root) {
                    return Err(DuplicateNameError {
                        name: options.title.clone(),
                        existing: doc[old].name().to_string(),
                    }
                    .into());
                }
                doc.detach(old);
            }

            let content = table_of_contents(doc);
            let existing = doc.take_children(root);
            let toc = doc.attach(root, stored, content, None);
            doc.extend_children(root, existing);
            log::debug!("inserted table of contents ({} entries)", doc.len() - 1);
            Ok(toc)
        })
    }
}
