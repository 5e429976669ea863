//! # Editing
//!
//! Structural mutations on a [`Document`]: add (or replace), delete, rename,
//! set content, and table-of-contents insertion (`toc`).
//!
//! Every mutation runs inside [`Document::transaction`]: the tree is
//! validated afterwards and restored to its previous state on any error, so a
//! failed edit never leaves a half-applied change behind.

pub mod toc;

use crate::error::{DuplicateNameError, EditError, StructureError};
use crate::parsing::builder::trim_blank_lines;
use crate::parsing::classify::{LineKind, MarkdownLineClassifier};
use crate::parsing::kinds::Heading;
use crate::tree::{Document, NameStyle, SectionId, invariants};

pub use toc::{TocOptions, table_of_contents};

/// Flags for [`Document::add_section`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Replace a section with a colliding name instead of failing.
    pub replace_if_exists: bool,
    /// Rewrite heading lines in the content as emphasized text.
    pub demote_subheadings: bool,
}

impl AddOptions {
    pub fn replace_if_exists(mut self, value: bool) -> Self {
        self.replace_if_exists = value;
        self
    }

    pub fn demote_subheadings(mut self, value: bool) -> Self {
        self.demote_subheadings = value;
        self
    }
}

impl Document {
    /// Adds `name` as the last child of `under`, one level deeper.
    ///
    /// A case-insensitive name collision anywhere in the document fails with
    /// [`DuplicateNameError`] unless `replace_if_exists` is set. A replaced
    /// section loses its children; if it was a child of `under` the new
    /// section takes its place, otherwise it is removed from its old parent
    /// and the new one is appended to `under`.
    pub fn add_section(
        &mut self,
        under: SectionId,
        name: &str,
        content: &str,
        options: AddOptions,
    ) -> Result<SectionId, EditError> {
        if self.get(under).is_none() {
            return Err(EditError::UnknownSection(format!("{under:?}")));
        }
        let stored = checked_name(self.name_style(), name, self[under].level() + 1)?;
        let content = prepare_content(&stored, content, options.demote_subheadings)?;

        self.transaction(|doc| match doc.find_stored(&stored) {
            None => Ok(doc.attach(under, stored, content, None)),
            Some(old) if !options.replace_if_exists => Err(DuplicateNameError {
                name: name.to_string(),
                existing: doc[old].name().to_string(),
            }
            .into()),
            Some(old) => {
                if old == under || doc.ancestors(under).any(|a| a == old) {
                    return Err(StructureError::ReplacesAncestor { name: stored }.into());
                }
                let same_parent = doc[old].parent() == Some(under);
                let position = doc.detach(old).filter(|_| same_parent);
                log::debug!("replacing section `{stored}`");
                Ok(doc.attach(under, stored, content, position))
            }
        })
    }

    /// [`Document::add_section`] with the parent looked up by name.
    pub fn add_section_by_name(
        &mut self,
        under: &str,
        name: &str,
        content: &str,
        options: AddOptions,
    ) -> Result<SectionId, EditError> {
        let parent = self
            .find(under)
            .ok_or_else(|| EditError::UnknownSection(under.to_string()))?;
        self.add_section(parent, name, content, options)
    }

    /// Removes `name` and its whole subtree. Returns `false` if no such section exists.
    pub fn delete_section(&mut self, name: &str) -> Result<bool, EditError> {
        let Some(id) = self.find(name) else {
            return Ok(false);
        };
        if id == self.root_id() {
            return Err(StructureError::RootRemoval.into());
        }
        self.transaction(|doc| {
            let removed = doc.descendants(id).len();
            doc.detach(id);
            log::debug!("deleted `{name}` ({removed} sections)");
            Ok(true)
        })
    }

    /// Replaces the content of an existing section.
    pub fn set_content(
        &mut self,
        id: SectionId,
        content: &str,
        demote_subheadings: bool,
    ) -> Result<(), EditError> {
        let Some(section) = self.get(id) else {
            return Err(EditError::UnknownSection(format!("{id:?}")));
        };
        let content = prepare_content(section.name(), content, demote_subheadings)?;
        self.transaction(|doc| {
            doc.set_content_unchecked(id, content);
            Ok(())
        })
    }

    /// Renames a section, keeping its position, content and children.
    pub fn rename_section(&mut self, name: &str, new_name: &str) -> Result<SectionId, EditError> {
        let id = self
            .find(name)
            .ok_or_else(|| EditError::UnknownSection(name.to_string()))?;
        let stored = checked_name(self.name_style(), new_name, self[id].level())?;
        if let Some(other) = self.find_stored(&stored)
            && other != id
        {
            return Err(DuplicateNameError {
                name: new_name.to_string(),
                existing: self[other].name().to_string(),
            }
            .into());
        }
        self.transaction(|doc| {
            doc.rename_unchecked(id, stored);
            Ok(id)
        })
    }

    /// Runs `edit`, then validates the tree; any failure restores the
    /// document to its state before the call.
    pub fn transaction<T>(
        &mut self,
        edit: impl FnOnce(&mut Document) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        let snapshot = self.clone();
        let result = edit(self).and_then(|value| {
            invariants::validate(self)?;
            Ok(value)
        });
        if let Err(e) = &result {
            log::debug!("edit rolled back: {e}");
            *self = snapshot;
        }
        result
    }
}

/// Rewrites heading lines outside code fences as emphasized plain text.
pub fn demote_headings(content: &str) -> String {
    let mut classifier = MarkdownLineClassifier::new();
    content
        .lines()
        .map(|line| match classifier.classify(line).kind {
            LineKind::Heading { name, .. } => Heading::demote(name),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stored form of `raw` for a section at `level`.
///
/// The name must come back unchanged from its own rendered heading line, so
/// line breaks and leading or trailing `#` are rejected.
pub(crate) fn checked_name(style: NameStyle, raw: &str, level: usize) -> Result<String, EditError> {
    let stored = style.normalize(raw);
    if stored.is_empty() {
        return Err(EditError::BlankName);
    }
    let heading = Heading::render(level, &style.display(&stored));
    let survives = !stored.contains(['\n', '\r'])
        && Heading::parse(&heading)
            .is_some_and(|(parsed, name)| parsed == level && style.normalize(name) == stored);
    if !survives {
        return Err(EditError::InvalidName {
            name: raw.to_string(),
        });
    }
    Ok(stored)
}

/// Normalizes content for storage and rejects text that would corrupt the
/// tree once rendered: heading lines, or a code fence left open.
fn prepare_content(section: &str, content: &str, demote: bool) -> Result<String, StructureError> {
    let content = if demote {
        demote_headings(content)
    } else {
        if let Some(line) = invariants::first_heading_line(content) {
            return Err(StructureError::HeadingInContent {
                section: section.to_string(),
                line: line.to_string(),
            });
        }
        content.to_string()
    };

    let mut classifier = MarkdownLineClassifier::new();
    let lines: Vec<&str> = content.lines().collect();
    for line in &lines {
        classifier.classify(line);
    }
    if classifier.fence().is_inside() {
        return Err(StructureError::UnterminatedFence {
            section: section.to_string(),
        });
    }
    Ok(trim_blank_lines(&lines))
}
