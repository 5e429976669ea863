use std::collections::HashSet;

use crate::error::StructureError;
use crate::parsing::classify::{LineKind, MarkdownLineClassifier};

use super::document::Document;
use super::names::index_key;

/// Checks every structural invariant of `doc`.
///
/// - one level-1 root without a parent
/// - each child is exactly one level below its parent and links back to it
/// - names are unique ignoring case
/// - no content line is a heading (fence-aware)
/// - the flat index holds exactly the attached sections
pub fn validate(doc: &Document) -> Result<(), StructureError> {
    let root = doc.root();
    if root.level() != 1 || root.parent().is_some() {
        return Err(StructureError::MissingRoot);
    }

    let mut seen = HashSet::new();
    for (id, section) in doc.sections() {
        if !seen.insert(index_key(section.name())) {
            return Err(StructureError::DuplicateName {
                name: section.name().to_string(),
            });
        }
        for &child in section.children() {
            let Some(child_section) = doc.get(child) else {
                return Err(StructureError::IndexMismatch(format!(
                    "`{}` lists a removed child",
                    section.name()
                )));
            };
            if child_section.parent() != Some(id) {
                return Err(StructureError::IndexMismatch(format!(
                    "`{}` does not link back to `{}`",
                    child_section.name(),
                    section.name()
                )));
            }
            if child_section.level() != section.level() + 1 {
                return Err(StructureError::LevelMismatch {
                    name: child_section.name().to_string(),
                    level: child_section.level(),
                    parent_level: section.level(),
                });
            }
        }
        if let Some(line) = first_heading_line(section.content()) {
            return Err(StructureError::HeadingInContent {
                section: section.name().to_string(),
                line: line.to_string(),
            });
        }
    }

    if doc.len() != seen.len() || doc.live_slots() != seen.len() {
        return Err(StructureError::IndexMismatch(format!(
            "{} indexed, {} stored, {} attached",
            doc.len(),
            doc.live_slots(),
            seen.len()
        )));
    }
    for (key, id) in doc.index_entries() {
        match doc.get(id) {
            Some(section) if index_key(section.name()) == key => {}
            _ => {
                return Err(StructureError::IndexMismatch(format!(
                    "index entry `{key}` points at the wrong section"
                )));
            }
        }
    }
    Ok(())
}

/// First line of `content` that would parse as a heading.
pub fn first_heading_line(content: &str) -> Option<&str> {
    let mut classifier = MarkdownLineClassifier::new();
    content
        .lines()
        .find(|line| matches!(classifier.classify(line).kind, LineKind::Heading { .. }))
}
