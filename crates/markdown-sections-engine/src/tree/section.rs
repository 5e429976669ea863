use std::cell::OnceCell;

/// Handle to a section inside a [`Document`](super::Document) arena.
///
/// Handles stay valid until the section is deleted or replaced; after that
/// the id may be handed to a newly added section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub(crate) usize);

/// One heading and the content directly beneath it.
///
/// The parent link is a non-owning id; the document arena owns every node.
#[derive(Debug, Clone)]
pub struct Section {
    pub(crate) name: String,
    pub(crate) level: usize,
    pub(crate) content: String,
    pub(crate) parent: Option<SectionId>,
    pub(crate) children: Vec<SectionId>,
    pub(crate) path: OnceCell<String>,
}

impl Section {
    pub(crate) fn new(
        name: String,
        level: usize,
        content: String,
        parent: Option<SectionId>,
    ) -> Self {
        Self {
            name,
            level,
            content,
            parent,
            children: Vec::new(),
            path: OnceCell::new(),
        }
    }

    /// Stored name (see [`NameStyle`](super::NameStyle)).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Heading depth; 1 for the root.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Text owned by this section, without any subsection headings.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }

    /// Child ids in insertion order.
    pub fn children(&self) -> &[SectionId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
