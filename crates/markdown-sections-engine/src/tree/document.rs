use std::collections::HashMap;
use std::ops::Index;

use crate::frontmatter::FrontMatter;
use crate::parsing::builder::unescape_content;

use super::names::{NameStyle, index_key};
use super::section::{Section, SectionId};

/// Separator between ancestor names in [`Document::path`].
pub const PATH_DELIMITER: char = '/';

/// A parsed document: one root section, its descendants, and the front matter.
///
/// Sections live in an arena and refer to each other by [`SectionId`]. The
/// flat index (`all_sections`) maps every attached section's lowercase name to
/// its node and is kept in lockstep with every structural change; it is never
/// exposed for direct mutation.
///
/// ```rust
/// # use markdown_sections_engine::{ParseOptions, parse_document};
/// let doc = parse_document("# Doc\n\n## Alpha\n\nText", &ParseOptions::default()).unwrap();
/// let alpha = doc.find("alpha").unwrap();
/// assert_eq!(doc[alpha].content(), "Text");
/// assert_eq!(doc.path(alpha), "Doc/Doc/Alpha");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    name_style: NameStyle,
    front_matter: Option<FrontMatter>,
    slots: Vec<Option<Section>>,
    free: Vec<SectionId>,
    root: SectionId,
    all_sections: HashMap<String, SectionId>,
}

impl Document {
    /// Creates a document holding only a root section.
    ///
    /// The document name defaults to the root's stored name.
    pub fn new(root_name: &str, name_style: NameStyle) -> Self {
        let name = name_style.normalize(root_name);
        let root = Section::new(name.clone(), 1, String::new(), None);
        let mut all_sections = HashMap::new();
        all_sections.insert(index_key(&name), SectionId(0));
        Self {
            name,
            name_style,
            front_matter: None,
            slots: vec![Some(root)],
            free: Vec::new(),
            root: SectionId(0),
            all_sections,
        }
    }

    /// Single-section document holding `content` under a root called `root_name`.
    ///
    /// This is the explicit fallback for text without any heading; it is never
    /// applied implicitly by the parser.
    pub fn from_content(root_name: &str, content: &str, name_style: NameStyle) -> Self {
        let mut doc = Self::new(root_name, name_style);
        let root = doc.root;
        doc.slot_mut(root).content = unescape_content(content);
        doc
    }

    /// Renames the document, which prefixes every section path.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.clear_paths();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_style(&self) -> NameStyle {
        self.name_style
    }

    pub fn front_matter(&self) -> Option<&FrontMatter> {
        self.front_matter.as_ref()
    }

    pub fn set_front_matter(&mut self, front_matter: Option<FrontMatter>) {
        self.front_matter = front_matter;
    }

    pub fn root_id(&self) -> SectionId {
        self.root
    }

    pub fn root(&self) -> &Section {
        &self[self.root]
    }

    /// Looks up a live section by id.
    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Finds a section anywhere in the tree, ignoring case.
    ///
    /// The query is normalized with the document's [`NameStyle`] first, so
    /// `"Default Prompts"` finds `default_prompts` in a snake-case document.
    pub fn find(&self, name: &str) -> Option<SectionId> {
        let key = index_key(&self.name_style.normalize(name));
        self.all_sections.get(&key).copied()
    }

    /// Lookup by already-normalized name.
    pub(crate) fn find_stored(&self, stored: &str) -> Option<SectionId> {
        self.all_sections.get(&index_key(stored)).copied()
    }

    /// Number of attached sections, root included.
    pub fn len(&self) -> usize {
        self.all_sections.len()
    }

    /// Always false: a document has at least its root.
    pub fn is_empty(&self) -> bool {
        self.all_sections.is_empty()
    }

    /// Text used for a section's heading line.
    pub fn display_name(&self, id: SectionId) -> String {
        self.name_style.display(&self[id].name)
    }

    /// `<document>/<root>/.../<section>`, computed once per node and cached.
    pub fn path(&self, id: SectionId) -> &str {
        let section = &self[id];
        section.path.get_or_init(|| match section.parent {
            None => format!("{}{PATH_DELIMITER}{}", self.name, section.name),
            Some(parent) => format!("{}{PATH_DELIMITER}{}", self.path(parent), section.name),
        })
    }

    /// Ids of `id`'s subtree in depth-first pre-order, `id` first.
    pub fn descendants(&self, id: SectionId) -> Vec<SectionId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self[next].children.iter().rev().copied());
        }
        out
    }

    /// Every section in depth-first pre-order, root first.
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &Section)> + '_ {
        self.descendants(self.root)
            .into_iter()
            .map(move |id| (id, &self[id]))
    }

    /// Ancestors of `id`, nearest first, excluding `id`.
    pub fn ancestors(&self, id: SectionId) -> impl Iterator<Item = SectionId> + '_ {
        std::iter::successors(self[id].parent, move |&p| self[p].parent)
    }

    // Structural primitives. Callers are responsible for name uniqueness and
    // for running the invariant check afterwards.

    /// Creates a child of `parent` one level deeper. `position` of `None` appends.
    pub(crate) fn attach(
        &mut self,
        parent: SectionId,
        name: String,
        content: String,
        position: Option<usize>,
    ) -> SectionId {
        let level = self[parent].level + 1;
        let key = index_key(&name);
        let section = Section::new(name, level, content, Some(parent));
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(section);
                id
            }
            None => {
                self.slots.push(Some(section));
                SectionId(self.slots.len() - 1)
            }
        };
        self.all_sections.insert(key, id);
        let children = &mut self.slot_mut(parent).children;
        match position {
            Some(at) if at < children.len() => children.insert(at, id),
            _ => children.push(id),
        }
        id
    }

    /// Removes `id` and its subtree from the parent, the index, and the arena.
    /// Freed slots are handed out again by later attaches.
    ///
    /// Returns the position `id` held among its siblings.
    pub(crate) fn detach(&mut self, id: SectionId) -> Option<usize> {
        let parent = self[id].parent?;
        let siblings = &mut self.slot_mut(parent).children;
        let position = siblings.iter().position(|&c| c == id)?;
        siblings.remove(position);
        for removed in self.descendants(id) {
            if let Some(section) = self.slots[removed.0].take() {
                self.all_sections.remove(&index_key(&section.name));
                self.free.push(removed);
            }
        }
        Some(position)
    }

    pub(crate) fn set_content_unchecked(&mut self, id: SectionId, content: String) {
        self.slot_mut(id).content = content;
    }

    pub(crate) fn rename_unchecked(&mut self, id: SectionId, name: String) {
        let old = std::mem::replace(&mut self.slot_mut(id).name, name.clone());
        self.all_sections.remove(&index_key(&old));
        self.all_sections.insert(index_key(&name), id);
        if id == self.root && self.name == old {
            self.name = name;
        }
        for affected in self.descendants(id) {
            self.slot_mut(affected).path.take();
        }
    }

    pub(crate) fn take_children(&mut self, id: SectionId) -> Vec<SectionId> {
        std::mem::take(&mut self.slot_mut(id).children)
    }

    pub(crate) fn extend_children(&mut self, id: SectionId, children: Vec<SectionId>) {
        self.slot_mut(id).children.extend(children);
    }

    pub(crate) fn index_entries(&self) -> impl Iterator<Item = (&str, SectionId)> + '_ {
        self.all_sections.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub(crate) fn live_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn slot_mut(&mut self, id: SectionId) -> &mut Section {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(section) => section,
            None => panic!("stale section id {id:?}"),
        }
    }

    fn clear_paths(&mut self) {
        for section in self.slots.iter_mut().flatten() {
            section.path.take();
        }
    }

    fn subtree_eq(&self, id: SectionId, other: &Document, other_id: SectionId) -> bool {
        let (a, b) = (&self[id], &other[other_id]);
        a.name == b.name
            && a.level == b.level
            && a.content == b.content
            && a.children.len() == b.children.len()
            && a.children
                .iter()
                .zip(&b.children)
                .all(|(&x, &y)| self.subtree_eq(x, other, y))
    }
}

impl Index<SectionId> for Document {
    type Output = Section;

    /// Panics on a stale id; use [`Document::get`] for a checked lookup.
    fn index(&self, id: SectionId) -> &Section {
        match self.get(id) {
            Some(section) => section,
            None => panic!("stale section id {id:?}"),
        }
    }
}

/// Structural equality: same names, levels, content and child order,
/// regardless of arena layout.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.name_style == other.name_style
            && self.front_matter == other.front_matter
            && self.subtree_eq(self.root, other, other.root)
    }
}
