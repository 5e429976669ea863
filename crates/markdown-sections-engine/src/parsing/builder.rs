use crate::error::StructureError;
use crate::tree::{Document, SectionId, invariants};

use super::ParseOptions;
use super::classify::{LineClass, LineKind, MarkdownLineClassifier};

/// Continuation marker the serializer appends to soft-wrapped lines.
pub const CONTINUATION: char = '\\';

/// Incrementally builds a section tree from classified lines.
///
/// `current` is the most recently opened section; content lines accumulate in
/// a buffer that is flushed into `current` whenever a heading switches to a
/// new section, and once more at end of input.
pub struct SectionTreeBuilder {
    options: ParseOptions,
    doc: Option<Document>,
    current: Option<SectionId>,
    buffer: Vec<String>,
    preamble: Option<usize>,
    line_no: usize,
}

impl SectionTreeBuilder {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            doc: None,
            current: None,
            buffer: Vec::new(),
            preamble: None,
            line_no: 0,
        }
    }

    pub fn push(&mut self, line: &str, class: &LineClass<'_>) -> Result<(), StructureError> {
        self.line_no += 1;
        match class.kind {
            LineKind::Heading { level, name } => self.open_section(level, name),
            LineKind::Fence | LineKind::Content => {
                self.push_content(line, class.fenced);
                Ok(())
            }
        }
    }

    pub fn finish(mut self) -> Result<Document, StructureError> {
        // EOF flush
        self.flush_content();
        let doc = self.doc.ok_or(StructureError::MissingRoot)?;
        invariants::validate(&doc)?;
        log::debug!("parsed {} sections from {} lines", doc.len(), self.line_no);
        Ok(doc)
    }

    fn push_content(&mut self, line: &str, fenced: bool) {
        if self.doc.is_none() {
            // Reported when the root arrives, so heading-free input still
            // fails with MissingRoot.
            if !line.trim().is_empty() && self.preamble.is_none() {
                self.preamble = Some(self.line_no);
            }
            return;
        }
        self.buffer.push(unescape_line(line, fenced).to_string());
    }

    fn open_section(&mut self, level: usize, raw_name: &str) -> Result<(), StructureError> {
        if raw_name.is_empty() {
            return Err(StructureError::EmptyName { line: self.line_no });
        }
        let name = self.options.name_style.normalize(raw_name);

        let Some(doc) = self.doc.as_ref() else {
            if level != 1 {
                return Err(StructureError::MissingRoot);
            }
            if let Some(line) = self.preamble {
                return Err(StructureError::ContentBeforeRoot { line });
            }
            let doc = Document::new(&name, self.options.name_style);
            log::debug!("opened root `{}`", doc.root().name());
            self.current = Some(doc.root_id());
            self.doc = Some(doc);
            return Ok(());
        };

        if level == 1 {
            return Err(StructureError::DuplicateRoot { name });
        }
        if doc.find_stored(&name).is_some() {
            return Err(StructureError::DuplicateName { name });
        }

        let current = self.current.unwrap_or(doc.root_id());
        let parent = std::iter::once(current)
            .chain(doc.ancestors(current))
            .find(|&candidate| doc[candidate].level() + 1 == level)
            .ok_or_else(|| StructureError::IncorrectNesting {
                name: name.clone(),
                level,
            })?;

        self.flush_content();
        let Some(doc) = self.doc.as_mut() else {
            return Err(StructureError::MissingRoot);
        };
        let id = doc.attach(parent, name, String::new(), None);
        log::trace!("opened `{}` at level {level}", doc.path(id));
        self.current = Some(id);
        Ok(())
    }

    fn flush_content(&mut self) {
        let lines = std::mem::take(&mut self.buffer);
        let (Some(doc), Some(current)) = (self.doc.as_mut(), self.current) else {
            return;
        };
        doc.set_content_unchecked(current, trim_blank_lines(&lines));
    }
}

/// Strips one continuation marker from an unfenced line.
fn unescape_line(line: &str, fenced: bool) -> &str {
    if fenced {
        line
    } else {
        line.strip_suffix(CONTINUATION).unwrap_or(line)
    }
}

/// Section content as the builder would store it for `text`: markers
/// stripped outside fences, blank edge lines dropped.
pub(crate) fn unescape_content(text: &str) -> String {
    let mut classifier = MarkdownLineClassifier::new();
    let lines: Vec<&str> = text
        .lines()
        .map(|line| unescape_line(line, classifier.classify(line).fenced))
        .collect();
    trim_blank_lines(&lines)
}

/// Joins `lines` with `\n`, dropping leading and trailing blank lines.
pub(crate) fn trim_blank_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let is_text = |l: &S| !l.as_ref().trim().is_empty();
    match (lines.iter().position(is_text), lines.iter().rposition(is_text)) {
        (Some(start), Some(end)) => lines[start..=end]
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<&str>>()
            .join("\n"),
        _ => String::new(),
    }
}
