use super::kinds::{CodeFence, FenceKind, Heading};

/// Whether the scanner is currently inside a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceState {
    #[default]
    Outside,
    Inside(FenceKind),
}

impl FenceState {
    pub fn is_inside(self) -> bool {
        matches!(self, FenceState::Inside(_))
    }
}

/// What a single line means to the section tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A fence delimiter (opening or closing). Never a heading.
    Fence,
    /// A heading outside any fence.
    Heading { level: usize, name: &'a str },
    /// Everything else, including every line inside a fence.
    Content,
}

/// Classifies one line given the fence state before it, returning the state after it.
///
/// Inside a fence every line is content except the delimiter that closes it,
/// so `# comments` in code samples never become sections.
pub fn classify(line: &str, fence: FenceState) -> (LineKind<'_>, FenceState) {
    let sig = CodeFence::sig(line);
    match fence {
        FenceState::Inside(open) => {
            if CodeFence::closes(open, sig) {
                (LineKind::Fence, FenceState::Outside)
            } else {
                (LineKind::Content, fence)
            }
        }
        FenceState::Outside => {
            if let Some(kind) = sig {
                return (LineKind::Fence, FenceState::Inside(kind));
            }
            match Heading::parse(line) {
                Some((level, name)) => (LineKind::Heading { level, name }, fence),
                None => (LineKind::Content, fence),
            }
        }
    }
}

/// Classification of a line plus whether it sits inside (or delimits) a fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass<'a> {
    pub kind: LineKind<'a>,
    /// True for fence delimiters and every line between them.
    pub fenced: bool,
}

/// Carries fence state across a stream of lines.
#[derive(Debug, Default)]
pub struct MarkdownLineClassifier {
    fence: FenceState,
}

impl MarkdownLineClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify<'a>(&mut self, line: &'a str) -> LineClass<'a> {
        let before = self.fence;
        let (kind, after) = classify(line, before);
        self.fence = after;
        LineClass {
            kind,
            fenced: before.is_inside() || kind == LineKind::Fence,
        }
    }

    pub fn fence(&self) -> FenceState {
        self.fence
    }
}
