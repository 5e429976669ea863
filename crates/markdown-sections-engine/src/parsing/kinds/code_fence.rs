/// The delimiter family a fenced code block was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// Fenced code block syntax. All fence delimiter knowledge lives here.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// Returns the fence kind if `line` (ignoring leading indentation) starts a fence delimiter.
    pub fn sig(line: &str) -> Option<FenceKind> {
        let t = line.trim_start().trim_end_matches(['\r', '\n']);
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else {
            None
        }
    }

    /// A fence only closes on a delimiter of the same family that opened it.
    pub fn closes(open: FenceKind, sig: Option<FenceKind>) -> bool {
        sig == Some(open)
    }
}
