/// ATX heading syntax (`## Name`).
pub struct Heading;

impl Heading {
    /// The heading marker character; its repetition count is the level.
    pub const MARKER: char = '#';

    /// Parses a heading line into `(level, name)`.
    ///
    /// The first non-blank character must be the marker. The name is what
    /// remains after trimming whitespace and marker characters from both ends,
    /// so `## Notes ##` yields `(2, "Notes")`.
    pub fn parse(line: &str) -> Option<(usize, &str)> {
        let t = line.trim_start();
        let level = t.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 {
            return None;
        }
        let name = t.trim_matches(|c: char| c == Self::MARKER || c.is_whitespace());
        Some((level, name))
    }

    pub fn render(level: usize, name: &str) -> String {
        let mut out = String::with_capacity(level + 1 + name.len());
        for _ in 0..level {
            out.push(Self::MARKER);
        }
        out.push(' ');
        out.push_str(name);
        out
    }

    /// Rewrites a heading as emphasized plain text so it no longer opens a section.
    pub fn demote(name: &str) -> String {
        if name.is_empty() {
            format!("\\{}", Self::MARKER)
        } else {
            format!("**{name}**")
        }
    }
}
