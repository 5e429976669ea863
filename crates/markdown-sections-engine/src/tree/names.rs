use serde::{Deserialize, Serialize};

/// How heading text maps to a stored section name and back to display text.
///
/// Uniqueness is always checked case-insensitively on the stored name,
/// whichever style is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    /// Names are stored and displayed exactly as written.
    #[default]
    Verbatim,
    /// Names are stored lowercase with `_` for spaces (`default_prompts`)
    /// and displayed in title case (`Default Prompts`).
    SnakeCase,
}

impl NameStyle {
    /// Converts heading text into the stored name.
    pub fn normalize(self, raw: &str) -> String {
        let raw = raw.trim();
        match self {
            NameStyle::Verbatim => raw.to_string(),
            NameStyle::SnakeCase => raw
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
                .to_lowercase(),
        }
    }

    /// Converts a stored name into heading text.
    pub fn display(self, name: &str) -> String {
        match self {
            NameStyle::Verbatim => name.to_string(),
            NameStyle::SnakeCase => name
                .split('_')
                .filter(|word| !word.is_empty())
                .map(title_case_word)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Key used by the flat section index.
pub fn index_key(name: &str) -> String {
    name.to_lowercase()
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Anchor fragment used by table of contents links.
pub fn slug(display: &str) -> String {
    display.trim().to_lowercase().replace(' ', "-")
}
