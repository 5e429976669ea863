use regex::Regex;
use std::sync::OnceLock;

/// List item syntax. Only recognised so the serializer can leave list lines alone.
pub struct ListItem;

static LIST_ITEM_REGEX: OnceLock<Regex> = OnceLock::new();

impl ListItem {
    /// Bullet used when the engine itself writes a list (table of contents).
    pub const BULLET: &'static str = "- ";

    /// True for `-`, `*`, `+` bullets and `1.` / `1)` ordered markers, at any indentation.
    pub fn is_list_item(line: &str) -> bool {
        let re = LIST_ITEM_REGEX.get_or_init(|| {
            Regex::new(r"^\s*(?:[-*+]|\d{1,9}[.)])(?:\s|$)").expect("Invalid list item regex")
        });
        re.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- item", true)]
    #[case("  * nested", true)]
    #[case("+ plus", true)]
    #[case("12. ordered", true)]
    #[case("3) ordered", true)]
    #[case("-", true)]
    #[case("*emphasis*", false)]
    #[case("---", false)]
    #[case("-->", false)]
    #[case("text - with dash", false)]
    fn recognise_list_items(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(ListItem::is_list_item(line), expected);
    }
}
