use crate::parsing::CONTINUATION;
use crate::parsing::classify::MarkdownLineClassifier;
use crate::parsing::kinds::ListItem;

/// HTML comment terminator; a marker after it would show up in rendered output.
const COMMENT_CLOSE: &str = "-->";

/// Applies the soft-wrap escaping scheme to section content.
///
/// With `soft_wrap` on, every line gets the continuation marker except the
/// last line, blank lines, list items, lines inside or delimiting a code
/// fence, lines closing an HTML comment, and lines directly before a list
/// item. Fenced code passes through verbatim.
///
/// Lines that already end with the marker always get one more (fenced code
/// excepted), since the parser strips exactly one from every unfenced line.
pub fn escape_content(content: &str, soft_wrap: bool) -> String {
    let mut classifier = MarkdownLineClassifier::new();
    let lines: Vec<(&str, bool)> = content
        .lines()
        .map(|line| (line, classifier.classify(line).fenced))
        .collect();

    let mut out = String::with_capacity(content.len() + lines.len());
    for (i, &(line, fenced)) in lines.iter().enumerate() {
        out.push_str(line);
        let next = lines.get(i + 1).map(|&(next, _)| next);
        let literal_marker = !fenced && line.ends_with(CONTINUATION);
        if literal_marker || (soft_wrap && continues_paragraph(line, fenced, next)) {
            out.push(CONTINUATION);
        }
        if next.is_some() {
            out.push('\n');
        }
    }
    out
}

fn continues_paragraph(line: &str, fenced: bool, next: Option<&str>) -> bool {
    let Some(next) = next else {
        return false;
    };
    !fenced
        && !is_blank(line)
        && !ListItem::is_list_item(line)
        && !line.trim_end().ends_with(COMMENT_CLOSE)
        && !ListItem::is_list_item(next)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paragraph_lines_get_markers() {
        assert_eq!(escape_content("one\ntwo\nthree", true), "one\\\ntwo\\\nthree");
    }

    #[test]
    fn line_before_blank_line_is_marked() {
        assert_eq!(escape_content("one\n\ntwo", true), "one\\\n\ntwo");
        assert_eq!(escape_content("one\n\n\ntwo", true), "one\\\n\n\ntwo");
    }

    #[test]
    fn list_items_and_lines_before_them_are_untouched() {
        assert_eq!(
            escape_content("Intro\n- a\n- b\nafter", true),
            "Intro\n- a\n- b\nafter"
        );
    }

    #[test]
    fn fenced_code_passes_verbatim() {
        assert_eq!(
            escape_content("text\n\n```\nline one\nline two\n```\nmore\nend", true),
            "text\\\n\n```\nline one\nline two\n```\nmore\\\nend"
        );
    }

    #[test]
    fn line_before_fence_is_marked() {
        assert_eq!(
            escape_content("see:\n```\nx\n```", true),
            "see:\\\n```\nx\n```"
        );
    }

    #[test]
    fn comment_close_is_untouched() {
        assert_eq!(
            escape_content("<!-- note -->\ntext\nend", true),
            "<!-- note -->\ntext\\\nend"
        );
    }

    #[test]
    fn literal_trailing_marker_is_protected() {
        assert_eq!(escape_content("path C:\\", true), "path C:\\\\");
        assert_eq!(escape_content("a\\\n\nb", false), "a\\\\\n\nb");
    }

    #[test]
    fn soft_wrap_off_leaves_lines_alone() {
        assert_eq!(escape_content("one\ntwo", false), "one\ntwo");
    }
}
