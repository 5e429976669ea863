use thiserror::Error;

use super::{DELIMITER, FrontMatter, ParsedDocument};

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
    #[error("front matter cannot be written as YAML: {0}")]
    Serialize(serde_yaml::Error),
}

/// Splits leading front matter from `content`.
///
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document
/// ```
///
/// Without an opening delimiter on the first line, or without a closing one,
/// the whole input is body.
pub fn split(content: &str) -> Result<ParsedDocument, FrontMatterError> {
    let no_front_matter = || ParsedDocument {
        front_matter: None,
        body: content.to_string(),
    };

    let Some(after_open) = content
        .strip_prefix(DELIMITER)
        .and_then(|rest| rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")))
    else {
        return Ok(no_front_matter());
    };

    let Some((yaml, body)) = split_at_closing(after_open) else {
        return Ok(no_front_matter());
    };

    let front_matter = if yaml.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    Ok(ParsedDocument {
        front_matter: Some(front_matter),
        body: body.to_string(),
    })
}

/// Finds the closing delimiter line, returning (yaml, body-after-delimiter).
fn split_at_closing(content: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&content[..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
