use super::{DELIMITER, FrontMatter, FrontMatterError};

/// Re-embeds front matter above `body`.
///
/// Exactly one blank line separates the closing delimiter from the body.
/// Absent or empty front matter yields `body` unchanged.
pub fn join(
    front_matter: Option<&FrontMatter>,
    body: &str,
) -> Result<String, FrontMatterError> {
    match front_matter {
        Some(fm) if !fm.is_empty() => {
            let yaml =
                serde_yaml::to_string(&fm.fields).map_err(FrontMatterError::Serialize)?;
            let body = body.trim_start_matches(['\r', '\n']);
            Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n\n{body}"))
        }
        _ => Ok(body.to_string()),
    }
}
