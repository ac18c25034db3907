//! YAML front matter parsing.
//!
//! Notes may start with a `---` delimited YAML block carrying a title and
//! description. Everything after the closing delimiter is the markdown
//! body.

use serde::Deserialize;

/// Parsed front matter fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Page title override.
    pub title: Option<String>,
    /// Page description.
    pub description: Option<String>,
}

/// Error parsing a front matter block.
#[derive(Debug, thiserror::Error)]
#[error("invalid front matter: {0}")]
pub struct FrontMatterError(#[from] serde_yaml::Error);

/// Split a document into front matter and body.
///
/// Returns the parsed front matter (default when the document has no
/// block) and the markdown body.
///
/// # Errors
///
/// Returns [`FrontMatterError`] when a block is present but is not valid
/// YAML.
pub fn split_front_matter(text: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let Some(rest) = text.strip_prefix("---\n").or_else(|| text.strip_prefix("---\r\n")) else {
        return Ok((FrontMatter::default(), text));
    };

    let Some(end) = rest.find("\n---").map(|i| {
        let after = &rest[i + 4..];
        (i, after.strip_prefix('\n').or_else(|| after.strip_prefix("\r\n")).unwrap_or(after))
    }) else {
        // Unterminated block; treat the whole document as body.
        return Ok((FrontMatter::default(), text));
    };

    let (yaml_len, body) = end;
    let front = serde_yaml::from_str(&rest[..yaml_len])?;
    Ok((front, body))
}
