//! Delimited metadata block codec.
//!
//! File layout is `---\n<metadata>\n---\n<body>`. Only the first closing
//! delimiter is honored, so bodies may contain `---` lines freely.

use std::error::Error;
use std::fmt::{Display, Formatter};

const OPENING_DELIMITER: &str = "---\n";
const CLOSING_DELIMITER: &str = "\n---\n";

/// Raw split of an entity file. Neither half is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFile {
    pub metadata: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterError {
    MissingOpeningDelimiter,
    MissingClosingDelimiter,
}

impl Display for FrontmatterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOpeningDelimiter => {
                write!(f, "content does not start with YAML frontmatter delimiter")
            }
            Self::MissingClosingDelimiter => {
                write!(f, "missing closing YAML frontmatter delimiter")
            }
        }
    }
}

impl Error for FrontmatterError {}

/// Splits file content into metadata block and body.
///
/// # Errors
/// - `MissingOpeningDelimiter` when content does not begin with `---\n`.
/// - `MissingClosingDelimiter` when no `\n---\n` follows the opening line.
pub fn decode(content: &str) -> Result<EntityFile, FrontmatterError> {
    let rest = content
        .strip_prefix(OPENING_DELIMITER)
        .ok_or(FrontmatterError::MissingOpeningDelimiter)?;

    let (metadata, body) = rest
        .split_once(CLOSING_DELIMITER)
        .ok_or(FrontmatterError::MissingClosingDelimiter)?;

    Ok(EntityFile {
        metadata: metadata.to_string(),
        body: body.to_string(),
    })
}

/// Joins metadata and body with the frontmatter delimiters.
pub fn encode(metadata: &str, body: &str) -> String {
    let mut out = String::with_capacity(
        OPENING_DELIMITER.len() + metadata.len() + CLOSING_DELIMITER.len() + body.len(),
    );
    out.push_str(OPENING_DELIMITER);
    out.push_str(metadata);
    out.push_str(CLOSING_DELIMITER);
    out.push_str(body);
    out
}
