//! Identifier list loading

use std::path::Path;

use crate::models::SteamId;
use crate::utils::error::InputError;

/// Read a newline-delimited list of decimal steam ids.
///
/// Any line that does not parse (blank interior lines included) rejects the
/// whole file.
pub async fn load_ids(path: &Path) -> Result<Vec<SteamId>, InputError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    parse_ids(&content)
}

/// Parse ids from already-loaded text. A leading byte-order mark is ignored.
pub fn parse_ids(content: &str) -> Result<Vec<SteamId>, InputError> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let trimmed = line.trim();
            trimmed.parse().map_err(|_| InputError::MalformedLine {
                line: i + 1,
                value: trimmed.to_string(),
            })
        })
        .collect()
}
