// Property File Parser
// Parses simple key=value settings files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Parse property file text, invoking `handler` for each key-value pair
///
/// Keys and values are trimmed. `#` starts a comment that runs to end of
/// line. Lines without `=` are skipped with a warning. The handler may
/// reject an entry; the first error ends parsing and carries the line
/// number.
pub fn parse_propfile(
    data: &str,
    handler: &mut dyn FnMut(&str, &str) -> Result<()>,
) -> Result<()> {
    for (number, raw) in data.lines().enumerate() {
        let line = match raw.find('#') {
            Some(hash) => &raw[..hash],
            None => raw,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            log::warn!("line {}: key without value", number + 1);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            log::warn!("line {}: value without key", number + 1);
            continue;
        }

        handler(key, value.trim()).with_context(|| format!("line {}", number + 1))?;
    }
    Ok(())
}

/// Read and parse a property file from disk
pub fn load_propfile(
    path: &Path,
    handler: &mut dyn FnMut(&str, &str) -> Result<()>,
) -> Result<()> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_propfile(&data, handler).with_context(|| format!("In {}", path.display()))
}
