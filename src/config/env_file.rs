//! `KEY=value` config-file parsing.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

/// Parse env-file content into a variable map.
///
/// Lines are `KEY=value`; blank lines and `#` comments are skipped, values
/// may be single- or double-quoted, and a line without `=` is ignored.
pub fn parse(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        vars.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }

    vars
}

/// Load an env file, returning an empty map if it does not exist.
pub fn load_optional(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

fn unquote(value: &str) -> &str {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| {
            value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
        });
    stripped.unwrap_or(value)
}
