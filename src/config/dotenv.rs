//! Line-oriented `KEY=VALUE` configuration source parsing.
//!
//! Follows the conventional dotenv rules the configuration source format
//! calls for: `#` comment lines and blank lines are skipped, an optional
//! `export ` prefix is accepted, values may be wrapped in single or double
//! quotes (double quotes additionally expand `\n`), and unquoted values have
//! trailing ` #` comments stripped. Lines that do not form a valid
//! assignment — no `=`, or a key outside `[A-Za-z0-9_]+` — are ignored
//! rather than rejected.

use std::path::Path;

use crate::config::ConfigMap;
use crate::error::ConfigError;

/// Parse a dotenv-style configuration file into a [`ConfigMap`].
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read.
pub fn parse(path: &Path) -> Result<ConfigMap, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_from_str(&content))
}

/// Parse dotenv-style content from a string.
///
/// # Examples
///
/// ```
/// use confapply::config::dotenv::parse_from_str;
///
/// let map = parse_from_str("# comment\nAPP_NAME=shop\nexport PORT=8080\n");
/// assert_eq!(map.get("APP_NAME"), Some("shop"));
/// assert_eq!(map.get("PORT"), Some("8080"));
/// ```
///
/// Quoted values are unwrapped, and later assignments win:
///
/// ```
/// use confapply::config::dotenv::parse_from_str;
///
/// let map = parse_from_str("GREETING=\"hello\\nworld\"\nGREETING='literal'\n");
/// assert_eq!(map.get("GREETING"), Some("literal"));
/// ```
#[must_use]
pub fn parse_from_str(content: &str) -> ConfigMap {
    let mut map = ConfigMap::new();

    for line in content.lines() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let assignment = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((key, value)) = assignment.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if !is_valid_key(key) {
            continue;
        }

        map.insert(key, unquote(value.trim()));
    }

    map
}

/// Keys are restricted to `[A-Za-z0-9_]+`.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Unwrap surrounding quotes, or strip an inline comment from an unquoted value.
fn unquote(value: &str) -> String {
    if value.len() >= 2 {
        if let Some(inner) = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
        {
            return inner.replace("\\n", "\n");
        }
        if let Some(inner) = value
            .strip_prefix('\'')
            .and_then(|v| v.strip_suffix('\''))
        {
            return inner.to_string();
        }
    }
    strip_inline_comment(value).to_string()
}

/// Strip inline comments (`#` preceded by whitespace) from a value.
fn strip_inline_comment(value: &str) -> &str {
    value
        .find(" #")
        .or_else(|| value.find("\t#"))
        .map_or(value, |idx| value.get(..idx).unwrap_or(value).trim_end())
}
