//! Template substitutor: `${KEY:-DEFAULT}` placeholder expansion.

use super::ResolvedConfig;
use super::placeholder;

/// Substitute every `${KEY:-DEFAULT}` placeholder in `document`.
///
/// A placeholder is replaced by the configuration value for `KEY` when that
/// value is present and non-empty, and by the literal `DEFAULT` text (which
/// may be empty) otherwise. Bare `${KEY}` tokens — without a default clause —
/// are intentionally not matched and pass through verbatim: a template must
/// always carry a default to be substitutable. Malformed placeholders are
/// ordinary text.
///
/// Pure function: no I/O, inputs are untouched, and it is safe to call
/// concurrently for any number of documents against the same configuration.
///
/// # Examples
///
/// ```
/// use confapply::config::ConfigMap;
/// use confapply::interpolate::{resolve, substitute};
///
/// let empty = resolve(&ConfigMap::new());
/// assert_eq!(substitute("port=${PORT:-8080}", &empty), "port=8080");
///
/// let mut raw = ConfigMap::new();
/// raw.insert("PORT", "9090");
/// let config = resolve(&raw);
/// assert_eq!(substitute("port=${PORT:-8080}", &config), "port=9090");
/// ```
#[must_use]
pub fn substitute(document: &str, config: &ResolvedConfig) -> String {
    placeholder::expand_defaulted(document, |key| config.get_nonempty(key))
}
