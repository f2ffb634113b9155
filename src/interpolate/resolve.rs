//! Config resolver: fixpoint expansion of `${VAR}` cross-references.

use super::placeholder;
use crate::config::ConfigMap;

/// Maximum number of scan-and-replace passes over the configuration.
///
/// The primary termination condition is reaching a fixpoint (a pass with no
/// successful lookup); the cap bounds pathological cyclic references such as
/// `A=${B}`, `B=${A}`, which never resolve and exit here with their residual
/// tokens intact.
pub const MAX_PASSES: usize = 5;

/// A configuration map whose internal `${VAR}` references have been expanded.
///
/// Produced only by [`resolve`] and never mutated afterwards. Values that
/// referenced absent keys, empty-valued keys, or cycle participants keep
/// their `${VAR}` tokens verbatim; [`unresolved_keys`](Self::unresolved_keys)
/// reports them so callers can decide whether to warn, fail, or accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    values: ConfigMap,
}

impl ResolvedConfig {
    /// Look up a key's resolved value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key)
    }

    /// Look up a key, treating an empty value as absent.
    ///
    /// This deliberately conflates "explicitly set to empty" with "unset":
    /// the default-fallback behaviour of template substitution depends on it.
    #[must_use]
    pub fn get_nonempty(&self, key: &str) -> Option<&str> {
        self.values.get(key).filter(|v| !v.is_empty())
    }

    /// Iterate over `(key, value)` pairs in source declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the configuration is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys whose values still contain a well-formed `${VAR}` token after
    /// resolution — the soft-failure residue of absent keys and cycles.
    #[must_use]
    pub fn unresolved_keys(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, value)| placeholder::contains_bare_ref(value))
            .map(|(key, _)| key)
            .collect()
    }
}

/// Expand `${VAR}` references between configuration values until stable.
///
/// Runs up to [`MAX_PASSES`] passes over the map in declaration order. Within
/// a pass, each value's `${VAR}` tokens are replaced by the referenced key's
/// current value when that value is non-empty; replacements made earlier in a
/// pass are visible to later lookups. A token referencing an absent or
/// empty-valued key stays verbatim. The loop exits early on the first pass
/// where no lookup succeeds.
///
/// Never fails: unresolved and cyclic references degrade to residual tokens
/// in the output rather than errors.
///
/// # Examples
///
/// ```
/// use confapply::config::ConfigMap;
/// use confapply::interpolate::resolve;
///
/// let mut raw = ConfigMap::new();
/// raw.insert("A", "1");
/// raw.insert("B", "${A}2");
/// raw.insert("C", "${B}3");
///
/// let resolved = resolve(&raw);
/// assert_eq!(resolved.get("A"), Some("1"));
/// assert_eq!(resolved.get("B"), Some("12"));
/// assert_eq!(resolved.get("C"), Some("123"));
/// ```
#[must_use]
pub fn resolve(raw: &ConfigMap) -> ResolvedConfig {
    let mut values = raw.clone();
    for _ in 0..MAX_PASSES {
        let mut changed = false;
        for index in 0..values.len() {
            let Some(current) = values.value_at(index).map(str::to_string) else {
                break;
            };
            if !current.contains("${") {
                continue;
            }
            let (next, replaced) =
                placeholder::expand_bare(&current, |name| {
                    values.get(name).filter(|v| !v.is_empty())
                });
            if replaced {
                changed = true;
            }
            if next != current {
                values.set_value_at(index, next);
            }
        }
        if !changed {
            break;
        }
    }
    ResolvedConfig { values }
}
