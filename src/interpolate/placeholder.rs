//! Shared `${...}` placeholder scanning.
//!
//! Two token shapes exist: the bare cross-reference `${KEY}` used inside
//! configuration values, and the default-bearing `${KEY:-DEFAULT}` used in
//! template documents. Keys are `[A-Za-z0-9_]+`; a default is any run of
//! characters up to the first `}` and may be empty. Anything that does not
//! match a shape exactly (empty key, missing brace, stray characters) is
//! ordinary text: scanning resumes at the next byte, so overlapping
//! candidates like `${A${B}` still find the inner token.

/// A single placeholder occurrence located within a larger string.
struct Span<'a> {
    /// Byte offset of the `$`.
    start: usize,
    /// Byte offset one past the closing `}`.
    end: usize,
    key: &'a str,
    default: Option<&'a str>,
}

const fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Find the next placeholder at or after `from`.
fn find(input: &str, from: usize, with_default: bool) -> Option<Span<'_>> {
    let bytes = input.as_bytes();
    let mut at = from;
    while at + 1 < bytes.len() {
        if bytes.get(at) == Some(&b'$')
            && bytes.get(at + 1) == Some(&b'{')
            && let Some(span) = match_at(input, at, with_default)
        {
            return Some(span);
        }
        at += 1;
    }
    None
}

/// Try to match a complete token starting at the `$` at `start`.
fn match_at(input: &str, start: usize, with_default: bool) -> Option<Span<'_>> {
    let bytes = input.as_bytes();
    let key_start = start + 2;
    let mut i = key_start;
    while bytes.get(i).copied().is_some_and(is_key_byte) {
        i += 1;
    }
    if i == key_start {
        return None;
    }
    let key = input.get(key_start..i)?;

    if with_default {
        if !input.get(i..)?.starts_with(":-") {
            return None;
        }
        let default_start = i + 2;
        i = default_start;
        while bytes.get(i).is_some_and(|&b| b != b'}') {
            i += 1;
        }
        // Unbalanced: ran off the end without a closing brace.
        if i >= bytes.len() {
            return None;
        }
        Some(Span {
            start,
            end: i + 1,
            key,
            default: input.get(default_start..i),
        })
    } else if bytes.get(i) == Some(&b'}') {
        Some(Span {
            start,
            end: i + 1,
            key,
            default: None,
        })
    } else {
        None
    }
}

/// Replace every bare `${KEY}` for which `lookup` returns a value.
///
/// Tokens whose key yields `None` are kept verbatim. Replacement text is not
/// re-scanned. Returns the rewritten string and whether any lookup succeeded
/// (the resolver's per-pass "changed" signal — deliberately set even when the
/// replacement text equals the original token).
pub(super) fn expand_bare<'v>(
    input: &str,
    mut lookup: impl FnMut(&str) -> Option<&'v str>,
) -> (String, bool) {
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;
    let mut replaced = false;
    while let Some(span) = find(input, pos, false) {
        out.push_str(input.get(pos..span.start).unwrap_or_default());
        match lookup(span.key) {
            Some(value) => {
                out.push_str(value);
                replaced = true;
            }
            None => out.push_str(input.get(span.start..span.end).unwrap_or_default()),
        }
        pos = span.end;
    }
    out.push_str(input.get(pos..).unwrap_or_default());
    (out, replaced)
}

/// Replace every `${KEY:-DEFAULT}` with the looked-up value, or the literal
/// default text when `lookup` returns `None`.
pub(super) fn expand_defaulted<'v>(
    input: &str,
    mut lookup: impl FnMut(&str) -> Option<&'v str>,
) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;
    while let Some(span) = find(input, pos, true) {
        out.push_str(input.get(pos..span.start).unwrap_or_default());
        match lookup(span.key) {
            Some(value) => out.push_str(value),
            None => out.push_str(span.default.unwrap_or_default()),
        }
        pos = span.end;
    }
    out.push_str(input.get(pos..).unwrap_or_default());
    out
}

/// Whether `input` still contains a well-formed bare `${KEY}` token.
pub(super) fn contains_bare_ref(input: &str) -> bool {
    find(input, 0, false).is_some()
}
