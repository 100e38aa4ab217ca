//! Event-name parsing.
//!
//! Two string forms are understood:
//!
//! * **compound names** list several events at once, separated by commas
//!   and/or whitespace (`"created, paid shipped"`);
//! * **namespaced names** nest an event under its parents with colons
//!   (`"order:item:added"`), from most to least specific.

const NAMESPACE_SEPARATOR: char = ':';
const NAMESPACE_DELIMITER: &str = ":";

/// Splits a compound event string into its event names.
///
/// The input is trimmed first; every run of commas and whitespace then counts
/// as a single split point. Whitespace is the ECMAScript set: Unicode
/// `White_Space` without U+0085 (NEXT LINE), plus U+FEFF (BYTE ORDER MARK).
/// A blank input yields a single empty name, and a comma left at either end
/// after trimming yields an empty name on that side.
///
/// # Examples
/// ```rust
/// use herald_events::split_event_list;
///
/// assert_eq!(split_event_list("a, b   c"), ["a", "b", "c"]);
/// assert_eq!(split_event_list("   "), [""]);
/// ```
#[must_use]
pub fn split_event_list(events: &str) -> Vec<&str> {
    split_runs(events.trim_matches(is_blank), is_list_separator)
}

/// Expands a namespaced event name into the chain of names it notifies.
///
/// The chain starts with the full name and drops one trailing segment at a
/// time. Runs of colons collapse into one separator.
///
/// # Examples
/// ```rust
/// use herald_events::expand_namespaces;
///
/// assert_eq!(expand_namespaces("a:b:c"), ["a:b:c", "a:b", "a"]);
/// assert_eq!(expand_namespaces("a"), ["a"]);
/// ```
#[must_use]
pub fn expand_namespaces(event: &str) -> Vec<String> {
    let segments = split_runs(event.trim_matches(is_blank), |c| c == NAMESPACE_SEPARATOR);

    (1..=segments.len()).rev().map(|depth| segments[..depth].join(NAMESPACE_DELIMITER)).collect()
}

fn is_list_separator(c: char) -> bool {
    c == ',' || is_blank(c)
}

fn is_blank(c: char) -> bool {
    match c {
        '\u{0085}' => false,
        '\u{FEFF}' => true,
        _ => c.is_whitespace(),
    }
}

/// Splits `input` at every run of separator characters, keeping empty edge tokens.
fn split_runs(input: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(start) = rest.find(&is_separator) {
        tokens.push(&rest[..start]);
        let tail = &rest[start..];
        let end = tail.find(|c: char| !is_separator(c)).unwrap_or(tail.len());
        rest = &tail[end..];
    }
    tokens.push(rest);

    tokens
}
