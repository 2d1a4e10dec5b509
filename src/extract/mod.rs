use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(test)]
mod tests;

/// Marker preceding a symbol definition
pub const DEFINE_MARKER: &str = "#define ";

/// Marker preceding a conditional expression
pub const CONDITIONAL_MARKER: &str = "#if ";

/// Characters stripped from both ends of a fragment before extraction
const FRAGMENT_TRIM: &[char] = &['!', '(', ')', ' ', '\t', '\n', '\r'];

/// Logical boundaries inside a conditional expression
static OPERATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\||&&").expect("valid regex"));

/// First character that cannot be part of a symbol name
static IDENT_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid regex"));

/// Extract symbol names following `marker` in `line`
///
/// Only the leftmost occurrence of the marker is considered, matched
/// case-insensitively. Every name found is passed to `emit` in the order it
/// appears on the line.
///
/// # Returns
/// The number of names passed to `emit`
pub fn extract_symbols<F>(line: &str, marker: &str, mut emit: F) -> usize
where
    F: FnMut(&str),
{
    let Some(start) = find_ignore_case(line, marker) else {
        return 0;
    };

    let mut count = 0;
    for fragment in OPERATORS
        .split(&line[start + marker.len()..])
        .filter(|f| !f.is_empty())
    {
        let name = symbol_name(fragment);

        if !name.is_empty() {
            count += 1;
            emit(name);
        }
    }

    count
}

/// Run both the definition and the conditional marker over a single line
pub fn extract_line<F>(line: &str, mut emit: F) -> usize
where
    F: FnMut(&str),
{
    extract_symbols(line, DEFINE_MARKER, &mut emit)
        + extract_symbols(line, CONDITIONAL_MARKER, &mut emit)
}

/// Normalize one expression fragment into a (possibly empty) symbol name
///
/// Anything from the first non-identifier character on is dropped, so
/// `FOO==1` and `FOO // note` both yield `FOO`.
fn symbol_name(fragment: &str) -> &str {
    let name = fragment.trim_matches(FRAGMENT_TRIM);

    match IDENT_BREAK.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

/// Byte offset of the first ASCII case-insensitive match of `needle`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    let bytes = haystack.as_bytes();

    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        bytes
            .get(i..i + needle.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}
