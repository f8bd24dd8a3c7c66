/// Strips blank lines and per-line surrounding whitespace.
///
/// The diff engine expects pre-cleaned input; this is the canonical
/// cleaning step shared by callers, so both sides of a comparison are
/// normalized the same way.
pub fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
