//! Line normalization for resolved output.

/// Tidy resolved text line by line.
///
/// Leading blank lines are dropped, each line loses its surrounding
/// whitespace, and any run of blank lines between text becomes a single
/// paragraph break.
pub fn normalize_paragraphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = false;
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            blank_run = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank_run { "\n\n" } else { "\n" });
        }
        out.push_str(line);
        blank_run = false;
    }
    out
}
