//! Escaping for formula text.

/// Markup punctuation that needs a backslash inside a formula.
const FORMULA_ESCAPED: &str = "\\`*_{}[]()#+-.!";

/// Escape a run of non-word formula text.
///
/// Markup punctuation gets a backslash, and a space that does not follow a
/// comma becomes `&nbsp;` so the formula never wraps.
pub fn escape_formula(run: &str) -> String {
    let mut out = String::with_capacity(run.len());
    let mut after_comma = false;
    for c in run.chars() {
        if FORMULA_ESCAPED.contains(c) {
            out.push('\\');
        }
        if c == ' ' && !after_comma {
            out.push_str("&nbsp;");
        } else {
            out.push(c);
        }
        after_comma = c == ',';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(" + ", "&nbsp;\\+&nbsp;")]
    #[case(", ", ", ")]
    #[case("(", "\\(")]
    #[case(" * ", "&nbsp;\\*&nbsp;")]
    #[case("", "")]
    #[case("=", "=")]
    fn test_escape_formula(#[case] run: &str, #[case] expected: &str) {
        assert_eq!(escape_formula(run), expected);
    }
}
