//! Assertion helpers for rendered text and reports.

use refmark::{BatchReport, RenderedText};

/// Assert the text holds exactly one link, pointing at `fragment`.
pub fn assert_single_link(rendered: &RenderedText, fragment: &str) {
    assert_eq!(
        rendered.links.len(),
        1,
        "Expected one link in '{}', got {:?}",
        rendered.text,
        rendered.links
    );
    assert_eq!(
        rendered.links[0].target.fragment, fragment,
        "Expected link to '{}' in '{}'",
        fragment, rendered.text
    );
}

/// Assert the report holds `count` diagnostics with `code`.
pub fn assert_code_count(report: &BatchReport, code: &str, count: usize) {
    let found: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.code.as_deref() == Some(code))
        .collect();
    assert_eq!(
        found.len(),
        count,
        "Expected {} diagnostics with code {}, got {:?}",
        count,
        code,
        found
    );
}
