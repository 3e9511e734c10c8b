//! Text manipulation utilities for classifying reference candidates.
//!
//! All offsets are byte offsets into `&str`; every helper returns offsets that
//! fall on `char` boundaries.

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Byte offset just past the run of word characters starting at `start`.
pub fn word_end(text: &str, start: usize) -> usize {
    text[start..]
        .char_indices()
        .find(|&(_, c)| !is_word_character(c))
        .map_or(text.len(), |(i, _)| start + i)
}

/// Byte offset just past a qualified name starting at `start`.
///
/// A qualified name is a run of words joined by `::`, like `SkPaint::Cap`.
/// A trailing `::` that is not followed by a word is not part of the name.
pub fn full_name_end(text: &str, start: usize) -> usize {
    let mut end = word_end(text, start);
    while text[end..].starts_with("::") {
        let next = end + 2;
        match text[next..].chars().next() {
            Some(c) if is_word_character(c) => end = word_end(text, next),
            _ => break,
        }
    }
    end
}

/// True when every character is a lowercase letter (no digits, no `_`).
pub fn is_all_lower(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_lowercase)
}

pub fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

pub fn starts_lowercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_lowercase)
}

pub fn has_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase)
}

/// True for names like `kMode`, `fWidth`, `gGlobal`: `lead` then an uppercase letter.
pub fn is_prefixed_upper(s: &str, lead: char) -> bool {
    let mut chars = s.chars();
    chars.next() == Some(lead) && chars.next().is_some_and(char::is_uppercase)
}

/// Check whether the text before `start` ends a sentence.
///
/// Scanning backwards over whitespace: the start of the text, a period
/// followed by whitespace, or a blank line all count as sentence boundaries.
pub fn starts_sentence(text: &str, start: usize) -> bool {
    let bytes = text.as_bytes();
    let mut check = start;
    while check > 0 {
        check -= 1;
        let b = bytes[check];
        if b == b'.' {
            return bytes.get(check + 1).is_none_or(|&next| next <= b' ');
        }
        if b > b' ' {
            return false;
        }
        if b == b'\n' && bytes.get(check + 1) == Some(&b'\n') {
            return true;
        }
    }
    true
}

/// Strip a trailing empty parameter list: `setColor()` -> `setColor`.
pub fn strip_empty_parens(name: &str) -> &str {
    name.strip_suffix("()").unwrap_or(name)
}

/// Split an overload clone name into its base and numeric suffix.
///
/// `drawRect_3` and `drawRect_3()` both give `("drawRect", 3)`. Only the
/// suffixes `_2` through `_9` denote clones.
pub fn split_clone_suffix(name: &str) -> Option<(&str, u8)> {
    let bare = strip_empty_parens(name);
    let (base, digit) = bare.rsplit_once('_')?;
    match digit.as_bytes() {
        [d @ b'2'..=b'9'] if !base.is_empty() => Some((base, d - b'0')),
        _ => None,
    }
}

/// Remove every whitespace character.
pub fn squash_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
