//! Parameter lists: parsing recorded signatures and matching call text.

use smol_str::SmolStr;

use crate::core::text_utils::{is_word_character, squash_whitespace, starts_uppercase};
use crate::store::{DeclForest, DeclId, DeclKind};

/// One parameter of a recorded signature, or one argument of a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureParam {
    /// Full text with all whitespace removed, e.g. `constSkRect&rect`.
    pub squashed: SmolStr,
    /// Last identifier, e.g. `rect`.
    pub name: SmolStr,
    /// Last capitalized identifier before the name, e.g. `SkRect`.
    pub type_name: Option<SmolStr>,
}

/// A parenthesized parameter or argument list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<SignatureParam>,
}

impl Signature {
    /// Parse `(a, b)` text. Anything after the closing parenthesis (such as
    /// `const`) is ignored. Returns `None` when there is no balanced list.
    pub fn parse(text: &str) -> Option<Self> {
        let open = text.find('(')?;
        let close = balanced_close(text, open)?;
        let inner = text[open + 1..close].trim();
        if inner.is_empty() || inner == "void" {
            return Some(Self::default());
        }
        let params = split_top_level(inner)
            .into_iter()
            .map(SignatureParam::parse)
            .collect();
        Some(Self { params })
    }

    /// The recorded signature of `decl`, or one assembled from its `Param`
    /// children when none was recorded.
    pub fn of(forest: &DeclForest, decl: DeclId) -> Self {
        let node = forest.node(decl);
        if let Some(sig) = node.signature.as_deref().and_then(Self::parse) {
            return sig;
        }
        let params = node
            .children
            .iter()
            .map(|&c| forest.node(c))
            .filter(|child| child.kind == DeclKind::Param)
            .map(|child| SignatureParam::parse(&child.name))
            .collect();
        Self { params }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[SignatureParam] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&SignatureParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Structural match of call arguments against this parameter list: same
    /// arity, and every argument is either the parameter's full text
    /// (whitespace ignored) or the parameter's name.
    pub fn matches_call(&self, call: &Signature) -> bool {
        self.arity() == call.arity()
            && self
                .params
                .iter()
                .zip(&call.params)
                .all(|(param, arg)| arg.squashed == param.squashed || arg.squashed == param.name)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&param.squashed)?;
        }
        f.write_str(")")
    }
}

impl SignatureParam {
    fn parse(text: &str) -> Self {
        let declarator = text
            .split(['=', '['])
            .next()
            .unwrap_or(text)
            .trim();
        let words: Vec<&str> = declarator
            .split(|c: char| !is_word_character(c))
            .filter(|w| !w.is_empty())
            .collect();
        let name = words.last().copied().unwrap_or_default();
        let type_name = words
            .iter()
            .rev()
            .skip(1)
            .find(|w| starts_uppercase(w))
            .map(|w| SmolStr::new(*w));
        Self {
            squashed: SmolStr::from(squash_whitespace(text)),
            name: SmolStr::new(name),
            type_name,
        }
    }
}

/// Byte offset of the `)` balancing the `(` at `open`.
pub fn balanced_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas that are not nested inside brackets.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth -= 1,
            b',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}
