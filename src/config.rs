//! Engine configuration.
//!
//! Every knob has the default the reference generator has always used, so
//! `EngineConfig::default()` is the normal starting point.

use std::ops::RangeInclusive;

use smol_str::SmolStr;

/// Settings shared by every document in a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Markup control character trimmed from the end of output spans.
    pub markup_char: char,
    /// Document that collects references to external declarations.
    pub undocumented_doc: SmolStr,
    /// Capitalized words starting with `Sk` that are ordinary English.
    pub prose_words: Vec<SmolStr>,
    /// How many numbered overload clones (`_2` and up) a method may have.
    pub max_alternates: u8,
    /// Consistency findings are logged in blocks of this size.
    pub report_block: usize,
    /// Token distance from a parameter within which `.member` may link
    /// through the parameter's type.
    pub param_distance: RangeInclusive<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            markup_char: '#',
            undocumented_doc: SmolStr::new_static("undocumented"),
            prose_words: ["Skew", "Skews", "Skewing", "Skip", "Skips"]
                .into_iter()
                .map(SmolStr::new_static)
                .collect(),
            max_alternates: 8,
            report_block: 10,
            param_distance: 1..=16,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markup_char(mut self, markup_char: char) -> Self {
        self.markup_char = markup_char;
        self
    }

    pub fn with_undocumented_doc(mut self, doc: impl Into<SmolStr>) -> Self {
        self.undocumented_doc = doc.into();
        self
    }

    /// Add a word that is exempt from the `Sk` prefix check.
    pub fn with_prose_word(mut self, word: impl Into<SmolStr>) -> Self {
        self.prose_words.push(word.into());
        self
    }

    pub fn with_max_alternates(mut self, max: u8) -> Self {
        self.max_alternates = max;
        self
    }

    pub fn with_report_block(mut self, block: usize) -> Self {
        self.report_block = block.max(1);
        self
    }

    pub fn with_param_distance(mut self, distance: RangeInclusive<u32>) -> Self {
        self.param_distance = distance;
        self
    }

    pub fn is_prose_word(&self, word: &str) -> bool {
        self.prose_words.iter().any(|w| w == word)
    }
}
