//! Char filters applied to the document before it reaches the analyzer.
//!
//! A char filter rewrites the raw text and reports every place where the
//! rewrite changed byte lengths as a [`Transformation`]. The analyzer only
//! ever sees the filtered text, so token offsets have to be mapped back onto
//! the original document with an [`OffsetCorrector`].
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode case folding
//!
//! # Examples
//!
//! ```
//! use eojeol::analysis::char_filter::{CharFilter, OffsetCorrector};
//! use eojeol::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let (text, transformations) = LowercaseCharFilter::new().filter("İ학교");
//! assert_eq!(text, "i\u{307}학교");
//!
//! let mut corrector = OffsetCorrector::new();
//! corrector.push(transformations);
//! // "학교" starts at byte 3 in the filtered text, byte 2 in the original
//! assert_eq!(corrector.correct(3), 2);
//! ```

pub mod lowercase;

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }

    fn original_len(&self) -> usize {
        self.original_end - self.original_start
    }

    fn new_len(&self) -> usize {
        self.new_end - self.new_start
    }
}

/// Trait for character filters that transform text before analysis.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    ///
    /// Returns the filtered text and the transformations, ordered by
    /// position, that changed byte lengths.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Maps an offset in filtered text back to the text before the filter ran.
pub fn correct_offset(offset: usize, transformations: &[Transformation]) -> usize {
    let mut removed = 0;
    let mut restored = 0;

    for t in transformations {
        if offset >= t.new_end {
            removed += t.new_len();
            restored += t.original_len();
        } else if offset >= t.new_start {
            // inside a rewritten span: interpolate
            let offset_in_new = offset - t.new_start;
            return t.original_start + offset_in_new * t.original_len() / t.new_len();
        } else {
            break;
        }
    }

    offset - removed + restored
}

/// Chain of transformations recorded by successive char filters.
#[derive(Debug, Clone, Default)]
pub struct OffsetCorrector {
    stages: Vec<Vec<Transformation>>,
}

impl OffsetCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the transformations of the next filter in the chain.
    pub fn push(&mut self, transformations: Vec<Transformation>) {
        if !transformations.is_empty() {
            self.stages.push(transformations);
        }
    }

    /// Map an offset in the final text back to the original text.
    pub fn correct(&self, offset: usize) -> usize {
        self.stages
            .iter()
            .rev()
            .fold(offset, |offset, stage| correct_offset(offset, stage))
    }

    /// Whether every offset maps to itself.
    pub fn is_identity(&self) -> bool {
        self.stages.is_empty()
    }
}
