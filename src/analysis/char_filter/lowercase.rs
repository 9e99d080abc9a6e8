//! Lowercase char filter.
//!
//! Documents are case folded before analysis. Hangul has no case, but mixed
//! documents carry Latin, Greek or Cyrillic text whose lowercase form can
//! have a different UTF-8 length (`İ` → `i̇`), so every such change is
//! reported for offset correction.

use super::{CharFilter, Transformation};

/// A char filter that lowercases text character by character.
///
/// # Examples
///
/// ```
/// use eojeol::analysis::char_filter::CharFilter;
/// use eojeol::analysis::char_filter::lowercase::LowercaseCharFilter;
///
/// let (text, transformations) = LowercaseCharFilter::new().filter("Rust 학교");
/// assert_eq!(text, "rust 학교");
/// assert!(transformations.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        if input.is_ascii() {
            return (input.to_ascii_lowercase(), Vec::new());
        }

        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        for (start, c) in input.char_indices() {
            let new_start = output.len();
            output.extend(c.to_lowercase());
            let new_end = output.len();

            if new_end - new_start != c.len_utf8() {
                transformations.push(Transformation::new(
                    start,
                    start + c.len_utf8(),
                    new_start,
                    new_end,
                ));
            }
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
