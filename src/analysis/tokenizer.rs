//! Tokenizers converting document text into tokens.
//!
//! # Available Tokenizers
//!
//! - [`korean::KoreanTokenizer`] - Eojeol-based Korean tokenization over a morphological analyzer
//!
//! # Examples
//!
//! Implementing a custom tokenizer:
//!
//! ```
//! use eojeol::analysis::token::{Token, TokenStream};
//! use eojeol::analysis::tokenizer::Tokenizer;
//! use eojeol::error::Result;
//!
//! struct SpaceTokenizer;
//!
//! impl Tokenizer for SpaceTokenizer {
//!     fn tokenize(&self, text: &str) -> Result<TokenStream> {
//!         let tokens: Vec<Token> = text
//!             .split(' ')
//!             .enumerate()
//!             .map(|(i, s)| Token::new(s, i))
//!             .collect();
//!         Ok(Box::new(tokens.into_iter()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "space"
//!     }
//! }
//!
//! let tokens: Vec<_> = SpaceTokenizer.tokenize("학교 종이").unwrap().collect();
//! assert_eq!(tokens[1].text, "종이");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod korean;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can be shared between
/// indexing threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    ///
    /// # Arguments
    ///
    /// * `text` - The input text to tokenize
    ///
    /// # Returns
    ///
    /// A `TokenStream` (boxed iterator of tokens) on success, or an error if tokenization fails.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
