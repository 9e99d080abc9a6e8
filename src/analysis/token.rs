//! Token types handed to the indexing side.
//!
//! A [`Token`] is the host-facing rendition of a [`Pos`]: the same surface
//! and graph metadata, with offsets mapped back onto the original document
//! and an absolute position computed from the increments.
//!
//! # Token graphs
//!
//! Tokens support graph structures through `position_increment` and
//! `position_length`, so a decompounded noun keeps both readings:
//!
//! ```text
//! Input: "학교종이 울린다"
//!
//! Token Graph:
//!   Position 0: "학교종이" (pos_inc=1, pos_len=2)
//!   Position 0: "학교"     (pos_inc=0, pos_len=1)  ← same position
//!   Position 1: "종이"     (pos_inc=1, pos_len=1)
//!   Position 2: "울린다"   (pos_inc=1, pos_len=1)
//! ```
//!
//! # Examples
//!
//! ```
//! use eojeol::analysis::token::Token;
//!
//! let token = Token::with_offsets("학교", 0, 0, 6)
//!     .with_position_increment(0)
//!     .with_part_of_speech("NNG");
//!
//! assert_eq!(token.text, "학교");
//! assert_eq!(token.end_offset, 6);
//! assert_eq!(token.part_of_speech.as_deref(), Some("NNG"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::pos::Pos;

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token graph (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1: next position
    /// - 0: same position as the previous token (an alternative reading)
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    ///
    /// A compound emitted together with its sub-nouns spans as many
    /// positions as it has sub-nouns.
    pub position_length: usize,

    /// Coarse token type (the part-of-speech id)
    pub token_type: Option<String>,

    /// Fused part-of-speech label of the morphemes behind the token
    pub part_of_speech: Option<String>,

    /// Dictionary semantic class
    pub semantic_class: Option<String>,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            position_increment: 1,
            position_length: 1,
            token_type: None,
            part_of_speech: None,
            semantic_class: None,
        }
    }

    /// Translate a generator token, given its absolute position and
    /// corrected offsets.
    pub fn from_pos(pos: Pos, position: usize, start_offset: usize, end_offset: usize) -> Self {
        let token = Token {
            semantic_class: pos.semantic_class,
            ..Token::with_offsets(pos.surface, position, start_offset, end_offset)
        };
        token
            .with_position_increment(pos.position_increment)
            .with_position_length(pos.position_length)
            .with_token_type(pos.pos_id.to_string())
            .with_part_of_speech(pos.morphemes)
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }

    /// Set the token type.
    pub fn with_token_type<S: Into<String>>(mut self, token_type: S) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    /// Set the part-of-speech label.
    pub fn with_part_of_speech<S: Into<String>>(mut self, part_of_speech: S) -> Self {
        self.part_of_speech = Some(part_of_speech.into());
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pos::PosId;

    #[test]
    fn test_token_creation() {
        let token = Token::new("학교", 0);
        assert_eq!(token.text, "학교");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
        assert_eq!(token.position_increment, 1);
        assert_eq!(token.position_length, 1);
        assert!(token.token_type.is_none());
    }

    #[test]
    fn test_token_from_pos() {
        let pos = Pos::new("학교종이", PosId::Compound, "NNG", 0, 12)
            .with_position_length(2)
            .with_semantic_class(Some("장소".to_string()));
        let token = Token::from_pos(pos, 4, 10, 22);

        assert_eq!(token.text, "학교종이");
        assert_eq!(token.position, 4);
        assert_eq!((token.start_offset, token.end_offset), (10, 22));
        assert_eq!(token.position_length, 2);
        assert_eq!(token.token_type.as_deref(), Some("COMPOUND"));
        assert_eq!(token.part_of_speech.as_deref(), Some("NNG"));
        assert_eq!(token.semantic_class.as_deref(), Some("장소"));
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("학교", 0);
        assert_eq!(format!("{token}"), "학교");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("학교", 0), Token::new("종이", 1)];

        let stream = tokens.into_token_stream();
        let collected: Vec<_> = stream.collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "학교");
        assert_eq!(collected[1].text, "종이");
    }
}
