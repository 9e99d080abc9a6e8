//! # Eojeol
//!
//! Korean tokenization for search indexing.
//!
//! ## Features
//!
//! - Eojeol-based token generation over a morphological analyzer lattice
//! - Compound noun decomposition into a position-aware token graph
//! - Pluggable part-of-speech fusing policies
//! - Offset correction through char filters
//! - Optional lindera/ko-dic analyzer session (`lindera` feature)

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod lattice;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
