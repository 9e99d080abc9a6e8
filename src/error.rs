//! Error types for the eojeol library.
//!
//! All failures are represented by the [`EojeolError`] enum. Analyzer
//! failures and malformed lattices abort the current document; an ambiguous
//! compound split is never an error.
//!
//! # Examples
//!
//! ```
//! use eojeol::error::{EojeolError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(EojeolError::lattice("node 3 starts before node 2 ends"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for eojeol operations.
#[derive(Error, Debug)]
pub enum EojeolError {
    /// I/O errors (reading documents, lattice files, configuration)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The morphological analyzer could not parse the document
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The lattice handed over by the analyzer is structurally broken
    #[error("Lattice error: {0}")]
    Lattice(String),

    /// A dictionary feature record could not be parsed
    #[error("Feature error: {0}")]
    Feature(String),

    /// Invalid tokenizer configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with EojeolError.
pub type Result<T> = std::result::Result<T, EojeolError>;

impl EojeolError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        EojeolError::Analysis(msg.into())
    }

    /// Create a new lattice error.
    pub fn lattice<S: Into<String>>(msg: S) -> Self {
        EojeolError::Lattice(msg.into())
    }

    /// Create a new feature error.
    pub fn feature<S: Into<String>>(msg: S) -> Self {
        EojeolError::Feature(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EojeolError::Config(msg.into())
    }

    /// Whether this error came from the lattice structure rather than the analyzer.
    pub fn is_lattice(&self) -> bool {
        matches!(self, EojeolError::Lattice(_))
    }
}
