//! Policies for fusing the tags of one eojeol into a single label.
//!
//! An eojeol such as "먹었다" is made of several morphemes (`VV`, `EP`,
//! `EF`). The token emitted for it carries one displayed part-of-speech
//! label, and a [`PosAppender`] decides how that label is composed.
//!
//! # Examples
//!
//! ```
//! use eojeol::analysis::pos::PosId;
//! use eojeol::analysis::pos_appender::{DominantPosAppender, JoinPosAppender, PosAppender};
//!
//! let tags = [PosId::Vv, PosId::Ep, PosId::Ef];
//!
//! assert_eq!(JoinPosAppender::new().append(&tags), "VV+EP+EF");
//! assert_eq!(DominantPosAppender::new().append(&tags), "VV");
//! ```

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::analysis::pos::PosId;

/// Fuses the morpheme tags of one eojeol into a displayed label.
///
/// Implementations must be pure and deterministic. Callers never pass an
/// empty slice, since every eojeol has at least one morpheme.
///
/// # Examples
///
/// Implementing a custom policy:
///
/// ```
/// use eojeol::analysis::pos::PosId;
/// use eojeol::analysis::pos_appender::PosAppender;
///
/// #[derive(Debug)]
/// struct LastTagAppender;
///
/// impl PosAppender for LastTagAppender {
///     fn append(&self, tags: &[PosId]) -> String {
///         tags.last().map(|t| t.to_string()).unwrap_or_default()
///     }
///
///     fn name(&self) -> &'static str {
///         "last"
///     }
/// }
///
/// assert_eq!(LastTagAppender.append(&[PosId::Nng, PosId::Jks]), "JKS");
/// ```
pub trait PosAppender: Send + Sync + Debug {
    /// Compose the label for a non-empty tag sequence.
    fn append(&self, tags: &[PosId]) -> String;

    /// Get the name of this policy (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Joins every tag with a separator (`+` by default).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinPosAppender {
    separator: String,
}

impl JoinPosAppender {
    pub const DEFAULT_SEPARATOR: &'static str = "+";

    /// Create a policy joining with `+`.
    pub fn new() -> Self {
        Self::with_separator(Self::DEFAULT_SEPARATOR)
    }

    /// Create a policy joining with a custom separator.
    pub fn with_separator<S: Into<String>>(separator: S) -> Self {
        JoinPosAppender {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for JoinPosAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl PosAppender for JoinPosAppender {
    fn append(&self, tags: &[PosId]) -> String {
        debug_assert!(!tags.is_empty(), "an eojeol always has a morpheme");
        tags.iter()
            .map(PosId::as_str)
            .collect::<Vec<_>>()
            .join(self.separator.as_str())
    }

    fn name(&self) -> &'static str {
        "join"
    }
}

/// Collapses the sequence to its first content tag.
///
/// Particles, endings, affixes and punctuation are skipped; if the eojeol
/// has no content morpheme the first tag is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DominantPosAppender;

impl DominantPosAppender {
    pub fn new() -> Self {
        DominantPosAppender
    }
}

impl PosAppender for DominantPosAppender {
    fn append(&self, tags: &[PosId]) -> String {
        debug_assert!(!tags.is_empty(), "an eojeol always has a morpheme");
        tags.iter()
            .find(|tag| tag.is_content())
            .or_else(|| tags.first())
            .map(|tag| tag.as_str().to_string())
            .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "dominant"
    }
}

/// Names of the shipped policies, as used in configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosAppenderKind {
    #[default]
    Join,
    Dominant,
}
