//! Compound noun decomposition.
//!
//! The dictionary stores many compound nouns as a single entry whose
//! expression lists the nouns it is made of (`학교/NNG/*+종이/NNG/*`). The
//! decompounder takes that split as authoritative and only checks that it
//! tiles the compound exactly before using it.
//!
//! # Examples
//!
//! ```
//! use eojeol::analysis::decompound::CompoundDecompounder;
//!
//! let decompounder = CompoundDecompounder::new(3);
//! let parts = decompounder.decompound("학교종이", &["학교", "종이"]);
//!
//! assert_eq!(parts.len(), 2);
//! assert_eq!((parts[0].start_offset, parts[0].end_offset), (0, 6));
//! assert_eq!((parts[1].start_offset, parts[1].end_offset), (6, 12));
//! ```

use log::warn;
use serde::Serialize;

use crate::analysis::pos::PosId;
use crate::lattice::LatticeNode;

/// Minimum length that disables decompounding.
pub const NO_DECOMPOUND: usize = 9999;

/// One piece of a compound, with byte offsets relative to the compound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubNoun {
    pub surface: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub tag: PosId,
    pub semantic_class: Option<String>,
}

impl SubNoun {
    fn whole(surface: &str, tag: PosId, semantic_class: Option<String>) -> Self {
        SubNoun {
            surface: surface.to_string(),
            start_offset: 0,
            end_offset: surface.len(),
            tag,
            semantic_class,
        }
    }
}

/// Decides whether a noun should be split into its sub-nouns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompoundDecompounder {
    min_length: usize,
}

impl CompoundDecompounder {
    /// Create a decompounder splitting nouns of at least `min_length`
    /// characters. [`NO_DECOMPOUND`] disables splitting.
    pub fn new(min_length: usize) -> Self {
        CompoundDecompounder { min_length }
    }

    /// A decompounder that never splits.
    pub fn disabled() -> Self {
        Self::new(NO_DECOMPOUND)
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn is_enabled(&self) -> bool {
        self.min_length < NO_DECOMPOUND
    }

    /// Whether a surface is long enough to be considered for splitting.
    pub fn is_candidate(&self, surface: &str) -> bool {
        self.is_enabled() && surface.chars().count() >= self.min_length
    }

    /// Split `surface` into `parts`.
    ///
    /// Returns the parts with their offsets inside `surface` when the split
    /// is usable, otherwise the single-element list holding `surface`.
    pub fn decompound(&self, surface: &str, parts: &[&str]) -> Vec<SubNoun> {
        let tiles = self.tile(surface, parts.iter().copied());
        match tiles {
            Some(ranges) => ranges
                .into_iter()
                .zip(parts)
                .map(|((start, end), part)| SubNoun {
                    surface: part.to_string(),
                    start_offset: start,
                    end_offset: end,
                    tag: PosId::Nng,
                    semantic_class: None,
                })
                .collect(),
            None => vec![SubNoun::whole(surface, PosId::Nng, None)],
        }
    }

    /// Split a noun node using the expression from its dictionary entry.
    pub fn decompound_node(&self, node: &LatticeNode) -> Vec<SubNoun> {
        let feature = &node.feature;
        let whole = || {
            vec![SubNoun::whole(
                &node.surface,
                feature.head_tag(),
                feature.semantic_class.clone(),
            )]
        };

        if !feature.is_noun() {
            return whole();
        }

        let parts = &feature.expression;
        match self.tile(&node.surface, parts.iter().map(|p| p.surface.as_str())) {
            Some(ranges) => ranges
                .into_iter()
                .zip(parts)
                .map(|((start, end), part)| SubNoun {
                    surface: part.surface.clone(),
                    start_offset: start,
                    end_offset: end,
                    tag: part.tag,
                    semantic_class: part.semantic_class.clone(),
                })
                .collect(),
            None => whole(),
        }
    }

    /// Byte ranges of `parts` inside `surface` if they partition it.
    fn tile<'a, I>(&self, surface: &str, parts: I) -> Option<Vec<(usize, usize)>>
    where
        I: ExactSizeIterator<Item = &'a str>,
    {
        if !self.is_candidate(surface) || parts.len() < 2 {
            return None;
        }

        let whole_len = surface.chars().count();
        let mut ranges = Vec::with_capacity(parts.len());
        let mut offset = 0;
        for part in parts {
            let part_len = part.chars().count();
            if part_len == 0 || part_len >= whole_len || !surface[offset..].starts_with(part) {
                warn!("expression of compound '{surface}' does not tile it; keeping it whole");
                return None;
            }
            ranges.push((offset, offset + part.len()));
            offset += part.len();
        }

        if offset != surface.len() {
            warn!("expression of compound '{surface}' leaves a gap; keeping it whole");
            return None;
        }
        Some(ranges)
    }
}

impl Default for CompoundDecompounder {
    fn default() -> Self {
        Self::disabled()
    }
}
