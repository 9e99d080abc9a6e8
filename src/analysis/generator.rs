//! Eojeol-by-eojeol token generation over an analyzed lattice.
//!
//! [`TokenGenerator`] walks the node chain of a [`Lattice`] with a cursor,
//! one eojeol per pull. Each pull yields the [`TokenGroup`] for that eojeol:
//!
//! - a single compound noun long enough to be split becomes the whole
//!   compound followed by its sub-nouns, the first sub-noun stacked on the
//!   compound's position;
//! - anything else becomes one token covering the eojeol, labelled by the
//!   configured [`PosAppender`].
//!
//! The chain is validated while it is walked. A broken chain makes the pull
//! that reaches the broken node fail; no tokens with corrected or clamped
//! offsets are ever produced.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use eojeol::analysis::generator::TokenGenerator;
//! use eojeol::analysis::pos_appender::JoinPosAppender;
//! use eojeol::lattice::{Lattice, LatticeNode};
//!
//! let lattice = Lattice::from_morphemes(
//!     "학교종이",
//!     vec![LatticeNode::parse(
//!         "학교종이",
//!         "NNG,*,F,학교종이,Compound,*,*,학교/NNG/*+종이/NNG/*",
//!         0,
//!         12,
//!     )
//!     .unwrap()],
//! );
//!
//! let mut generator = TokenGenerator::new(Arc::new(JoinPosAppender::new()), 3, lattice).unwrap();
//! let group = generator.next_eojeol_tokens().unwrap().unwrap();
//!
//! let surfaces: Vec<_> = group.iter().map(|pos| pos.surface.as_str()).collect();
//! assert_eq!(surfaces, vec!["학교종이", "학교", "종이"]);
//! assert!(generator.next_eojeol_tokens().unwrap().is_none());
//! ```

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::ops::Range;
use std::sync::Arc;

use log::{debug, trace};

use crate::analysis::decompound::{CompoundDecompounder, SubNoun};
use crate::analysis::pos::{Pos, PosId};
use crate::analysis::pos_appender::PosAppender;
use crate::error::{EojeolError, Result};
use crate::lattice::{Lattice, LatticeNode, NodeKind};

/// Tokens produced from one eojeol, delivered front to back.
pub type TokenGroup = VecDeque<Pos>;

/// Pull-based generator of per-eojeol token groups.
pub struct TokenGenerator {
    appender: Arc<dyn PosAppender>,
    decompounder: CompoundDecompounder,
    lattice: Lattice,
    cursor: usize,
    prev_end: usize,
    finished: bool,
}

impl TokenGenerator {
    /// Create a generator over a lattice whose first node is the BOS marker.
    ///
    /// `decompound_min_length` is the minimum character length of a noun to
    /// split; [`NO_DECOMPOUND`](crate::analysis::decompound::NO_DECOMPOUND)
    /// disables splitting.
    pub fn new(
        appender: Arc<dyn PosAppender>,
        decompound_min_length: usize,
        lattice: Lattice,
    ) -> Result<Self> {
        let bos = lattice
            .bos()
            .ok_or_else(|| EojeolError::lattice("node chain does not start with a BOS marker"))?;
        let prev_end = bos.end_offset;

        debug!(
            "walking lattice of {} nodes over {} bytes (appender: {}, decompound min length: {})",
            lattice.len(),
            lattice.text().len(),
            appender.name(),
            decompound_min_length
        );

        Ok(TokenGenerator {
            appender,
            decompounder: CompoundDecompounder::new(decompound_min_length),
            lattice,
            cursor: 1,
            prev_end,
            finished: false,
        })
    }

    /// The lattice being walked.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Produce the tokens of the next eojeol.
    ///
    /// Returns `Ok(None)` once the EOS marker is reached, and keeps doing so
    /// afterwards. After an error the generator is exhausted.
    pub fn next_eojeol_tokens(&mut self) -> Result<Option<TokenGroup>> {
        if self.finished {
            return Ok(None);
        }

        match self.next_eojeol() {
            Ok(Some(range)) => Ok(Some(self.build_group(range))),
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(e) => {
                self.finished = true;
                Err(e)
            }
        }
    }

    /// Advance the cursor over one eojeol and return its node range.
    fn next_eojeol(&mut self) -> Result<Option<Range<usize>>> {
        let start = self.cursor;

        loop {
            let node = self.lattice.get(self.cursor).ok_or_else(|| {
                EojeolError::lattice(format!(
                    "node chain ends after {} nodes without an EOS marker",
                    self.cursor
                ))
            })?;

            // a finished eojeol is emitted before the next node is checked
            let boundary = self.cursor > start
                && (node.is_eos() || node.start_offset > self.prev_end);
            if boundary {
                break;
            }

            match node.kind {
                NodeKind::Eos => {
                    check_eos(&self.lattice, self.prev_end, node)?;
                    break;
                }
                NodeKind::Bos => {
                    return Err(EojeolError::lattice(format!(
                        "BOS marker found at node {}",
                        self.cursor
                    )));
                }
                NodeKind::Morpheme => {}
            }

            check_node(&self.lattice, self.prev_end, node, self.cursor)?;
            self.prev_end = node.end_offset;
            self.cursor += 1;
        }

        if self.cursor == start {
            Ok(None)
        } else {
            Ok(Some(start..self.cursor))
        }
    }

    fn build_group(&self, range: Range<usize>) -> TokenGroup {
        let nodes = &self.lattice.nodes()[range];

        if let [node] = nodes
            && node.feature.is_noun()
            && self.decompounder.is_candidate(&node.surface)
        {
            let parts = self.decompounder.decompound_node(node);
            if parts.len() >= 2 {
                trace!("decompounding '{}' into {} nouns", node.surface, parts.len());
                return self.compound_group(node, parts);
            }
        }

        self.fused_group(nodes)
    }

    fn compound_group(&self, node: &LatticeNode, parts: Vec<SubNoun>) -> TokenGroup {
        let mut group = TokenGroup::with_capacity(parts.len() + 1);
        group.push_back(
            Pos::new(
                node.surface.clone(),
                node.feature.pos_id(),
                self.appender.append(node.tags()),
                node.start_offset,
                node.end_offset,
            )
            .with_semantic_class(node.feature.semantic_class.clone())
            .with_position_length(parts.len()),
        );

        for (i, part) in parts.into_iter().enumerate() {
            let morphemes = self.appender.append(&[part.tag]);
            group.push_back(
                Pos::new(
                    part.surface,
                    part.tag,
                    morphemes,
                    node.start_offset + part.start_offset,
                    node.start_offset + part.end_offset,
                )
                .with_semantic_class(part.semantic_class)
                .with_position_increment(if i == 0 { 0 } else { 1 }),
            );
        }

        group
    }

    fn fused_group(&self, nodes: &[LatticeNode]) -> TokenGroup {
        let (first, last) = match (nodes.first(), nodes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return TokenGroup::new(),
        };

        let surface: String = nodes.iter().map(|n| n.surface.as_str()).collect();
        let tags: Vec<PosId> = nodes.iter().flat_map(|n| n.tags().iter().copied()).collect();
        let semantic_class = nodes
            .iter()
            .find_map(|n| n.semantic_class())
            .map(str::to_string);

        trace!("eojeol '{}' from {} morphemes", surface, nodes.len());

        let pos = Pos::new(
            surface,
            first.feature.pos_id(),
            self.appender.append(&tags),
            first.start_offset,
            last.end_offset,
        )
        .with_semantic_class(semantic_class);

        TokenGroup::from([pos])
    }
}

fn check_node(lattice: &Lattice, prev_end: usize, node: &LatticeNode, index: usize) -> Result<()> {
    let (start, end) = (node.start_offset, node.end_offset);

    if start > end {
        return Err(EojeolError::lattice(format!(
            "node {index} has an inverted span {start}..{end}"
        )));
    }
    if start == end {
        return Err(EojeolError::lattice(format!(
            "node {index} has an empty surface at {start}"
        )));
    }
    if start < prev_end {
        return Err(EojeolError::lattice(format!(
            "node {index} starts at {start} before the previous node ends at {prev_end}"
        )));
    }
    if lattice.slice(start, end) != Some(node.surface.as_str()) {
        return Err(EojeolError::lattice(format!(
            "node {index} surface '{}' does not match the text at {start}..{end}",
            node.surface
        )));
    }
    check_gap(lattice, prev_end, start)
}

fn check_eos(lattice: &Lattice, prev_end: usize, eos: &LatticeNode) -> Result<()> {
    if eos.start_offset < prev_end {
        return Err(EojeolError::lattice(format!(
            "EOS marker at {} lies before the last node end {prev_end}",
            eos.start_offset
        )));
    }
    check_gap(lattice, prev_end, lattice.text().len())
}

/// Text between two nodes may only be word spacing.
fn check_gap(lattice: &Lattice, from: usize, to: usize) -> Result<()> {
    match lattice.slice(from, to) {
        Some(gap) if gap.chars().all(char::is_whitespace) => Ok(()),
        Some(gap) => Err(EojeolError::lattice(format!(
            "text '{gap}' at {from}..{to} is not covered by any node"
        ))),
        None => Err(EojeolError::lattice(format!(
            "offsets {from}..{to} do not fall on character boundaries"
        ))),
    }
}

impl Iterator for TokenGenerator {
    type Item = Result<TokenGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_eojeol_tokens().transpose()
    }
}

impl FusedIterator for TokenGenerator {}

impl std::fmt::Debug for TokenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGenerator")
            .field("appender", &self.appender.name())
            .field("decompounder", &self.decompounder)
            .field("cursor", &self.cursor)
            .field("nodes", &self.lattice.len())
            .field("finished", &self.finished)
            .finish()
    }
}
