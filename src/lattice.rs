//! Owned snapshot of one analyzed sentence.
//!
//! A morphological analyzer hands over its best path as a chain of nodes
//! that starts with a BOS marker and ends with an EOS marker. [`Lattice`]
//! stores that chain as an index-addressable array together with the text
//! it was produced from, so the token generator can walk it with a cursor.
//!
//! Node offsets are byte positions into [`Lattice::text`]. Whitespace
//! between words is not represented by nodes; it shows up as a gap between
//! one node's end offset and the next node's start offset.
//!
//! # Examples
//!
//! ```
//! use eojeol::lattice::{Lattice, LatticeNode};
//!
//! let text = "학교 가다";
//! let lattice = Lattice::from_morphemes(
//!     text,
//!     vec![
//!         LatticeNode::parse("학교", "NNG,*,F,학교,*,*,*,*", 0, 6).unwrap(),
//!         LatticeNode::parse("가", "VV,*,F,가,*,*,*,*", 7, 10).unwrap(),
//!         LatticeNode::parse("다", "EF,*,F,다,*,*,*,*", 10, 13).unwrap(),
//!     ],
//! );
//!
//! assert_eq!(lattice.len(), 5);
//! assert!(lattice.bos().unwrap().is_bos());
//! ```

pub mod feature;

use serde::{Deserialize, Serialize};

use crate::analysis::pos::PosId;
use crate::error::{EojeolError, Result};

pub use feature::{ExpressionPart, MorphFeature, MorphType};

/// Role of a node in the chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Sentence-begin marker
    Bos,
    /// Sentence-end marker
    Eos,
    /// A morpheme
    #[default]
    Morpheme,
}

/// Read-only view of one analyzer node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeNode {
    #[serde(default)]
    pub kind: NodeKind,

    /// Surface text, an exact slice of the analyzed text
    pub surface: String,

    /// Dictionary feature record
    pub feature: MorphFeature,

    /// Byte offset where the node starts
    pub start_offset: usize,

    /// Byte offset where the node ends
    pub end_offset: usize,

    /// Analyzer cost, opaque to the tokenizer
    #[serde(default)]
    pub cost: i64,
}

impl LatticeNode {
    /// Create a morpheme node.
    pub fn new<S: Into<String>>(
        surface: S,
        feature: MorphFeature,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        LatticeNode {
            kind: NodeKind::Morpheme,
            surface: surface.into(),
            feature,
            start_offset,
            end_offset,
            cost: 0,
        }
    }

    /// Create a morpheme node from a raw feature record.
    pub fn parse<S: Into<String>>(
        surface: S,
        feature: &str,
        start_offset: usize,
        end_offset: usize,
    ) -> Result<Self> {
        Ok(Self::new(
            surface,
            MorphFeature::parse(feature)?,
            start_offset,
            end_offset,
        ))
    }

    /// Sentence-begin marker.
    pub fn bos() -> Self {
        LatticeNode {
            kind: NodeKind::Bos,
            surface: String::new(),
            feature: MorphFeature::from_tag(PosId::Unknown),
            start_offset: 0,
            end_offset: 0,
            cost: 0,
        }
    }

    /// Sentence-end marker sitting at `offset`.
    pub fn eos(offset: usize) -> Self {
        LatticeNode {
            kind: NodeKind::Eos,
            start_offset: offset,
            end_offset: offset,
            ..Self::bos()
        }
    }

    /// Set the analyzer cost.
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    pub fn is_bos(&self) -> bool {
        self.kind == NodeKind::Bos
    }

    pub fn is_eos(&self) -> bool {
        self.kind == NodeKind::Eos
    }

    /// Tags of the node; several for inflected entries.
    pub fn tags(&self) -> &[PosId] {
        &self.feature.tags
    }

    pub fn semantic_class(&self) -> Option<&str> {
        self.feature.semantic_class.as_deref()
    }

    /// Surface length in characters.
    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }
}

/// The analyzed text and its node chain, BOS first and EOS last.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    text: String,
    nodes: Vec<LatticeNode>,
}

impl Lattice {
    /// Wrap a raw node chain as produced by an analyzer.
    ///
    /// The chain must start with a BOS marker; everything else is checked
    /// while the chain is walked.
    pub fn new<S: Into<String>>(text: S, nodes: Vec<LatticeNode>) -> Result<Self> {
        match nodes.first() {
            Some(node) if node.is_bos() => Ok(Lattice {
                text: text.into(),
                nodes,
            }),
            Some(_) => Err(EojeolError::lattice(
                "node chain does not start with a BOS marker",
            )),
            None => Err(EojeolError::lattice("node chain is empty")),
        }
    }

    /// Build a lattice from morpheme nodes, adding the BOS and EOS markers.
    pub fn from_morphemes<S: Into<String>>(text: S, morphemes: Vec<LatticeNode>) -> Self {
        let text = text.into();
        let mut nodes = Vec::with_capacity(morphemes.len() + 2);
        nodes.push(LatticeNode::bos());
        nodes.extend(morphemes);
        nodes.push(LatticeNode::eos(text.len()));

        Lattice { text, nodes }
    }

    /// Lattice of a text the analyzer found no morphemes in.
    pub fn empty<S: Into<String>>(text: S) -> Self {
        Self::from_morphemes(text, Vec::new())
    }

    /// The text the offsets refer to.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn nodes(&self) -> &[LatticeNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&LatticeNode> {
        self.nodes.get(index)
    }

    /// The sentence-begin marker.
    pub fn bos(&self) -> Option<&LatticeNode> {
        self.nodes.first().filter(|node| node.is_bos())
    }

    /// Number of nodes, markers included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Text covered by `start..end`, if that is a valid slice.
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        self.text.get(start..end)
    }
}
