//! Part-of-speech ids and the `Pos` token produced by the generator.
//!
//! [`PosId`] is the closed mecab-ko-dic tag set extended with the coarse ids
//! the dictionary uses for multi-morpheme entries (`COMPOUND`, `INFLECT`,
//! `PREANALYSIS`). [`Pos`] is the unit handed to the tokenizer adapter.
//!
//! # Token graphs
//!
//! A decompounded noun is emitted as a small graph so that both the whole
//! compound and its parts can be matched:
//!
//! ```text
//! Input eojeol: "학교종이"
//!
//!   "학교종이" (pos_inc=1, pos_len=2)
//!   "학교"     (pos_inc=0, pos_len=1)  ← same position as the compound
//!   "종이"     (pos_inc=1, pos_len=1)
//! ```
//!
//! # Examples
//!
//! ```
//! use eojeol::analysis::pos::{Pos, PosId};
//!
//! let pos = Pos::new("학교", PosId::Nng, "NNG", 0, 6).with_position_increment(0);
//! assert_eq!(pos.surface_length, 2);
//! assert_eq!(pos.position_increment, 0);
//! assert_eq!(pos.position_length, 1);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EojeolError, Result};

/// Part-of-speech id of a morpheme or token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PosId {
    /// General noun
    Nng,
    /// Proper noun
    Nnp,
    /// Bound noun
    Nnb,
    /// Counting unit noun
    Nnbc,
    /// Numeral
    Nr,
    /// Pronoun
    Np,
    /// Verb
    Vv,
    /// Adjective
    Va,
    /// Auxiliary predicate
    Vx,
    /// Positive copula
    Vcp,
    /// Negative copula
    Vcn,
    /// Determiner
    Mm,
    /// General adverb
    Mag,
    /// Conjunctive adverb
    Maj,
    /// Interjection
    Ic,
    /// Subjective case particle
    Jks,
    /// Complemental case particle
    Jkc,
    /// Adnominal case particle
    Jkg,
    /// Objective case particle
    Jko,
    /// Adverbial case particle
    Jkb,
    /// Vocative case particle
    Jkv,
    /// Quotative case particle
    Jkq,
    /// Auxiliary particle
    Jx,
    /// Conjunctive particle
    Jc,
    /// Pre-final ending
    Ep,
    /// Final ending
    Ef,
    /// Connective ending
    Ec,
    /// Nominalizing ending
    Etn,
    /// Adnominalizing ending
    Etm,
    /// Noun prefix
    Xpn,
    /// Noun suffix
    Xsn,
    /// Verb suffix
    Xsv,
    /// Adjective suffix
    Xsa,
    /// Root
    Xr,
    /// Period, question mark, exclamation mark
    Sf,
    /// Ellipsis
    Se,
    /// Opening bracket
    Sso,
    /// Closing bracket
    Ssc,
    /// Separator
    Sc,
    /// Other symbol
    Sy,
    /// Foreign word
    Sl,
    /// Chinese character
    Sh,
    /// Number
    Sn,
    /// Dictionary compound (several nouns stored as one entry)
    Compound,
    /// Inflected form stored as one entry
    Inflect,
    /// Pre-analyzed entry
    Preanalysis,
    /// Unknown or unclassified morpheme
    Unknown,
}

impl PosId {
    /// The dictionary spelling of this id.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosId::Nng => "NNG",
            PosId::Nnp => "NNP",
            PosId::Nnb => "NNB",
            PosId::Nnbc => "NNBC",
            PosId::Nr => "NR",
            PosId::Np => "NP",
            PosId::Vv => "VV",
            PosId::Va => "VA",
            PosId::Vx => "VX",
            PosId::Vcp => "VCP",
            PosId::Vcn => "VCN",
            PosId::Mm => "MM",
            PosId::Mag => "MAG",
            PosId::Maj => "MAJ",
            PosId::Ic => "IC",
            PosId::Jks => "JKS",
            PosId::Jkc => "JKC",
            PosId::Jkg => "JKG",
            PosId::Jko => "JKO",
            PosId::Jkb => "JKB",
            PosId::Jkv => "JKV",
            PosId::Jkq => "JKQ",
            PosId::Jx => "JX",
            PosId::Jc => "JC",
            PosId::Ep => "EP",
            PosId::Ef => "EF",
            PosId::Ec => "EC",
            PosId::Etn => "ETN",
            PosId::Etm => "ETM",
            PosId::Xpn => "XPN",
            PosId::Xsn => "XSN",
            PosId::Xsv => "XSV",
            PosId::Xsa => "XSA",
            PosId::Xr => "XR",
            PosId::Sf => "SF",
            PosId::Se => "SE",
            PosId::Sso => "SSO",
            PosId::Ssc => "SSC",
            PosId::Sc => "SC",
            PosId::Sy => "SY",
            PosId::Sl => "SL",
            PosId::Sh => "SH",
            PosId::Sn => "SN",
            PosId::Compound => "COMPOUND",
            PosId::Inflect => "INFLECT",
            PosId::Preanalysis => "PREANALYSIS",
            PosId::Unknown => "UNKNOWN",
        }
    }

    /// Whether this is one of the noun tags a compound can be made of.
    pub fn is_noun(&self) -> bool {
        matches!(
            self,
            PosId::Nng | PosId::Nnp | PosId::Nnb | PosId::Nnbc | PosId::Nr | PosId::Np
        )
    }

    /// Whether this tag carries lexical content (as opposed to particles,
    /// endings, affixes and punctuation).
    pub fn is_content(&self) -> bool {
        self.is_noun()
            || matches!(
                self,
                PosId::Vv
                    | PosId::Va
                    | PosId::Vx
                    | PosId::Mm
                    | PosId::Mag
                    | PosId::Maj
                    | PosId::Ic
                    | PosId::Xr
                    | PosId::Sl
                    | PosId::Sh
                    | PosId::Sn
                    | PosId::Compound
            )
    }

    /// Parse a compound tag such as `VV+EP` into its parts.
    pub fn parse_sequence(tags: &str) -> Result<Vec<PosId>> {
        tags.split('+').map(PosId::from_str).collect()
    }
}

impl FromStr for PosId {
    type Err = EojeolError;

    fn from_str(s: &str) -> Result<Self> {
        let id = match s {
            "NNG" => PosId::Nng,
            "NNP" => PosId::Nnp,
            "NNB" => PosId::Nnb,
            "NNBC" => PosId::Nnbc,
            "NR" => PosId::Nr,
            "NP" => PosId::Np,
            "VV" => PosId::Vv,
            "VA" => PosId::Va,
            "VX" => PosId::Vx,
            "VCP" => PosId::Vcp,
            "VCN" => PosId::Vcn,
            "MM" => PosId::Mm,
            "MAG" => PosId::Mag,
            "MAJ" => PosId::Maj,
            "IC" => PosId::Ic,
            "JKS" => PosId::Jks,
            "JKC" => PosId::Jkc,
            "JKG" => PosId::Jkg,
            "JKO" => PosId::Jko,
            "JKB" => PosId::Jkb,
            "JKV" => PosId::Jkv,
            "JKQ" => PosId::Jkq,
            "JX" => PosId::Jx,
            "JC" => PosId::Jc,
            "EP" => PosId::Ep,
            "EF" => PosId::Ef,
            "EC" => PosId::Ec,
            "ETN" => PosId::Etn,
            "ETM" => PosId::Etm,
            "XPN" => PosId::Xpn,
            "XSN" => PosId::Xsn,
            "XSV" => PosId::Xsv,
            "XSA" => PosId::Xsa,
            "XR" => PosId::Xr,
            "SF" => PosId::Sf,
            "SE" => PosId::Se,
            "SSO" => PosId::Sso,
            "SSC" => PosId::Ssc,
            "SC" => PosId::Sc,
            "SY" => PosId::Sy,
            "SL" => PosId::Sl,
            "SH" => PosId::Sh,
            "SN" => PosId::Sn,
            "COMPOUND" => PosId::Compound,
            "INFLECT" => PosId::Inflect,
            "PREANALYSIS" => PosId::Preanalysis,
            "UNKNOWN" | "UNK" | "*" => PosId::Unknown,
            other => {
                return Err(EojeolError::feature(format!(
                    "unknown part-of-speech tag '{other}'"
                )));
            }
        };
        Ok(id)
    }
}

impl fmt::Display for PosId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PosId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PosId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        PosId::from_str(&tag).map_err(serde::de::Error::custom)
    }
}

/// A token produced from one eojeol.
///
/// Offsets are byte positions into the exact text handed to the analyzer.
/// `position_increment` is 0 for a token that is an alternative to the
/// previous one; `position_length` is the number of base positions covered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    /// Surface text of the token
    pub surface: String,

    /// Length of the surface in characters
    pub surface_length: usize,

    /// Coarse type of the token
    pub pos_id: PosId,

    /// Fused part-of-speech label from the appender
    pub morphemes: String,

    /// Semantic class from the dictionary, if any
    pub semantic_class: Option<String>,

    /// Byte offset where the token starts
    pub start_offset: usize,

    /// Byte offset where the token ends
    pub end_offset: usize,

    /// Positions advanced since the previous token
    pub position_increment: usize,

    /// Number of base positions this token spans
    pub position_length: usize,
}

impl Pos {
    /// Create a token with a position increment and length of 1.
    pub fn new<S, M>(
        surface: S,
        pos_id: PosId,
        morphemes: M,
        start_offset: usize,
        end_offset: usize,
    ) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        let surface = surface.into();
        Pos {
            surface_length: surface.chars().count(),
            surface,
            pos_id,
            morphemes: morphemes.into(),
            semantic_class: None,
            start_offset,
            end_offset,
            position_increment: 1,
            position_length: 1,
        }
    }

    /// Set the semantic class.
    pub fn with_semantic_class(mut self, semantic_class: Option<String>) -> Self {
        self.semantic_class = semantic_class;
        self
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

    /// Byte length of the covered span.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Whether the token covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.surface, self.morphemes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_id_round_trip_spelling() {
        for tag in ["NNG", "NNBC", "VCP", "JKO", "ETM", "SSO", "COMPOUND"] {
            let id: PosId = tag.parse().unwrap();
            assert_eq!(id.as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "NNX".parse::<PosId>().unwrap_err();
        assert!(matches!(err, EojeolError::Feature(_)));
    }

    #[test]
    fn test_unknown_aliases() {
        assert_eq!("UNK".parse::<PosId>().unwrap(), PosId::Unknown);
        assert_eq!("*".parse::<PosId>().unwrap(), PosId::Unknown);
    }

    #[test]
    fn test_parse_sequence() {
        let tags = PosId::parse_sequence("VV+EP").unwrap();
        assert_eq!(tags, vec![PosId::Vv, PosId::Ep]);
        assert!(PosId::parse_sequence("VV+").is_err());
    }

    #[test]
    fn test_tag_classes() {
        assert!(PosId::Nnp.is_noun());
        assert!(!PosId::Vv.is_noun());
        assert!(PosId::Vv.is_content());
        assert!(!PosId::Jks.is_content());
        assert!(!PosId::Ef.is_content());
    }

    #[test]
    fn test_pos_defaults() {
        let pos = Pos::new("먹었다", PosId::Inflect, "VV+EP+EF", 0, 9);
        assert_eq!(pos.surface_length, 3);
        assert_eq!(pos.len(), 9);
        assert_eq!(pos.position_increment, 1);
        assert_eq!(pos.position_length, 1);
        assert!(pos.semantic_class.is_none());
        assert_eq!(pos.to_string(), "먹었다/VV+EP+EF");
    }

    #[test]
    fn test_pos_id_serde() {
        let json = serde_json::to_string(&PosId::Nnp).unwrap();
        assert_eq!(json, "\"NNP\"");
        let id: PosId = serde_json::from_str("\"EF\"").unwrap();
        assert_eq!(id, PosId::Ef);
    }
}
