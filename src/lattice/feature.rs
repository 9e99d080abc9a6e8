//! Parser for mecab-ko-dic feature records.
//!
//! Every dictionary entry carries a comma separated feature record:
//!
//! ```text
//! 품사,의미부류,종성유무,읽기,타입,첫번째품사,마지막품사,표현
//! NNG,*,F,학교종이,Compound,*,*,학교/NNG/*+종이/NNG/*
//! ```
//!
//! Missing trailing fields (unknown-word records often only carry the tag)
//! and `*` placeholders both map to `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::analysis::pos::PosId;
use crate::error::{EojeolError, Result};

const PLACEHOLDER: &str = "*";

/// How a dictionary entry is built out of several morphemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MorphType {
    /// Conjugated predicate (`먹었` = `먹/VV + 었/EP`)
    Inflect,
    /// Compound noun (`학교종이` = `학교/NNG + 종이/NNG`)
    Compound,
    /// Pre-analyzed irregular form
    Preanalysis,
}

impl MorphType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MorphType::Inflect => "Inflect",
            MorphType::Compound => "Compound",
            MorphType::Preanalysis => "Preanalysis",
        }
    }

    /// The coarse token id used for entries of this type.
    pub fn pos_id(&self) -> PosId {
        match self {
            MorphType::Inflect => PosId::Inflect,
            MorphType::Compound => PosId::Compound,
            MorphType::Preanalysis => PosId::Preanalysis,
        }
    }
}

impl FromStr for MorphType {
    type Err = EojeolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Inflect" => Ok(MorphType::Inflect),
            "Compound" => Ok(MorphType::Compound),
            "Preanalysis" => Ok(MorphType::Preanalysis),
            other => Err(EojeolError::feature(format!("unknown morpheme type '{other}'"))),
        }
    }
}

/// One morpheme of a dictionary expression (`학교/NNG/*`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionPart {
    pub surface: String,
    pub tag: PosId,
    pub semantic_class: Option<String>,
}

impl ExpressionPart {
    fn parse(item: &str) -> Result<Self> {
        let mut fields = item.splitn(3, '/');
        let surface = fields.next().unwrap_or_default();
        let tag = fields
            .next()
            .ok_or_else(|| EojeolError::feature(format!("expression item '{item}' has no tag")))?;
        if surface.is_empty() {
            return Err(EojeolError::feature(format!(
                "expression item '{item}' has an empty surface"
            )));
        }

        Ok(ExpressionPart {
            surface: surface.to_string(),
            tag: tag.parse()?,
            semantic_class: fields.next().and_then(optional),
        })
    }
}

impl fmt::Display for ExpressionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.surface,
            self.tag,
            self.semantic_class.as_deref().unwrap_or(PLACEHOLDER)
        )
    }
}

/// Parsed feature record of one lattice node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MorphFeature {
    /// Tags of the entry; several for inflected forms (`VV+EP`)
    pub tags: Vec<PosId>,
    pub semantic_class: Option<String>,
    /// Whether the last syllable has a final consonant (jongseong)
    pub has_final_consonant: Option<bool>,
    pub reading: Option<String>,
    pub morph_type: Option<MorphType>,
    pub first_tag: Option<PosId>,
    pub last_tag: Option<PosId>,
    /// Morphemes the entry is made of, empty for simple entries
    pub expression: Vec<ExpressionPart>,
}

impl MorphFeature {
    /// A feature record holding only a tag.
    pub fn from_tag(tag: PosId) -> Self {
        MorphFeature {
            tags: vec![tag],
            semantic_class: None,
            has_final_consonant: None,
            reading: None,
            morph_type: None,
            first_tag: None,
            last_tag: None,
            expression: Vec::new(),
        }
    }

    /// Parse a comma separated feature record.
    pub fn parse(record: &str) -> Result<Self> {
        let fields: Vec<&str> = record.splitn(8, ',').collect();
        let field = |i: usize| fields.get(i).copied().and_then(optional_str);

        let tag_field = fields
            .first()
            .copied()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| EojeolError::feature(format!("feature '{record}' has no tag")))?;
        let tags = PosId::parse_sequence(tag_field)?;

        let has_final_consonant = match field(2) {
            Some("T") => Some(true),
            Some("F") => Some(false),
            Some(other) => {
                return Err(EojeolError::feature(format!(
                    "invalid final consonant flag '{other}' in '{record}'"
                )));
            }
            None => None,
        };

        let expression = match field(7) {
            Some(expr) => expr
                .split('+')
                .map(ExpressionPart::parse)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(MorphFeature {
            tags,
            semantic_class: field(1).map(str::to_string),
            has_final_consonant,
            reading: field(3).map(str::to_string),
            morph_type: field(4).map(MorphType::from_str).transpose()?,
            first_tag: field(5).map(PosId::from_str).transpose()?,
            last_tag: field(6).map(PosId::from_str).transpose()?,
            expression,
        })
    }

    /// The leading tag of the entry.
    pub fn head_tag(&self) -> PosId {
        self.tags.first().copied().unwrap_or(PosId::Unknown)
    }

    /// The coarse id of the entry: its morpheme type if any, else its head tag.
    pub fn pos_id(&self) -> PosId {
        self.morph_type
            .map(|t| t.pos_id())
            .unwrap_or_else(|| self.head_tag())
    }

    /// Whether the entry is a single noun (possibly a dictionary compound).
    pub fn is_noun(&self) -> bool {
        self.tags.len() == 1 && self.head_tag().is_noun()
    }
}

fn optional_str(value: &str) -> Option<&str> {
    if value.is_empty() || value == PLACEHOLDER {
        None
    } else {
        Some(value)
    }
}

fn optional(value: &str) -> Option<String> {
    optional_str(value).map(str::to_string)
}

impl fmt::Display for MorphFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.tags.iter().map(PosId::as_str).collect();
        let consonant = match self.has_final_consonant {
            Some(true) => "T",
            Some(false) => "F",
            None => PLACEHOLDER,
        };
        let expression = if self.expression.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            self.expression
                .iter()
                .map(ExpressionPart::to_string)
                .collect::<Vec<_>>()
                .join("+")
        };

        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            tags.join("+"),
            self.semantic_class.as_deref().unwrap_or(PLACEHOLDER),
            consonant,
            self.reading.as_deref().unwrap_or(PLACEHOLDER),
            self.morph_type.map(|t| t.as_str()).unwrap_or(PLACEHOLDER),
            self.first_tag.map(|t| t.as_str()).unwrap_or(PLACEHOLDER),
            self.last_tag.map(|t| t.as_str()).unwrap_or(PLACEHOLDER),
            expression
        )
    }
}

impl FromStr for MorphFeature {
    type Err = EojeolError;

    fn from_str(s: &str) -> Result<Self> {
        MorphFeature::parse(s)
    }
}

impl Serialize for MorphFeature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MorphFeature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = String::deserialize(deserializer)?;
        MorphFeature::parse(&record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let feature =
            MorphFeature::parse("NNG,*,F,학교종이,Compound,*,*,학교/NNG/*+종이/NNG/*").unwrap();

        assert_eq!(feature.tags, vec![PosId::Nng]);
        assert_eq!(feature.semantic_class, None);
        assert_eq!(feature.has_final_consonant, Some(false));
        assert_eq!(feature.reading.as_deref(), Some("학교종이"));
        assert_eq!(feature.morph_type, Some(MorphType::Compound));
        assert_eq!(feature.pos_id(), PosId::Compound);
        assert!(feature.is_noun());
        assert_eq!(feature.expression.len(), 2);
        assert_eq!(feature.expression[0].surface, "학교");
        assert_eq!(feature.expression[1].surface, "종이");
        assert_eq!(feature.expression[1].tag, PosId::Nng);
    }

    #[test]
    fn test_parse_inflect() {
        let feature = MorphFeature::parse("VV+EP,*,T,먹었,Inflect,VV,EP,먹/VV/*+었/EP/*").unwrap();

        assert_eq!(feature.tags, vec![PosId::Vv, PosId::Ep]);
        assert_eq!(feature.pos_id(), PosId::Inflect);
        assert_eq!(feature.first_tag, Some(PosId::Vv));
        assert_eq!(feature.last_tag, Some(PosId::Ep));
        assert!(!feature.is_noun());
    }

    #[test]
    fn test_parse_semantic_class() {
        let feature = MorphFeature::parse("NNP,인명,T,홍길동,*,*,*,*").unwrap();
        assert_eq!(feature.semantic_class.as_deref(), Some("인명"));
        assert_eq!(feature.pos_id(), PosId::Nnp);
        assert!(feature.expression.is_empty());
    }

    #[test]
    fn test_parse_short_record() {
        let feature = MorphFeature::parse("SL").unwrap();
        assert_eq!(feature.tags, vec![PosId::Sl]);
        assert_eq!(feature.reading, None);
        assert_eq!(feature.morph_type, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(MorphFeature::parse("").is_err());
        assert!(MorphFeature::parse("NNG,*,X,학교").is_err());
        assert!(MorphFeature::parse("NNG,*,F,학교,Weird,*,*,*").is_err());
        assert!(MorphFeature::parse("NNG,*,F,학교종이,Compound,*,*,학교+종이/NNG/*").is_err());
    }

    #[test]
    fn test_display_reproduces_record() {
        let record = "NNG,*,F,학교종이,Compound,*,*,학교/NNG/*+종이/NNG/*";
        let feature = MorphFeature::parse(record).unwrap();
        assert_eq!(feature.to_string(), record);

        let short = MorphFeature::from_tag(PosId::Sf);
        assert_eq!(short.to_string(), "SF,*,*,*,*,*,*,*");
    }

    #[test]
    fn test_serde_as_string() {
        let feature = MorphFeature::parse("EF,*,F,다,*,*,*,*").unwrap();
        let json = serde_json::to_string(&feature).unwrap();
        assert_eq!(json, "\"EF,*,F,다,*,*,*,*\"");

        let back: MorphFeature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, feature);
    }
}
