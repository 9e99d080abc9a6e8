//! Korean text analysis.
//!
//! The pipeline runs from the analyzer [`session`] producing a lattice,
//! through the [`generator`] walking it eojeol by eojeol, to the
//! [`tokenizer`] handing out host [`token`]s with corrected offsets.

pub mod char_filter;
pub mod decompound;
pub mod generator;
pub mod pos;
pub mod pos_appender;
pub mod session;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use decompound::{CompoundDecompounder, NO_DECOMPOUND, SubNoun};
pub use generator::{TokenGenerator, TokenGroup};
pub use pos::{Pos, PosId};
pub use pos_appender::{DominantPosAppender, JoinPosAppender, PosAppender, PosAppenderKind};
pub use session::{AnalyzerSession, PreparedSession};
pub use token::{IntoTokenStream, Token, TokenStream};
pub use tokenizer::Tokenizer;
pub use tokenizer::korean::{KoreanTokenStream, KoreanTokenizer};
