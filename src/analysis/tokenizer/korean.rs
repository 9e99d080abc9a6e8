//! Korean tokenizer over a morphological analyzer session.
//!
//! [`KoreanTokenizer`] normalizes the document with its char filters, hands
//! it to the [`AnalyzerSession`] and walks the returned lattice with a
//! [`TokenGenerator`]. [`KoreanTokenStream`] is the pull side: it drains one
//! eojeol group at a time and maps every offset back onto the original
//! document.
//!
//! # Examples
//!
//! ```
//! use eojeol::analysis::session::PreparedSession;
//! use eojeol::analysis::tokenizer::korean::KoreanTokenizer;
//! use eojeol::config::TokenizerConfig;
//! use eojeol::lattice::{Lattice, LatticeNode};
//!
//! let node = LatticeNode::parse(
//!     "학교종이",
//!     "NNG,*,F,학교종이,Compound,*,*,학교/NNG/*+종이/NNG/*",
//!     0,
//!     12,
//! )
//! .unwrap();
//! let session =
//!     PreparedSession::new().with_lattice(Lattice::from_morphemes("학교종이", vec![node]));
//! let tokenizer = KoreanTokenizer::new(session, TokenizerConfig::default()).unwrap();
//!
//! let mut stream = tokenizer.stream("학교종이").unwrap();
//! let mut texts = Vec::new();
//! while let Some(token) = stream.increment_token().unwrap() {
//!     texts.push(token.text);
//! }
//! assert_eq!(texts, vec!["학교종이", "학교", "종이"]);
//!
//! let end = stream.end();
//! assert_eq!((end.start_offset, end.end_offset), (12, 12));
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::{Mutex, MutexGuard};

use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::{CharFilter, OffsetCorrector};
use crate::analysis::generator::{TokenGenerator, TokenGroup};
use crate::analysis::pos::Pos;
use crate::analysis::pos_appender::PosAppender;
use crate::analysis::session::AnalyzerSession;
use crate::analysis::token::{IntoTokenStream, Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::config::TokenizerConfig;
use crate::error::{EojeolError, Result};

/// Tokenizer producing eojeol tokens and decompounded nouns.
pub struct KoreanTokenizer {
    config: TokenizerConfig,
    appender: Arc<dyn PosAppender>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    session: Mutex<Box<dyn AnalyzerSession>>,
}

impl KoreanTokenizer {
    /// Create a tokenizer owning `session`.
    pub fn new<S>(session: S, config: TokenizerConfig) -> Result<Self>
    where
        S: AnalyzerSession + 'static,
    {
        config.validate()?;
        let appender = config.build_appender();

        debug!(
            "korean tokenizer over {} session (appender: {}, decompound min length: {})",
            session.name(),
            appender.name(),
            config.decompound_min_length
        );

        Ok(KoreanTokenizer {
            config,
            appender,
            char_filters: Vec::new(),
            session: Mutex::new(Box::new(session)),
        })
    }

    /// Replace the tag fusing policy built from the configuration.
    pub fn with_pos_appender(mut self, appender: Arc<dyn PosAppender>) -> Self {
        self.appender = appender;
        self
    }

    /// Add a char filter run before case folding.
    pub fn with_char_filter(mut self, filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(filter);
        self
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn appender(&self) -> &Arc<dyn PosAppender> {
        &self.appender
    }

    /// Open a token stream over `text`.
    ///
    /// The stream holds the session until it is dropped. Opening another
    /// stream while one is alive fails with an analysis error.
    pub fn stream(&self, text: &str) -> Result<KoreanTokenStream<'_>> {
        let session = self.session.try_lock().ok_or_else(|| {
            EojeolError::analysis("session busy: another token stream is still open")
        })?;

        Ok(KoreanTokenStream {
            tokenizer: self,
            session,
            input: text.to_string(),
            corrector: OffsetCorrector::new(),
            analyzed_len: 0,
            generator: None,
            pending: TokenGroup::new(),
            positions: 0,
            state: StreamState::Fresh,
        })
    }
}

impl Tokenizer for KoreanTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut stream = self.stream(text)?;
        let tokens = stream.by_ref().collect::<Result<Vec<_>>>()?;
        stream.end();
        Ok(tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "korean"
    }
}

impl fmt::Debug for KoreanTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: Vec<_> = self.char_filters.iter().map(|c| c.name()).collect();
        f.debug_struct("KoreanTokenizer")
            .field("config", &self.config)
            .field("appender", &self.appender.name())
            .field("char_filters", &filters)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Fresh,
    Analyzed,
    Exhausted,
}

/// Pull-based token stream over one document.
pub struct KoreanTokenStream<'a> {
    tokenizer: &'a KoreanTokenizer,
    session: MutexGuard<'a, Box<dyn AnalyzerSession>>,
    input: String,
    corrector: OffsetCorrector,
    analyzed_len: usize,
    generator: Option<TokenGenerator>,
    pending: TokenGroup,
    positions: usize,
    state: StreamState,
}

impl KoreanTokenStream<'_> {
    /// Produce the next token, or `None` at the end of the document.
    ///
    /// The first call analyzes the document. An analysis or lattice failure
    /// clears the session and ends the stream.
    pub fn increment_token(&mut self) -> Result<Option<Token>> {
        loop {
            if let Some(pos) = self.pending.pop_front() {
                return Ok(Some(self.emit(pos)));
            }

            match self.state {
                StreamState::Exhausted => return Ok(None),
                StreamState::Fresh => {
                    if let Err(e) = self.analyze() {
                        self.fail();
                        return Err(e);
                    }
                }
                StreamState::Analyzed => {}
            }

            let next = match self.generator.as_mut() {
                Some(generator) => generator.next_eojeol_tokens(),
                None => Ok(None),
            };
            match next {
                Ok(Some(group)) => self.pending = group,
                Ok(None) => {
                    self.state = StreamState::Exhausted;
                    self.generator = None;
                    return Ok(None);
                }
                Err(e) => {
                    warn!("tokenization aborted: {e}");
                    self.fail();
                    return Err(e);
                }
            }
        }
    }

    /// Finish the document.
    ///
    /// Returns the zero-width token carrying the final offset of the
    /// original document and clears the session.
    pub fn end(&mut self) -> Token {
        let final_offset = match self.state {
            StreamState::Fresh => self.input.len(),
            StreamState::Analyzed | StreamState::Exhausted => {
                self.corrector.correct(self.analyzed_len)
            }
        };
        self.session.clear();

        Token::with_offsets(
            "",
            self.positions.saturating_sub(1),
            final_offset,
            final_offset,
        )
        .with_position_increment(0)
    }

    /// Drop all per-document state so the document can be read again.
    pub fn reset(&mut self) {
        self.generator = None;
        self.pending.clear();
        self.corrector = OffsetCorrector::new();
        self.analyzed_len = 0;
        self.positions = 0;
        self.state = StreamState::Fresh;
        self.session.clear();
    }

    /// Reset the stream onto a new document.
    pub fn set_input(&mut self, text: &str) {
        self.reset();
        self.input = text.to_string();
    }

    /// The document as it was handed to the stream.
    pub fn input(&self) -> &str {
        &self.input
    }

    fn analyze(&mut self) -> Result<()> {
        let mut text = self.input.clone();
        for filter in &self.tokenizer.char_filters {
            let (filtered, transformations) = filter.filter(&text);
            self.corrector.push(transformations);
            text = filtered;
        }
        if self.tokenizer.config.lowercase {
            let (filtered, transformations) = LowercaseCharFilter::new().filter(&text);
            self.corrector.push(transformations);
            text = filtered;
        }

        self.analyzed_len = text.len();
        let lattice = self.session.parse(&text)?;
        if lattice.text() != text {
            return Err(EojeolError::lattice(format!(
                "{} session returned a lattice for {:?}, not for the analyzed text {:?}",
                self.session.name(),
                lattice.text(),
                text
            )));
        }
        let generator = TokenGenerator::new(
            Arc::clone(&self.tokenizer.appender),
            self.tokenizer.config.decompound_min_length,
            lattice,
        )?;

        self.generator = Some(generator);
        self.state = StreamState::Analyzed;
        Ok(())
    }

    fn emit(&mut self, pos: Pos) -> Token {
        self.positions += pos.position_increment;
        let position = self.positions.saturating_sub(1);
        let start = self.corrector.correct(pos.start_offset);
        let end = self.corrector.correct(pos.end_offset);
        Token::from_pos(pos, position, start, end)
    }

    fn fail(&mut self) {
        self.generator = None;
        self.pending.clear();
        self.state = StreamState::Exhausted;
        self.session.clear();
    }
}

impl Iterator for KoreanTokenStream<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.increment_token().transpose()
    }
}

impl Drop for KoreanTokenStream<'_> {
    fn drop(&mut self) {
        self.session.clear();
    }
}

impl fmt::Debug for KoreanTokenStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KoreanTokenStream")
            .field("session", &self.session.name())
            .field("input_len", &self.input.len())
            .field("pending", &self.pending.len())
            .field("positions", &self.positions)
            .field("state", &self.state)
            .finish()
    }
}
