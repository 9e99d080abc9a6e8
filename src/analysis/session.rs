//! Morphological analyzer sessions.
//!
//! A session turns one document into a [`Lattice`]. It is created once,
//! handed to a tokenizer, cleared between documents and dropped with the
//! tokenizer; no analyzer state lives outside of it.
//!
//! # Available Sessions
//!
//! - [`PreparedSession`] - Serves lattices produced ahead of time
//! - [`LinderaSession`] - Runs lindera with the ko-dic dictionary (requires `lindera` feature)

use ahash::AHashMap;
use log::debug;

use crate::error::{EojeolError, Result};
use crate::lattice::Lattice;

#[cfg(feature = "lindera")]
pub use self::segmenter::{DEFAULT_DICTIONARY, LinderaSession};

/// A morphological analyzer session.
pub trait AnalyzerSession: Send {
    /// Analyze `text` and return its lattice.
    fn parse(&mut self, text: &str) -> Result<Lattice>;

    /// Drop per-document state.
    fn clear(&mut self);

    /// Get the name of this session.
    fn name(&self) -> &'static str;
}

impl<S: AnalyzerSession + ?Sized> AnalyzerSession for Box<S> {
    fn parse(&mut self, text: &str) -> Result<Lattice> {
        (**self).parse(text)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A session answering from lattices registered by text.
///
/// # Examples
///
/// ```
/// use eojeol::analysis::session::{AnalyzerSession, PreparedSession};
/// use eojeol::lattice::{Lattice, LatticeNode};
///
/// let node = LatticeNode::parse("학교", "NNG,*,F,학교,*,*,*,*", 0, 6).unwrap();
/// let mut session =
///     PreparedSession::new().with_lattice(Lattice::from_morphemes("학교", vec![node]));
///
/// assert_eq!(session.parse("학교").unwrap().len(), 3);
/// assert!(session.parse("종이").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PreparedSession {
    lattices: AHashMap<String, Lattice>,
    current: Option<String>,
}

impl PreparedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lattice under its own text.
    pub fn with_lattice(mut self, lattice: Lattice) -> Self {
        self.insert(lattice);
        self
    }

    pub fn insert(&mut self, lattice: Lattice) {
        self.lattices.insert(lattice.text().to_string(), lattice);
    }

    /// Text of the document being analyzed, until the session is cleared.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn len(&self) -> usize {
        self.lattices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lattices.is_empty()
    }
}

impl AnalyzerSession for PreparedSession {
    fn parse(&mut self, text: &str) -> Result<Lattice> {
        let lattice = self
            .lattices
            .get(text)
            .cloned()
            .ok_or_else(|| EojeolError::analysis(format!("no lattice prepared for '{text}'")))?;

        debug!("serving prepared lattice of {} nodes", lattice.len());
        self.current = Some(text.to_string());
        Ok(lattice)
    }

    fn clear(&mut self) {
        self.current = None;
    }

    fn name(&self) -> &'static str {
        "prepared"
    }
}

#[cfg(feature = "lindera")]
mod segmenter {
    use std::borrow::Cow;

    use lindera::dictionary::{load_dictionary, load_user_dictionary};
    use lindera::mode::Mode;
    use lindera::segmenter::Segmenter;
    use log::{debug, trace};

    use super::AnalyzerSession;
    use crate::analysis::pos::PosId;
    use crate::error::{EojeolError, Result};
    use crate::lattice::{Lattice, LatticeNode, MorphFeature};

    /// Dictionary used when none is given.
    pub const DEFAULT_DICTIONARY: &str = "embedded://ko-dic";

    /// A session running the lindera segmenter.
    pub struct LinderaSession {
        inner: Segmenter,
        documents: usize,
    }

    impl LinderaSession {
        /// Create a session over the given dictionary.
        pub fn new(dict_uri: &str, user_dict_uri: Option<&str>) -> Result<Self> {
            let dict = load_dictionary(dict_uri)
                .map_err(|e| EojeolError::analysis(format!("Failed to load dictionary: {e}")))?;
            let metadata = &dict.metadata;
            let user_dict = match user_dict_uri {
                Some(uri) => Some(load_user_dictionary(uri, metadata).map_err(|e| {
                    EojeolError::analysis(format!("Failed to load user dictionary: {e}"))
                })?),
                None => None,
            };
            let inner = Segmenter::new(Mode::Normal, dict, user_dict);

            debug!("lindera session ready with dictionary {dict_uri}");
            Ok(Self {
                inner,
                documents: 0,
            })
        }

        /// Create a session over the embedded ko-dic dictionary.
        pub fn ko_dic() -> Result<Self> {
            Self::new(DEFAULT_DICTIONARY, None)
        }
    }

    impl AnalyzerSession for LinderaSession {
        fn parse(&mut self, text: &str) -> Result<Lattice> {
            let tokens = self
                .inner
                .segment(Cow::Borrowed(text))
                .map_err(|e| EojeolError::analysis(format!("Failed to segment text: {e}")))?;

            let mut morphemes = Vec::with_capacity(tokens.len());
            for mut token in tokens {
                if token.surface.trim().is_empty() {
                    continue;
                }
                let record = token.details().join(",");
                let feature = MorphFeature::parse(&record).unwrap_or_else(|e| {
                    trace!("unknown morpheme '{}': {e}", token.surface);
                    MorphFeature::from_tag(PosId::Unknown)
                });
                morphemes.push(LatticeNode::new(
                    token.surface.to_string(),
                    feature,
                    token.byte_start,
                    token.byte_end,
                ));
            }

            self.documents += 1;
            debug!(
                "document {} segmented into {} morphemes",
                self.documents,
                morphemes.len()
            );
            Ok(Lattice::from_morphemes(text, morphemes))
        }

        fn clear(&mut self) {
            trace!("lindera session cleared after {} documents", self.documents);
        }

        fn name(&self) -> &'static str {
            "lindera"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_lindera_session_korean() {
            let mut session = LinderaSession::ko_dic().unwrap();
            let lattice = session.parse("한국어의 형태 해석").unwrap();

            assert!(lattice.nodes().first().unwrap().is_bos());
            assert!(lattice.nodes().last().unwrap().is_eos());
            assert_eq!(lattice.nodes()[1].surface, "한국어");
            assert_eq!(session.name(), "lindera");
        }
    }
}
