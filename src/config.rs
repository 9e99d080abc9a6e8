//! Tokenizer configuration.
//!
//! ```
//! use eojeol::config::TokenizerConfig;
//!
//! let config: TokenizerConfig =
//!     serde_json::from_str(r#"{"decompound_min_length": 2, "pos_appender": "dominant"}"#).unwrap();
//!
//! assert_eq!(config.decompound_min_length, 2);
//! assert_eq!(config.separator, "+");
//! assert!(config.lowercase);
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::decompound::NO_DECOMPOUND;
use crate::analysis::pos_appender::{
    DominantPosAppender, JoinPosAppender, PosAppender, PosAppenderKind,
};
use crate::error::{EojeolError, Result};

/// Default minimum character length of a noun to decompound.
pub const DEFAULT_DECOMPOUND_MIN_LENGTH: usize = 3;

/// Settings of a [`KoreanTokenizer`](crate::analysis::tokenizer::korean::KoreanTokenizer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Minimum character length of a noun to decompound; 9999 disables it.
    pub decompound_min_length: usize,

    /// Policy fusing the tags of an eojeol.
    pub pos_appender: PosAppenderKind,

    /// Separator used by the `join` policy.
    pub separator: String,

    /// Case fold the document before analysis.
    pub lowercase: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            decompound_min_length: DEFAULT_DECOMPOUND_MIN_LENGTH,
            pos_appender: PosAppenderKind::default(),
            separator: JoinPosAppender::DEFAULT_SEPARATOR.to_string(),
            lowercase: true,
        }
    }
}

impl TokenizerConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: TokenizerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the decompounding threshold.
    pub fn with_decompound_min_length(mut self, min_length: usize) -> Self {
        self.decompound_min_length = min_length;
        self
    }

    /// Turn decompounding off.
    pub fn without_decompounding(self) -> Self {
        self.with_decompound_min_length(NO_DECOMPOUND)
    }

    pub fn with_pos_appender(mut self, kind: PosAppenderKind) -> Self {
        self.pos_appender = kind;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Check the settings for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.decompound_min_length == 0 {
            return Err(EojeolError::config(
                "decompound_min_length must be at least 1",
            ));
        }
        if self.decompound_min_length > NO_DECOMPOUND {
            return Err(EojeolError::config(format!(
                "decompound_min_length must not exceed {NO_DECOMPOUND}"
            )));
        }
        if self.pos_appender == PosAppenderKind::Join && self.separator.is_empty() {
            return Err(EojeolError::config("separator must not be empty"));
        }
        Ok(())
    }

    /// Build the configured tag fusing policy.
    pub fn build_appender(&self) -> Arc<dyn PosAppender> {
        match self.pos_appender {
            PosAppenderKind::Join => Arc::new(JoinPosAppender::with_separator(&self.separator)),
            PosAppenderKind::Dominant => Arc::new(DominantPosAppender::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::analysis::pos::PosId;

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert_eq!(config.decompound_min_length, 3);
        assert_eq!(config.pos_appender, PosAppenderKind::Join);
        assert_eq!(config.separator, "+");
        assert!(config.lowercase);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builders() {
        let config = TokenizerConfig::default()
            .without_decompounding()
            .with_pos_appender(PosAppenderKind::Dominant)
            .with_lowercase(false);
        assert_eq!(config.decompound_min_length, NO_DECOMPOUND);
        assert!(!config.lowercase);
        assert_eq!(config.build_appender().name(), "dominant");
    }

    #[test]
    fn test_config_validation() {
        let config = TokenizerConfig::default().with_decompound_min_length(0);
        assert!(matches!(config.validate(), Err(EojeolError::Config(_))));

        let config = TokenizerConfig::default().with_decompound_min_length(NO_DECOMPOUND + 1);
        assert!(config.validate().is_err());

        let config = TokenizerConfig {
            separator: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_join_appender_with_separator() {
        let config = TokenizerConfig {
            separator: "/".to_string(),
            ..Default::default()
        };
        let appender = config.build_appender();
        assert_eq!(appender.append(&[PosId::Vv, PosId::Ef]), "VV/EF");
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"decompound_min_length": 4, "lowercase": false}}"#).unwrap();

        let config = TokenizerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.decompound_min_length, 4);
        assert!(!config.lowercase);
        assert_eq!(config.pos_appender, PosAppenderKind::Join);
    }

    #[test]
    fn test_config_from_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            TokenizerConfig::from_file(file.path()),
            Err(EojeolError::Json(_))
        ));
    }
}
