//! Command line argument parsing for the eojeol CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::pos_appender::PosAppenderKind;

/// Eojeol - Korean tokenization for search indexing
#[derive(Parser, Debug, Clone)]
#[command(name = "eojeol")]
#[command(about = "Tokenize Korean text into an eojeol token graph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EojeolArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EojeolArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize documents into eojeol tokens
    Tokenize(TokenizeArgs),

    /// Split a compound noun into the given parts
    Decompound(DecompoundArgs),

    /// Print the lattice the analyzer builds for a text
    Analyze(AnalyzeArgs),
}

/// Tokenizer settings shared by the commands that build a tokenizer.
#[derive(Parser, Debug, Clone, Default)]
pub struct TokenizerOptions {
    /// Tokenizer configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Minimum character length of a noun to decompound
    #[arg(long, value_name = "CHARS")]
    pub min_length: Option<usize>,

    /// Never decompound nouns
    #[arg(long, conflicts_with = "min_length")]
    pub no_decompound: bool,

    /// Tag fusing policy
    #[arg(long, value_enum)]
    pub appender: Option<AppenderArg>,

    /// Separator used by the join policy
    #[arg(long)]
    pub separator: Option<String>,

    /// Do not case fold documents before analysis
    #[arg(long)]
    pub no_lowercase: bool,
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Text to tokenize (default: the text of every lattice in --lattice)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Serialized lattice file (JSON, one lattice or an array); its text is
    /// tokenized as is, without case folding
    #[arg(short, long, value_name = "LATTICE_FILE")]
    pub lattice: Option<PathBuf>,

    /// Lindera dictionary URI
    #[arg(long, default_value = "embedded://ko-dic")]
    pub dict: String,

    /// Lindera user dictionary URI
    #[arg(long)]
    pub user_dict: Option<String>,

    #[command(flatten)]
    pub tokenizer: TokenizerOptions,
}

/// Arguments for decompounding
#[derive(Parser, Debug, Clone)]
pub struct DecompoundArgs {
    /// Compound surface
    #[arg(value_name = "SURFACE")]
    pub surface: String,

    /// Nouns the compound is made of
    #[arg(value_name = "PARTS", required = true)]
    pub parts: Vec<String>,

    /// Minimum character length of a noun to decompound
    #[arg(long, default_value = "3")]
    pub min_length: usize,
}

/// Arguments for printing a lattice
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Lindera dictionary URI
    #[arg(long, default_value = "embedded://ko-dic")]
    pub dict: String,

    /// Lindera user dictionary URI
    #[arg(long)]
    pub user_dict: Option<String>,
}

/// Tag fusing policies selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppenderArg {
    /// Join every tag
    Join,
    /// Keep the dominant tag
    Dominant,
}

impl From<AppenderArg> for PosAppenderKind {
    fn from(arg: AppenderArg) -> Self {
        match arg {
            AppenderArg::Join => PosAppenderKind::Join,
            AppenderArg::Dominant => PosAppenderKind::Dominant,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// CSV output (one row per token or sub-noun)
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_tokenize_command() {
        let args = EojeolArgs::try_parse_from([
            "eojeol",
            "tokenize",
            "학교종이 울린다",
            "--lattice",
            "/path/to/lattice.json",
            "--min-length",
            "2",
            "--appender",
            "dominant",
        ])
        .unwrap();

        if let Command::Tokenize(tokenize_args) = args.command {
            assert_eq!(tokenize_args.text.as_deref(), Some("학교종이 울린다"));
            assert_eq!(
                tokenize_args.lattice,
                Some(PathBuf::from("/path/to/lattice.json"))
            );
            assert_eq!(tokenize_args.tokenizer.min_length, Some(2));
            assert_eq!(tokenize_args.tokenizer.appender, Some(AppenderArg::Dominant));
            assert_eq!(tokenize_args.dict, "embedded://ko-dic");
        } else {
            panic!("Expected Tokenize command");
        }
    }

    #[test]
    fn test_no_decompound_conflicts_with_min_length() {
        let result = EojeolArgs::try_parse_from([
            "eojeol",
            "tokenize",
            "--no-decompound",
            "--min-length",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decompound_command() {
        let args =
            EojeolArgs::try_parse_from(["eojeol", "decompound", "학교종이", "학교", "종이"])
                .unwrap();

        if let Command::Decompound(decompound_args) = args.command {
            assert_eq!(decompound_args.surface, "학교종이");
            assert_eq!(decompound_args.parts, vec!["학교", "종이"]);
            assert_eq!(decompound_args.min_length, 3);
        } else {
            panic!("Expected Decompound command");
        }
    }

    #[test]
    fn test_decompound_requires_parts() {
        assert!(EojeolArgs::try_parse_from(["eojeol", "decompound", "학교종이"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = EojeolArgs::try_parse_from(["eojeol", "analyze", "학교"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = EojeolArgs::try_parse_from(["eojeol", "-vvv", "analyze", "학교"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = EojeolArgs::try_parse_from(["eojeol", "analyze", "학교", "-q", "-v"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = EojeolArgs::try_parse_from([
            "eojeol",
            "--format",
            "json",
            "--pretty",
            "decompound",
            "학교종이",
            "학교",
            "종이",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }
}
