//! Command implementations for the eojeol CLI.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::analysis::decompound::CompoundDecompounder;
use crate::analysis::session::{AnalyzerSession, PreparedSession};
use crate::analysis::tokenizer::korean::KoreanTokenizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TokenizerConfig;
use crate::error::{EojeolError, Result};
use crate::lattice::Lattice;

/// Execute a CLI command.
pub fn execute_command(args: EojeolArgs) -> Result<()> {
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args.clone(), &args),
        Command::Decompound(decompound_args) => decompound(decompound_args.clone(), &args),
        Command::Analyze(analyze_args) => analyze(analyze_args.clone(), &args),
    }
}

/// Tokenize documents.
fn tokenize(args: TokenizeArgs, cli_args: &EojeolArgs) -> Result<()> {
    let mut config = build_config(&args.tokenizer)?;

    let (session, texts): (Box<dyn AnalyzerSession>, Vec<String>) = match &args.lattice {
        Some(path) => {
            let lattices = load_lattices(path)?;
            if config.lowercase {
                // lattice files carry the text the analyzer saw
                debug!("case folding disabled for prepared lattices");
                config.lowercase = false;
            }
            let texts = match &args.text {
                Some(text) => vec![text.clone()],
                None => lattices.iter().map(|l| l.text().to_string()).collect(),
            };
            let mut session = PreparedSession::new();
            for lattice in lattices {
                session.insert(lattice);
            }
            (Box::new(session), texts)
        }
        None => {
            let text = args.text.clone().ok_or_else(|| {
                EojeolError::config("nothing to tokenize: pass TEXT or --lattice")
            })?;
            (
                analyzer_session(&args.dict, args.user_dict.as_deref())?,
                vec![text],
            )
        }
    };

    let tokenizer = KoreanTokenizer::new(session, config)?;
    let mut results = Vec::with_capacity(texts.len());
    for text in texts {
        let mut stream = tokenizer.stream(&text)?;
        let tokens = stream.by_ref().collect::<Result<Vec<_>>>()?;
        let end = stream.end();
        debug!("'{}' produced {} tokens", text, tokens.len());

        results.push(TokenizeResult {
            text,
            tokens,
            final_offset: end.end_offset,
        });
    }

    info!("tokenized {} documents", results.len());
    output_result("Tokens", &results, cli_args)
}

/// Split a compound noun.
fn decompound(args: DecompoundArgs, cli_args: &EojeolArgs) -> Result<()> {
    let decompounder = CompoundDecompounder::new(args.min_length);
    let parts: Vec<&str> = args.parts.iter().map(String::as_str).collect();
    let sub_nouns = decompounder.decompound(&args.surface, &parts);

    let result = DecompoundResult {
        decompounded: sub_nouns.len() > 1,
        surface: args.surface,
        parts: sub_nouns,
    };
    output_result("Decompounded", &result, cli_args)
}

/// Print the lattice of a text.
fn analyze(args: AnalyzeArgs, cli_args: &EojeolArgs) -> Result<()> {
    let mut session = analyzer_session(&args.dict, args.user_dict.as_deref())?;
    let lattice = session.parse(&args.text);
    session.clear();

    output_result("Lattice", &lattice?, cli_args)
}

/// Build the tokenizer configuration from a file and command line overrides.
pub fn build_config(options: &TokenizerOptions) -> Result<TokenizerConfig> {
    let mut config = match &options.config {
        Some(path) => TokenizerConfig::from_file(path)?,
        None => TokenizerConfig::default(),
    };

    if let Some(min_length) = options.min_length {
        config.decompound_min_length = min_length;
    }
    if options.no_decompound {
        config = config.without_decompounding();
    }
    if let Some(appender) = options.appender {
        config.pos_appender = appender.into();
    }
    if let Some(separator) = &options.separator {
        config.separator = separator.clone();
    }
    if options.no_lowercase {
        config.lowercase = false;
    }

    config.validate()?;
    Ok(config)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatticeFile {
    Many(Vec<Lattice>),
    One(Lattice),
}

/// Load one lattice or an array of lattices from a JSON file.
pub fn load_lattices<P: AsRef<Path>>(path: P) -> Result<Vec<Lattice>> {
    let content = fs::read_to_string(path.as_ref())?;
    let lattices = match serde_json::from_str(&content)? {
        LatticeFile::Many(lattices) => lattices,
        LatticeFile::One(lattice) => vec![lattice],
    };

    debug!(
        "loaded {} lattices from {}",
        lattices.len(),
        path.as_ref().display()
    );
    Ok(lattices)
}

#[cfg(feature = "lindera")]
fn analyzer_session(dict: &str, user_dict: Option<&str>) -> Result<Box<dyn AnalyzerSession>> {
    use crate::analysis::session::LinderaSession;

    Ok(Box::new(LinderaSession::new(dict, user_dict)?))
}

#[cfg(not(feature = "lindera"))]
fn analyzer_session(_dict: &str, _user_dict: Option<&str>) -> Result<Box<dyn AnalyzerSession>> {
    Err(EojeolError::config(
        "no analyzer available: pass --lattice or build with the `lindera` feature",
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::analysis::pos_appender::PosAppenderKind;
    use crate::lattice::LatticeNode;

    fn lattice_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn school() -> Lattice {
        let node = LatticeNode::parse("학교", "NNG,*,F,학교,*,*,*,*", 0, 6).unwrap();
        Lattice::from_morphemes("학교", vec![node])
    }

    #[test]
    fn test_build_config_overrides() {
        let options = TokenizerOptions {
            min_length: Some(2),
            appender: Some(AppenderArg::Dominant),
            no_lowercase: true,
            ..Default::default()
        };
        let config = build_config(&options).unwrap();

        assert_eq!(config.decompound_min_length, 2);
        assert_eq!(config.pos_appender, PosAppenderKind::Dominant);
        assert!(!config.lowercase);
    }

    #[test]
    fn test_build_config_rejects_invalid() {
        let options = TokenizerOptions {
            separator: Some(String::new()),
            ..Default::default()
        };
        assert!(build_config(&options).is_err());
    }

    #[test]
    fn test_load_single_lattice() {
        let json = serde_json::to_string(&school()).unwrap();
        let file = lattice_file(&json);

        let lattices = load_lattices(file.path()).unwrap();
        assert_eq!(lattices, vec![school()]);
    }

    #[test]
    fn test_load_lattice_array() {
        let json = serde_json::to_string(&vec![school(), Lattice::empty("")]).unwrap();
        let file = lattice_file(&json);

        let lattices = load_lattices(file.path()).unwrap();
        assert_eq!(lattices.len(), 2);
    }

    #[test]
    fn test_load_lattices_rejects_garbage() {
        let file = lattice_file("{\"nodes\": 3}");
        assert!(load_lattices(file.path()).is_err());
    }

    #[test]
    fn test_tokenize_from_lattice_file() {
        let json = serde_json::to_string(&school()).unwrap();
        let file = lattice_file(&json);

        let args = EojeolArgs {
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Json,
            pretty: false,
            command: Command::Tokenize(TokenizeArgs {
                text: None,
                lattice: Some(file.path().to_path_buf()),
                dict: "embedded://ko-dic".to_string(),
                user_dict: None,
                tokenizer: TokenizerOptions::default(),
            }),
        };
        assert!(execute_command(args).is_ok());
    }

    #[test]
    fn test_tokenize_uppercase_lattice_file() {
        let lattice = Lattice::from_morphemes(
            "KBS 뉴스",
            vec![
                LatticeNode::parse("KBS", "SL,*,*,*,*,*,*,*", 0, 3).unwrap(),
                LatticeNode::parse("뉴스", "NNG,*,F,뉴스,*,*,*,*", 4, 10).unwrap(),
            ],
        );
        let file = lattice_file(&serde_json::to_string(&lattice).unwrap());

        let args = TokenizeArgs {
            text: None,
            lattice: Some(file.path().to_path_buf()),
            dict: "embedded://ko-dic".to_string(),
            user_dict: None,
            tokenizer: TokenizerOptions::default(),
        };
        let cli_args = EojeolArgs {
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Csv,
            pretty: false,
            command: Command::Tokenize(args.clone()),
        };
        assert!(tokenize(args, &cli_args).is_ok());
    }

    #[cfg(not(feature = "lindera"))]
    #[test]
    fn test_tokenize_without_analyzer() {
        let args = TokenizeArgs {
            text: Some("학교".to_string()),
            lattice: None,
            dict: "embedded://ko-dic".to_string(),
            user_dict: None,
            tokenizer: TokenizerOptions::default(),
        };
        let cli_args = EojeolArgs {
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Human,
            pretty: false,
            command: Command::Tokenize(args.clone()),
        };
        assert!(matches!(
            tokenize(args, &cli_args),
            Err(EojeolError::Config(_))
        ));
    }
}
