//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::decompound::SubNoun;
use crate::analysis::token::Token;
use crate::cli::args::{EojeolArgs, OutputFormat};
use crate::error::Result;
use crate::lattice::Lattice;

/// A command result that can be printed in every output format.
pub trait Report: Serialize {
    /// Render the result for a terminal.
    fn render_human(&self) -> String;

    /// Flat records, one per CSV row.
    fn csv_rows(&self) -> Result<Vec<serde_json::Value>>;
}

/// Result structure for tokenizing one document.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeResult {
    pub text: String,
    pub tokens: Vec<Token>,
    pub final_offset: usize,
}

/// Result structure for decompounding a noun.
#[derive(Debug, Serialize)]
pub struct DecompoundResult {
    pub surface: String,
    pub decompounded: bool,
    pub parts: Vec<SubNoun>,
}

impl Report for Vec<TokenizeResult> {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for (i, result) in self.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", result.text));
            for token in &result.tokens {
                out.push_str(&format_token(token));
                out.push('\n');
            }
            out.push_str(&format!("  (end offset {})\n", result.final_offset));
        }
        out
    }

    fn csv_rows(&self) -> Result<Vec<serde_json::Value>> {
        let mut rows = Vec::new();
        for (document, result) in self.iter().enumerate() {
            for token in &result.tokens {
                let mut row = serde_json::to_value(token)?;
                if let Some(obj) = row.as_object_mut() {
                    obj.insert("document".to_string(), document.into());
                }
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

impl Report for DecompoundResult {
    fn render_human(&self) -> String {
        if !self.decompounded {
            return format!("{} (kept whole)\n", self.surface);
        }
        let parts: Vec<String> = self
            .parts
            .iter()
            .map(|p| format!("{}[{}..{}]", p.surface, p.start_offset, p.end_offset))
            .collect();
        format!("{} => {}\n", self.surface, parts.join(" + "))
    }

    fn csv_rows(&self) -> Result<Vec<serde_json::Value>> {
        self.parts
            .iter()
            .map(|p| serde_json::to_value(p).map_err(Into::into))
            .collect()
    }
}

impl Report for Lattice {
    fn render_human(&self) -> String {
        let mut out = format!("{}\n", self.text());
        for node in self.nodes() {
            let line = if node.is_bos() {
                "  BOS".to_string()
            } else if node.is_eos() {
                format!("  EOS @{}", node.start_offset)
            } else {
                format!(
                    "  {}\t{}\t{}..{}",
                    node.surface, node.feature, node.start_offset, node.end_offset
                )
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn csv_rows(&self) -> Result<Vec<serde_json::Value>> {
        self.nodes()
            .iter()
            .map(|n| serde_json::to_value(n).map_err(Into::into))
            .collect()
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Report>(message: &str, result: &T, args: &EojeolArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Csv => output_csv(result),
    }
}

/// Output in human-readable format.
fn output_human<T: Report>(message: &str, result: &T, args: &EojeolArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.render_human());
    Ok(())
}

fn output_json<T: Serialize>(result: &T, args: &EojeolArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn output_csv<T: Report>(result: &T) -> Result<()> {
    print!("{}", render_csv(&result.csv_rows()?));
    Ok(())
}

/// Render records as CSV, taking the header from the first record.
fn render_csv(rows: &[serde_json::Value]) -> String {
    let mut out = String::new();
    let headers: Vec<&String> = match rows.first().and_then(|r| r.as_object()) {
        Some(obj) => obj.keys().collect(),
        None => return out,
    };

    let header_line = headers
        .iter()
        .map(|h| h.as_str())
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&header_line);
    out.push('\n');

    for row in rows {
        let values: Vec<String> = headers
            .iter()
            .map(|h| {
                row.get(h.as_str())
                    .map(format_csv_value)
                    .unwrap_or_default()
            })
            .collect();
        out.push_str(&values.join(","));
        out.push('\n');
    }
    out
}

fn format_token(token: &Token) -> String {
    format!(
        "{:>4}  {}  {}..{}  inc={} len={}  {}  {}",
        token.position,
        token.text,
        token.start_offset,
        token.end_offset,
        token.position_increment,
        token.position_length,
        token.token_type.as_deref().unwrap_or("-"),
        token.part_of_speech.as_deref().unwrap_or("-")
    )
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format a JSON value for CSV output.
fn format_csv_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                let escaped = s.replace('"', "\"\"");
                format!("\"{escaped}\"")
            } else {
                s.clone()
            }
        }
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join("; ");
            format!("\"[{formatted_values}]\"")
        }
        serde_json::Value::Object(_) => "\"[object]\"".to_string(),
        serde_json::Value::Null => "".to_string(),
    }
}
