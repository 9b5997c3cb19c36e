//! File processing API for sifu source
//!
//! This module turns sifu source into one of several textual views, selected by
//! a `stage-format` string such as `token-simple` or `ast-treeviz`.
//!
//! | Format        | Output                                          |
//! |---------------|-------------------------------------------------|
//! | `token-simple`| one `<kind:text>` tag per token                 |
//! | `token-json`  | token kind, text and byte span as JSON          |
//! | `ast-source`  | canonical source                                |
//! | `ast-sexpr`   | s-expression                                    |
//! | `ast-treeviz` | indented tree drawing                           |
//! | `ast-json`    | the pattern tree as JSON                        |
//!
//! # Sample Sources
//!
//! The [`sifu_sources`] module gives tests access to the curated programs in
//! `samples/`. Use them instead of pasting sifu programs into tests.

use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::sifu::ast::Pattern;
use crate::sifu::formats::{to_sexpr, to_source, to_treeviz_str};
use crate::sifu::lexer::{tokenize_with_spans, Token, TokenSpan};
use crate::sifu::parser::{parse_with_config, ParseError, ParserConfig};

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Source,
    Sexpr,
    Treeviz,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-sexpr"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "source" => OutputFormat::Source,
            "sexpr" => OutputFormat::Sexpr,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "'{}' is not supported for the {} stage",
                spec.format.name(),
                spec.stage.name()
            )));
        }
        Ok(spec)
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [
            (ProcessingStage::Token, OutputFormat::Simple),
            (ProcessingStage::Token, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Source),
            (ProcessingStage::Ast, OutputFormat::Sexpr),
            (ProcessingStage::Ast, OutputFormat::Treeviz),
            (ProcessingStage::Ast, OutputFormat::Json),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }

    pub fn name(&self) -> String {
        format!("{}-{}", self.stage.name(), self.format.name())
    }
}

impl ProcessingStage {
    pub fn name(&self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Source => "source",
            OutputFormat::Sexpr => "sexpr",
            OutputFormat::Treeviz => "treeviz",
        }
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Tree is {depth} levels deep, JSON output is limited to {limit}")]
    TooDeep { depth: usize, limit: usize },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Deepest tree `ast-json` will serialize
pub const MAX_JSON_DEPTH: usize = 256;

/// A token as written to `token-json`
#[derive(Debug, Serialize)]
struct TokenRecord<'src> {
    token: Token,
    text: &'src str,
    start: usize,
    end: usize,
}

/// Process sifu source according to the given specification
pub fn process_str(
    source: &str,
    spec: &ProcessingSpec,
    config: &ParserConfig,
) -> Result<String, ProcessingError> {
    debug!(format = %spec.name(), bytes = source.len(), "processing source");
    match spec.stage {
        ProcessingStage::Token => {
            let tokens = tokenize_with_spans(source)
                .map_err(|e| ParseError::from_lex_error(&e, source))?;
            format_tokens(source, &tokens, spec.format)
        }
        ProcessingStage::Ast => {
            let pattern = parse_with_config(source, config)?;
            format_pattern(pattern.as_ref(), spec.format)
        }
    }
}

/// Process a sifu file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &ParserConfig,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(
            file_path.display().to_string(),
        ));
    }

    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;

    process_str(&content, spec, config)
}

/// Format tokens according to the specified format
fn format_tokens(
    source: &str,
    tokens: &[TokenSpan],
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for (token, span) in tokens {
                if token.is_leaf() {
                    result.push_str(&format!(
                        "<{}:{}>",
                        token.describe(),
                        &source[span.clone()]
                    ));
                } else {
                    result.push_str(&format!("{}", token));
                }
                if matches!(token, Token::Newline) {
                    result.push('\n');
                }
            }
            Ok(result)
        }
        OutputFormat::Json => {
            let records: Vec<TokenRecord> = tokens
                .iter()
                .map(|(token, span)| TokenRecord {
                    token: *token,
                    text: &source[span.clone()],
                    start: span.start,
                    end: span.end,
                })
                .collect();
            serde_json::to_string_pretty(&records)
                .map_err(|e| ProcessingError::SerializationError(e.to_string()))
        }
        other => Err(ProcessingError::InvalidFormatType(format!(
            "{} format only works with ast stage",
            other.name()
        ))),
    }
}

/// Format a parsed pattern according to the specified format.
/// Input without a pattern renders as empty text, or `null` in JSON.
fn format_pattern(
    pattern: Option<&Pattern>,
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Source => Ok(pattern.map(to_source).unwrap_or_default()),
        OutputFormat::Sexpr => Ok(pattern.map(to_sexpr).unwrap_or_default()),
        OutputFormat::Treeviz => Ok(pattern.map(to_treeviz_str).unwrap_or_default()),
        OutputFormat::Json => {
            // serde walks the tree recursively, so very long sequences stop here
            let depth = pattern.map_or(0, Pattern::depth);
            if depth > MAX_JSON_DEPTH {
                return Err(ProcessingError::TooDeep {
                    depth,
                    limit: MAX_JSON_DEPTH,
                });
            }
            serde_json::to_string_pretty(&pattern)
                .map_err(|e| ProcessingError::SerializationError(e.to_string()))
        }
        OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
            "simple format only works with token stage".to_string(),
        )),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

/// Sample sources module for accessing the curated sifu programs
pub mod sifu_sources {
    use super::*;

    /// Available sample files (canonical sources)
    pub const AVAILABLE_SAMPLES: &[&str] = &[
        "000-terms.sifu",
        "010-apps.sifu",
        "020-arrows.sifu",
        "030-matches.sifu",
        "040-precedence.sifu",
        "050-nested.sifu",
        "060-quotes.sifu",
        "070-infix.sifu",
        "080-comments.sifu",
    ];

    /// Format options for sample content
    #[derive(Debug, Clone, PartialEq)]
    pub enum SampleFormat {
        /// Raw string content
        String,
        /// Tokenized content as `token-json`
        Tokens,
        /// Processed content using the specified format string
        Processed(String),
    }

    /// Main interface for accessing sifu sample files
    pub struct SifuSources;

    impl SifuSources {
        /// Get the path to the samples directory
        fn samples_dir() -> &'static str {
            concat!(env!("CARGO_MANIFEST_DIR"), "/samples")
        }

        /// Get the full path to a sample file
        pub fn sample_path(filename: &str) -> String {
            format!("{}/{}", Self::samples_dir(), filename)
        }

        /// Validate that a sample file exists and is available
        fn validate_sample(filename: &str) -> Result<(), ProcessingError> {
            if !AVAILABLE_SAMPLES.contains(&filename) {
                return Err(ProcessingError::FileNotFound(format!(
                    "Sample '{}' is not available. Available samples: {:?}",
                    filename, AVAILABLE_SAMPLES
                )));
            }
            Ok(())
        }

        fn read(filename: &str) -> Result<String, ProcessingError> {
            let path = Self::sample_path(filename);
            fs::read_to_string(&path)
                .map_err(|e| ProcessingError::IoError(format!("Failed to read {}: {}", path, e)))
        }

        /// Get sample content in the specified format
        pub fn get_sample(filename: &str, format: SampleFormat) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;

            match format {
                SampleFormat::String => Self::read(filename),
                SampleFormat::Tokens => {
                    Self::get_sample(filename, SampleFormat::Processed("token-json".to_string()))
                }
                SampleFormat::Processed(format_str) => {
                    let spec = ProcessingSpec::from_string(&format_str)?;
                    let content = Self::read(filename)?;
                    process_str(&content, &spec, &ParserConfig::default())
                }
            }
        }

        /// Get sample content as raw string
        pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
            Self::get_sample(filename, SampleFormat::String)
        }

        /// Get sample content as tokens (JSON format)
        pub fn get_tokens(filename: &str) -> Result<String, ProcessingError> {
            Self::get_sample(filename, SampleFormat::Tokens)
        }

        /// Get sample content processed with the specified format
        pub fn get_processed(filename: &str, format: &str) -> Result<String, ProcessingError> {
            Self::get_sample(filename, SampleFormat::Processed(format.to_string()))
        }

        /// Parse a sample into its pattern tree
        pub fn get_pattern(filename: &str) -> Result<Option<Pattern>, ProcessingError> {
            let content = Self::get_string(filename)?;
            Ok(parse_with_config(&content, &ParserConfig::default())?)
        }

        /// List all available sample files
        pub fn list_samples() -> Vec<&'static str> {
            AVAILABLE_SAMPLES.to_vec()
        }

        /// Get sample metadata
        pub fn get_sample_info(filename: &str) -> Result<SampleInfo, ProcessingError> {
            let content = Self::get_string(filename)?;

            Ok(SampleInfo {
                filename: filename.to_string(),
                line_count: content.lines().count(),
                char_count: content.len(),
                description: Self::extract_description(&content),
            })
        }

        /// The text of the leading `#` comment line, if any
        fn extract_description(content: &str) -> Option<String> {
            let first_line = content.lines().next()?;
            first_line
                .strip_prefix('#')
                .map(|text| text.trim().to_string())
        }
    }

    /// Information about a sample file
    #[derive(Debug, Clone, PartialEq)]
    pub struct SampleInfo {
        pub filename: String,
        pub line_count: usize,
        pub char_count: usize,
        pub description: Option<String>,
    }

}
