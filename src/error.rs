//! Diagnostic error types for the msgnet pipeline.
//!
//! Each stage defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so the operator knows which input file
//! or output path broke the run. Every error is fatal: the pipeline is a
//! one-shot batch job with no retry or partial-output semantics.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the msgnet pipeline.
///
/// Each variant wraps a stage-specific error, preserving the full diagnostic
/// chain (error codes, help text, source errors) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum MsgnetError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config file {}", path.display())]
    #[diagnostic(
        code(msgnet::config::read),
        help("Check that the path passed via --config exists and is readable.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} is not valid TOML", path.display())]
    #[diagnostic(
        code(msgnet::config::parse),
        help(
            "All keys are optional and fall back to the built-in defaults, \
             but present keys must have the right type: paths are strings, \
             `min_replies` is an integer."
        )
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ---------------------------------------------------------------------------
// Data source errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("cannot read input file {}", path.display())]
    #[diagnostic(
        code(msgnet::source::read),
        help(
            "The file is missing or unreadable. All three input CSVs must \
             exist before the run starts; there is no partial mode."
        )
    )]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input file {} is missing required column `{column}`", path.display())]
    #[diagnostic(
        code(msgnet::source::missing_column),
        help(
            "The loader matches columns by header name, not position. \
             Check that the export that produced this CSV kept the \
             expected column names."
        )
    )]
    MissingColumn { path: PathBuf, column: String },

    #[error("input file {} has a malformed record: {message}", path.display())]
    #[diagnostic(
        code(msgnet::source::schema),
        help(
            "Every ID column must hold a non-negative integer and \
             `reply_count` must be a non-negative integer. Fix the data \
             upstream; the pipeline does not skip bad rows."
        )
    )]
    Schema { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("cannot create output file {}", path.display())]
    #[diagnostic(
        code(msgnet::export::create),
        help("Check that the output directory exists and is writable.")
    )]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed while writing output file {}", path.display())]
    #[diagnostic(
        code(msgnet::export::write),
        help(
            "The write started but did not finish (disk full, permission \
             change, ...). Treat the file as invalid and re-run."
        )
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type MsgnetResult<T> = std::result::Result<T, MsgnetError>;
