//! Error handling for ndc.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// All failures a generation run can produce.
///
/// Validation errors happen before anything touches the filesystem. Every
/// other variant carries the asset path or destination path it came from.
#[derive(Error, Debug)]
pub enum Error {
    /// Raw IO failure without a more specific location.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// An option value is missing or out of range.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The requested template root is not part of the catalog.
    #[error("Unsupported template '{name}'. Run 'ndc list' to see available templates")]
    UnknownTemplate { name: String },

    /// An options file could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Listing or reading a template asset failed.
    #[error("Asset error at '{path}': {reason}")]
    AssetError { path: String, reason: String },

    /// A template body uses malformed or unsupported action syntax.
    #[error("Template syntax error in '{path}' at line {line}: {message}")]
    SyntaxError {
        path: String,
        line: usize,
        message: String,
    },

    /// MiniJinja failed to compile or execute a lowered template.
    #[error("Template error in '{path}': {source}")]
    TemplateError {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// A file or directory name could not be rendered to a usable name.
    #[error("Cannot render name '{name}': {reason}")]
    NameError { name: String, reason: String },

    /// Creating or writing a destination entry failed.
    #[error("Failed to {action} '{}': {source}", path.display())]
    FilesystemError {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience type alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Prints the error to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("Error: {err}");
    std::process::exit(1);
}
