//! Error types for droidgen
//!
//! Centralized error handling using thiserror. A generation pass has no
//! partial-success state: the first error aborts the whole run and the
//! output directory must be treated as inconsistent until the next
//! successful pass.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while exporting a project.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("build configurations other than Debug and Release are not supported (got \"{0}\")")]
    UnsupportedConfiguration(String),

    #[error("can't build for no architectures")]
    NoArchitectures,

    #[error("invalid activity class name: \"{0}\"")]
    InvalidActivityClass(String),

    #[error("could not create directory {0}")]
    CreateDirectory(PathBuf),

    #[error("failed to create symlink from {link} to {original}")]
    Symlink { original: PathBuf, link: PathBuf },

    #[error("markup generation failed: {0}")]
    Markup(String),

    #[error("project error: {0}")]
    Project(String),
}

/// Result type alias for exporter operations.
pub type Result<T> = std::result::Result<T, ExportError>;
