//! Error types for the analyzer and its configuration layer.
//!
//! Structural parse failures are *not* errors: they are captured in
//! [`ParseOutcome::Failed`](crate::parser::ParseOutcome) and flow through the
//! analysis as data. The variants here cover the few things that can go wrong
//! around the analyzer (loading the grammar, reading config files).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up an analyzer or loading configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load python grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
