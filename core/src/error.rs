//! Error types for the index and its configuration.

use thiserror::Error;

/// Errors raised while building the document base.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// No documents were provided for indexing.
    #[error("no documents to index")]
    EmptyDocumentBase,
}

/// Errors raised while validating `config.json`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The file parsed but has no `config` section.
    #[error("config file is empty")]
    MissingConfig,

    /// The `config.version` field does not match this build.
    #[error("config.json has incorrect file version: expected {expected}, found {found}")]
    WrongVersion { expected: String, found: String },
}
