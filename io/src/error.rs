//! Error types for spec file I/O.

use thiserror::Error;

use spec_merge_core::MergeError;

/// Errors that can occur while loading, checking, or writing spec files.
#[derive(Debug, Error)]
pub enum SpecIoError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File extension outside the loadable set.
    #[error("unsupported spec format for '{path}': {detail}")]
    UnsupportedFormat {
        /// The offending path.
        path: String,
        /// What to do about it.
        detail: String,
    },

    /// Shape or configuration error bubbled up from the merge engine.
    #[error(transparent)]
    MergeError(#[from] MergeError),

    /// A loaded tree failed structural validation.
    #[error("invalid spec '{path}': {detail}")]
    InvalidSpec {
        /// The offending file.
        path: String,
        /// First validation violation found.
        detail: String,
    },
}

/// Convenience alias for results with [`SpecIoError`].
pub type Result<T> = std::result::Result<T, SpecIoError>;
