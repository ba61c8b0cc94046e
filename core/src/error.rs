//! Error types for spec merging.

use thiserror::Error;

use crate::types::SpecKind;

/// Which input tree an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeSide {
    /// The previous, hand-enriched spec.
    Old,
    /// The freshly generated spec.
    New,
}

impl std::fmt::Display for MergeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeSide::Old => write!(f, "old"),
            MergeSide::New => write!(f, "new"),
        }
    }
}

/// Errors produced while configuring or running a merge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Mutually exclusive merge settings were combined.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A raw spec node carries fields belonging to a different node kind.
    #[error("shape mismatch at '{path}': expected {expected} node, found {found} field '{field}'")]
    ShapeMismatch {
        /// Space-joined primary-name trail to the offending node.
        path: String,
        /// Kind implied by the node's position in the tree.
        expected: SpecKind,
        /// Kind implied by the stray field.
        found: SpecKind,
        /// The stray field's wire name.
        field: String,
    },

    /// A preset name that none of the known framework presets match.
    #[error("unknown preset '{0}' (expected one of: commander, oclif, cobra, clap, swift-argument-parser)")]
    UnknownPreset(String),

    /// A field name that is not part of the spec data model.
    #[error("unknown spec field '{0}'")]
    UnknownField(String),

    /// An input tree failed structural validation before merging.
    #[error("invalid {side} spec: {detail}")]
    Invalid {
        /// Which input tree was rejected.
        side: MergeSide,
        /// First validation violation found.
        detail: String,
    },
}

/// Convenience alias for merge results.
pub type Result<T> = std::result::Result<T, MergeError>;
