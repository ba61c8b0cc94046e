//! Merge diagnostics surfaced alongside the merged tree.
//!
//! Diagnostics never fail a merge. They record the decisions a reviewer
//! may want to audit afterwards: ambiguous name-set claims and old nodes
//! that vanished because the incoming tree no longer lists them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::SpecKind;

/// Non-fatal observation recorded during a merge.
///
/// Serializes with a `code` tag, matching the shape of the run reports
/// written by the command-line tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum MergeDiagnostic {
    /// Several old siblings overlapped one incoming node's name set.
    AmbiguousMatch {
        /// Primary-name trail to the parent node.
        path: String,
        /// Kind of the contested children.
        kind: SpecKind,
        /// Name set of the incoming node.
        new_names: Vec<String>,
        /// Name sets of every overlapping old candidate.
        candidates: Vec<Vec<String>>,
        /// Name set of the candidate that won the claim.
        chosen: Vec<String>,
    },
    /// An old node without a counterpart in the incoming tree was dropped.
    RemovedNode {
        /// Primary-name trail to the parent node.
        path: String,
        /// Kind of the dropped node.
        kind: SpecKind,
        /// Name set of the dropped node.
        names: Vec<String>,
    },
}

impl MergeDiagnostic {
    /// The primary-name trail to the parent node.
    pub fn path(&self) -> &str {
        match self {
            MergeDiagnostic::AmbiguousMatch { path, .. } => path,
            MergeDiagnostic::RemovedNode { path, .. } => path,
        }
    }

    /// The kind of node the diagnostic refers to.
    pub fn kind(&self) -> SpecKind {
        match self {
            MergeDiagnostic::AmbiguousMatch { kind, .. } => *kind,
            MergeDiagnostic::RemovedNode { kind, .. } => *kind,
        }
    }
}

impl fmt::Display for MergeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeDiagnostic::AmbiguousMatch {
                path,
                kind,
                new_names,
                candidates,
                chosen,
            } => write!(
                f,
                "ambiguous match at '{path}': {} old {kind} candidates overlap [{}]; kept [{}]",
                candidates.len(),
                new_names.join(", "),
                chosen.join(", "),
            ),
            MergeDiagnostic::RemovedNode { path, kind, names } => write!(
                f,
                "removed {kind} [{}] at '{path}': absent from the new spec",
                names.join(", "),
            ),
        }
    }
}
