//! Structural validation of spec trees.
//!
//! Catches the invariant violations the merge engine is not prepared to
//! see: unnamed nodes, duplicate aliases within one node, and same-kind
//! siblings whose name sets are identical (which would make name-set
//! matching meaningless for them).
//!
//! # Examples
//!
//! ```
//! use spec_merge_core::{validate_spec, CommandSpec};
//!
//! let spec = CommandSpec::new("git")
//!     .with_subcommand(CommandSpec::new("commit"));
//! assert!(validate_spec(&spec).is_empty());
//!
//! // Two siblings with the identical name set cannot be told apart.
//! let bad = CommandSpec::new("git")
//!     .with_subcommand(CommandSpec::new("commit"))
//!     .with_subcommand(CommandSpec::new("commit"));
//! assert!(!validate_spec(&bad).is_empty());
//! ```

use std::collections::BTreeSet;

use thiserror::Error;

use crate::matcher::NamedNode;
use crate::types::{CommandSpec, SpecKind};

/// Spec tree validation errors.
///
/// Each variant describes one structural problem. The `Display` impl
/// provides a human-readable message with the node's path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A node has an empty name list.
    #[error("unnamed {kind} node under '{path}'")]
    EmptyNames {
        /// Primary-name trail to the parent node.
        path: String,
        /// Kind of the unnamed node.
        kind: SpecKind,
    },
    /// A name list contains an empty or whitespace-only alias.
    #[error("empty alias on {kind} '{path}'")]
    EmptyAlias {
        /// Primary-name trail including the node itself.
        path: String,
        /// Kind of the node.
        kind: SpecKind,
    },
    /// The same alias appears twice in one node's name list.
    #[error("duplicate alias '{alias}' on {kind} '{path}'")]
    DuplicateAlias {
        /// Primary-name trail including the node itself.
        path: String,
        /// Kind of the node.
        kind: SpecKind,
        /// The repeated alias.
        alias: String,
    },
    /// Two same-kind siblings carry the identical name set.
    #[error("sibling {kind} nodes under '{path}' share the name set [{names}]")]
    DuplicateNameSet {
        /// Primary-name trail to the parent node.
        path: String,
        /// Kind of the colliding siblings.
        kind: SpecKind,
        /// The shared name set, comma-joined.
        names: String,
    },
}

/// Validates a whole spec tree, returning every violation found.
///
/// An empty result means the tree upholds the merge engine's structural
/// invariants.
pub fn validate_spec(spec: &CommandSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_command(spec, &mut Vec::new(), &mut errors);
    errors
}

fn trail_to_string(trail: &[&str]) -> String {
    if trail.is_empty() {
        "(root)".to_string()
    } else {
        trail.join(" ")
    }
}

fn validate_names<N: NamedNode>(
    node: &N,
    parent_trail: &[&str],
    errors: &mut Vec<ValidationError>,
) {
    let kind = node.kind();
    if node.names().is_empty() {
        errors.push(ValidationError::EmptyNames {
            path: trail_to_string(parent_trail),
            kind,
        });
        return;
    }

    let mut own_trail: Vec<&str> = parent_trail.to_vec();
    own_trail.push(node.names()[0].as_str());
    let path = trail_to_string(&own_trail);

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for alias in node.names() {
        if alias.trim().is_empty() {
            errors.push(ValidationError::EmptyAlias {
                path: path.clone(),
                kind,
            });
        } else if !seen.insert(alias.as_str()) {
            errors.push(ValidationError::DuplicateAlias {
                path: path.clone(),
                kind,
                alias: alias.clone(),
            });
        }
    }
}

fn validate_siblings<N: NamedNode>(
    siblings: &[N],
    kind: SpecKind,
    parent_trail: &[&str],
    errors: &mut Vec<ValidationError>,
) {
    for (idx, node) in siblings.iter().enumerate() {
        let names: BTreeSet<&str> = node.names().iter().map(String::as_str).collect();
        if names.is_empty() {
            continue;
        }
        for other in &siblings[idx + 1..] {
            let other_names: BTreeSet<&str> = other.names().iter().map(String::as_str).collect();
            if names == other_names {
                errors.push(ValidationError::DuplicateNameSet {
                    path: trail_to_string(parent_trail),
                    kind,
                    names: node.names().join(", "),
                });
            }
        }
    }
}

fn validate_command<'a>(
    cmd: &'a CommandSpec,
    trail: &mut Vec<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    validate_names(cmd, trail, errors);

    trail.push(cmd.primary_name());

    validate_siblings(&cmd.subcommands, SpecKind::Command, trail, errors);
    validate_siblings(&cmd.options, SpecKind::Option, trail, errors);
    validate_siblings(&cmd.args, SpecKind::Arg, trail, errors);

    for arg in &cmd.args {
        validate_names(arg, trail, errors);
    }

    for option in &cmd.options {
        validate_names(option, trail, errors);
        if !option.names.is_empty() {
            trail.push(option.primary_name());
            validate_siblings(&option.args, SpecKind::Arg, trail, errors);
            for arg in &option.args {
                validate_names(arg, trail, errors);
            }
            trail.pop();
        }
    }

    for sub in &cmd.subcommands {
        validate_command(sub, trail, errors);
    }

    trail.pop();
}
