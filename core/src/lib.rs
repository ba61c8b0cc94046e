//! Core data model and merge engine for CLI autocomplete specs.
//!
//! This crate implements the structural merge that keeps hand-written spec
//! enrichments alive across regenerated spec versions:
//!
//! - [`CommandSpec`], [`OptionSpec`], [`ArgSpec`] — the spec tree, with the
//!   camelCase single-or-array wire format of spec generators.
//! - [`OverridePolicy`] and [`Preset`] — which fields must always follow
//!   the freshly generated tree, globally or per node kind.
//! - [`merge_specs`] — the driver: new structure and names win, absent
//!   fields fall back to the old tree, ignored fields never fall back.
//! - [`validate_spec`] — structural invariants the engine relies on.
//! - [`MergeDiagnostic`] — non-fatal observations (ambiguous matches,
//!   dropped nodes) surfaced next to the merged tree.
//!
//! # Example
//!
//! ```
//! use spec_merge_core::*;
//!
//! // Yesterday's spec, enriched by hand.
//! let old = CommandSpec::new("deploy")
//!     .with_subcommand(
//!         CommandSpec::new("up")
//!             .with_description("Deploys the current stack")
//!             .with_icon("fig://icon?type=rocket"),
//!     )
//!     .with_option(OptionSpec::new(&["--stage"]).with_arg(ArgSpec::new("name")));
//!
//! // Today's regenerated spec: bare, but structurally current.
//! let new = CommandSpec::new("deploy")
//!     .with_subcommand(CommandSpec::new("up"))
//!     .with_subcommand(CommandSpec::new("down"))
//!     .with_option(OptionSpec::new(&["--stage"]).with_arg(ArgSpec::new("name")));
//!
//! let outcome = merge_specs(&old, &new, &OverridePolicy::new()).unwrap();
//! let up = outcome.spec.find_subcommand("up").unwrap();
//! assert_eq!(up.description.as_deref(), Some("Deploys the current stack"));
//! assert!(outcome.spec.find_subcommand("down").is_some());
//! ```

mod error;
mod matcher;
mod merge;
mod policy;
mod preset;
mod reconcile;
mod report;
mod types;
mod validate;

pub use error::{MergeError, MergeSide, Result};
pub use matcher::{Claim, NamedNode, SiblingMatcher, name_overlap};
pub use merge::{MergeOutcome, merge_specs};
pub use policy::{OverridePolicy, parse_field_list};
pub use preset::{Preset, resolve_policy};
pub use reconcile::{FieldValue, reconcile};
pub use report::MergeDiagnostic;
pub use types::*;
pub use validate::{ValidationError, validate_spec};
