//! Override policy controlling which fields always follow the incoming spec.
//!
//! An [`OverridePolicy`] names the fields a merge must take from the NEW
//! tree unconditionally, bypassing the present-value fallback. Fields can
//! be ignored globally or per node kind; the effective ignore set for a
//! node is the union of both.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::types::{SpecField, SpecKind};

/// Field ignore sets for a merge run.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{OverridePolicy, SpecField, SpecKind};
///
/// let policy = OverridePolicy::new()
///     .ignore(SpecField::Description)
///     .ignore_for(SpecKind::Option, SpecField::ExclusiveOn);
///
/// assert!(policy.is_ignored(SpecField::Description, SpecKind::Arg));
/// assert!(policy.is_ignored(SpecField::ExclusiveOn, SpecKind::Option));
/// assert!(!policy.is_ignored(SpecField::Icon, SpecKind::Command));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverridePolicy {
    /// Fields ignored on every node kind.
    pub ignore_props: BTreeSet<SpecField>,
    /// Fields ignored on command nodes.
    pub ignore_command_props: BTreeSet<SpecField>,
    /// Fields ignored on option nodes.
    pub ignore_option_props: BTreeSet<SpecField>,
    /// Fields ignored on argument nodes.
    pub ignore_arg_props: BTreeSet<SpecField>,
}

impl OverridePolicy {
    /// Creates an empty policy (pure fallback merge).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the global ignore set.
    pub fn ignore(mut self, field: SpecField) -> Self {
        self.ignore_props.insert(field);
        self
    }

    /// Adds a field to one kind's ignore set.
    pub fn ignore_for(mut self, kind: SpecKind, field: SpecField) -> Self {
        self.kind_set_mut(kind).insert(field);
        self
    }

    /// Whether no field is ignored at all.
    pub fn is_empty(&self) -> bool {
        self.ignore_props.is_empty()
            && self.ignore_command_props.is_empty()
            && self.ignore_option_props.is_empty()
            && self.ignore_arg_props.is_empty()
    }

    /// Whether a field on a node of the given kind must follow NEW.
    pub fn is_ignored(&self, field: SpecField, kind: SpecKind) -> bool {
        self.ignore_props.contains(&field) || self.kind_set(kind).contains(&field)
    }

    /// The ignore set specific to one node kind.
    pub fn kind_set(&self, kind: SpecKind) -> &BTreeSet<SpecField> {
        match kind {
            SpecKind::Command => &self.ignore_command_props,
            SpecKind::Option => &self.ignore_option_props,
            SpecKind::Arg => &self.ignore_arg_props,
        }
    }

    fn kind_set_mut(&mut self, kind: SpecKind) -> &mut BTreeSet<SpecField> {
        match kind {
            SpecKind::Command => &mut self.ignore_command_props,
            SpecKind::Option => &mut self.ignore_option_props,
            SpecKind::Arg => &mut self.ignore_arg_props,
        }
    }
}

/// Parses a comma-separated field list (e.g., `"description,icon"`).
///
/// Whitespace around entries is trimmed; empty entries are skipped, so a
/// trailing comma is harmless.
///
/// # Errors
///
/// Returns [`MergeError::UnknownField`](crate::MergeError::UnknownField)
/// for names outside the data model, and a configuration error for `name`.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{parse_field_list, SpecField};
///
/// let fields = parse_field_list("description, exclusiveOn").unwrap();
/// assert!(fields.contains(&SpecField::Description));
/// assert!(fields.contains(&SpecField::ExclusiveOn));
/// assert!(parse_field_list("loadSpec").is_err());
/// ```
pub fn parse_field_list(raw: &str) -> Result<BTreeSet<SpecField>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse)
        .collect()
}
