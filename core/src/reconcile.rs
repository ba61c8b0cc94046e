//! Per-field value reconciliation between spec versions.
//!
//! The reconciler decides, for one field of one matched node pair, whether
//! the merged value comes from the new tree or the old one:
//!
//! 1. field in the effective ignore set → new value, even when absent;
//! 2. new value present → new value;
//! 3. otherwise → old value.
//!
//! Lists are reconciled atomically as whole values, never element-wise.

use crate::policy::OverridePolicy;
use crate::types::{SpecField, SpecKind};

/// Field values the reconciler can fall back over.
pub trait FieldValue: Clone {
    /// Whether the value counts as present for fallback purposes.
    ///
    /// `None` and empty strings or lists count as absent; an explicit
    /// `false` counts as present.
    fn is_present(&self) -> bool;
}

impl FieldValue for Option<String> {
    fn is_present(&self) -> bool {
        self.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl FieldValue for Option<bool> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl FieldValue for Option<i64> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T: Clone> FieldValue for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Reconciles one field of a matched node pair.
///
/// Pure over its inputs; callers clone nothing beforehand.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{reconcile, OverridePolicy, SpecField, SpecKind};
///
/// let old = Some("Builds the project".to_string());
/// let new = None;
///
/// // Absent new value falls back to the old one.
/// let policy = OverridePolicy::new();
/// let merged = reconcile(SpecField::Description, SpecKind::Command, &old, &new, &policy);
/// assert_eq!(merged, old);
///
/// // An ignored field follows new unconditionally, clearing the value.
/// let policy = OverridePolicy::new().ignore(SpecField::Description);
/// let merged = reconcile(SpecField::Description, SpecKind::Command, &old, &new, &policy);
/// assert_eq!(merged, None);
/// ```
pub fn reconcile<T: FieldValue>(
    field: SpecField,
    kind: SpecKind,
    old: &T,
    new: &T,
    policy: &OverridePolicy,
) -> T {
    if policy.is_ignored(field, kind) {
        return new.clone();
    }
    if new.is_present() {
        new.clone()
    } else {
        old.clone()
    }
}
