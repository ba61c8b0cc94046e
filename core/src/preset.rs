//! Named override-policy presets for common CLI framework integrations.
//!
//! Each preset describes which spec fields a framework's generator emits
//! reliably. Those fields always follow the freshly generated tree, so
//! stale hand edits cannot shadow regenerated values, while everything
//! the generator stays silent about is still preserved from the old tree.

use std::fmt;
use std::str::FromStr;

use crate::error::{MergeError, Result};
use crate::policy::OverridePolicy;
use crate::types::{SpecField, SpecKind};

/// A known framework integration with a fixed override policy.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{Preset, SpecField, SpecKind};
///
/// let preset: Preset = "commander".parse().unwrap();
/// let policy = preset.policy();
/// assert!(policy.is_ignored(SpecField::Description, SpecKind::Command));
/// assert!(policy.is_ignored(SpecField::ExclusiveOn, SpecKind::Option));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Node.js `commander` programs.
    Commander,
    /// Node.js `oclif` programs.
    Oclif,
    /// Go `cobra` programs.
    Cobra,
    /// Rust `clap` programs.
    Clap,
    /// Swift `swift-argument-parser` programs.
    SwiftArgumentParser,
}

impl Preset {
    /// Every known preset.
    pub const ALL: [Preset; 5] = [
        Preset::Commander,
        Preset::Oclif,
        Preset::Cobra,
        Preset::Clap,
        Preset::SwiftArgumentParser,
    ];

    /// The preset's wire name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Commander => "commander",
            Preset::Oclif => "oclif",
            Preset::Cobra => "cobra",
            Preset::Clap => "clap",
            Preset::SwiftArgumentParser => "swift-argument-parser",
        }
    }

    /// The override policy this framework's generator warrants.
    pub fn policy(&self) -> OverridePolicy {
        match self {
            // commander emits descriptions, help priorities, conflict
            // relations, and full argument metadata.
            Preset::Commander => OverridePolicy::new()
                .ignore(SpecField::Description)
                .ignore(SpecField::Priority)
                .ignore_for(SpecKind::Option, SpecField::ExclusiveOn)
                .ignore_for(SpecKind::Arg, SpecField::Template)
                .ignore_for(SpecKind::Arg, SpecField::Suggestions)
                .ignore_for(SpecKind::Arg, SpecField::IsOptional)
                .ignore_for(SpecKind::Arg, SpecField::IsVariadic),
            // oclif carries hidden commands and option relationships.
            Preset::Oclif => OverridePolicy::new()
                .ignore(SpecField::Description)
                .ignore_for(SpecKind::Command, SpecField::Hidden)
                .ignore_for(SpecKind::Option, SpecField::ExclusiveOn)
                .ignore_for(SpecKind::Option, SpecField::DependsOn)
                .ignore_for(SpecKind::Arg, SpecField::IsOptional),
            Preset::Cobra => OverridePolicy::new()
                .ignore(SpecField::Description)
                .ignore_for(SpecKind::Command, SpecField::Hidden),
            // clap value hints map to templates and possible values to
            // suggestions.
            Preset::Clap => OverridePolicy::new()
                .ignore(SpecField::Description)
                .ignore_for(SpecKind::Arg, SpecField::Template)
                .ignore_for(SpecKind::Arg, SpecField::Suggestions)
                .ignore_for(SpecKind::Arg, SpecField::IsOptional)
                .ignore_for(SpecKind::Arg, SpecField::IsVariadic),
            Preset::SwiftArgumentParser => OverridePolicy::new()
                .ignore(SpecField::Description)
                .ignore_for(SpecKind::Arg, SpecField::IsOptional)
                .ignore_for(SpecKind::Arg, SpecField::IsVariadic),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .iter()
            .find(|preset| preset.name() == s)
            .copied()
            .ok_or_else(|| MergeError::UnknownPreset(s.to_string()))
    }
}

/// Resolves the effective policy from an optional preset and manual sets.
///
/// A preset and manual ignore lists are mutually exclusive; supplying both
/// is a configuration error. With neither, the returned policy is empty
/// and the merge is a pure present-value fallback.
///
/// # Errors
///
/// Returns [`MergeError::Configuration`] when `preset` is set and `manual`
/// names at least one field.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{resolve_policy, OverridePolicy, Preset, SpecField};
///
/// let policy = resolve_policy(Some(Preset::Cobra), OverridePolicy::new()).unwrap();
/// assert!(!policy.is_empty());
///
/// let manual = OverridePolicy::new().ignore(SpecField::Icon);
/// assert!(resolve_policy(Some(Preset::Cobra), manual).is_err());
/// ```
pub fn resolve_policy(preset: Option<Preset>, manual: OverridePolicy) -> Result<OverridePolicy> {
    match preset {
        Some(preset) if !manual.is_empty() => Err(MergeError::Configuration(format!(
            "preset '{preset}' cannot be combined with manual ignore lists"
        ))),
        Some(preset) => Ok(preset.policy()),
        None => Ok(manual),
    }
}
