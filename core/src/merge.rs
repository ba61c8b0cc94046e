//! Deep spec merging.
//!
//! Combines an old, hand-enriched spec tree with a freshly generated one.
//! The new tree dictates structure and names; the old tree fills in every
//! field the new one left absent, unless an override policy says the
//! field must follow the new tree regardless.
//!
//! # Examples
//!
//! ```
//! use spec_merge_core::{merge_specs, CommandSpec, OverridePolicy};
//!
//! let old = CommandSpec::new("tool").with_subcommand(
//!     CommandSpec::new("build")
//!         .with_description("Builds the project")
//!         .with_icon("fig://icon?type=box"),
//! );
//! let new = CommandSpec::new("tool").with_subcommand(CommandSpec::new("build"));
//!
//! let outcome = merge_specs(&old, &new, &OverridePolicy::new()).unwrap();
//! let build = outcome.spec.find_subcommand("build").unwrap();
//! assert_eq!(build.description.as_deref(), Some("Builds the project"));
//! assert_eq!(build.icon.as_deref(), Some("fig://icon?type=box"));
//! ```

use tracing::debug;

use crate::error::{MergeError, MergeSide, Result};
use crate::matcher::{NamedNode, SiblingMatcher};
use crate::policy::OverridePolicy;
use crate::reconcile::reconcile;
use crate::report::MergeDiagnostic;
use crate::types::{ArgSpec, CommandSpec, OptionSpec, SpecField, SpecKind};
use crate::validate::validate_spec;

/// A merged tree together with the diagnostics recorded while building it.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The merged spec tree.
    pub spec: CommandSpec,
    /// Observations recorded during the merge.
    pub diagnostics: Vec<MergeDiagnostic>,
}

struct MergeContext<'p> {
    policy: &'p OverridePolicy,
    trail: Vec<String>,
    diagnostics: Vec<MergeDiagnostic>,
}

impl MergeContext<'_> {
    fn path(&self) -> String {
        self.trail.join(" ")
    }
}

/// Merges two spec trees under the given override policy.
///
/// Both inputs are validated first; the merge itself cannot fail. Inputs
/// are never mutated, and the returned tree shares no ownership with
/// either of them.
///
/// # Errors
///
/// Returns [`MergeError::Invalid`] when either tree violates a structural
/// invariant (unnamed nodes, duplicate aliases, identical sibling name
/// sets).
pub fn merge_specs(
    old: &CommandSpec,
    new: &CommandSpec,
    policy: &OverridePolicy,
) -> Result<MergeOutcome> {
    for (side, spec) in [(MergeSide::Old, old), (MergeSide::New, new)] {
        if let Some(error) = validate_spec(spec).into_iter().next() {
            return Err(MergeError::Invalid {
                side,
                detail: error.to_string(),
            });
        }
    }

    let mut ctx = MergeContext {
        policy,
        trail: Vec::new(),
        diagnostics: Vec::new(),
    };
    let spec = merge_command(Some(old), new, &mut ctx);

    debug!(
        command = %spec.primary_name(),
        diagnostics = ctx.diagnostics.len(),
        "merged spec trees"
    );
    Ok(MergeOutcome {
        spec,
        diagnostics: ctx.diagnostics,
    })
}

fn merge_command(
    old: Option<&CommandSpec>,
    new: &CommandSpec,
    ctx: &mut MergeContext<'_>,
) -> CommandSpec {
    let Some(old) = old else {
        return new.clone();
    };

    use SpecField::*;
    let kind = SpecKind::Command;
    let policy = ctx.policy;
    ctx.trail.push(new.primary_name().to_string());

    let merged = CommandSpec {
        names: new.names.clone(),
        description: reconcile(Description, kind, &old.description, &new.description, policy),
        hidden: reconcile(Hidden, kind, &old.hidden, &new.hidden, policy),
        priority: reconcile(Priority, kind, &old.priority, &new.priority, policy),
        icon: reconcile(Icon, kind, &old.icon, &new.icon, policy),
        args: merge_collection(Args, kind, &old.args, &new.args, ctx, merge_arg),
        options: merge_collection(Options, kind, &old.options, &new.options, ctx, merge_option),
        subcommands: merge_collection(
            Subcommands,
            kind,
            &old.subcommands,
            &new.subcommands,
            ctx,
            merge_command,
        ),
    };

    ctx.trail.pop();
    merged
}

fn merge_option(
    old: Option<&OptionSpec>,
    new: &OptionSpec,
    ctx: &mut MergeContext<'_>,
) -> OptionSpec {
    let Some(old) = old else {
        return new.clone();
    };

    use SpecField::*;
    let kind = SpecKind::Option;
    let policy = ctx.policy;
    ctx.trail.push(new.primary_name().to_string());

    let merged = OptionSpec {
        names: new.names.clone(),
        description: reconcile(Description, kind, &old.description, &new.description, policy),
        priority: reconcile(Priority, kind, &old.priority, &new.priority, policy),
        icon: reconcile(Icon, kind, &old.icon, &new.icon, policy),
        args: merge_collection(Args, kind, &old.args, &new.args, ctx, merge_arg),
        exclusive_on: reconcile(ExclusiveOn, kind, &old.exclusive_on, &new.exclusive_on, policy),
        depends_on: reconcile(DependsOn, kind, &old.depends_on, &new.depends_on, policy),
    };

    ctx.trail.pop();
    merged
}

fn merge_arg(old: Option<&ArgSpec>, new: &ArgSpec, ctx: &mut MergeContext<'_>) -> ArgSpec {
    let Some(old) = old else {
        return new.clone();
    };

    use SpecField::*;
    let kind = SpecKind::Arg;
    let policy = ctx.policy;
    ArgSpec {
        names: new.names.clone(),
        description: reconcile(Description, kind, &old.description, &new.description, policy),
        priority: reconcile(Priority, kind, &old.priority, &new.priority, policy),
        icon: reconcile(Icon, kind, &old.icon, &new.icon, policy),
        template: reconcile(Template, kind, &old.template, &new.template, policy),
        generators: reconcile(Generators, kind, &old.generators, &new.generators, policy),
        suggestions: reconcile(Suggestions, kind, &old.suggestions, &new.suggestions, policy),
        is_optional: reconcile(IsOptional, kind, &old.is_optional, &new.is_optional, policy),
        is_variadic: reconcile(IsVariadic, kind, &old.is_variadic, &new.is_variadic, policy),
    }
}

fn merge_collection<N, F>(
    field: SpecField,
    parent_kind: SpecKind,
    old: &[N],
    new: &[N],
    ctx: &mut MergeContext<'_>,
    merge_node: F,
) -> Vec<N>
where
    N: NamedNode + Clone,
    F: Fn(Option<&N>, &N, &mut MergeContext<'_>) -> N,
{
    // A structural field in the ignore set takes the new subtree wholesale.
    if ctx.policy.is_ignored(field, parent_kind) {
        return new.to_vec();
    }

    let mut matcher = SiblingMatcher::new(old);
    let mut merged = Vec::with_capacity(new.len());

    for incoming in new {
        let claim = matcher.claim(incoming);
        if !claim.contenders.is_empty() {
            ctx.diagnostics.push(MergeDiagnostic::AmbiguousMatch {
                path: ctx.path(),
                kind: incoming.kind(),
                new_names: incoming.names().to_vec(),
                candidates: claim.contenders.iter().map(|c| c.names().to_vec()).collect(),
                chosen: claim.node.map(|n| n.names().to_vec()).unwrap_or_default(),
            });
        }
        merged.push(merge_node(claim.node, incoming, ctx));
    }

    for dropped in matcher.unclaimed() {
        debug!(
            path = %ctx.path(),
            names = ?dropped.names(),
            "dropping node absent from new spec"
        );
        ctx.diagnostics.push(MergeDiagnostic::RemovedNode {
            path: ctx.path(),
            kind: dropped.kind(),
            names: dropped.names().to_vec(),
        });
    }

    merged
}
