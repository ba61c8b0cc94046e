//! Preset override policies.
//!
//! Runs the same merge twice, once with the default policy and once with
//! the commander preset, to show how generator-owned fields change hands.
//! Then prints every preset's ignore sets.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p spec-merge-demos --example preset_policies
//! ```

use spec_merge_core::{CommandSpec, OverridePolicy, Preset, merge_specs, resolve_policy};

fn main() {
    let old = CommandSpec::new("serve")
        .with_description("Hand-tuned description")
        .with_icon("server.png");
    let new = CommandSpec::new("serve");

    // Default policy: fields absent from the new spec fall back to the old.
    let outcome = merge_specs(&old, &new, &OverridePolicy::new()).unwrap();
    println!("Without a preset:");
    println!("  description: {:?}", outcome.spec.description);
    println!("  icon: {:?}", outcome.spec.icon);
    println!();

    // Commander owns descriptions: absent in the new spec means cleared.
    let policy = resolve_policy(Some(Preset::Commander), OverridePolicy::new()).unwrap();
    let outcome = merge_specs(&old, &new, &policy).unwrap();
    println!("With the commander preset:");
    println!("  description: {:?}", outcome.spec.description);
    println!("  icon: {:?}", outcome.spec.icon);
    println!();

    println!("Preset ignore sets:");
    for preset in Preset::ALL {
        let policy = preset.policy();
        println!("{preset}:");
        println!("  all nodes: {:?}", policy.ignore_props);
        println!("  commands:  {:?}", policy.ignore_command_props);
        println!("  options:   {:?}", policy.ignore_option_props);
        println!("  args:      {:?}", policy.ignore_arg_props);
    }
}
