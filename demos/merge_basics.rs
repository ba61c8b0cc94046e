//! Basic merge walkthrough.
//!
//! Builds an old spec carrying hand-written enrichment and a regenerated
//! new spec, merges them, and prints what survived, what was replaced,
//! and what the engine reported.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p spec-merge-demos --example merge_basics
//! ```

use spec_merge_core::{ArgSpec, CommandSpec, OptionSpec, OverridePolicy, merge_specs};

fn main() {
    let old = old_spec();
    let new = new_spec();

    let outcome = merge_specs(&old, &new, &OverridePolicy::new()).unwrap();

    println!("Merged spec for '{}':", outcome.spec.primary_name());
    println!("  {}", outcome.spec.stats());
    println!();

    // The new spec renamed build to ["build", "b"] and rewrote its
    // description; the old icon and option description carry over.
    let build = outcome.spec.find_subcommand("b").unwrap();
    println!("build subcommand:");
    println!("  names: {:?}", build.names);
    println!("  description: {:?}", build.description);
    println!("  icon: {:?}", build.icon);
    println!(
        "  --verbose description: {:?}",
        build.find_option("--verbose").unwrap().description
    );
    println!("  args: {:?}", build.args.iter().map(ArgSpec::primary_name).collect::<Vec<_>>());
    println!();

    // retire exists only in the old spec, status only in the new one.
    println!("status present: {}", outcome.spec.find_subcommand("status").is_some());
    println!("retire present: {}", outcome.spec.find_subcommand("retire").is_some());
    println!();

    println!("Diagnostics:");
    for diagnostic in &outcome.diagnostics {
        println!("  {diagnostic}");
    }
}

fn old_spec() -> CommandSpec {
    CommandSpec::new("deploy")
        .with_description("Deploy and manage releases")
        .with_subcommand(
            CommandSpec::new("build")
                .with_description("Build the project")
                .with_icon("hammer.png")
                .with_option(
                    OptionSpec::new(&["-v", "--verbose"]).with_description("Noisy output"),
                ),
        )
        .with_subcommand(CommandSpec::new("retire").with_description("Removed upstream"))
}

fn new_spec() -> CommandSpec {
    CommandSpec::new("deploy")
        .with_subcommand(
            CommandSpec::new("build")
                .with_alias("b")
                .with_description("Compile the current project")
                .with_option(OptionSpec::new(&["-v", "--verbose"]))
                .with_arg(ArgSpec::new("target").optional()),
        )
        .with_subcommand(CommandSpec::new("status"))
}
