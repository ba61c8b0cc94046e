use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spec_merge_core::{OverridePolicy, Preset, merge_specs, parse_field_list, resolve_policy};
use spec_merge_io::{
    MergeRunReport, SpecFormat, collect_spec_paths, load_spec, write_report, write_spec,
};

/// CLI-specific spec format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliSpecFormat {
    Json,
    Yaml,
    Ts,
}

impl From<CliSpecFormat> for SpecFormat {
    fn from(fmt: CliSpecFormat) -> Self {
        match fmt {
            CliSpecFormat::Json => Self::Json,
            CliSpecFormat::Yaml => Self::Yaml,
            CliSpecFormat::Ts => Self::TypeScript,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "spec-merge")]
#[command(about = "Structural merge for CLI autocomplete spec files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge hand-edited spec enrichment into a regenerated spec.
    Merge(MergeArgs),
    /// Merge every spec pair between two directories, matched by file stem.
    Batch(BatchArgs),
    /// Validate one or more spec files or directories.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct MergeArgs {
    /// Old spec file carrying hand-edited enrichment.
    old_spec: PathBuf,
    /// New spec file produced by a generator.
    new_spec: PathBuf,
    /// Write the merged spec here instead of overwriting the old file.
    #[arg(short = 'n', long)]
    new_file: Option<PathBuf>,
    /// Preset override policy for a known generator framework.
    #[arg(short, long)]
    preset: Option<String>,
    /// Comma-separated fields the new spec owns on every node kind.
    #[arg(short, long, conflicts_with = "preset")]
    ignore_props: Option<String>,
    /// Comma-separated fields the new spec owns on command nodes.
    #[arg(long, conflicts_with = "preset")]
    ignore_command_props: Option<String>,
    /// Comma-separated fields the new spec owns on option nodes.
    #[arg(long, conflicts_with = "preset")]
    ignore_option_props: Option<String>,
    /// Comma-separated fields the new spec owns on argument nodes.
    #[arg(long, conflicts_with = "preset")]
    ignore_arg_props: Option<String>,
    /// Output format (default: the output path's extension, then the old file's format).
    #[arg(long)]
    format: Option<CliSpecFormat>,
    /// Write a JSON merge report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Directory of old specs with hand-edited enrichment.
    #[arg(long)]
    old_dir: PathBuf,
    /// Directory of regenerated specs.
    #[arg(long)]
    new_dir: PathBuf,
    /// Directory the merged specs are written to.
    #[arg(long)]
    out_dir: PathBuf,
    /// Preset override policy applied to every pair.
    #[arg(short, long)]
    preset: Option<String>,
    /// Number of parallel merge jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Spec files and/or directories containing spec files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Merge(args) => run_merge(args),
        Command::Batch(args) => run_batch(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// merge command
// ---------------------------------------------------------------------------

fn run_merge(args: MergeArgs) -> Result<(), String> {
    let preset = parse_preset(args.preset.as_deref())?;
    let manual = build_manual_policy(&args)?;
    let policy = resolve_policy(preset, manual).map_err(|err| err.to_string())?;

    let old = load_spec(&args.old_spec).map_err(|err| err.to_string())?;
    let new = load_spec(&args.new_spec).map_err(|err| err.to_string())?;
    let outcome = merge_specs(&old, &new, &policy).map_err(|err| err.to_string())?;

    let output_path = args
        .new_file
        .clone()
        .unwrap_or_else(|| args.old_spec.clone());
    let format = output_format(args.format, &output_path, &args.old_spec)?;

    ensure_parent_dir(&output_path)?;
    write_spec(&output_path, &outcome.spec, format).map_err(|err| err.to_string())?;

    for diagnostic in &outcome.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    if let Some(report_path) = &args.report {
        let mut report = MergeRunReport::new(&args.old_spec, &args.new_spec, &output_path)
            .with_policy(&policy)
            .with_stats(old.stats(), new.stats(), outcome.spec.stats())
            .with_diagnostics(outcome.diagnostics.clone());
        if let Some(name) = &args.preset {
            report = report.with_preset(name);
        }
        ensure_parent_dir(report_path)?;
        write_report(report_path, &report).map_err(|err| err.to_string())?;
    }

    println!(
        "Wrote merged spec to '{}' ({}).",
        output_path.display(),
        outcome.spec.stats()
    );

    Ok(())
}

fn build_manual_policy(args: &MergeArgs) -> Result<OverridePolicy, String> {
    let mut policy = OverridePolicy::new();
    if let Some(raw) = &args.ignore_props {
        policy.ignore_props = parse_field_list(raw).map_err(|err| err.to_string())?;
    }
    if let Some(raw) = &args.ignore_command_props {
        policy.ignore_command_props = parse_field_list(raw).map_err(|err| err.to_string())?;
    }
    if let Some(raw) = &args.ignore_option_props {
        policy.ignore_option_props = parse_field_list(raw).map_err(|err| err.to_string())?;
    }
    if let Some(raw) = &args.ignore_arg_props {
        policy.ignore_arg_props = parse_field_list(raw).map_err(|err| err.to_string())?;
    }
    Ok(policy)
}

// ---------------------------------------------------------------------------
// batch command
// ---------------------------------------------------------------------------

fn run_batch(args: BatchArgs) -> Result<(), String> {
    use rayon::prelude::*;

    let preset = parse_preset(args.preset.as_deref())?;
    let policy = resolve_policy(preset, OverridePolicy::new()).map_err(|err| err.to_string())?;

    let old_paths = collect_spec_paths(&args.old_dir).map_err(|err| err.to_string())?;
    let new_paths = collect_spec_paths(&args.new_dir).map_err(|err| err.to_string())?;

    fs::create_dir_all(&args.out_dir).map_err(|err| {
        format!(
            "Failed to create output directory '{}': {err}",
            args.out_dir.display()
        )
    })?;

    let old_by_stem: BTreeMap<String, PathBuf> = old_paths
        .into_iter()
        .filter_map(|path| Some((file_stem(&path)?, path)))
        .collect();
    let new_stems: HashSet<String> = new_paths.iter().filter_map(|path| file_stem(path)).collect();

    let mut skipped = 0usize;
    for stem in old_by_stem.keys() {
        if !new_stems.contains(stem) {
            skipped += 1;
            eprintln!("warning: '{stem}' exists only in the old directory; skipped");
        }
    }

    struct BatchOutcome {
        file: String,
        merged: bool,
        warnings: Vec<String>,
        error: Option<String>,
    }

    let run_all = || -> Vec<BatchOutcome> {
        new_paths
            .par_iter()
            .map(|new_path| {
                let file = new_path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| new_path.display().to_string());

                let old_path = file_stem(new_path).and_then(|stem| old_by_stem.get(&stem));
                let (merged, result) = match old_path {
                    Some(old_path) => {
                        (true, merge_pair(old_path, new_path, &args.out_dir, &policy))
                    }
                    // New-only specs pass through unmerged.
                    None => (
                        false,
                        fs::copy(new_path, args.out_dir.join(&file))
                            .map(|_| Vec::new())
                            .map_err(|err| format!("Failed to copy '{file}': {err}")),
                    ),
                };

                match result {
                    Ok(warnings) => BatchOutcome {
                        file,
                        merged,
                        warnings,
                        error: None,
                    },
                    Err(err) => BatchOutcome {
                        file,
                        merged,
                        warnings: Vec::new(),
                        error: Some(err),
                    },
                }
            })
            .collect()
    };

    let outcomes = match args.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|err| format!("Failed to create thread pool: {err}"))?;
            pool.install(run_all)
        }
        None => run_all(),
    };

    for outcome in &outcomes {
        for warning in &outcome.warnings {
            eprintln!("warning: {}: {warning}", outcome.file);
        }
    }

    let merged = outcomes
        .iter()
        .filter(|o| o.merged && o.error.is_none())
        .count();
    let copied = outcomes
        .iter()
        .filter(|o| !o.merged && o.error.is_none())
        .count();
    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();

    println!("Batch merge summary:");
    println!("  Merged: {merged}");
    println!("  Copied (new only): {copied}");
    println!("  Skipped (old only): {skipped}");
    println!("  Failed: {failed}");

    if failed > 0 {
        eprintln!("Failures:");
        for outcome in &outcomes {
            if let Some(ref err) = outcome.error {
                eprintln!("  {}: {err}", outcome.file);
            }
        }
        return Err(format!(
            "{failed} of {} spec file(s) failed",
            outcomes.len()
        ));
    }

    Ok(())
}

fn merge_pair(
    old_path: &Path,
    new_path: &Path,
    out_dir: &Path,
    policy: &OverridePolicy,
) -> Result<Vec<String>, String> {
    let old = load_spec(old_path).map_err(|err| err.to_string())?;
    let new = load_spec(new_path).map_err(|err| err.to_string())?;
    let outcome = merge_specs(&old, &new, policy).map_err(|err| err.to_string())?;

    let Some(file_name) = new_path.file_name() else {
        return Err(format!("Invalid spec path '{}'", new_path.display()));
    };
    let target = out_dir.join(file_name);
    let format = SpecFormat::from_path(&target).unwrap_or(SpecFormat::Json);
    write_spec(&target, &outcome.spec, format).map_err(|err| err.to_string())?;

    Ok(outcome
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.to_string())
        .collect())
}

// ---------------------------------------------------------------------------
// validate command
// ---------------------------------------------------------------------------

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut paths = Vec::new();
    for input in &args.inputs {
        if input.is_dir() {
            let found = collect_spec_paths(input).map_err(|err| err.to_string())?;
            if found.is_empty() {
                eprintln!("warning: no spec files under '{}'", input.display());
            }
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }

    let mut failures = 0usize;
    for path in &paths {
        match load_spec(path) {
            Ok(spec) => println!("OK {} ({})", path.display(), spec.stats()),
            Err(err) => {
                failures += 1;
                eprintln!("FAIL {}: {err}", path.display());
            }
        }
    }

    println!(
        "Validated {} spec file(s), {failures} failure(s).",
        paths.len()
    );

    if failures > 0 {
        return Err(format!(
            "{failures} of {} spec file(s) failed validation",
            paths.len()
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_preset(raw: Option<&str>) -> Result<Option<Preset>, String> {
    raw.map(|value| value.parse::<Preset>().map_err(|err| err.to_string()))
        .transpose()
}

fn output_format(
    requested: Option<CliSpecFormat>,
    output_path: &Path,
    old_path: &Path,
) -> Result<SpecFormat, String> {
    if let Some(format) = requested {
        return Ok(format.into());
    }
    if let Some(format) = SpecFormat::from_path(output_path) {
        return Ok(format);
    }
    SpecFormat::from_path(old_path).ok_or_else(|| {
        format!(
            "Cannot infer an output format for '{}'; pass --format",
            output_path.display()
        )
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }
    Ok(())
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}
