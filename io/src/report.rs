//! Machine-readable merge run reports.
//!
//! A report records what a merge run saw and decided: the files involved,
//! the override policy in force, node counts before and after, and every
//! diagnostic the engine raised. Reports are written as pretty JSON next
//! to whatever path the caller chooses.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use spec_merge_core::{MergeDiagnostic, OverridePolicy, SpecField, SpecStats};

use crate::error::Result;

/// Summary of one merge run.
#[derive(Debug, Clone, Serialize)]
pub struct MergeRunReport {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    /// Version of the tool that wrote the report.
    pub tool_version: String,
    /// Path of the old (hand-edited) spec.
    pub old_file: String,
    /// Path of the new (regenerated) spec.
    pub new_file: String,
    /// Path the merged spec was written to.
    pub output_file: String,
    /// Preset the override policy came from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Fields ignored on every node kind.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_props: Vec<String>,
    /// Fields ignored on command nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_command_props: Vec<String>,
    /// Fields ignored on option nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_option_props: Vec<String>,
    /// Fields ignored on argument nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_arg_props: Vec<String>,
    /// Node counts of the old spec.
    pub old_stats: SpecStats,
    /// Node counts of the new spec.
    pub new_stats: SpecStats,
    /// Node counts of the merged spec.
    pub merged_stats: SpecStats,
    /// Diagnostics raised while merging.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<MergeDiagnostic>,
}

impl MergeRunReport {
    /// Creates a report for the given file trio, stamped with the current
    /// time and tool version.
    pub fn new(
        old_file: impl AsRef<Path>,
        new_file: impl AsRef<Path>,
        output_file: impl AsRef<Path>,
    ) -> Self {
        MergeRunReport {
            generated_at: Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            old_file: old_file.as_ref().display().to_string(),
            new_file: new_file.as_ref().display().to_string(),
            output_file: output_file.as_ref().display().to_string(),
            preset: None,
            ignored_props: Vec::new(),
            ignored_command_props: Vec::new(),
            ignored_option_props: Vec::new(),
            ignored_arg_props: Vec::new(),
            old_stats: SpecStats::default(),
            new_stats: SpecStats::default(),
            merged_stats: SpecStats::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Records the preset name the policy came from.
    pub fn with_preset(mut self, preset: &str) -> Self {
        self.preset = Some(preset.to_string());
        self
    }

    /// Echoes the resolved override policy into the report.
    pub fn with_policy(mut self, policy: &OverridePolicy) -> Self {
        self.ignored_props = field_names(&policy.ignore_props);
        self.ignored_command_props = field_names(&policy.ignore_command_props);
        self.ignored_option_props = field_names(&policy.ignore_option_props);
        self.ignored_arg_props = field_names(&policy.ignore_arg_props);
        self
    }

    /// Records node counts for the three spec trees.
    pub fn with_stats(mut self, old: SpecStats, new: SpecStats, merged: SpecStats) -> Self {
        self.old_stats = old;
        self.new_stats = new;
        self.merged_stats = merged;
        self
    }

    /// Records the diagnostics the merge raised.
    pub fn with_diagnostics(mut self, diagnostics: Vec<MergeDiagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

fn field_names(fields: &BTreeSet<SpecField>) -> Vec<String> {
    fields.iter().map(|field| field.to_string()).collect()
}

/// Writes a report as pretty JSON.
pub fn write_report(path: impl AsRef<Path>, report: &MergeRunReport) -> Result<()> {
    let path = path.as_ref();
    let mut rendered = serde_json::to_string_pretty(report)?;
    rendered.push('\n');
    std::fs::write(path, rendered)?;
    debug!(path = %path.display(), "wrote merge report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spec_merge_core::{Preset, SpecKind};

    #[test]
    fn test_report_echoes_policy() {
        let report = MergeRunReport::new("old.json", "new.json", "out.json")
            .with_preset("commander")
            .with_policy(&Preset::Commander.policy());

        assert_eq!(report.preset.as_deref(), Some("commander"));
        assert_eq!(report.ignored_props, vec!["description", "priority"]);
        assert_eq!(report.ignored_option_props, vec!["exclusiveOn"]);
        assert!(report.ignored_command_props.is_empty());
    }

    #[test]
    fn test_report_omits_empty_sections() {
        let report = MergeRunReport::new("old.json", "new.json", "out.json");
        let value = serde_json::to_value(&report).unwrap();
        let map = value.as_object().unwrap();

        assert!(map.contains_key("generated_at"));
        assert!(map.contains_key("old_stats"));
        assert!(!map.contains_key("preset"));
        assert!(!map.contains_key("ignored_props"));
        assert!(!map.contains_key("diagnostics"));
    }

    #[test]
    fn test_report_serializes_diagnostics() {
        let report = MergeRunReport::new("old.json", "new.json", "out.json").with_diagnostics(vec![
            MergeDiagnostic::RemovedNode {
                path: "git".into(),
                kind: SpecKind::Option,
                names: vec!["--stale".into()],
            },
        ]);

        let value = serde_json::to_value(&report).unwrap();
        let diagnostics = value["diagnostics"].as_array().unwrap();
        assert_eq!(diagnostics[0]["code"], "removed_node");
        assert_eq!(diagnostics[0]["names"][0], "--stale");
    }

    #[test]
    fn test_write_report_creates_json_file() {
        let dir = std::env::temp_dir().join("sm_io_test_write_report");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.json");
        let report = MergeRunReport::new("old.json", "new.json", "out.json");

        write_report(&path, &report).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["tool_version"], env!("CARGO_PKG_VERSION"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
