use std::fs;
use std::path::{Path, PathBuf};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir()
            .join(format!("spec_merge_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn fixture(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(rel)
}

fn spec_merge(args: &[&str]) -> std::process::Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_spec-merge"))
        .args(args)
        .output()
        .expect("failed to run spec-merge")
}

fn read_json(path: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(path).expect("failed to read file");
    serde_json::from_str(&raw).expect("invalid JSON")
}

// ---------------------------------------------------------------------------
// merge command
// ---------------------------------------------------------------------------

#[test]
fn merge_enriches_regenerated_spec() {
    let dir = TempDir::new("merge_enrich");
    let out = dir.join("merged.json");

    let output = spec_merge(&[
        "merge",
        fixture("expo/old.json").to_str().unwrap(),
        fixture("expo/new.json").to_str().unwrap(),
        "-n",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "merge should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote merged spec"));
    assert_eq!(read_json(&out), read_json(&fixture("expo/expected.json")));
}

#[test]
fn merge_reports_removed_nodes_on_stderr() {
    let dir = TempDir::new("merge_removed");
    let out = dir.join("merged.json");

    let output = spec_merge(&[
        "merge",
        fixture("expo/old.json").to_str().unwrap(),
        fixture("expo/new.json").to_str().unwrap(),
        "-n",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("removed"), "stderr: {stderr}");
    assert!(stderr.contains("eject"), "stderr: {stderr}");
}

#[test]
fn merge_overwrites_old_file_by_default() {
    let dir = TempDir::new("merge_overwrite");
    let old = dir.join("expo.json");
    fs::copy(fixture("expo/old.json"), &old).unwrap();

    let output = spec_merge(&[
        "merge",
        old.to_str().unwrap(),
        fixture("expo/new.json").to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert_eq!(read_json(&old), read_json(&fixture("expo/expected.json")));
}

#[test]
fn merge_with_commander_preset() {
    let dir = TempDir::new("merge_preset");
    let out = dir.join("merged.json");

    let output = spec_merge(&[
        "merge",
        fixture("tools-cli/old.json").to_str().unwrap(),
        fixture("tools-cli/new.json").to_str().unwrap(),
        "-n",
        out.to_str().unwrap(),
        "-p",
        "commander",
    ]);

    assert!(output.status.success(), "merge should succeed");
    assert_eq!(
        read_json(&out),
        read_json(&fixture("tools-cli/expected.json"))
    );
}

#[test]
fn preset_conflicts_with_ignore_lists() {
    let dir = TempDir::new("merge_conflict");
    let out = dir.join("merged.json");

    let output = spec_merge(&[
        "merge",
        fixture("expo/old.json").to_str().unwrap(),
        fixture("expo/new.json").to_str().unwrap(),
        "-n",
        out.to_str().unwrap(),
        "-p",
        "commander",
        "-i",
        "description",
    ]);

    assert!(!output.status.success(), "conflicting flags must fail");
    assert!(!out.exists(), "no output should be written");
}

#[test]
fn merge_rejects_unknown_ignore_field() {
    let dir = TempDir::new("merge_bad_field");
    let out = dir.join("merged.json");

    let output = spec_merge(&[
        "merge",
        fixture("expo/old.json").to_str().unwrap(),
        fixture("expo/new.json").to_str().unwrap(),
        "-n",
        out.to_str().unwrap(),
        "-i",
        "colour",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
}

#[test]
fn merge_rejects_ignoring_name() {
    let dir = TempDir::new("merge_ignore_name");
    let out = dir.join("merged.json");

    let output = spec_merge(&[
        "merge",
        fixture("expo/old.json").to_str().unwrap(),
        fixture("expo/new.json").to_str().unwrap(),
        "-n",
        out.to_str().unwrap(),
        "-i",
        "name",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("name"), "stderr: {stderr}");
}

#[test]
fn merge_writes_run_report() {
    let dir = TempDir::new("merge_report");
    let out = dir.join("merged.json");
    let report_path = dir.join("report.json");

    let output = spec_merge(&[
        "merge",
        fixture("expo/old.json").to_str().unwrap(),
        fixture("expo/new.json").to_str().unwrap(),
        "-n",
        out.to_str().unwrap(),
        "--report",
        report_path.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let report = read_json(&report_path);
    assert_eq!(report["diagnostics"][0]["code"], "removed_node");
    assert_eq!(report["diagnostics"][0]["names"][0], "eject");
    assert_eq!(report["merged_stats"]["commands"], 3);
    assert!(report.get("preset").is_none());
}

#[test]
fn merge_format_flag_renders_typescript() {
    let dir = TempDir::new("merge_ts");
    let out = dir.join("merged.ts");

    let output = spec_merge(&[
        "merge",
        fixture("expo/old.json").to_str().unwrap(),
        fixture("expo/new.json").to_str().unwrap(),
        "-n",
        out.to_str().unwrap(),
        "--format",
        "ts",
    ]);

    assert!(output.status.success());
    let rendered = fs::read_to_string(&out).unwrap();
    assert!(rendered.starts_with("const completionSpec: Fig.Spec = {"));
    assert!(rendered.contains("name: \"expo-cli\""));
    assert!(rendered.ends_with("export default completionSpec;\n"));
}

// ---------------------------------------------------------------------------
// batch command
// ---------------------------------------------------------------------------

#[test]
fn batch_merges_pairs_and_copies_new_only() {
    let dir = TempDir::new("batch_pairs");
    let old_dir = dir.join("old");
    let new_dir = dir.join("new");
    let out_dir = dir.join("out");
    fs::create_dir_all(&old_dir).unwrap();
    fs::create_dir_all(&new_dir).unwrap();

    fs::copy(fixture("expo/old.json"), old_dir.join("expo.json")).unwrap();
    fs::write(
        old_dir.join("retired.json"),
        r#"{"name": "retired", "description": "No longer generated"}"#,
    )
    .unwrap();
    fs::copy(fixture("expo/new.json"), new_dir.join("expo.json")).unwrap();
    fs::write(new_dir.join("fresh.json"), r#"{"name": "fresh"}"#).unwrap();

    let output = spec_merge(&[
        "batch",
        "--old-dir",
        old_dir.to_str().unwrap(),
        "--new-dir",
        new_dir.to_str().unwrap(),
        "--out-dir",
        out_dir.to_str().unwrap(),
        "--jobs",
        "2",
    ]);

    assert!(output.status.success(), "batch should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Merged: 1"), "stdout: {stdout}");
    assert!(stdout.contains("Copied (new only): 1"), "stdout: {stdout}");
    assert!(stdout.contains("Skipped (old only): 1"), "stdout: {stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("retired"), "stderr: {stderr}");

    assert_eq!(
        read_json(&out_dir.join("expo.json")),
        read_json(&fixture("expo/expected.json"))
    );
    assert_eq!(
        read_json(&out_dir.join("fresh.json")),
        serde_json::json!({ "name": "fresh" })
    );
    assert!(!out_dir.join("retired.json").exists());
}

#[test]
fn batch_collects_per_file_failures() {
    let dir = TempDir::new("batch_failures");
    let old_dir = dir.join("old");
    let new_dir = dir.join("new");
    let out_dir = dir.join("out");
    fs::create_dir_all(&old_dir).unwrap();
    fs::create_dir_all(&new_dir).unwrap();

    fs::write(old_dir.join("broken.json"), "{ not json").unwrap();
    fs::write(new_dir.join("broken.json"), r#"{"name": "broken"}"#).unwrap();
    fs::copy(fixture("expo/old.json"), old_dir.join("expo.json")).unwrap();
    fs::copy(fixture("expo/new.json"), new_dir.join("expo.json")).unwrap();

    let output = spec_merge(&[
        "batch",
        "--old-dir",
        old_dir.to_str().unwrap(),
        "--new-dir",
        new_dir.to_str().unwrap(),
        "--out-dir",
        out_dir.to_str().unwrap(),
    ]);

    assert!(!output.status.success(), "batch should report failure");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Merged: 1"), "stdout: {stdout}");
    assert!(stdout.contains("Failed: 1"), "stdout: {stdout}");

    // The healthy pair is still merged.
    assert_eq!(
        read_json(&out_dir.join("expo.json")),
        read_json(&fixture("expo/expected.json"))
    );
}

// ---------------------------------------------------------------------------
// validate command
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_clean_specs() {
    let output = spec_merge(&["validate", fixture("expo/old.json").to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OK"), "stdout: {stdout}");
    assert!(stdout.contains("0 failure(s)"), "stdout: {stdout}");
}

#[test]
fn validate_recurses_directories_and_flags_failures() {
    let dir = TempDir::new("validate_dir");
    fs::copy(fixture("expo/old.json"), dir.join("good.json")).unwrap();
    fs::write(
        dir.join("dup.json"),
        r#"{"name": "tool", "subcommands": [{"name": "a"}, {"name": "a"}]}"#,
    )
    .unwrap();

    let output = spec_merge(&["validate", dir.path().to_str().unwrap()]);

    assert!(!output.status.success(), "validation should fail");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("OK"), "stdout: {stdout}");
    assert!(stderr.contains("FAIL"), "stderr: {stderr}");
    assert!(stderr.contains("dup.json"), "stderr: {stderr}");
}
