//! Spec file loading.
//!
//! Loading runs three passes over a file: parse to a raw JSON value (YAML
//! parses into the same value type), a shape check that catches nodes
//! carrying another kind's fields before they can masquerade as valid
//! trees, and finally typed deserialization plus structural validation.
//!
//! ```no_run
//! use spec_merge_io::load_spec;
//!
//! let spec = load_spec("specs/git.json").unwrap();
//! assert_eq!(spec.primary_name(), "git");
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use spec_merge_core::{CommandSpec, MergeError, SpecField, SpecKind, validate_spec};

use crate::error::{Result, SpecIoError};
use crate::format::SpecFormat;

/// Loads and validates a spec tree from a JSON or YAML file.
///
/// # Errors
///
/// Returns [`SpecIoError::UnsupportedFormat`] for extensions outside the
/// loadable set (TypeScript sources must be compiled to JSON first),
/// [`SpecIoError::MergeError`] for kind-shape violations, and
/// [`SpecIoError::InvalidSpec`] when the tree fails structural validation.
pub fn load_spec(path: impl AsRef<Path>) -> Result<CommandSpec> {
    let path = path.as_ref();
    let format = SpecFormat::from_path(path).ok_or_else(|| SpecIoError::UnsupportedFormat {
        path: path.display().to_string(),
        detail: "expected a .json, .yaml, or .yml spec file".into(),
    })?;

    let raw = std::fs::read_to_string(path)?;
    let value: Value = match format {
        SpecFormat::Json => serde_json::from_str(&raw)?,
        SpecFormat::Yaml => serde_yaml::from_str(&raw)?,
        SpecFormat::TypeScript => {
            return Err(SpecIoError::UnsupportedFormat {
                path: path.display().to_string(),
                detail: "TypeScript spec sources must be compiled to JSON before merging".into(),
            });
        }
    };

    check_node_shape(&value, SpecKind::Command, &mut Vec::new())?;

    let spec: CommandSpec = serde_json::from_value(value)?;

    if let Some(error) = validate_spec(&spec).into_iter().next() {
        return Err(SpecIoError::InvalidSpec {
            path: path.display().to_string(),
            detail: error.to_string(),
        });
    }

    debug!(path = %path.display(), stats = %spec.stats(), "loaded spec");
    Ok(spec)
}

/// Collects every loadable spec file under a directory, recursively.
///
/// Paths come back sorted, so repeated runs see the same order.
pub fn collect_spec_paths(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    collect_into(dir.as_ref(), &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_into(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_into(&path, paths)?;
        } else if SpecFormat::from_path(&path).is_some_and(|f| f.is_loadable()) {
            paths.push(path);
        }
    }
    Ok(())
}

/// Walks a raw spec value checking that every node only carries fields of
/// the kind its position implies.
fn check_node_shape(value: &Value, kind: SpecKind, trail: &mut Vec<String>) -> Result<()> {
    let Value::Object(map) = value else {
        // Non-object nodes are left for typed deserialization to report.
        return Ok(());
    };

    trail.push(node_label(map));

    for key in map.keys() {
        if let Ok(field) = key.parse::<SpecField>() {
            if !field.applies_to(kind) {
                return Err(SpecIoError::MergeError(MergeError::ShapeMismatch {
                    path: trail.join(" "),
                    expected: kind,
                    found: characteristic_kind(field),
                    field: key.clone(),
                }));
            }
        }
    }

    if let Some(children) = map.get("subcommands").and_then(Value::as_array) {
        for child in children {
            check_node_shape(child, SpecKind::Command, trail)?;
        }
    }
    if let Some(children) = map.get("options").and_then(Value::as_array) {
        for child in children {
            check_node_shape(child, SpecKind::Option, trail)?;
        }
    }
    match map.get("args") {
        Some(Value::Array(children)) => {
            for child in children {
                check_node_shape(child, SpecKind::Arg, trail)?;
            }
        }
        Some(child @ Value::Object(_)) => check_node_shape(child, SpecKind::Arg, trail)?,
        _ => {}
    }

    trail.pop();
    Ok(())
}

fn node_label(map: &serde_json::Map<String, Value>) -> String {
    match map.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Array(names)) => names
            .first()
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_string(),
        _ => "?".to_string(),
    }
}

/// The kind a field is characteristic of, for mismatch messages.
fn characteristic_kind(field: SpecField) -> SpecKind {
    [SpecKind::Command, SpecKind::Option, SpecKind::Arg]
        .into_iter()
        .find(|kind| field.applies_to(*kind))
        .unwrap_or(SpecKind::Command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sm_io_test_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_json_spec() {
        let dir = test_dir("load_json");
        let path = write_file(
            &dir,
            "git.json",
            r#"{"name": "git", "subcommands": [{"name": ["checkout", "co"]}]}"#,
        );

        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.primary_name(), "git");
        assert_eq!(spec.subcommands[0].names, vec!["checkout", "co"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_yaml_spec() {
        let dir = test_dir("load_yaml");
        let path = write_file(
            &dir,
            "tool.yaml",
            "name: tool\noptions:\n  - name: [\"-v\", \"--verbose\"]\n",
        );

        let spec = load_spec(&path).unwrap();
        assert!(spec.find_option("--verbose").is_some());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_typescript_source_is_rejected() {
        let dir = test_dir("reject_ts");
        let path = write_file(&dir, "git.ts", "export default {};");

        let err = load_spec(&path).unwrap_err();
        assert!(matches!(err, SpecIoError::UnsupportedFormat { .. }));
        assert!(err.to_string().contains("compiled to JSON"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_shape_mismatch_in_subcommands() {
        let dir = test_dir("shape_subcommands");
        let path = write_file(
            &dir,
            "bad.json",
            r#"{"name": "git", "subcommands": [{"name": "-f", "exclusiveOn": ["--all"]}]}"#,
        );

        let err = load_spec(&path).unwrap_err();
        let SpecIoError::MergeError(MergeError::ShapeMismatch {
            path,
            expected,
            found,
            field,
        }) = err
        else {
            panic!("expected a shape mismatch, got {err}");
        };
        assert_eq!(path, "git -f");
        assert_eq!(expected, SpecKind::Command);
        assert_eq!(found, SpecKind::Option);
        assert_eq!(field, "exclusiveOn");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_shape_mismatch_in_args() {
        let dir = test_dir("shape_args");
        let path = write_file(
            &dir,
            "bad.json",
            r#"{"name": "run", "args": {"name": "script", "subcommands": []}}"#,
        );

        let err = load_spec(&path).unwrap_err();
        assert!(matches!(
            err,
            SpecIoError::MergeError(MergeError::ShapeMismatch {
                expected: SpecKind::Arg,
                found: SpecKind::Command,
                ..
            })
        ));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_tree_is_rejected() {
        let dir = test_dir("invalid_tree");
        let path = write_file(
            &dir,
            "dup.json",
            r#"{"name": "tool", "subcommands": [{"name": "a"}, {"name": "a"}]}"#,
        );

        let err = load_spec(&path).unwrap_err();
        assert!(matches!(err, SpecIoError::InvalidSpec { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_collect_spec_paths_recurses_and_sorts() {
        let dir = test_dir("collect_paths");
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        write_file(&dir, "b.json", "{}");
        write_file(&dir, "a.yaml", "{}");
        write_file(&dir, "notes.txt", "");
        write_file(&dir.join("nested"), "c.yml", "{}");

        let paths = collect_spec_paths(&dir).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.strip_prefix(&dir).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.json", "nested/c.yml"]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
