//! Spec rendering and writing.
//!
//! JSON and YAML go through serde. TypeScript output is rendered by hand
//! into the `const completionSpec` module shape that completion engines
//! consume, with object keys left unquoted wherever they are valid
//! identifiers.
//!
//! ```
//! use spec_merge_core::CommandSpec;
//! use spec_merge_io::{SpecFormat, render_spec};
//!
//! let spec = CommandSpec::new("deploy");
//! let ts = render_spec(&spec, SpecFormat::TypeScript).unwrap();
//! assert!(ts.starts_with("const completionSpec: Fig.Spec = {"));
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use spec_merge_core::CommandSpec;

use crate::error::Result;
use crate::format::SpecFormat;

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("static regex must compile"));

/// Renders a spec tree in the requested format.
pub fn render_spec(spec: &CommandSpec, format: SpecFormat) -> Result<String> {
    match format {
        SpecFormat::Json => {
            let mut out = serde_json::to_string_pretty(spec)?;
            out.push('\n');
            Ok(out)
        }
        SpecFormat::Yaml => Ok(serde_yaml::to_string(spec)?),
        SpecFormat::TypeScript => render_typescript(spec),
    }
}

/// Renders a spec and writes it to `path`.
pub fn write_spec(path: impl AsRef<Path>, spec: &CommandSpec, format: SpecFormat) -> Result<()> {
    let path = path.as_ref();
    let rendered = render_spec(spec, format)?;
    std::fs::write(path, rendered)?;
    debug!(path = %path.display(), ?format, "wrote spec");
    Ok(())
}

fn render_typescript(spec: &CommandSpec) -> Result<String> {
    let value = serde_json::to_value(spec)?;
    let mut out = String::from("const completionSpec: Fig.Spec = ");
    write_ts_value(&mut out, &value, 0);
    out.push_str(";\n\nexport default completionSpec;\n");
    Ok(out)
}

fn write_ts_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::String(text) => out.push_str(&ts_quote(text)),
        Value::Array(items) => {
            // Scalar-only arrays stay on one line, like `name: ["checkout", "co"]`.
            if items.iter().all(|item| !item.is_object() && !item.is_array()) {
                out.push('[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    write_ts_value(out, item, indent);
                }
                out.push(']');
                return;
            }
            out.push_str("[\n");
            for (index, item) in items.iter().enumerate() {
                pad(out, indent + 1);
                write_ts_value(out, item, indent + 1);
                if index + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            pad(out, indent);
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{\n");
            for (index, (key, entry)) in map.iter().enumerate() {
                pad(out, indent + 1);
                if IDENT_RE.is_match(key) {
                    out.push_str(key);
                } else {
                    out.push_str(&ts_quote(key));
                }
                out.push_str(": ");
                write_ts_value(out, entry, indent + 1);
                if index + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            pad(out, indent);
            out.push('}');
        }
    }
}

fn pad(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn ts_quote(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for ch in raw.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
