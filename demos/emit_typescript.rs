//! Spec rendering in every supported format.
//!
//! Builds a small spec, renders it as JSON, YAML, and a TypeScript
//! completion module, and round-trips the JSON form through a temp file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p spec-merge-demos --example emit_typescript
//! ```

use spec_merge_core::{ArgSpec, CommandSpec, OptionSpec};
use spec_merge_io::{SpecFormat, load_spec, render_spec, write_spec};

fn main() {
    let spec = CommandSpec::new("devserver")
        .with_description("Local development server")
        .with_option(
            OptionSpec::new(&["-p", "--port"])
                .with_description("Port to listen on")
                .with_arg(ArgSpec::new("port")),
        )
        .with_option(OptionSpec::new(&["--open"]).with_description("Open the browser"))
        .with_subcommand(
            CommandSpec::new("proxy").with_arg(ArgSpec::new("upstream").with_template("history")),
        );

    for format in [SpecFormat::Json, SpecFormat::Yaml, SpecFormat::TypeScript] {
        println!("--- {format:?} ---");
        println!("{}", render_spec(&spec, format).unwrap());
    }

    // Round trip through a file
    let dir = std::env::temp_dir().join("spec_merge_demo_emit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("devserver.json");

    write_spec(&path, &spec, SpecFormat::Json).unwrap();
    let loaded = load_spec(&path).unwrap();
    assert_eq!(loaded, spec);
    println!(
        "Round-tripped '{}' through {}",
        loaded.primary_name(),
        path.display()
    );

    std::fs::remove_dir_all(&dir).ok();
}
