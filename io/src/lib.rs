//! File I/O for spec trees.
//!
//! Everything between the merge engine and the filesystem lives here:
//!
//! - **Loading**: JSON and YAML spec files, with a shape pass that rejects
//!   nodes carrying another kind's fields before typed parsing
//! - **Rendering**: JSON, YAML, and TypeScript completion modules
//! - **Reports**: machine-readable summaries of merge runs
//! - **Discovery**: recursive collection of loadable spec files
//!
//! # Examples
//!
//! ```no_run
//! use spec_merge_io::{SpecFormat, load_spec, write_spec};
//!
//! let spec = load_spec("specs/git.json").unwrap();
//! write_spec("out/git.ts", &spec, SpecFormat::TypeScript).unwrap();
//! ```

mod emit;
mod error;
mod format;
mod loader;
mod report;

pub use emit::{render_spec, write_spec};
pub use error::{Result, SpecIoError};
pub use format::SpecFormat;
pub use loader::{collect_spec_paths, load_spec};
pub use report::{MergeRunReport, write_report};
