//! Spec file formats.

use std::path::Path;

/// Supported spec file formats.
///
/// JSON and YAML round-trip through the loader; TypeScript is an output
/// format for the Fig spec ecosystem and cannot be loaded back (spec
/// sources are compiled to JSON by external tooling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SpecFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
    /// A TypeScript completion-spec module.
    #[cfg_attr(feature = "clap", value(name = "ts"))]
    TypeScript,
}

impl SpecFormat {
    /// Detects the format from a path's extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use spec_merge_io::SpecFormat;
    ///
    /// assert_eq!(SpecFormat::from_path(Path::new("git.json")), Some(SpecFormat::Json));
    /// assert_eq!(SpecFormat::from_path(Path::new("git.yml")), Some(SpecFormat::Yaml));
    /// assert_eq!(SpecFormat::from_path(Path::new("git.ts")), Some(SpecFormat::TypeScript));
    /// assert_eq!(SpecFormat::from_path(Path::new("git.txt")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<SpecFormat> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(SpecFormat::Json),
            Some("yaml") | Some("yml") => Some(SpecFormat::Yaml),
            Some("ts") => Some(SpecFormat::TypeScript),
            _ => None,
        }
    }

    /// Whether the loader can read files of this format.
    pub fn is_loadable(&self) -> bool {
        matches!(self, SpecFormat::Json | SpecFormat::Yaml)
    }
}
