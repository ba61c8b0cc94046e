//! Spec type definitions for CLI autocomplete trees.
//!
//! This module defines the data model for completion specs: a root
//! [`CommandSpec`] whose subtree describes subcommands, options, and
//! positional arguments. The types serialize with [`serde`] using the
//! camelCase wire format produced by spec generators, including the
//! single-or-array forms of `name`, `args`, `template`, and `generators`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MergeError;

/// Node kind within a spec tree.
///
/// # Examples
///
/// ```
/// use spec_merge_core::SpecKind;
///
/// assert_eq!(SpecKind::Command.to_string(), "command");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecKind {
    /// A command or subcommand node.
    Command,
    /// A named option (flag) node.
    Option,
    /// A positional argument node.
    Arg,
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecKind::Command => write!(f, "command"),
            SpecKind::Option => write!(f, "option"),
            SpecKind::Arg => write!(f, "arg"),
        }
    }
}

/// A mergeable field of a spec node.
///
/// This is the closed set of fields an override policy can name. Node
/// identity (`name`) is deliberately absent: merged names always follow
/// the incoming spec and cannot be policy-controlled.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{SpecField, SpecKind};
///
/// let field: SpecField = "exclusiveOn".parse().unwrap();
/// assert_eq!(field, SpecField::ExclusiveOn);
/// assert!(field.applies_to(SpecKind::Option));
/// assert!(!field.applies_to(SpecKind::Command));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecField {
    /// Short description shown in suggestions.
    Description,
    /// Whether a command is hidden from suggestions.
    Hidden,
    /// Suggestion ranking weight.
    Priority,
    /// Icon identifier or URL.
    Icon,
    /// Positional arguments of a command or option.
    Args,
    /// Options of a command.
    Options,
    /// Nested subcommands of a command.
    Subcommands,
    /// Template names driving built-in suggestion sources.
    Template,
    /// Generator payloads attached to an argument.
    Generators,
    /// Static suggestion payloads attached to an argument.
    Suggestions,
    /// Option names this option cannot appear with.
    ExclusiveOn,
    /// Option names this option requires.
    DependsOn,
    /// Whether an argument may be omitted.
    IsOptional,
    /// Whether an argument repeats.
    IsVariadic,
}

impl SpecField {
    /// Every field, in declaration order.
    pub const ALL: [SpecField; 14] = [
        SpecField::Description,
        SpecField::Hidden,
        SpecField::Priority,
        SpecField::Icon,
        SpecField::Args,
        SpecField::Options,
        SpecField::Subcommands,
        SpecField::Template,
        SpecField::Generators,
        SpecField::Suggestions,
        SpecField::ExclusiveOn,
        SpecField::DependsOn,
        SpecField::IsOptional,
        SpecField::IsVariadic,
    ];

    /// The camelCase wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecField::Description => "description",
            SpecField::Hidden => "hidden",
            SpecField::Priority => "priority",
            SpecField::Icon => "icon",
            SpecField::Args => "args",
            SpecField::Options => "options",
            SpecField::Subcommands => "subcommands",
            SpecField::Template => "template",
            SpecField::Generators => "generators",
            SpecField::Suggestions => "suggestions",
            SpecField::ExclusiveOn => "exclusiveOn",
            SpecField::DependsOn => "dependsOn",
            SpecField::IsOptional => "isOptional",
            SpecField::IsVariadic => "isVariadic",
        }
    }

    /// Whether the field exists on nodes of the given kind.
    pub fn applies_to(&self, kind: SpecKind) -> bool {
        match self {
            SpecField::Description | SpecField::Priority | SpecField::Icon => true,
            SpecField::Hidden | SpecField::Options | SpecField::Subcommands => {
                kind == SpecKind::Command
            }
            SpecField::Args => matches!(kind, SpecKind::Command | SpecKind::Option),
            SpecField::ExclusiveOn | SpecField::DependsOn => kind == SpecKind::Option,
            SpecField::Template
            | SpecField::Generators
            | SpecField::Suggestions
            | SpecField::IsOptional
            | SpecField::IsVariadic => kind == SpecKind::Arg,
        }
    }
}

impl fmt::Display for SpecField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecField {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "name" {
            return Err(MergeError::Configuration(
                "'name' cannot be ignored; node identity always follows the incoming spec".into(),
            ));
        }
        SpecField::ALL
            .iter()
            .find(|field| field.as_str() == s)
            .copied()
            .ok_or_else(|| MergeError::UnknownField(s.to_string()))
    }
}

/// Serde adapter for fields that accept a single value or an array.
///
/// Spec generators emit `"name": "git"` and `"name": ["checkout", "co"]`
/// interchangeably; the same applies to `args`, `template`, and
/// `generators`. Deserialization accepts both; serialization collapses
/// one-element lists back to the single form.
pub(crate) mod one_or_many {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }

    pub fn serialize<T, S>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        if items.len() == 1 {
            items[0].serialize(serializer)
        } else {
            items.serialize(serializer)
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        })
    }
}

/// Opaque generator payload attached to an argument.
///
/// Generators hold scripts, templates, and post-processing hooks the merge
/// engine has no reason to inspect. The whole `generators` list is treated
/// as one atomic value during merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generator(pub serde_json::Value);

/// Opaque static suggestion attached to an argument.
///
/// Either a bare string or a suggestion object with icon and description;
/// treated atomically like [`Generator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suggestion(pub serde_json::Value);

/// Spec node for a positional argument.
///
/// # Examples
///
/// ```
/// use spec_merge_core::ArgSpec;
///
/// let arg = ArgSpec::new("branch")
///     .with_description("Branch to check out")
///     .optional();
/// assert_eq!(arg.primary_name(), "branch");
/// assert_eq!(arg.is_optional, Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgSpec {
    /// Name or aliases of the argument
    #[serde(rename = "name", default, with = "one_or_many")]
    pub names: Vec<String>,
    /// Description from the spec author or generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Suggestion ranking weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Icon identifier or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Built-in suggestion templates (e.g., "filepaths")
    #[serde(default, with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub template: Vec<String>,
    /// Generator payloads (opaque)
    #[serde(default, with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub generators: Vec<Generator>,
    /// Static suggestions (opaque)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    /// May the argument be omitted?
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_optional: Option<bool>,
    /// Does the argument repeat?
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_variadic: Option<bool>,
}

impl ArgSpec {
    /// Creates a new argument spec with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            names: vec![name.to_string()],
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Adds a suggestion template.
    pub fn with_template(mut self, template: &str) -> Self {
        self.template.push(template.to_string());
        self
    }

    /// Marks the argument as optional.
    pub fn optional(mut self) -> Self {
        self.is_optional = Some(true);
        self
    }

    /// Marks the argument as variadic.
    pub fn variadic(mut self) -> Self {
        self.is_variadic = Some(true);
        self
    }

    /// Returns the first alias, or an empty string for an unnamed node.
    pub fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Checks whether any alias equals the given name.
    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Spec node for a named option (flag).
///
/// # Examples
///
/// ```
/// use spec_merge_core::{ArgSpec, OptionSpec};
///
/// let opt = OptionSpec::new(&["-m", "--message"])
///     .with_description("Commit message")
///     .with_arg(ArgSpec::new("message"));
/// assert_eq!(opt.primary_name(), "-m");
/// assert!(opt.matches("--message"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    /// Name or aliases of the option
    #[serde(rename = "name", default, with = "one_or_many")]
    pub names: Vec<String>,
    /// Description from the spec author or generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Suggestion ranking weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Icon identifier or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Arguments the option takes
    #[serde(default, with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,
    /// Options this one cannot appear together with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusive_on: Vec<String>,
    /// Options this one requires
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl OptionSpec {
    /// Creates a new option spec with the given aliases.
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Adds an argument.
    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Returns the first alias, or an empty string for an unnamed node.
    pub fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Checks whether any alias equals the given name.
    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Spec node for a command or subcommand.
///
/// This is the primary type in the crate. The root of every spec tree is a
/// `CommandSpec`; nested subcommands reuse the same type.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{ArgSpec, CommandSpec, OptionSpec};
///
/// let spec = CommandSpec::new("git")
///     .with_description("The stupid content tracker")
///     .with_option(OptionSpec::new(&["-v", "--version"]))
///     .with_subcommand(
///         CommandSpec::new("checkout")
///             .with_alias("co")
///             .with_arg(ArgSpec::new("branch")),
///     );
///
/// assert_eq!(spec.primary_name(), "git");
/// assert!(spec.find_subcommand("co").is_some());
/// assert!(spec.find_option("--version").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Name or aliases of the command
    #[serde(rename = "name", default, with = "one_or_many")]
    pub names: Vec<String>,
    /// Description from the spec author or generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hidden from suggestions?
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// Suggestion ranking weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Icon identifier or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Positional arguments
    #[serde(default, with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,
    /// Options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
    /// Nested subcommands
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandSpec>,
}

impl CommandSpec {
    /// Creates a new command spec with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            names: vec![name.to_string()],
            ..Default::default()
        }
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.names.push(alias.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Adds an icon.
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// Adds a positional argument.
    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Adds an option.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a nested subcommand.
    pub fn with_subcommand(mut self, sub: CommandSpec) -> Self {
        self.subcommands.push(sub);
        self
    }

    /// Returns the first alias, or an empty string for an unnamed node.
    pub fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Checks whether any alias equals the given name.
    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Finds a direct subcommand by any of its aliases.
    ///
    /// # Examples
    ///
    /// ```
    /// use spec_merge_core::CommandSpec;
    ///
    /// let spec = CommandSpec::new("git")
    ///     .with_subcommand(CommandSpec::new("checkout").with_alias("co"));
    ///
    /// assert!(spec.find_subcommand("checkout").is_some());
    /// assert!(spec.find_subcommand("co").is_some());
    /// assert!(spec.find_subcommand("clone").is_none());
    /// ```
    pub fn find_subcommand(&self, name: &str) -> Option<&CommandSpec> {
        self.subcommands.iter().find(|s| s.matches(name))
    }

    /// Finds a direct option by any of its aliases.
    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.matches(name))
    }

    /// Counts the nodes of the whole subtree, root included.
    pub fn stats(&self) -> SpecStats {
        let mut stats = SpecStats::default();
        stats.add_command(self);
        stats
    }
}

/// Node counts for a spec tree.
///
/// # Examples
///
/// ```
/// use spec_merge_core::{ArgSpec, CommandSpec, OptionSpec};
///
/// let spec = CommandSpec::new("git")
///     .with_option(OptionSpec::new(&["--help"]))
///     .with_subcommand(CommandSpec::new("checkout").with_arg(ArgSpec::new("branch")));
///
/// let stats = spec.stats();
/// assert_eq!(stats.commands, 2);
/// assert_eq!(stats.options, 1);
/// assert_eq!(stats.args, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecStats {
    /// Command nodes, including the root.
    pub commands: usize,
    /// Option nodes.
    pub options: usize,
    /// Argument nodes, including option arguments.
    pub args: usize,
}

impl SpecStats {
    fn add_command(&mut self, cmd: &CommandSpec) {
        self.commands += 1;
        self.args += cmd.args.len();
        for option in &cmd.options {
            self.options += 1;
            self.args += option.args.len();
        }
        for sub in &cmd.subcommands {
            self.add_command(sub);
        }
    }
}

impl fmt::Display for SpecStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} commands, {} options, {} args",
            self.commands, self.options, self.args
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_field_roundtrip() {
        for field in SpecField::ALL {
            let parsed: SpecField = field.as_str().parse().unwrap();
            assert_eq!(parsed, field);
        }
    }

    #[test]
    fn test_spec_field_rejects_name() {
        let err = "name".parse::<SpecField>().unwrap_err();
        assert!(matches!(err, MergeError::Configuration(_)));

        let err = "loadSpec".parse::<SpecField>().unwrap_err();
        assert_eq!(err, MergeError::UnknownField("loadSpec".into()));
    }

    #[test]
    fn test_spec_field_applicability() {
        assert!(SpecField::Description.applies_to(SpecKind::Arg));
        assert!(SpecField::Hidden.applies_to(SpecKind::Command));
        assert!(!SpecField::Hidden.applies_to(SpecKind::Option));
        assert!(SpecField::Args.applies_to(SpecKind::Option));
        assert!(!SpecField::Args.applies_to(SpecKind::Arg));
        assert!(SpecField::Generators.applies_to(SpecKind::Arg));
        assert!(!SpecField::Subcommands.applies_to(SpecKind::Option));
    }

    #[test]
    fn test_name_accepts_single_string() {
        let spec: CommandSpec = serde_json::from_str(r#"{"name": "git"}"#).unwrap();
        assert_eq!(spec.names, vec!["git"]);
    }

    #[test]
    fn test_name_accepts_alias_array() {
        let spec: CommandSpec =
            serde_json::from_str(r#"{"name": ["checkout", "co"]}"#).unwrap();
        assert_eq!(spec.names, vec!["checkout", "co"]);
    }

    #[test]
    fn test_single_name_serializes_to_string() {
        let spec = CommandSpec::new("git");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["name"], serde_json::json!("git"));

        let spec = CommandSpec::new("checkout").with_alias("co");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["name"], serde_json::json!(["checkout", "co"]));
    }

    #[test]
    fn test_args_accept_single_object() {
        let spec: CommandSpec = serde_json::from_str(
            r#"{"name": "checkout", "args": {"name": "branch", "isOptional": true}}"#,
        )
        .unwrap();
        assert_eq!(spec.args.len(), 1);
        assert_eq!(spec.args[0].primary_name(), "branch");
        assert_eq!(spec.args[0].is_optional, Some(true));
    }

    #[test]
    fn test_option_wire_fields() {
        let opt: OptionSpec = serde_json::from_str(
            r#"{"name": ["-i", "--ignore-props"], "exclusiveOn": ["--preset"]}"#,
        )
        .unwrap();
        assert_eq!(opt.exclusive_on, vec!["--preset"]);

        let json = serde_json::to_string(&opt).unwrap();
        assert!(json.contains("exclusiveOn"));
        assert!(!json.contains("dependsOn"));
    }

    #[test]
    fn test_generators_survive_roundtrip() {
        let raw = r#"{
            "name": "branch",
            "generators": {"script": "git branch", "postProcess": "split"}
        }"#;
        let arg: ArgSpec = serde_json::from_str(raw).unwrap();
        assert_eq!(arg.generators.len(), 1);

        let json = serde_json::to_value(&arg).unwrap();
        assert_eq!(json["generators"]["script"], serde_json::json!("git branch"));
    }

    #[test]
    fn test_suggestions_accept_mixed_entries() {
        let arg: ArgSpec = serde_json::from_str(
            r#"{"name": "target", "suggestions": ["all", {"name": "clean", "icon": "🧹"}]}"#,
        )
        .unwrap();
        assert_eq!(arg.suggestions.len(), 2);
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let spec = CommandSpec::new("git");
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"name":"git"}"#);
    }

    #[test]
    fn test_find_helpers_use_aliases() {
        let spec = CommandSpec::new("git")
            .with_option(OptionSpec::new(&["-v", "--verbose"]))
            .with_subcommand(CommandSpec::new("checkout").with_alias("co"));

        assert!(spec.find_option("-v").is_some());
        assert!(spec.find_option("--verbose").is_some());
        assert!(spec.find_option("--debug").is_none());
        assert_eq!(spec.find_subcommand("co").unwrap().primary_name(), "checkout");
    }

    #[test]
    fn test_stats_count_nested_nodes() {
        let spec = CommandSpec::new("tool")
            .with_arg(ArgSpec::new("input"))
            .with_option(OptionSpec::new(&["-o"]).with_arg(ArgSpec::new("path")))
            .with_subcommand(
                CommandSpec::new("sub").with_option(OptionSpec::new(&["--flag"])),
            );

        let stats = spec.stats();
        assert_eq!(stats.commands, 2);
        assert_eq!(stats.options, 2);
        assert_eq!(stats.args, 2);
    }
}
