//! Option schema type definitions.
//!
//! This module defines the declarative description of the options a program
//! recognizes. A schema is an ordered list of [`SchemaEntry`] values; the
//! order matters because parsing and help rendering both walk entries in
//! declaration order. The types serialize with [`serde`] so a schema can be
//! kept in a YAML or JSON document next to the program that uses it.

use serde::{Deserialize, Deserializer, Serialize};

/// Reserved key under which positional tokens are stored.
///
/// No option may be declared with this id.
pub const POSITIONAL_KEY: &str = "_";

/// Help grouping for options.
///
/// Categories come from a fixed set. Options without a category are still
/// parsed but never listed in help output.
///
/// # Examples
///
/// ```
/// use argv_schema_core::HelpCategory;
///
/// assert_eq!(HelpCategory::Troubleshooting.title(), "Troubleshooting");
/// assert_eq!(HelpCategory::ALL[0], HelpCategory::Options);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpCategory {
    /// General options.
    #[serde(alias = "o")]
    Options,
    /// Extension management commands.
    #[serde(alias = "e")]
    ExtensionsManagement,
    /// Diagnostics and troubleshooting switches.
    #[serde(alias = "t")]
    Troubleshooting,
    /// Model Context Protocol integration.
    #[serde(alias = "m")]
    Mcp,
}

impl HelpCategory {
    /// Every category, in the default help rendering order.
    pub const ALL: [HelpCategory; 4] = [
        HelpCategory::Options,
        HelpCategory::ExtensionsManagement,
        HelpCategory::Troubleshooting,
        HelpCategory::Mcp,
    ];

    /// Heading printed above the category's block in help output.
    pub fn title(self) -> &'static str {
        match self {
            HelpCategory::Options => "Options",
            HelpCategory::ExtensionsManagement => "Extensions Management",
            HelpCategory::Troubleshooting => "Troubleshooting",
            HelpCategory::Mcp => "Model Context Protocol",
        }
    }
}

/// Value arity of a non-subcommand option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Switch without a value.
    Boolean,
    /// Single string value; repeats keep the last one.
    String,
    /// Repeatable string value collected in order.
    StringList,
}

/// Discriminant of a [`SchemaEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Boolean,
    String,
    StringList,
    Subcommand,
}

impl From<ValueKind> for OptionKind {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => OptionKind::Boolean,
            ValueKind::String => OptionKind::String,
            ValueKind::StringList => OptionKind::StringList,
        }
    }
}

/// Declaration of a boolean, string or string-list option.
///
/// The value kind is not stored here; it is carried by the [`SchemaEntry`]
/// variant wrapping the descriptor.
///
/// # Examples
///
/// ```
/// use argv_schema_core::{HelpCategory, OptionDescriptor};
///
/// let output = OptionDescriptor::new("output")
///     .with_alias("o")
///     .with_arg("file")
///     .deprecating("out")
///     .with_description("Write the result to a file.")
///     .in_category(HelpCategory::Options);
///
/// assert_eq!(output.alias.as_deref(), Some("o"));
/// assert_eq!(output.deprecates, vec!["out"]);
/// assert!(!output.allow_empty_value);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Canonical id, matched as `--<id>`.
    pub id: String,
    /// Single-token short name, matched as `-<alias>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Legacy ids whose values migrate onto this option.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deprecates: Vec<String>,
    /// Placeholder labels shown in usage text (`<a> <b>`).
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "one_or_many"
    )]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set when the option itself is deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    /// Accept zero-length values instead of discarding them.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_empty_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<HelpCategory>,
    /// Inherited into every subcommand's effective schema.
    #[serde(default, skip_serializing_if = "is_false")]
    pub global: bool,
}

impl OptionDescriptor {
    /// Creates a descriptor with only an id set.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// Sets the short alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Appends a usage placeholder.
    pub fn with_arg(mut self, placeholder: &str) -> Self {
        self.args.push(placeholder.to_string());
        self
    }

    /// Adds a legacy id superseded by this option.
    pub fn deprecating(mut self, legacy_id: &str) -> Self {
        self.deprecates.push(legacy_id.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Marks the option as deprecated with the given message.
    pub fn with_deprecation_message(mut self, message: &str) -> Self {
        self.deprecation_message = Some(message.to_string());
        self
    }

    /// Accepts empty values.
    pub fn allow_empty_value(mut self) -> Self {
        self.allow_empty_value = true;
        self
    }

    /// Places the option in a help category.
    pub fn in_category(mut self, category: HelpCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Marks the option as inherited by subcommands.
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }
}

/// Declaration of a subcommand and its nested option schema.
///
/// # Examples
///
/// ```
/// use argv_schema_core::{OptionDescriptor, OptionSchema, SubcommandDescriptor};
///
/// let tunnel = SubcommandDescriptor::new("tunnel")
///     .with_description("Make the current machine accessible remotely.")
///     .with_options(OptionSchema::new().string(OptionDescriptor::new("name")));
///
/// assert_eq!(tunnel.options.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcommandDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    /// Options scoped to this subcommand.
    #[serde(default)]
    pub options: OptionSchema,
}

impl SubcommandDescriptor {
    /// Creates a subcommand with an empty nested schema.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Marks the subcommand as deprecated.
    pub fn with_deprecation_message(mut self, message: &str) -> Self {
        self.deprecation_message = Some(message.to_string());
        self
    }

    /// Replaces the nested schema.
    pub fn with_options(mut self, options: OptionSchema) -> Self {
        self.options = options;
        self
    }
}

/// One declared entry of an [`OptionSchema`].
///
/// In documents the variant is selected by a `type` field:
///
/// ```
/// use argv_schema_core::{OptionKind, SchemaEntry};
///
/// let entry: SchemaEntry = serde_json::from_str(
///     r#"{ "type": "string[]", "id": "log", "args": "level", "global": true }"#,
/// ).unwrap();
///
/// assert_eq!(entry.kind(), OptionKind::StringList);
/// assert_eq!(entry.id(), "log");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaEntry {
    Boolean(OptionDescriptor),
    String(OptionDescriptor),
    #[serde(alias = "string[]")]
    StringList(OptionDescriptor),
    Subcommand(SubcommandDescriptor),
}

impl SchemaEntry {
    /// Returns the entry's id.
    pub fn id(&self) -> &str {
        match self {
            SchemaEntry::Boolean(o) | SchemaEntry::String(o) | SchemaEntry::StringList(o) => &o.id,
            SchemaEntry::Subcommand(s) => &s.id,
        }
    }

    /// Returns the entry's discriminant.
    pub fn kind(&self) -> OptionKind {
        match self {
            SchemaEntry::Boolean(_) => OptionKind::Boolean,
            SchemaEntry::String(_) => OptionKind::String,
            SchemaEntry::StringList(_) => OptionKind::StringList,
            SchemaEntry::Subcommand(_) => OptionKind::Subcommand,
        }
    }

    /// Returns the value kind and descriptor for non-subcommand entries.
    pub fn as_option(&self) -> Option<(ValueKind, &OptionDescriptor)> {
        match self {
            SchemaEntry::Boolean(o) => Some((ValueKind::Boolean, o)),
            SchemaEntry::String(o) => Some((ValueKind::String, o)),
            SchemaEntry::StringList(o) => Some((ValueKind::StringList, o)),
            SchemaEntry::Subcommand(_) => None,
        }
    }

    /// Returns the subcommand descriptor, if this entry is one.
    pub fn as_subcommand(&self) -> Option<&SubcommandDescriptor> {
        match self {
            SchemaEntry::Subcommand(s) => Some(s),
            SchemaEntry::Boolean(_) | SchemaEntry::String(_) | SchemaEntry::StringList(_) => None,
        }
    }

    /// Returns the display description.
    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaEntry::Boolean(o) | SchemaEntry::String(o) | SchemaEntry::StringList(o) => {
                o.description.as_deref()
            }
            SchemaEntry::Subcommand(s) => s.description.as_deref(),
        }
    }

    /// Whether the entry is inherited by subcommands.
    pub fn is_global(&self) -> bool {
        self.as_option().is_some_and(|(_, o)| o.global)
    }
}

/// Ordered declaration of every recognized option and subcommand.
///
/// Built once by the caller and shared by reference; parsing never mutates
/// it.
///
/// # Examples
///
/// ```
/// use argv_schema_core::*;
///
/// let schema = OptionSchema::new()
///     .boolean(OptionDescriptor::new("verbose").global())
///     .string(OptionDescriptor::new("output").with_alias("o"))
///     .subcommand(SubcommandDescriptor::new("sync"));
///
/// assert_eq!(schema.len(), 3);
/// assert!(schema.find_subcommand("sync").is_some());
/// assert_eq!(schema.find_option("output").map(|(kind, _)| kind), Some(ValueKind::String));
/// assert_eq!(schema.options().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSchema {
    entries: Vec<SchemaEntry>,
}

impl OptionSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: SchemaEntry) {
        self.entries.push(entry);
    }

    /// Adds a boolean option.
    pub fn boolean(mut self, descriptor: OptionDescriptor) -> Self {
        self.push(SchemaEntry::Boolean(descriptor));
        self
    }

    /// Adds a string option.
    pub fn string(mut self, descriptor: OptionDescriptor) -> Self {
        self.push(SchemaEntry::String(descriptor));
        self
    }

    /// Adds a string-list option.
    pub fn string_list(mut self, descriptor: OptionDescriptor) -> Self {
        self.push(SchemaEntry::StringList(descriptor));
        self
    }

    /// Adds a subcommand.
    pub fn subcommand(mut self, subcommand: SubcommandDescriptor) -> Self {
        self.push(SchemaEntry::Subcommand(subcommand));
        self
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds an entry by id.
    pub fn get(&self, id: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Finds a non-subcommand option by id.
    pub fn find_option(&self, id: &str) -> Option<(ValueKind, &OptionDescriptor)> {
        self.options().find(|(_, o)| o.id == id)
    }

    /// Finds a subcommand by id.
    pub fn find_subcommand(&self, id: &str) -> Option<&SubcommandDescriptor> {
        self.subcommands().find(|s| s.id == id)
    }

    /// Non-subcommand options in declaration order.
    pub fn options(&self) -> impl Iterator<Item = (ValueKind, &OptionDescriptor)> {
        self.entries.iter().filter_map(SchemaEntry::as_option)
    }

    /// Subcommands in declaration order.
    pub fn subcommands(&self) -> impl Iterator<Item = &SubcommandDescriptor> {
        self.entries.iter().filter_map(SchemaEntry::as_subcommand)
    }
}

impl FromIterator<SchemaEntry> for OptionSchema {
    fn from_iter<I: IntoIterator<Item = SchemaEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OptionSchema {
    type Item = &'a SchemaEntry;
    type IntoIter = std::slice::Iter<'a, SchemaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}
