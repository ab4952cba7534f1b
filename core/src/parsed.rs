//! Typed result of a parse.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::POSITIONAL_KEY;

/// Final value of one option in a [`ParsedArgs`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ParsedValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
    /// Result of the nested parse of a detected subcommand.
    Subcommand(ParsedArgs),
}

/// Clean, typed result of parsing a token list against a schema.
///
/// Entries keep the order in which they were stored, which is the schema's
/// declaration order. Positional tokens live in [`positional`](Self::positional)
/// and serialize under the reserved `_` key.
///
/// # Examples
///
/// ```
/// use argv_schema_core::{ParsedArgs, ParsedValue};
///
/// let mut args = ParsedArgs::new();
/// args.insert("verbose", ParsedValue::Bool(true));
/// args.insert("output", ParsedValue::String("/tmp/a".into()));
/// args.positional.push("file.txt".into());
///
/// assert_eq!(args.get_bool("verbose"), Some(true));
/// assert_eq!(args.get_str("output"), Some("/tmp/a"));
/// assert_eq!(args.to_tokens(), vec!["--verbose", "--output=/tmp/a", "--", "file.txt"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    entries: Vec<(String, ParsedValue)>,
    /// Non-option tokens in encounter order.
    pub positional: Vec<String>,
}

impl ParsedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a nested result under its subcommand id.
    ///
    /// The outer positional list is always empty.
    pub fn for_subcommand(command: &str, nested: ParsedArgs) -> Self {
        Self {
            entries: vec![(command.to_string(), ParsedValue::Subcommand(nested))],
            positional: Vec::new(),
        }
    }

    /// Stores a value, replacing any previous value for `id` in place.
    pub fn insert(&mut self, id: &str, value: ParsedValue) {
        match self.entries.iter_mut().find(|(k, _)| k == id) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((id.to_string(), value)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ParsedValue> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get_bool(&self, id: &str) -> Option<bool> {
        match self.get(id)? {
            ParsedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_str(&self, id: &str) -> Option<&str> {
        match self.get(id)? {
            ParsedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_list(&self, id: &str) -> Option<&[String]> {
        match self.get(id)? {
            ParsedValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the detected subcommand and its nested result, if any.
    pub fn subcommand(&self) -> Option<(&str, &ParsedArgs)> {
        self.entries.iter().find_map(|(k, v)| match v {
            ParsedValue::Subcommand(nested) => Some((k.as_str(), nested)),
            _ => None,
        })
    }

    /// Stored ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParsedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored options, not counting positionals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no option was stored and no positional was collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.positional.is_empty()
    }

    /// Re-serializes the result into canonical tokens.
    ///
    /// Feeding the tokens back through the parser with the same schema
    /// reproduces this result. Booleans become `--id` / `--id=false`
    /// (a `--no-id` spelling would bind to a declared `no-id` option), every
    /// string value is bound with `=`, and positionals follow a `--`
    /// separator so they are never mistaken for flags.
    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for (id, value) in &self.entries {
            match value {
                ParsedValue::Bool(true) => tokens.push(format!("--{id}")),
                ParsedValue::Bool(false) => tokens.push(format!("--{id}=false")),
                ParsedValue::String(v) => tokens.push(format!("--{id}={v}")),
                ParsedValue::List(values) => {
                    tokens.extend(values.iter().map(|v| format!("--{id}={v}")));
                }
                ParsedValue::Subcommand(nested) => {
                    tokens.push(id.clone());
                    tokens.extend(nested.to_tokens());
                }
            }
        }
        if !self.positional.is_empty() {
            tokens.push("--".to_string());
            tokens.extend(self.positional.iter().cloned());
        }
        tokens
    }
}

impl Serialize for ParsedArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        map.serialize_entry(POSITIONAL_KEY, &self.positional)?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}
