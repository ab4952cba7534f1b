//! Flat flag/value splitting.
//!
//! The tokenizer knows nothing about schemas. It receives the names declared
//! as booleans and strings plus an alias table, and splits raw tokens into a
//! flat name → [`RawValue`] mapping and a list of positional tokens. The
//! engine then applies schema semantics (deprecation, arity, empty values) to
//! that mapping.
//!
//! [`FlagTokenizer`] follows the conventional long-option grammar:
//!
//! - `--` ends option processing; later tokens are positional.
//! - `--name=value` binds inline; for booleans only `false` is false.
//! - `--no-name` negates `name` unless `no-name` is itself declared.
//! - declared booleans swallow a following literal `true` / `false`.
//! - declared strings take the next token unless it looks like a flag, and
//!   the empty string otherwise.
//! - undeclared names take the next non-flag token, or become `true`.
//! - a lone `-` is positional.

use std::collections::{HashMap, HashSet};

/// Raw, untyped value collected for one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Flag(bool),
    Text(String),
    /// A string name seen more than once.
    Texts(Vec<String>),
}

impl RawValue {
    /// Whether the value carries anything: `true`, a non-empty string, or a
    /// list.
    pub fn has_content(&self) -> bool {
        match self {
            RawValue::Flag(b) => *b,
            RawValue::Text(s) => !s.is_empty(),
            RawValue::Texts(_) => true,
        }
    }

    /// Interprets the value as a switch.
    pub fn as_flag(&self) -> bool {
        match self {
            RawValue::Flag(b) => *b,
            RawValue::Text(s) => s != "false",
            RawValue::Texts(values) => values.last().is_none_or(|s| s != "false"),
        }
    }

    /// Flattens the value into strings.
    pub fn into_strings(self) -> Vec<String> {
        match self {
            RawValue::Flag(b) => vec![b.to_string()],
            RawValue::Text(s) => vec![s],
            RawValue::Texts(values) => values,
        }
    }
}

/// Tokenizer output: named values in first-seen order plus positionals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs {
    values: Vec<(String, RawValue)>,
    pub positional: Vec<String>,
}

impl RawArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes and returns the value for `name`.
    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        let index = self.values.iter().position(|(k, _)| k == name)?;
        Some(self.values.remove(index).1)
    }

    /// Remaining names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sets a switch, replacing any earlier value in place.
    pub fn set_flag(&mut self, name: &str, value: bool) {
        match self.slot(name) {
            Some(existing) => *existing = RawValue::Flag(value),
            None => self.values.push((name.to_string(), RawValue::Flag(value))),
        }
    }

    /// Adds a string; repeated strings accumulate into [`RawValue::Texts`].
    pub fn push_text(&mut self, name: &str, value: String) {
        match self.slot(name) {
            Some(existing) => {
                *existing = match std::mem::replace(existing, RawValue::Flag(false)) {
                    RawValue::Text(first) => RawValue::Texts(vec![first, value]),
                    RawValue::Texts(mut values) => {
                        values.push(value);
                        RawValue::Texts(values)
                    }
                    RawValue::Flag(_) => RawValue::Text(value),
                };
            }
            None => self.values.push((name.to_string(), RawValue::Text(value))),
        }
    }

    fn slot(&mut self, name: &str) -> Option<&mut RawValue> {
        self.values
            .iter_mut()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

/// Names the tokenizer must treat specially.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Names that never take a separate value token.
    pub booleans: HashSet<String>,
    /// Names that always take a value.
    pub strings: HashSet<String>,
    /// Alias → canonical name.
    pub aliases: HashMap<String, String>,
}

impl TokenizerOptions {
    /// Resolves an alias to its canonical name.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Whether `name` is declared directly or as an alias.
    pub fn is_declared(&self, name: &str) -> bool {
        self.aliases.contains_key(name) || self.booleans.contains(name) || self.strings.contains(name)
    }

    fn kind_of(&self, canonical: &str) -> NameKind {
        if self.strings.contains(canonical) {
            NameKind::String
        } else if self.booleans.contains(canonical) {
            NameKind::Boolean
        } else {
            NameKind::Undeclared
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameKind {
    Boolean,
    String,
    Undeclared,
}

/// Splits raw tokens into named values and positionals.
///
/// Implementations must fold aliases onto canonical names.
pub trait RawTokenizer {
    fn tokenize(&self, tokens: &[String], options: &TokenizerOptions) -> RawArgs;
}

/// Default flag tokenizer.
///
/// # Examples
///
/// ```
/// use argv_schema_parser::tokenizer::{FlagTokenizer, RawTokenizer, RawValue, TokenizerOptions};
///
/// let mut options = TokenizerOptions::default();
/// options.booleans.insert("wait".into());
/// options.strings.insert("locale".into());
/// options.aliases.insert("w".into(), "wait".into());
///
/// let tokens: Vec<String> = ["-w", "--locale", "de", "file.txt"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let raw = FlagTokenizer.tokenize(&tokens, &options);
///
/// assert_eq!(raw.get("wait"), Some(&RawValue::Flag(true)));
/// assert_eq!(raw.get("locale"), Some(&RawValue::Text("de".into())));
/// assert_eq!(raw.positional, vec!["file.txt"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagTokenizer;

impl RawTokenizer for FlagTokenizer {
    fn tokenize(&self, tokens: &[String], options: &TokenizerOptions) -> RawArgs {
        let mut raw = RawArgs::new();
        let mut iter = tokens.iter().peekable();

        while let Some(token) = iter.next() {
            if token == "--" {
                raw.positional.extend(iter.by_ref().cloned());
                break;
            }

            let Some(body) = flag_body(token) else {
                raw.positional.push(token.clone());
                continue;
            };

            if let Some((name, value)) = body.split_once('=') {
                let name = options.canonical(name);
                match options.kind_of(name) {
                    NameKind::Boolean => raw.set_flag(name, value != "false"),
                    NameKind::String | NameKind::Undeclared => {
                        raw.push_text(name, value.to_string());
                    }
                }
                continue;
            }

            if token.starts_with("--") && !options.is_declared(body) {
                if let Some(negated) = body.strip_prefix("no-") {
                    raw.set_flag(options.canonical(negated), false);
                    continue;
                }
            }

            let name = options.canonical(body);
            match options.kind_of(name) {
                NameKind::Boolean => {
                    let value = match iter.peek().map(|s| s.as_str()) {
                        Some("true") => {
                            iter.next();
                            true
                        }
                        Some("false") => {
                            iter.next();
                            false
                        }
                        _ => true,
                    };
                    raw.set_flag(name, value);
                }
                NameKind::String => {
                    let value = iter.next_if(|next| !looks_like_flag(next)).cloned();
                    raw.push_text(name, value.unwrap_or_default());
                }
                NameKind::Undeclared => match iter.next_if(|next| !looks_like_flag(next)) {
                    Some(value) => raw.push_text(name, value.clone()),
                    None => raw.set_flag(name, true),
                },
            }
        }

        raw
    }
}

/// Strips the leading dashes of a flag token; `None` for positionals.
fn flag_body(token: &str) -> Option<&str> {
    if let Some(body) = token.strip_prefix("--") {
        return (!body.is_empty()).then_some(body);
    }
    token.strip_prefix('-').filter(|body| !body.is_empty())
}

/// True for `--` and tokens shaped like `-x…` or `--x…`.
fn looks_like_flag(token: &str) -> bool {
    if token == "--" {
        return true;
    }
    let mut chars = token.chars();
    if chars.next() != Some('-') {
        return false;
    }
    match chars.next() {
        Some('-') => chars.next().is_some_and(|c| c != '-'),
        Some(_) => true,
        None => false,
    }
}
