//! Schema-driven parse engine.
//!
//! [`parse_args`] turns a raw token list into a [`ParsedArgs`] in four
//! steps: subcommand detection, flat tokenization, per-option resolution in
//! schema order, and unknown-option reporting for whatever is left over.
//! Anomalies never abort the parse; they are handed to the reporter and
//! resolved on the spot.

use argv_schema_core::{
    OptionDescriptor, OptionSchema, ParsedArgs, ParsedValue, SchemaEntry, SubcommandDescriptor,
    ValueKind, effective_subcommand_schema,
};
use tracing::{debug, trace};

use crate::reporter::{ErrorReporter, IgnoringReporter};
use crate::tokenizer::{FlagTokenizer, RawArgs, RawTokenizer, RawValue, TokenizerOptions};

/// Parses `tokens` against `schema` with the default [`FlagTokenizer`].
///
/// Parsing is total: unknown options, repeated scalars, empty values and
/// deprecated names are reported through `reporter` and resolved, and a
/// best-effort result is always returned.
///
/// # Examples
///
/// ```
/// use argv_schema_core::{OptionDescriptor, OptionSchema};
/// use argv_schema_parser::{CollectingReporter, Diagnostic, parse_args};
///
/// let schema = OptionSchema::new()
///     .boolean(OptionDescriptor::new("verbose").with_alias("v"))
///     .string(OptionDescriptor::new("output").deprecating("out"));
///
/// let mut reporter = CollectingReporter::new();
/// let args = parse_args(&["-v", "--out", "/tmp/a", "notes.md"], &schema, &mut reporter);
///
/// assert_eq!(args.get_bool("verbose"), Some(true));
/// assert_eq!(args.get_str("output"), Some("/tmp/a"));
/// assert_eq!(args.positional, vec!["notes.md"]);
/// assert_eq!(
///     reporter.diagnostics(),
///     &[Diagnostic::DeprecatedOption("out".into(), "Use output instead.".into())]
/// );
/// ```
pub fn parse_args<S: AsRef<str>>(
    tokens: &[S],
    schema: &OptionSchema,
    reporter: &mut (dyn ErrorReporter + '_),
) -> ParsedArgs {
    parse_args_with(&FlagTokenizer, tokens, schema, reporter)
}

/// Parses `tokens` against `schema`, splitting flags with `tokenizer`.
pub fn parse_args_with<T, S>(
    tokenizer: &T,
    tokens: &[S],
    schema: &OptionSchema,
    reporter: &mut (dyn ErrorReporter + '_),
) -> ParsedArgs
where
    T: RawTokenizer + ?Sized,
    S: AsRef<str>,
{
    let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
    parse_tokens(tokenizer, tokens, schema, reporter)
}

fn parse_tokens<T: RawTokenizer + ?Sized>(
    tokenizer: &T,
    mut tokens: Vec<String>,
    schema: &OptionSchema,
    reporter: &mut (dyn ErrorReporter + '_),
) -> ParsedArgs {
    if let Some((index, subcommand)) = find_subcommand(&tokens, schema) {
        debug!(
            command = %subcommand.id,
            position = index,
            "detected subcommand"
        );
        tokens.remove(index);
        let effective = effective_subcommand_schema(schema, subcommand);

        let mut nested_reporter = reporter.subcommand_reporter(&subcommand.id);
        let nested = match nested_reporter.as_deref_mut() {
            Some(nested_reporter) => {
                parse_tokens(tokenizer, tokens, &effective, nested_reporter)
            }
            None => parse_tokens(tokenizer, tokens, &effective, &mut IgnoringReporter),
        };
        return ParsedArgs::for_subcommand(&subcommand.id, nested);
    }

    let options = tokenizer_options(schema);
    let mut raw = tokenizer.tokenize(&tokens, &options);
    debug!(
        tokens = tokens.len(),
        named = raw.len(),
        positional = raw.positional.len(),
        "tokenized arguments"
    );

    let mut parsed = ParsedArgs::new();
    parsed.positional = std::mem::take(&mut raw.positional)
        .into_iter()
        .filter(|token| !token.is_empty())
        .collect();

    for entry in schema.iter() {
        let Some((kind, option)) = entry.as_option() else {
            continue;
        };
        if let Some(value) = resolve_option(kind, option, &mut raw, reporter) {
            trace!(id = %option.id, value = ?value, "stored option");
            parsed.insert(&option.id, value);
            if let Some(message) = &option.deprecation_message {
                reporter.on_deprecated_option(&option.id, message);
            }
        }
    }

    for name in raw.names() {
        reporter.on_unknown_option(name);
    }

    parsed
}

/// Leftmost token naming a subcommand of `schema`.
fn find_subcommand<'s>(
    tokens: &[String],
    schema: &'s OptionSchema,
) -> Option<(usize, &'s SubcommandDescriptor)> {
    tokens.iter().enumerate().find_map(|(index, token)| {
        if token.is_empty() || token.starts_with('-') {
            return None;
        }
        schema.find_subcommand(token).map(|sub| (index, sub))
    })
}

/// Declared-name sets handed to the tokenizer.
fn tokenizer_options(schema: &OptionSchema) -> TokenizerOptions {
    let mut options = TokenizerOptions::default();
    for entry in schema.iter() {
        let (names, option) = match entry {
            SchemaEntry::Boolean(o) => (&mut options.booleans, o),
            SchemaEntry::String(o) | SchemaEntry::StringList(o) => (&mut options.strings, o),
            SchemaEntry::Subcommand(_) => continue,
        };
        names.insert(option.id.clone());
        names.extend(option.deprecates.iter().cloned());
        if let Some(alias) = &option.alias {
            options.aliases.insert(alias.clone(), option.id.clone());
        }
    }
    options
}

/// Pulls one option's raw value out of `raw` and coerces it to its kind.
///
/// Every name belonging to the option (alias, id, deprecated ids) is removed
/// from `raw`, whether or not it contributed the value.
fn resolve_option(
    kind: ValueKind,
    option: &OptionDescriptor,
    raw: &mut RawArgs,
    reporter: &mut (dyn ErrorReporter + '_),
) -> Option<ParsedValue> {
    if let Some(alias) = &option.alias {
        raw.remove(alias);
    }
    let mut value = raw.remove(&option.id);

    for deprecated in &option.deprecates {
        let Some(legacy) = raw.remove(deprecated) else {
            continue;
        };
        if value.is_none() {
            if legacy.has_content() {
                let fallback;
                let message = match &option.deprecation_message {
                    Some(message) => message.as_str(),
                    None => {
                        fallback = format!("Use {} instead.", option.id);
                        fallback.as_str()
                    }
                };
                reporter.on_deprecated_option(deprecated, message);
            }
            value = Some(legacy);
        }
    }

    let value = value?;
    match kind {
        ValueKind::Boolean => Some(ParsedValue::Bool(value.as_flag())),
        ValueKind::String => coerce_string(option, value, reporter).map(ParsedValue::String),
        ValueKind::StringList => coerce_list(option, value, reporter).map(ParsedValue::List),
    }
}

fn coerce_string(
    option: &OptionDescriptor,
    value: RawValue,
    reporter: &mut (dyn ErrorReporter + '_),
) -> Option<String> {
    let value = match value {
        RawValue::Texts(mut values) => {
            let last = values.pop().unwrap_or_default();
            reporter.on_multiple_values(&option.id, &last);
            last
        }
        RawValue::Text(value) => value,
        // `--no-<id>` on a string option carries no value.
        RawValue::Flag(_) => String::new(),
    };

    if value.is_empty() && !option.allow_empty_value {
        reporter.on_empty_value(&option.id);
        return None;
    }
    Some(value)
}

fn coerce_list(
    option: &OptionDescriptor,
    value: RawValue,
    reporter: &mut (dyn ErrorReporter + '_),
) -> Option<Vec<String>> {
    let values = match value {
        RawValue::Flag(_) => vec![String::new()],
        value => value.into_strings(),
    };
    if option.allow_empty_value {
        return Some(values);
    }

    let count = values.len();
    let kept: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
    if kept.len() != count {
        reporter.on_empty_value(&option.id);
    }
    (!kept.is_empty()).then_some(kept)
}
