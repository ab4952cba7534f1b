//! Diagnostic sinks.
//!
//! Parsing never fails. Anything unexpected in the input is surfaced through
//! an [`ErrorReporter`] and resolved by the engine: unknown options are
//! dropped, repeated scalars keep the last value, empty values are discarded,
//! and deprecated names migrate onto their canonical id.
//!
//! A reporter may hand out a nested reporter for a detected subcommand, which
//! lets callers namespace diagnostics per subcommand without the engine
//! knowing how they are presented.

use std::fmt;

use tracing::warn;

/// Receives diagnostics produced while parsing.
pub trait ErrorReporter {
    /// A token named an option that is not declared.
    fn on_unknown_option(&mut self, id: &str);

    /// A single-valued option was given several times; `used_value` was kept.
    fn on_multiple_values(&mut self, id: &str, used_value: &str);

    /// An option's value was empty and has been discarded.
    fn on_empty_value(&mut self, id: &str);

    /// A deprecated name or a deprecated option was used.
    fn on_deprecated_option(&mut self, deprecated_id: &str, message: &str);

    /// Reporter for the nested parse of `command`.
    ///
    /// Returning `None` makes the nested parse report nothing.
    fn subcommand_reporter(&mut self, _command: &str) -> Option<Box<dyn ErrorReporter + '_>> {
        None
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &mut R {
    fn on_unknown_option(&mut self, id: &str) {
        (**self).on_unknown_option(id);
    }

    fn on_multiple_values(&mut self, id: &str, used_value: &str) {
        (**self).on_multiple_values(id, used_value);
    }

    fn on_empty_value(&mut self, id: &str) {
        (**self).on_empty_value(id);
    }

    fn on_deprecated_option(&mut self, deprecated_id: &str, message: &str) {
        (**self).on_deprecated_option(deprecated_id, message);
    }

    fn subcommand_reporter(&mut self, command: &str) -> Option<Box<dyn ErrorReporter + '_>> {
        (**self).subcommand_reporter(command)
    }
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoringReporter;

impl ErrorReporter for IgnoringReporter {
    fn on_unknown_option(&mut self, _id: &str) {}
    fn on_multiple_values(&mut self, _id: &str, _used_value: &str) {}
    fn on_empty_value(&mut self, _id: &str) {}
    fn on_deprecated_option(&mut self, _deprecated_id: &str, _message: &str) {}
}

/// One non-fatal observation made during a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Undeclared option id.
    UnknownOption(String),
    /// Option id and the value that was kept.
    MultipleValues(String, String),
    /// Option id whose empty value was discarded.
    EmptyValue(String),
    /// Deprecated name that was used and the migration message.
    DeprecatedOption(String, String),
}

impl Diagnostic {
    /// The option id the diagnostic is about.
    pub fn id(&self) -> &str {
        match self {
            Diagnostic::UnknownOption(id)
            | Diagnostic::MultipleValues(id, _)
            | Diagnostic::EmptyValue(id)
            | Diagnostic::DeprecatedOption(id, _) => id,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownOption(id) => {
                write!(f, "Warning: '{id}' is not in the list of known options.")
            }
            Diagnostic::MultipleValues(id, used) => write!(
                f,
                "Option '{id}' is defined more than once. Using value '{used}'."
            ),
            Diagnostic::EmptyValue(id) => write!(
                f,
                "Option '{id}' requires a non empty value. Ignoring the option."
            ),
            Diagnostic::DeprecatedOption(id, message) => {
                write!(f, "Option '{id}' is deprecated: {message}")
            }
        }
    }
}

/// Records diagnostics in the order they are reported.
///
/// Diagnostics from a subcommand's nested parse are kept in a nested
/// collector keyed by the subcommand id.
///
/// # Examples
///
/// ```
/// use argv_schema_parser::reporter::{CollectingReporter, Diagnostic, ErrorReporter};
///
/// let mut reporter = CollectingReporter::new();
/// reporter.on_unknown_option("bogus");
/// if let Some(mut nested) = reporter.subcommand_reporter("tunnel") {
///     nested.on_empty_value("name");
/// }
///
/// assert_eq!(reporter.diagnostics(), &[Diagnostic::UnknownOption("bogus".into())]);
/// let all = reporter.all();
/// assert_eq!(all[1].0, vec!["tunnel"]);
/// assert_eq!(all[1].1, &Diagnostic::EmptyValue("name".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
    nested: Option<(String, Box<CollectingReporter>)>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics reported at this level only.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The subcommand collector, if a subcommand was parsed.
    pub fn nested(&self) -> Option<(&str, &CollectingReporter)> {
        self.nested
            .as_ref()
            .map(|(command, reporter)| (command.as_str(), reporter.as_ref()))
    }

    /// Every diagnostic with the subcommand path it was reported under.
    pub fn all(&self) -> Vec<(Vec<&str>, &Diagnostic)> {
        let mut all: Vec<_> = self.diagnostics.iter().map(|d| (Vec::new(), d)).collect();
        if let Some((command, nested)) = &self.nested {
            for (mut path, diagnostic) in nested.all() {
                path.insert(0, command.as_str());
                all.push((path, diagnostic));
            }
        }
        all
    }

    /// True when nothing was reported at any level.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty() && self.nested.as_ref().is_none_or(|(_, n)| n.is_empty())
    }
}

impl ErrorReporter for CollectingReporter {
    fn on_unknown_option(&mut self, id: &str) {
        self.diagnostics
            .push(Diagnostic::UnknownOption(id.to_string()));
    }

    fn on_multiple_values(&mut self, id: &str, used_value: &str) {
        self.diagnostics.push(Diagnostic::MultipleValues(
            id.to_string(),
            used_value.to_string(),
        ));
    }

    fn on_empty_value(&mut self, id: &str) {
        self.diagnostics.push(Diagnostic::EmptyValue(id.to_string()));
    }

    fn on_deprecated_option(&mut self, deprecated_id: &str, message: &str) {
        self.diagnostics.push(Diagnostic::DeprecatedOption(
            deprecated_id.to_string(),
            message.to_string(),
        ));
    }

    fn subcommand_reporter(&mut self, command: &str) -> Option<Box<dyn ErrorReporter + '_>> {
        let (_, nested) = self.nested.insert((command.to_string(), Box::default()));
        Some(Box::new(nested.as_mut()))
    }
}

/// Logs diagnostics as warnings and keeps the rendered messages.
///
/// Unknown options inside a subcommand are worded with the subcommand name.
/// Subcommands listed as passthrough forward unknown options to another
/// program, so unknown options are not reported for them; only passthrough
/// subcommands get reporters for their own nested subcommands.
#[derive(Debug, Clone, Default)]
pub struct WarningReporter {
    passthrough: Vec<String>,
    messages: Vec<String>,
}

impl WarningReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subcommands whose unknown options are not reported.
    pub fn with_passthrough_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.passthrough = commands.into_iter().map(Into::into).collect();
        self
    }

    /// Messages emitted so far.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

fn emit(messages: &mut Vec<String>, message: String) {
    warn!("{message}");
    messages.push(message);
}

impl ErrorReporter for WarningReporter {
    fn on_unknown_option(&mut self, id: &str) {
        emit(
            &mut self.messages,
            Diagnostic::UnknownOption(id.to_string()).to_string(),
        );
    }

    fn on_multiple_values(&mut self, id: &str, used_value: &str) {
        emit(
            &mut self.messages,
            Diagnostic::MultipleValues(id.to_string(), used_value.to_string()).to_string(),
        );
    }

    fn on_empty_value(&mut self, id: &str) {
        emit(
            &mut self.messages,
            Diagnostic::EmptyValue(id.to_string()).to_string(),
        );
    }

    fn on_deprecated_option(&mut self, deprecated_id: &str, message: &str) {
        emit(
            &mut self.messages,
            Diagnostic::DeprecatedOption(deprecated_id.to_string(), message.to_string())
                .to_string(),
        );
    }

    fn subcommand_reporter(&mut self, command: &str) -> Option<Box<dyn ErrorReporter + '_>> {
        Some(Box::new(SubcommandWarnings {
            command: command.to_string(),
            passthrough: &self.passthrough,
            messages: &mut self.messages,
        }))
    }
}

struct SubcommandWarnings<'a> {
    command: String,
    passthrough: &'a [String],
    messages: &'a mut Vec<String>,
}

impl SubcommandWarnings<'_> {
    fn is_passthrough(&self) -> bool {
        self.passthrough.contains(&self.command)
    }
}

impl ErrorReporter for SubcommandWarnings<'_> {
    fn on_unknown_option(&mut self, id: &str) {
        if !self.is_passthrough() {
            let message = format!(
                "Warning: '{id}' is not in the list of known options for subcommand '{}'",
                self.command
            );
            emit(self.messages, message);
        }
    }

    fn on_multiple_values(&mut self, id: &str, used_value: &str) {
        emit(
            self.messages,
            Diagnostic::MultipleValues(id.to_string(), used_value.to_string()).to_string(),
        );
    }

    fn on_empty_value(&mut self, id: &str) {
        emit(self.messages, Diagnostic::EmptyValue(id.to_string()).to_string());
    }

    fn on_deprecated_option(&mut self, deprecated_id: &str, message: &str) {
        emit(
            self.messages,
            Diagnostic::DeprecatedOption(deprecated_id.to_string(), message.to_string())
                .to_string(),
        );
    }

    fn subcommand_reporter(&mut self, command: &str) -> Option<Box<dyn ErrorReporter + '_>> {
        if !self.is_passthrough() {
            return None;
        }
        Some(Box::new(SubcommandWarnings {
            command: command.to_string(),
            passthrough: self.passthrough,
            messages: &mut *self.messages,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter_keeps_order() {
        let mut reporter = CollectingReporter::new();
        reporter.on_multiple_values("output", "b");
        reporter.on_unknown_option("bogus");

        assert_eq!(
            reporter.diagnostics(),
            &[
                Diagnostic::MultipleValues("output".into(), "b".into()),
                Diagnostic::UnknownOption("bogus".into()),
            ]
        );
        assert!(reporter.nested().is_none());
        assert!(!reporter.is_empty());
    }

    #[test]
    fn test_collecting_reporter_nested_paths() {
        let mut reporter = CollectingReporter::new();
        {
            let mut tunnel = reporter.subcommand_reporter("tunnel").unwrap();
            let mut user = tunnel.subcommand_reporter("user").unwrap();
            user.on_unknown_option("x");
        }

        let all = reporter.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0, vec!["tunnel", "user"]);
        assert_eq!(reporter.nested().map(|(c, _)| c), Some("tunnel"));
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_empty_nested_collector_is_empty() {
        let mut reporter = CollectingReporter::new();
        drop(reporter.subcommand_reporter("tunnel"));
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_diagnostic_messages() {
        assert_eq!(
            Diagnostic::MultipleValues("locale".into(), "de".into()).to_string(),
            "Option 'locale' is defined more than once. Using value 'de'."
        );
        assert_eq!(
            Diagnostic::EmptyValue("locale".into()).to_string(),
            "Option 'locale' requires a non empty value. Ignoring the option."
        );
        assert_eq!(
            Diagnostic::DeprecatedOption("out".into(), "Use output instead.".into()).to_string(),
            "Option 'out' is deprecated: Use output instead."
        );
        assert_eq!(Diagnostic::EmptyValue("locale".into()).id(), "locale");
    }

    #[test]
    fn test_warning_reporter_words_subcommand_unknowns() {
        let mut reporter = WarningReporter::new();
        reporter.on_unknown_option("bogus");
        if let Some(mut nested) = reporter.subcommand_reporter("status") {
            nested.on_unknown_option("x");
            assert!(nested.subcommand_reporter("deeper").is_none());
        }

        assert_eq!(
            reporter.messages(),
            &[
                "Warning: 'bogus' is not in the list of known options.".to_string(),
                "Warning: 'x' is not in the list of known options for subcommand 'status'"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_warning_reporter_passthrough_silences_unknowns() {
        let mut reporter = WarningReporter::new().with_passthrough_commands(["tunnel"]);
        if let Some(mut nested) = reporter.subcommand_reporter("tunnel") {
            nested.on_unknown_option("x");
            nested.on_empty_value("name");
            let mut deeper = nested.subcommand_reporter("user").unwrap();
            deeper.on_unknown_option("y");
        }

        assert_eq!(
            reporter.into_messages(),
            vec![
                "Option 'name' requires a non empty value. Ignoring the option.".to_string(),
                "Warning: 'y' is not in the list of known options for subcommand 'user'"
                    .to_string(),
            ]
        );
    }
}
