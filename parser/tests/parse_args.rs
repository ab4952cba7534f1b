//! End-to-end parse behavior against a realistic schema.

use argv_schema_core::{
    OptionDescriptor, OptionSchema, ParsedArgs, ParsedValue, SubcommandDescriptor,
};
use argv_schema_parser::{CollectingReporter, Diagnostic, WarningReporter, parse_args};

fn schema() -> OptionSchema {
    OptionSchema::new()
        .boolean(OptionDescriptor::new("verbose").with_alias("v").global())
        .string(OptionDescriptor::new("output").deprecating("out"))
        .string_list(OptionDescriptor::new("tags"))
        .string_list(OptionDescriptor::new("log").with_arg("level").global())
        .string(OptionDescriptor::new("title").allow_empty_value())
        .boolean(OptionDescriptor::new("sandbox"))
        .boolean(OptionDescriptor::new("no-sandbox"))
        .subcommand(
            SubcommandDescriptor::new("sync").with_options(
                OptionSchema::new()
                    .string(OptionDescriptor::new("remote"))
                    .boolean(OptionDescriptor::new("force").with_alias("f")),
            ),
        )
        .subcommand(SubcommandDescriptor::new("status"))
}

fn parse(tokens: &[&str]) -> (ParsedArgs, CollectingReporter) {
    let mut reporter = CollectingReporter::new();
    let args = parse_args(tokens, &schema(), &mut reporter);
    (args, reporter)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_alias_folding() {
    let (args, reporter) = parse(&["-v"]);
    assert_eq!(args.get_bool("verbose"), Some(true));
    assert_eq!(args.len(), 1);
    assert!(reporter.is_empty());
}

#[test]
fn test_deprecation_migration() {
    let (args, reporter) = parse(&["--out", "/tmp/a"]);
    assert_eq!(args.get_str("output"), Some("/tmp/a"));
    assert!(!args.contains("out"));
    assert_eq!(
        reporter.diagnostics(),
        &[Diagnostic::DeprecatedOption(
            "out".into(),
            "Use output instead.".into()
        )]
    );
}

#[test]
fn test_multiple_values_keep_last() {
    let (args, reporter) = parse(&["--output", "a", "--output", "b"]);
    assert_eq!(args.get_str("output"), Some("b"));
    assert_eq!(
        reporter.diagnostics(),
        &[Diagnostic::MultipleValues("output".into(), "b".into())]
    );
}

#[test]
fn test_empty_list_entries_filtered() {
    let (args, reporter) = parse(&["--tags", "", "--tags", "x"]);
    assert_eq!(args.get_list("tags"), Some(&strings(&["x"])[..]));
    assert_eq!(
        reporter.diagnostics(),
        &[Diagnostic::EmptyValue("tags".into())]
    );
}

#[test]
fn test_subcommand_leftmost_wins() {
    let (args, reporter) = parse(&["--verbose", "sync", "status"]);

    assert_eq!(args.len(), 1);
    assert!(args.positional.is_empty());
    let (command, nested) = args.subcommand().unwrap();
    assert_eq!(command, "sync");
    assert_eq!(nested.get_bool("verbose"), Some(true));
    assert_eq!(nested.positional, strings(&["status"]));
    assert!(reporter.is_empty());
}

#[test]
fn test_subcommand_inherits_only_globals() {
    let (args, reporter) = parse(&["sync", "--log", "trace", "--output", "x", "-f"]);

    let (_, nested) = args.subcommand().unwrap();
    assert_eq!(nested.get_list("log"), Some(&strings(&["trace"])[..]));
    assert_eq!(nested.get_bool("force"), Some(true));
    assert!(!nested.contains("output"));

    let (command, sync) = reporter.nested().unwrap();
    assert_eq!(command, "sync");
    assert_eq!(
        sync.diagnostics(),
        &[Diagnostic::UnknownOption("output".into())]
    );
    assert!(reporter.diagnostics().is_empty());
}

#[test]
fn test_unknown_option() {
    let (args, reporter) = parse(&["--bogus"]);
    assert!(args.is_empty());
    assert_eq!(
        reporter.diagnostics(),
        &[Diagnostic::UnknownOption("bogus".into())]
    );
}

#[test]
fn test_result_holds_only_declared_ids() {
    let (args, _) = parse(&[
        "--zzz", "1", "-q", "--output=o", "--tags=a", "--", "--verbose", "file",
    ]);

    let declared = schema();
    for id in args.ids() {
        assert!(declared.find_option(id).is_some(), "undeclared id {id}");
    }
    assert_eq!(args.positional, strings(&["--verbose", "file"]));
    assert_eq!(args.get_bool("verbose"), None);
}

#[test]
fn test_reserialized_result_is_stable() {
    let inputs: &[&[&str]] = &[
        &["-v", "--out", "/tmp/a", "--tags", "", "--tags", "x", "file", ""],
        &["--output", "a", "--output", "b", "--title", "", "--no-verbose"],
        &["--log", "info", "sync", "--remote", "origin", "-", "status"],
        &["--tags=a", "--tags=b", "--", "--not-a-flag"],
        &["--sandbox=false"],
        &["--sandbox", "false", "--no-sandbox"],
    ];

    for tokens in inputs {
        let (first, _) = parse(tokens);
        let canonical = first.to_tokens();

        let (second, reporter) = parse(
            &canonical.iter().map(String::as_str).collect::<Vec<_>>(),
        );
        assert_eq!(second, first, "tokens {canonical:?}");
        assert!(
            reporter.all().iter().all(|(_, d)| matches!(d, Diagnostic::UnknownOption(_))),
            "unexpected diagnostics for {canonical:?}: {:?}",
            reporter.all()
        );
    }
}

#[test]
fn test_allow_empty_value_keeps_empty_string() {
    let (args, reporter) = parse(&["--title="]);
    assert_eq!(args.get("title"), Some(&ParsedValue::String(String::new())));
    assert!(reporter.is_empty());
}

#[test]
fn test_diagnostic_order_follows_schema_then_leftovers() {
    let (_, reporter) = parse(&["--bogus", "--tags=", "--output=a", "--output=b", "--out=c"]);
    assert_eq!(
        reporter.diagnostics(),
        &[
            Diagnostic::MultipleValues("output".into(), "b".into()),
            Diagnostic::EmptyValue("tags".into()),
            Diagnostic::UnknownOption("bogus".into()),
        ]
    );
}

#[test]
fn test_warning_reporter_messages() {
    let mut reporter = WarningReporter::new().with_passthrough_commands(["status"]);
    parse_args(&["--bogus", "sync", "--nope"], &schema(), &mut reporter);
    assert_eq!(
        reporter.messages(),
        &[
            "Warning: 'bogus' is not in the list of known options for subcommand 'sync'"
                .to_string(),
            "Warning: 'nope' is not in the list of known options for subcommand 'sync'"
                .to_string(),
        ]
    );

    let mut reporter = WarningReporter::new().with_passthrough_commands(["status"]);
    parse_args(&["status", "--anything"], &schema(), &mut reporter);
    assert!(reporter.messages().is_empty());
}
