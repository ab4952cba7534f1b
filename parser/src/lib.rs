//! Schema-driven argv parsing and help rendering.
//!
//! Given an [`OptionSchema`](argv_schema_core::OptionSchema), this crate
//! turns a raw token list into a typed
//! [`ParsedArgs`](argv_schema_core::ParsedArgs) and renders the same schema
//! as column-aware help text.
//!
//! # Main entry points
//!
//! - [`parse_args`]: parse tokens, surfacing anomalies through an
//!   [`ErrorReporter`].
//! - [`help::format_help`] and [`help::build_help_message`]: render help.
//! - [`SchemaDocument::load`]: read a schema and product metadata from a
//!   YAML or JSON file.
//!
//! # Example
//!
//! ```
//! use argv_schema_parser::{SchemaDocument, parse_args};
//!
//! let document = SchemaDocument::from_yaml_str(r#"
//! product_name: Editor
//! executable_name: edit
//! options:
//!   - { type: boolean, id: verbose, global: true }
//!   - { type: subcommand, id: sync, options: [ { type: string, id: remote } ] }
//! "#).unwrap();
//!
//! let mut reporter = document.warning_reporter();
//! let args = parse_args(&["--verbose", "sync", "--remote", "origin"], &document.options, &mut reporter);
//!
//! let (command, sync) = args.subcommand().unwrap();
//! assert_eq!(command, "sync");
//! assert_eq!(sync.get_bool("verbose"), Some(true));
//! assert_eq!(sync.get_str("remote"), Some("origin"));
//! assert!(reporter.messages().is_empty());
//! ```

pub mod document;
pub mod engine;
pub mod error;
pub mod help;
pub mod output;
pub mod reporter;
pub mod tokenizer;

pub use document::SchemaDocument;
pub use engine::{parse_args, parse_args_with};
pub use error::{LoadError, Result};
pub use help::{HelpCapabilities, HelpRequest, format_help};
pub use output::{OutputFormat, format_parsed};
pub use reporter::{
    CollectingReporter, Diagnostic, ErrorReporter, IgnoringReporter, WarningReporter,
};
