//! Core option schema types and shared primitives.
//!
//! This crate defines the declarative model behind schema-driven argument
//! parsing:
//!
//! - [`OptionSchema`]: ordered declaration of every recognized option and
//!   subcommand.
//! - [`SchemaEntry`]: one declared entry, either an option
//!   ([`OptionDescriptor`]) or a subcommand ([`SubcommandDescriptor`]) with
//!   its own nested schema.
//! - [`ParsedArgs`]: the typed, clean result a parse produces.
//!
//! Validation ([`validate_schema`]) catches structural errors such as
//! duplicate ids, aliases shadowing ids, and deprecated ids that are still
//! declared. [`effective_subcommand_schema`] builds the scope a subcommand
//! is parsed against, including inherited global options.
//!
//! # Example
//!
//! ```
//! use argv_schema_core::*;
//!
//! let schema = OptionSchema::new()
//!     .boolean(
//!         OptionDescriptor::new("verbose")
//!             .with_description("Print verbose output.")
//!             .in_category(HelpCategory::Troubleshooting)
//!             .global(),
//!     )
//!     .string(OptionDescriptor::new("locale").with_arg("locale"))
//!     .subcommand(
//!         SubcommandDescriptor::new("tunnel").with_options(
//!             OptionSchema::new().string(OptionDescriptor::new("name")),
//!         ),
//!     );
//!
//! assert!(validate_schema(&schema).is_empty());
//! let tunnel = schema.find_subcommand("tunnel").unwrap();
//! assert_eq!(effective_subcommand_schema(&schema, tunnel).len(), 2);
//! ```

mod merge;
mod parsed;
mod types;
mod validate;

pub use merge::effective_subcommand_schema;
pub use parsed::{ParsedArgs, ParsedValue};
pub use types::*;
pub use validate::{ValidationError, validate_schema};
