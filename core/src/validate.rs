//! Schema validation.
//!
//! Checks the structural invariants of an [`OptionSchema`]: unique ids,
//! unique well-formed aliases that do not shadow ids, and deprecated ids that
//! are not declared in their own right. Nested subcommand schemas are checked
//! in their own scope.
//!
//! Validation is advisory. The parser never validates and never fails; a
//! caller that loads schemas from documents runs this once up front.
//!
//! # Examples
//!
//! ```
//! use argv_schema_core::*;
//!
//! let schema = OptionSchema::new()
//!     .boolean(OptionDescriptor::new("verbose").with_alias("v"));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: alias shadows a declared id
//! let bad = OptionSchema::new()
//!     .boolean(OptionDescriptor::new("sandbox"))
//!     .boolean(OptionDescriptor::new("no-sandbox").with_alias("sandbox"));
//! assert!(!validate_schema(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{OptionSchema, POSITIONAL_KEY};

/// Schema validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An entry has an empty or whitespace-only id.
    #[error("option id cannot be empty")]
    EmptyId,
    /// An entry uses the id reserved for positional arguments.
    #[error("option id is reserved for positional arguments: {0}")]
    ReservedId(String),
    /// Two entries in the same scope share an id.
    #[error("duplicate option id in scope: {0}")]
    DuplicateId(String),
    /// Alias is empty, starts with a dash, or contains whitespace.
    #[error("invalid alias '{alias}' for option {id}")]
    InvalidAlias { id: String, alias: String },
    /// Two options in the same scope share an alias.
    #[error("duplicate alias in scope: {0}")]
    DuplicateAlias(String),
    /// An alias equals the id of a declared entry.
    #[error("alias '{alias}' of option {id} collides with a declared option id")]
    AliasShadowsId { id: String, alias: String },
    /// A legacy id is also declared as an entry of the same scope.
    #[error("deprecated id '{deprecated}' of option {id} is declared in the same scope")]
    DeprecatedIdDeclared { id: String, deprecated: String },
    /// An error found inside a subcommand's nested schema.
    #[error("in subcommand '{path}': {error}")]
    InSubcommand {
        path: String,
        error: Box<ValidationError>,
    },
}

/// Validates a schema and all nested subcommand schemas.
///
/// Returns every problem found, outer scope first.
///
/// # Examples
///
/// ```
/// use argv_schema_core::*;
///
/// let schema = OptionSchema::new()
///     .string(OptionDescriptor::new("output").deprecating("out"))
///     .subcommand(SubcommandDescriptor::new("tunnel").with_options(
///         OptionSchema::new()
///             .boolean(OptionDescriptor::new("force"))
///             .boolean(OptionDescriptor::new("force")),
///     ));
///
/// let errors = validate_schema(&schema);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(
///     errors[0].to_string(),
///     "in subcommand 'tunnel': duplicate option id in scope: force"
/// );
/// ```
pub fn validate_schema(schema: &OptionSchema) -> Vec<ValidationError> {
    let mut path = Vec::new();
    let mut errors = Vec::new();
    validate_scope(schema, &mut path, &mut errors);
    errors
}

fn validate_scope(
    schema: &OptionSchema,
    path: &mut Vec<String>,
    errors: &mut Vec<ValidationError>,
) {
    let mut report = |error: ValidationError| {
        errors.push(if path.is_empty() {
            error
        } else {
            ValidationError::InSubcommand {
                path: path.join(" "),
                error: Box::new(error),
            }
        });
    };

    let mut ids: HashSet<&str> = HashSet::new();
    for entry in schema {
        let id = entry.id();
        if id.trim().is_empty() {
            report(ValidationError::EmptyId);
        } else if id == POSITIONAL_KEY {
            report(ValidationError::ReservedId(id.to_string()));
        } else if !ids.insert(id) {
            report(ValidationError::DuplicateId(id.to_string()));
        }
    }

    let mut aliases: HashSet<&str> = HashSet::new();
    for (_, option) in schema.options() {
        if let Some(alias) = option.alias.as_deref() {
            if !is_valid_alias(alias) {
                report(ValidationError::InvalidAlias {
                    id: option.id.clone(),
                    alias: alias.to_string(),
                });
            } else if !aliases.insert(alias) {
                report(ValidationError::DuplicateAlias(alias.to_string()));
            } else if ids.contains(alias) {
                report(ValidationError::AliasShadowsId {
                    id: option.id.clone(),
                    alias: alias.to_string(),
                });
            }
        }

        for deprecated in &option.deprecates {
            if ids.contains(deprecated.as_str()) {
                report(ValidationError::DeprecatedIdDeclared {
                    id: option.id.clone(),
                    deprecated: deprecated.clone(),
                });
            }
        }
    }

    for subcommand in schema.subcommands() {
        path.push(subcommand.id.clone());
        validate_scope(&subcommand.options, path, errors);
        path.pop();
    }
}

fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty() && !alias.starts_with('-') && !alias.chars().any(char::is_whitespace)
}
