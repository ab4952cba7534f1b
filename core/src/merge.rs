//! Effective schema construction for subcommands.
//!
//! A subcommand parses against its own declared entries plus every option
//! of the enclosing schema marked `global`. [`effective_subcommand_schema`]
//! builds that combined scope.
//!
//! # Example
//!
//! ```
//! use argv_schema_core::*;
//!
//! let outer = OptionSchema::new()
//!     .boolean(OptionDescriptor::new("verbose").global())
//!     .boolean(OptionDescriptor::new("wait"));
//! let tunnel = SubcommandDescriptor::new("tunnel")
//!     .with_options(OptionSchema::new().string(OptionDescriptor::new("name")));
//!
//! let effective = effective_subcommand_schema(&outer, &tunnel);
//! let ids: Vec<_> = effective.iter().map(SchemaEntry::id).collect();
//! assert_eq!(ids, vec!["verbose", "name"]);
//! ```

use std::collections::HashSet;

use crate::{OptionSchema, SchemaEntry, SubcommandDescriptor};

/// Builds the scope a subcommand's tokens are parsed against.
///
/// Outer global options come first in outer declaration order, followed by
/// the subcommand's own entries. When both declare the same id the outer
/// global option wins and the subcommand's entry is dropped.
pub fn effective_subcommand_schema(
    outer: &OptionSchema,
    subcommand: &SubcommandDescriptor,
) -> OptionSchema {
    let globals: Vec<&SchemaEntry> = outer.iter().filter(|e| e.is_global()).collect();
    let global_ids: HashSet<&str> = globals.iter().map(|e| e.id()).collect();

    globals
        .into_iter()
        .cloned()
        .chain(
            subcommand
                .options
                .iter()
                .filter(|e| !global_ids.contains(e.id()))
                .cloned(),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{OptionDescriptor, ValueKind};

    use super::*;

    #[test]
    fn test_outer_global_wins_on_collision() {
        let outer = OptionSchema::new().string_list(
            OptionDescriptor::new("log").with_arg("level").global(),
        );
        let sub = SubcommandDescriptor::new("tunnel").with_options(
            OptionSchema::new()
                .boolean(OptionDescriptor::new("log"))
                .boolean(OptionDescriptor::new("force")),
        );

        let effective = effective_subcommand_schema(&outer, &sub);
        assert_eq!(effective.len(), 2);
        let (kind, log) = effective.find_option("log").unwrap();
        assert_eq!(kind, ValueKind::StringList);
        assert_eq!(log.args, vec!["level"]);
    }

    #[test]
    fn test_non_global_outer_entries_are_not_inherited() {
        let outer = OptionSchema::new()
            .boolean(OptionDescriptor::new("wait"))
            .subcommand(SubcommandDescriptor::new("serve-web"));
        let sub = SubcommandDescriptor::new("tunnel");

        assert!(effective_subcommand_schema(&outer, &sub).is_empty());
    }

    #[test]
    fn test_nested_subcommands_are_kept() {
        let outer = OptionSchema::new();
        let sub = SubcommandDescriptor::new("tunnel").with_options(
            OptionSchema::new().subcommand(SubcommandDescriptor::new("user")),
        );

        let effective = effective_subcommand_schema(&outer, &sub);
        assert!(effective.find_subcommand("user").is_some());
    }
}
