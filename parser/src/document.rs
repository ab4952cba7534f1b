//! Schema documents.
//!
//! A schema document bundles an [`OptionSchema`] with the product metadata
//! needed to render help and version text. Documents are YAML by default;
//! files ending in `.json` are read and written as JSON.
//!
//! # Example YAML
//!
//! ```yaml
//! product_name: Editor
//! executable_name: edit
//! version: "1.0.0"
//! passthrough_commands: [tunnel]
//! options:
//!   - type: boolean
//!     id: wait
//!     alias: w
//!     description: Wait for the files to be closed before returning.
//!     category: o
//!   - type: string[]
//!     id: log
//!     args: level
//!     global: true
//!   - type: subcommand
//!     id: tunnel
//!     description: Make the current machine accessible remotely.
//!     options:
//!       - type: string
//!         id: name
//! ```

use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use argv_schema_core::{OptionSchema, validate_schema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LoadError, Result};
use crate::help::{HelpRequest, build_version_message};
use crate::reporter::WarningReporter;

/// A schema plus the product metadata shown in help output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub product_name: String,
    pub executable_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Subcommands that forward unknown options to another program.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub passthrough_commands: Vec<String>,
    #[serde(default)]
    pub options: OptionSchema,
}

impl SchemaDocument {
    /// Loads and validates a document, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](LoadError::IoError) if the file cannot be read,
    /// [`JsonError`](LoadError::JsonError) or
    /// [`YamlError`](LoadError::YamlError) if it does not parse, and
    /// [`InvalidSchema`](LoadError::InvalidSchema) if the schema fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let document: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        debug!(
            path = %path.display(),
            entries = document.options.len(),
            "loaded schema document"
        );
        document.validated()
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let document: Self = serde_yaml::from_str(yaml)?;
        document.validated()
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validated()
    }

    /// Writes the document, choosing the format by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_yaml::to_writer(&mut writer, self)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Help request for this document at the given terminal width.
    pub fn help_request(&self, columns: usize) -> HelpRequest<'_> {
        HelpRequest::new(
            &self.product_name,
            &self.executable_name,
            self.version.as_deref().unwrap_or(""),
            &self.options,
        )
        .with_columns(columns)
    }

    pub fn version_message(&self) -> String {
        build_version_message(self.version.as_deref(), self.commit.as_deref())
    }

    /// Reporter that logs diagnostics and knows the passthrough subcommands.
    pub fn warning_reporter(&self) -> WarningReporter {
        WarningReporter::new().with_passthrough_commands(self.passthrough_commands.iter().cloned())
    }

    fn validated(self) -> Result<Self> {
        let errors = validate_schema(&self.options);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(LoadError::InvalidSchema(errors))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
