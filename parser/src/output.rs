//! Output formatting for parse results.

use argv_schema_core::{POSITIONAL_KEY, ParsedArgs, ParsedValue};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Text,
}

/// Formats a parse result in the requested output format.
pub fn format_parsed(args: &ParsedArgs, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(args)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(args).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(parsed_to_text(args)),
    }
}

/// One `id = value` line per entry, subcommands indented beneath their id.
fn parsed_to_text(args: &ParsedArgs) -> String {
    let mut out = String::new();
    write_text(&mut out, args, 0);
    out
}

fn write_text(out: &mut String, args: &ParsedArgs, depth: usize) {
    let pad = "  ".repeat(depth);

    if !args.positional.is_empty() {
        out.push_str(&format!(
            "{pad}{POSITIONAL_KEY} = {}\n",
            quote_all(&args.positional)
        ));
    }

    for (id, value) in args.iter() {
        match value {
            ParsedValue::Bool(b) => out.push_str(&format!("{pad}{id} = {b}\n")),
            ParsedValue::String(s) => out.push_str(&format!("{pad}{id} = {s:?}\n")),
            ParsedValue::List(values) => {
                out.push_str(&format!("{pad}{id} = {}\n", quote_all(values)));
            }
            ParsedValue::Subcommand(nested) => {
                out.push_str(&format!("{pad}{id}:\n"));
                write_text(out, nested, depth + 1);
            }
        }
    }
}

fn quote_all(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedArgs {
        let mut nested = ParsedArgs::new();
        nested.insert("name", ParsedValue::String("box".into()));
        nested.insert("verbose", ParsedValue::Bool(true));
        nested.positional.push("extra".into());
        ParsedArgs::for_subcommand("tunnel", nested)
    }

    #[test]
    fn test_text_output_nests_subcommands() {
        let text = format_parsed(&sample(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "tunnel:\n  _ = [\"extra\"]\n  name = \"box\"\n  verbose = true\n"
        );
    }

    #[test]
    fn test_json_output() {
        let json = format_parsed(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["_"], serde_json::json!([]));
        assert_eq!(value["tunnel"]["name"], "box");
        assert_eq!(value["tunnel"]["_"], serde_json::json!(["extra"]));
    }

    #[test]
    fn test_yaml_output() {
        let mut args = ParsedArgs::new();
        args.insert("tags", ParsedValue::List(vec!["a".into(), "b".into()]));

        let yaml = format_parsed(&args, OutputFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["tags"][1], serde_yaml::Value::from("b"));
    }
}
