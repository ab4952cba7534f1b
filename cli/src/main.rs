use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use argv_schema_parser::help::build_help_message;
use argv_schema_parser::{
    HelpCapabilities, LoadError, OutputFormat, SchemaDocument, format_parsed, parse_args,
};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_COLUMNS: usize = 80;
/// Exit status of `parse --strict` when any diagnostic was reported.
const STRICT_EXIT_CODE: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "argv-schema", disable_help_subcommand = true)]
#[command(about = "Parse arguments and render help from a declarative option schema")]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens given after `--` against a schema document.
    Parse(ParseArgs),
    /// Print the help page of a schema document.
    Help(HelpArgs),
    /// Validate one or more schema documents.
    Validate(ValidateArgs),
    /// Print the version message of a schema document.
    Version(VersionArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema document (YAML, or JSON by `.json` extension).
    #[arg(long)]
    schema: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Exit with status 2 if any diagnostic is reported.
    #[arg(long)]
    strict: bool,
    /// Tokens to parse.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Schema document (YAML, or JSON by `.json` extension).
    #[arg(long)]
    schema: PathBuf,
    /// Terminal width (default: $COLUMNS, then 80).
    #[arg(long)]
    columns: Option<usize>,
    /// Omit the read-from-stdin hint.
    #[arg(long)]
    no_pipe: bool,
    /// Omit the positional paths hint.
    #[arg(long)]
    no_input_files: bool,
    /// Render usage for the chat subcommand.
    #[arg(long)]
    chat: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema documents to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct VersionArgs {
    /// Schema document (YAML, or JSON by `.json` extension).
    #[arg(long)]
    schema: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Validate(args) => run_validate(args),
        Command::Version(args) => run_version(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let document = load_document(&args.schema)?;
    let mut reporter = document.warning_reporter();

    let parsed = parse_args(args.tokens.as_slice(), &document.options, &mut reporter);
    print_block(&format_parsed(&parsed, args.format)?);

    let reported = reporter.messages().len();
    debug!(diagnostics = reported, "parse finished");
    if args.strict && reported > 0 {
        eprintln!("error: {reported} diagnostic(s) reported");
        std::process::exit(STRICT_EXIT_CODE);
    }
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let document = load_document(&args.schema)?;
    let columns = args.columns.unwrap_or_else(terminal_columns);
    let request = document
        .help_request(columns)
        .with_capabilities(HelpCapabilities {
            no_pipe: args.no_pipe,
            no_input_files: args.no_input_files,
            is_chat: args.chat,
        });

    print_block(&build_help_message(&request));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failed = 0;
    for path in &args.inputs {
        match SchemaDocument::load(path) {
            Ok(document) => debug!(
                path = %path.display(),
                entries = document.options.len(),
                "schema is valid"
            ),
            Err(LoadError::InvalidSchema(errors)) => {
                failed += 1;
                for error in errors {
                    eprintln!("{}: {error}", path.display());
                }
            }
            Err(err) => {
                failed += 1;
                eprintln!("{}: {err}", path.display());
            }
        }
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} schema file(s) failed validation",
            args.inputs.len()
        ));
    }
    println!("Validated {} schema file(s).", args.inputs.len());
    Ok(())
}

fn run_version(args: VersionArgs) -> Result<(), String> {
    let document = load_document(&args.schema)?;
    println!("{}", document.version_message());
    Ok(())
}

fn load_document(path: &Path) -> Result<SchemaDocument, String> {
    SchemaDocument::load(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

/// Width from `$COLUMNS`, else 80.
fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .filter(|&columns| columns > 0)
        .unwrap_or(DEFAULT_COLUMNS)
}

fn print_block(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}
