//! Help and version text rendering.
//!
//! Help output is derived from the schema alone. Options are grouped by
//! [`HelpCategory`] and laid out in two columns, usage on the left and a
//! word-wrapped description on the right. On narrow terminals the layout
//! condenses to two lines per option.

use argv_schema_core::{HelpCategory, OptionDescriptor, OptionSchema};

/// Smallest usage column width, before padding.
const MIN_USAGE_WIDTH: usize = 12;
/// Description columns below which the condensed layout is used.
const MIN_DESCRIPTION_WIDTH: usize = 25;
const LEFT_PADDING: usize = 2;
const RIGHT_PADDING: usize = 1;
const DEFAULT_COLUMNS: usize = 80;

/// Switches that trim the usage synopsis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpCapabilities {
    /// Omit the read-from-stdin hint.
    pub no_pipe: bool,
    /// Omit the trailing positional hint.
    pub no_input_files: bool,
    /// Render usage for the `chat` subcommand.
    pub is_chat: bool,
}

/// Everything needed to render a help page.
///
/// # Examples
///
/// ```
/// use argv_schema_core::{HelpCategory, OptionDescriptor, OptionSchema};
/// use argv_schema_parser::help::{HelpCapabilities, HelpRequest, build_help_message};
///
/// let schema = OptionSchema::new().boolean(
///     OptionDescriptor::new("wait")
///         .with_alias("w")
///         .with_description("Wait for the files to be closed before returning.")
///         .in_category(HelpCategory::Options),
/// );
///
/// let help = build_help_message(
///     &HelpRequest::new("Editor", "edit", "1.0.0", &schema)
///         .with_columns(80)
///         .with_capabilities(HelpCapabilities { no_pipe: true, ..Default::default() }),
/// );
///
/// assert!(help.starts_with("Editor 1.0.0\n\nUsage: edit [options] [paths...]\n"));
/// assert!(help.contains("  -w --wait    Wait for the files to be closed before returning.\n"));
/// ```
#[derive(Debug, Clone)]
pub struct HelpRequest<'a> {
    pub product_name: &'a str,
    pub executable_name: &'a str,
    pub version: &'a str,
    pub schema: &'a OptionSchema,
    /// Terminal width in characters.
    pub columns: usize,
    pub capabilities: HelpCapabilities,
    /// Category blocks in rendering order.
    pub categories: Vec<HelpCategory>,
}

impl<'a> HelpRequest<'a> {
    pub fn new(
        product_name: &'a str,
        executable_name: &'a str,
        version: &'a str,
        schema: &'a OptionSchema,
    ) -> Self {
        Self {
            product_name,
            executable_name,
            version,
            schema,
            columns: DEFAULT_COLUMNS,
            capabilities: HelpCapabilities::default(),
            categories: HelpCategory::ALL.to_vec(),
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_capabilities(mut self, capabilities: HelpCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Overrides which categories are rendered and in what order.
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = HelpCategory>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }
}

/// Renders the full help page for `schema`.
pub fn format_help(
    schema: &OptionSchema,
    columns: usize,
    product_name: &str,
    executable_name: &str,
    version: &str,
    capabilities: HelpCapabilities,
) -> String {
    build_help_message(
        &HelpRequest::new(product_name, executable_name, version, schema)
            .with_columns(columns)
            .with_capabilities(capabilities),
    )
}

/// Renders a help page: title, usage, stdin hint, one block per category
/// and a subcommand block.
///
/// Only options with both a description and a category are listed, and only
/// subcommands with a description.
pub fn build_help_message(request: &HelpRequest<'_>) -> String {
    let caps = request.capabilities;
    let input_files = if caps.no_input_files {
        ""
    } else if caps.is_chat {
        " [prompt]"
    } else {
        " [paths...]"
    };
    let subcommand = if caps.is_chat { " chat" } else { "" };

    let mut help = vec![
        format!("{} {}", request.product_name, request.version),
        String::new(),
        format!(
            "Usage: {}{subcommand} [options]{input_files}",
            request.executable_name
        ),
        String::new(),
    ];
    if !caps.no_pipe {
        help.push(build_stdin_message(request.executable_name, caps.is_chat));
        help.push(String::new());
    }

    for &category in &request.categories {
        let options: Vec<&OptionDescriptor> = request
            .schema
            .options()
            .map(|(_, o)| o)
            .filter(|o| o.description.is_some() && o.category == Some(category))
            .collect();
        if options.is_empty() {
            continue;
        }
        help.push(category.title().to_string());
        help.extend(format_options(&options, request.columns));
        help.push(String::new());
    }

    let subcommands: Vec<(String, String)> = request
        .schema
        .subcommands()
        .filter_map(|s| Some((s.id.clone(), s.description.clone()?)))
        .collect();
    if !subcommands.is_empty() {
        help.push("Subcommands".to_string());
        help.extend(format_usage_texts(&subcommands, request.columns));
        help.push(String::new());
    }

    help.join("\n")
}

/// Usage text of one option: `-<alias> --<id> <arg>...`.
///
/// ```
/// use argv_schema_core::OptionDescriptor;
/// use argv_schema_parser::help::format_usage;
///
/// let diff = OptionDescriptor::new("diff").with_alias("d").with_arg("file").with_arg("file");
/// assert_eq!(format_usage(&diff), "-d --diff <file> <file>");
/// ```
pub fn format_usage(option: &OptionDescriptor) -> String {
    let args: String = option.args.iter().map(|a| format!(" <{a}>")).collect();
    match &option.alias {
        Some(alias) => format!("-{alias} --{}{args}", option.id),
        None => format!("--{}{args}", option.id),
    }
}

/// Lays out `options` as usage / description rows.
pub fn format_options(options: &[&OptionDescriptor], columns: usize) -> Vec<String> {
    let usage_texts: Vec<(String, String)> = options
        .iter()
        .map(|o| (format_usage(o), o.description.clone().unwrap_or_default()))
        .collect();
    format_usage_texts(&usage_texts, columns)
}

/// Lays out `(usage, description)` pairs for a terminal `columns` wide.
///
/// The usage column is as wide as the longest usage text (at least 12) plus
/// padding. When fewer than 25 columns would remain for descriptions, each
/// pair is printed on two lines instead.
pub fn format_usage_texts(usage_texts: &[(String, String)], columns: usize) -> Vec<String> {
    let max_usage = usage_texts
        .iter()
        .map(|(usage, _)| usage.chars().count())
        .fold(MIN_USAGE_WIDTH, usize::max);
    let arg_width = max_usage + LEFT_PADDING + RIGHT_PADDING;

    if columns.saturating_sub(arg_width) < MIN_DESCRIPTION_WIDTH {
        return usage_texts
            .iter()
            .flat_map(|(usage, description)| [format!("  {usage}"), format!("      {description}")])
            .collect();
    }

    let description_width = columns - arg_width - 1;
    let mut lines = Vec::new();
    for (usage, description) in usage_texts {
        let mut wrapped = wrap_text(description, description_width).into_iter();
        let padding = arg_width - usage.chars().count() - LEFT_PADDING;
        match wrapped.next() {
            Some(first) => lines.push(format!("  {usage}{}{first}", indent(padding))),
            None => lines.push(format!("  {usage}")),
        }
        lines.extend(wrapped.map(|line| format!("{}{line}", indent(arg_width))));
    }
    lines
}

fn indent(count: usize) -> String {
    " ".repeat(count)
}

/// Greedy word wrap to at most `columns` characters per line.
///
/// Text shorter than `columns` stays on one line. Otherwise lines break at
/// the last space at or before the limit, and a word longer than the limit
/// is cut at exactly `columns` characters.
///
/// ```
/// use argv_schema_parser::help::wrap_text;
///
/// assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
/// assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
/// ```
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let split = if rest.chars().count() < columns {
            rest.len()
        } else {
            let limit = rest.char_indices().nth(columns).map_or(rest.len(), |(i, _)| i);
            let end = if rest[limit..].starts_with(' ') { limit + 1 } else { limit };
            match rest[..end].rfind(' ') {
                Some(space) if space > 0 => space,
                _ => limit,
            }
        };
        lines.push(rest[..split].trim().to_string());
        rest = rest[split..].trim_start();
    }
    lines
}

/// Hint line explaining how to pipe input into `executable_name`.
pub fn build_stdin_message(executable_name: &str, is_chat: bool) -> String {
    let source = if cfg!(windows) {
        "echo Hello World"
    } else {
        "ps aux | grep code"
    };
    let chat = if is_chat { " chat <prompt>" } else { "" };
    format!("To read from stdin, append '-' (e.g. '{source} | {executable_name}{chat} -')")
}

/// Three-line version report: version, commit and target architecture.
///
/// ```
/// use argv_schema_parser::help::build_version_message;
///
/// let message = build_version_message(Some("1.2.3"), None);
/// let lines: Vec<&str> = message.lines().collect();
/// assert_eq!(lines[..2], ["1.2.3", "Unknown commit"]);
/// assert_eq!(lines[2], std::env::consts::ARCH);
/// ```
pub fn build_version_message(version: Option<&str>, commit: Option<&str>) -> String {
    let version = version.filter(|v| !v.is_empty()).unwrap_or("Unknown version");
    let commit = commit.filter(|c| !c.is_empty()).unwrap_or("Unknown commit");
    format!("{version}\n{commit}\n{}", std::env::consts::ARCH)
}
