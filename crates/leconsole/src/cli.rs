// CLI Interface
//
// This module provides the command-line interface for LeRendu.

use crate::config::{OutputFormat, ProjectConfig};
use anyhow::{bail, Context, Result as AnyhowResult};
use clap::{Parser, Subcommand};
use lerendu::batch::{BatchRenderer, FileRendering};
use lerendu::bracket::format_bracket_tree;
use lerendu::grammar::{parse_source, LanguageId};
use lerendu::html::{escape_html, render_html};
use lerendu::record::FormatTree;
use lerendu::render::{records_to_text, Traversal};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// LeRendu - Syntax Tree Renderer
#[derive(Parser, Debug)]
#[command(name = "lerendu")]
#[command(author = "LeRendu Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render tree-sitter syntax trees as indented text, JSON or HTML", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to .lerendu/config.toml)
    #[arg(global = true, long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse source files and print their syntax trees
    Tree {
        /// Files to render
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Parse every file as this language instead of detecting it
        #[arg(long = "language", short = 'l')]
        language: Option<LanguageId>,

        /// Annotate nodes with their field names
        #[arg(long = "fields")]
        fields: bool,

        /// Include anonymous nodes (keywords, punctuation)
        #[arg(long = "all")]
        all: bool,

        /// Walk trees with an explicit stack (very deep trees)
        #[arg(long = "iterative")]
        iterative: bool,

        /// Output format
        #[arg(long = "format", short = 'f', value_enum)]
        format: Option<OutputFormat>,

        /// Maximum number of worker threads
        #[arg(long = "threads")]
        threads: Option<usize>,
    },

    /// Print a file's s-expression with one level per line
    Sexp {
        /// File to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Parse the file as this language instead of detecting it
        #[arg(long = "language", short = 'l')]
        language: Option<LanguageId>,
    },

    /// Lay out a parenthesized string (reads stdin when TEXT is omitted)
    Brackets {
        /// Bracket string
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },

    /// HTML-escape text (reads stdin when TEXT is omitted)
    Escape {
        /// Text to escape
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },

    /// Write a default configuration file
    Init {
        /// Project directory (defaults to the current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing configuration
        #[arg(long = "force")]
        force: bool,
    },
}

impl Cli {
    /// Run the CLI
    pub fn run(self) -> AnyhowResult<()> {
        init_logging_impl(self.verbose);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.execute(&mut out)
    }

    /// Execute the command, writing its output to `out`
    pub fn execute<W: Write>(self, out: &mut W) -> AnyhowResult<()> {
        match self.command {
            Commands::Tree {
                files,
                language,
                fields,
                all,
                iterative,
                format,
                threads,
            } => {
                let config = load_config(self.config.as_deref())?;
                let args = TreeArgs {
                    files,
                    language,
                    fields,
                    all,
                    iterative,
                    format,
                    threads,
                };
                cmd_tree_impl(&config, args, out)
            }
            Commands::Sexp { file, language } => {
                let config = load_config(self.config.as_deref())?;
                cmd_sexp_impl(&config, &file, language, out)
            }
            Commands::Brackets { text } => {
                let text = text_or_stdin(text)?;
                let formatted = format_bracket_tree(&text)?;
                writeln!(out, "{}", formatted)?;
                Ok(())
            }
            Commands::Escape { text } => {
                let text = text_or_stdin(text)?;
                writeln!(out, "{}", escape_html(&text))?;
                Ok(())
            }
            Commands::Init { path, force } => cmd_init_impl(path, force, out),
        }
    }
}

/// Initialize logging implementation
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging_impl(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Load the explicit config file, or the project config from the current directory
fn load_config(explicit: Option<&Path>) -> AnyhowResult<ProjectConfig> {
    match explicit {
        Some(path) => ProjectConfig::load_file(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            ProjectConfig::load(cwd)
        }
    }
}

/// Use `text` if given, otherwise all of stdin minus one trailing newline
fn text_or_stdin(text: Option<String>) -> AnyhowResult<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read standard input")?;
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    Ok(input)
}

struct TreeArgs {
    files: Vec<PathBuf>,
    language: Option<LanguageId>,
    fields: bool,
    all: bool,
    iterative: bool,
    format: Option<OutputFormat>,
    threads: Option<usize>,
}

/// One file in JSON output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileOutput<'a> {
    path: String,
    language: Option<&'static str>,
    records: &'a [FormatTree],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a FileRendering> for FileOutput<'a> {
    fn from(result: &'a FileRendering) -> Self {
        Self {
            path: result.file_path.display().to_string(),
            language: result.language.map(|id| id.name()),
            records: &result.records,
            error: result.error.as_deref(),
        }
    }
}

/// Tree command implementation
fn cmd_tree_impl<W: Write>(
    config: &ProjectConfig,
    args: TreeArgs,
    out: &mut W,
) -> AnyhowResult<()> {
    let mut options = config.render_options();
    options.show_field_names |= args.fields;
    if args.all {
        options.hide_unnamed = false;
    }
    if args.iterative {
        options.traversal = Traversal::Iterative;
    }
    let format = args.format.unwrap_or(config.render.format);
    debug!("Rendering with {:?} as {:?}", options, format);

    let mut renderer = BatchRenderer::new(options).with_aliases(config.aliases()?);
    if let Some(language) = args.language {
        renderer = renderer.with_language(language);
    }
    if let Some(threads) = args.threads {
        renderer = renderer.with_max_threads(threads);
    }

    let total = args.files.len();
    let results = renderer.render_files(args.files);

    match format {
        OutputFormat::Text => {
            for result in BatchRenderer::successful_results(&results) {
                if total > 1 {
                    writeln!(out, "==> {} <==", result.file_path.display())?;
                }
                write!(out, "{}", records_to_text(&result.records))?;
            }
        }
        OutputFormat::Json => {
            let files: Vec<FileOutput<'_>> = results.iter().map(FileOutput::from).collect();
            serde_json::to_writer_pretty(&mut *out, &files)
                .context("Failed to serialize records")?;
            writeln!(out)?;
        }
        OutputFormat::Html => {
            for result in BatchRenderer::successful_results(&results) {
                writeln!(
                    out,
                    "<section data-path=\"{}\">",
                    escape_html(&result.file_path.display().to_string())
                )?;
                write!(out, "{}", render_html(&result.records))?;
                writeln!(out, "</section>")?;
            }
        }
    }

    let failed = BatchRenderer::failed_results(&results);
    for result in &failed {
        warn!(
            "{}: {}",
            result.file_path.display(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    if !failed.is_empty() {
        bail!("{} of {} file(s) could not be rendered", failed.len(), total);
    }

    Ok(())
}

/// Sexp command implementation
fn cmd_sexp_impl<W: Write>(
    config: &ProjectConfig,
    file: &Path,
    language: Option<LanguageId>,
    out: &mut W,
) -> AnyhowResult<()> {
    let mut renderer = BatchRenderer::default().with_aliases(config.aliases()?);
    if let Some(language) = language {
        renderer = renderer.with_language(language);
    }
    let Some(language) = renderer.language_for(file) else {
        bail!(
            "Cannot detect the language of {}; pass --language",
            file.display()
        );
    };

    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let tree = parse_source(language, &source)?;
    let formatted = format_bracket_tree(&protect_quoted(&tree.root_node().to_sexp()))?;
    writeln!(out, "{}", restore_quoted(&formatted))?;
    Ok(())
}

// Private-use stand-ins for layout characters inside quoted node names,
// e.g. `(MISSING ")")` in trees with syntax errors
const QUOTED_OPEN: char = '\u{E000}';
const QUOTED_CLOSE: char = '\u{E001}';
const QUOTED_SPACE: char = '\u{E002}';

/// Hide parentheses and spaces inside `"..."` runs so the bracket formatter
/// copies them as plain text
fn protect_quoted(sexp: &str) -> String {
    let mut protected = String::with_capacity(sexp.len());
    let mut quoted = false;
    let mut escaped = false;

    for ch in sexp.chars() {
        if !quoted {
            quoted = ch == '"';
            protected.push(ch);
            continue;
        }
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => quoted = false,
            _ => {}
        }
        protected.push(match ch {
            '(' => QUOTED_OPEN,
            ')' => QUOTED_CLOSE,
            ' ' => QUOTED_SPACE,
            other => other,
        });
    }

    protected
}

/// Undo [`protect_quoted`]
fn restore_quoted(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            QUOTED_OPEN => '(',
            QUOTED_CLOSE => ')',
            QUOTED_SPACE => ' ',
            other => other,
        })
        .collect()
}

/// Init command implementation
fn cmd_init_impl<W: Write>(path: Option<PathBuf>, force: bool, out: &mut W) -> AnyhowResult<()> {
    let project = match path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let config_path = project.join(crate::config::DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "{} already exists; use --force to overwrite",
            config_path.display()
        );
    }

    ProjectConfig::default().save(&project)?;
    writeln!(out, "Wrote {}", config_path.display())?;
    Ok(())
}

/// Main entry point for the CLI
pub fn main() -> AnyhowResult<()> {
    let cli = Cli::parse();
    cli.run()
}
