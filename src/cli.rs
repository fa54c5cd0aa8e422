// ============================================================================
// CLI Module - Command-Line Interface Definitions
//
// Defines the mergemate command line with clap derive macros: the merge
// operation itself plus a few helpers for working with configuration files.
// ============================================================================

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

// ============================================================================
// MAIN CLI STRUCTURE
// ============================================================================

/// mergemate - Merge text files into one document with filename headers
///
/// Each file's content is preceded by its name and a dashed underline, and
/// files are separated by a rule of '=' characters (or your own separator).
/// Input can be a list of files or a ZIP archive; archives are expanded and
/// only files with a recognized text extension are merged, in sorted order.
#[derive(Parser)]
#[command(
    name = "mergemate",
    about = "Merge multiple text files into one file with filename headers",
    long_about = "mergemate concatenates text files into a single UTF-8 document. Every file gets a \
                  header with its name, encodings are detected per file, and files that cannot be \
                  read are marked inline instead of aborting the merge.",
    version,
    after_help = "Examples:\n  \
                  mergemate merge src/main.rs src/lib.rs -o merged.txt\n  \
                  mergemate merge --archive project.zip --preview\n  \
                  mergemate merge notes/*.md --separator '\\n---\\n'\n  \
                  mergemate extensions\n  \
                  mergemate generate-config mergemate.json"
)]
pub struct Cli {
    /// Increase verbosity level (can be used multiple times)
    #[arg(
        global = true,
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v: debug, -vv: trace)"
    )]
    verbose: u8,

    /// The operation to perform
    #[command(subcommand)]
    pub command: Commands,

    /// Set the logging level explicitly
    #[arg(
        global = true,
        long,
        default_value = "info",
        help = "Set log level explicitly [error|warn|info|debug|trace]"
    )]
    log_level: String,

    /// Mirror log output into this file
    #[arg(global = true, long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Write error-level log lines into this file
    #[arg(global = true, long = "error-file", value_name = "FILE")]
    pub error_file: Option<PathBuf>,
}

// ============================================================================
// SUBCOMMAND DEFINITIONS
// ============================================================================

/// Available subcommands for different operations
#[derive(Subcommand)]
pub enum Commands {
    /// Merge files or a ZIP archive into one document
    #[command(
        about = "Merge files or a ZIP archive into one document",
        long_about = "Merge the given files, in the order given, into one document. With --archive, \
                      the ZIP is extracted to a scratch directory and every file with a recognized \
                      text extension is merged in sorted path order.\n\n\
                      Files that cannot be read appear in the output as an [Error ...] line."
    )]
    Merge(MergeArgs),

    /// List the file extensions merged from archives
    #[command(about = "List the file extensions recognized as text")]
    Extensions,

    /// Generate a configuration file template
    #[command(
        about = "Generate a JSON configuration file template",
        long_about = "Write a JSON configuration file with every setting spelled out. \
                      Pass it to merge with --config."
    )]
    GenerateConfig(GenerateConfigArgs),

    /// Run interactive guided setup
    #[command(about = "Run interactive guided setup for configuration")]
    GuidedSetup(GuidedSetupArgs),
}

// Structure defining all possible arguments for the merge command
#[derive(Args, Clone, Debug, Default)]
pub struct MergeArgs {
    // Files to merge, in order
    #[arg(value_name = "FILES", conflicts_with = "archive")]
    pub files: Vec<PathBuf>,

    // ZIP archive to expand and merge
    #[arg(short = 'a', long = "archive", value_name = "ZIP")]
    pub archive: Option<PathBuf>,

    // Output path for the merged document
    #[arg(
        short = 'o',
        long = "output",
        help = "Destination path for the merged document [default: ./merged_files.txt]",
        value_name = "FILE"
    )]
    pub output: Option<PathBuf>,

    // Custom separator
    #[arg(
        short = 's',
        long = "separator",
        help = "Text inserted between files; \\n, \\t and \\\\ are unescaped",
        value_name = "TEXT",
        conflicts_with = "no_separator"
    )]
    pub separator: Option<String>,

    // Empty separator
    #[arg(long = "no-separator", help = "Put nothing between files")]
    pub no_separator: bool,

    // Encoding override
    #[arg(
        short = 'e',
        long = "encoding",
        help = "Decode every file with this encoding instead of detecting (e.g. windows-1252)",
        value_name = "LABEL"
    )]
    pub encoding: Option<String>,

    // Configuration file path
    #[arg(
        short = 'c',
        long = "config",
        help = "JSON configuration file with default settings",
        value_name = "FILE"
    )]
    pub config: Option<PathBuf>,

    #[arg(long = "preview", help = "Print the beginning of the merged document")]
    pub preview: bool,

    #[arg(long = "list", help = "Print the selected files with their sizes")]
    pub list: bool,

    #[arg(long = "json", help = "Print statistics as JSON instead of text")]
    pub json: bool,

    #[arg(
        long = "keep-scratch",
        help = "Keep the directory an archive was extracted to"
    )]
    pub keep_scratch: bool,

    #[arg(long = "progress", help = "Show a progress bar while merging")]
    pub progress: bool,
}

// Arguments for the generate-config command
#[derive(Args, Clone, Debug)]
pub struct GenerateConfigArgs {
    #[arg(help = "Destination path for configuration file", value_name = "FILE")]
    pub output: PathBuf,
}

// Arguments for the guided-setup command
#[derive(Args, Clone, Debug)]
pub struct GuidedSetupArgs {
    #[arg(
        help = "Destination path for interactive configuration",
        value_name = "FILE"
    )]
    pub output: PathBuf,
}

impl Cli {
    // -v and -vv win over --log-level
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => {}
            1 => return LevelFilter::Debug,
            _ => return LevelFilter::Trace,
        }
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }
}

/// Turn `\n`, `\t` and `\\` typed on a command line into the real characters.
/// Any other backslash sequence is kept verbatim.
pub fn unescape_separator(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                out.push('\n');
                chars.next();
            }
            Some('t') => {
                out.push('\t');
                chars.next();
            }
            Some('\\') => {
                out.push('\\');
                chars.next();
            }
            _ => out.push('\\'),
        }
    }
    out
}
