// Declare the encoding module, which detects file encodings and decodes to UTF-8
pub mod encoding;

// Declare the reader module, which loads one file with encoding fallback
pub mod reader;

// Declare the filter module, which decides by extension what gets merged
pub mod filter;

// Declare the archive module, which expands ZIP uploads into scratch storage
pub mod archive;

// Declare the merge module, which assembles headers, contents and separators
pub mod merge;

// Declare the stats module, which counts files, characters and lines
pub mod stats;

// Declare the core module, which runs one merge end to end
pub mod core;

// Declare the errors module, which contains custom error types
pub mod errors;

// Declare the config module, which handles configuration management
pub mod config;

// Declare the cli module, which defines the command-line interface
pub mod cli;

// Declare the commands module, which implements each subcommand
pub mod commands;

// Declare the app_state module, which tracks scratch storage for a session
pub mod app_state;

// Declare the signal_handler module, which cleans up on Ctrl+C
pub mod signal_handler;

// Declare the progress module, which draws the per-file progress bar
pub mod progress;

// Declare the display module, which handles displaying information to the user
pub mod display;

// Declare the file_utils module, which provides utility functions for file operations
pub mod file_utils;

// Declare the logging module, which handles logging of messages and errors
pub mod logging;

pub use crate::core::{resolve_input, MergeInput, MergedDocument, ProcessingCore, ResolvedInput};
pub use archive::{expand, expand_file, ExpandedArchive};
pub use encoding::{EncodingDetector, EncodingStrategy};
pub use errors::{ArchiveError, ConfigError, MergerError, MergerResult};
pub use filter::is_eligible;
pub use merge::{merge_files, MergeEngine, MergeSpecification, DEFAULT_SEPARATOR};
pub use reader::{read_file_content, FileReader, ReadOutcome};
pub use stats::{summarize, MergeSummary};
