// Import required dependencies
use crate::encoding::EncodingStrategy;
use crate::errors::{ConfigError, MergerError, MergerResult};
use crate::merge::{DEFAULT_OUTPUT_NAME, DEFAULT_SEPARATOR};
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Characters shown in the preview unless configured otherwise
pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

// Configuration structure that can be serialized to/from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_name: String,           // File name of the merged document
    pub output_dir: Option<PathBuf>,   // Directory the merged document goes to (cwd if unset)
    pub separator: Option<String>,     // Text between files (default rule if unset)
    pub encoding: String,              // "auto" or an encoding label forced on every file
    pub preview_chars: usize,          // Characters of merged text shown by --preview
    pub show_progress: bool,           // Draw a progress bar while merging
    pub keep_scratch: bool,            // Leave extracted archive files on disk
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            output_dir: None,
            separator: None,
            encoding: "auto".to_string(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            show_progress: false,
            keep_scratch: false,
        }
    }
}

impl Config {
    // Load configuration from a JSON file
    pub async fn load(path: &Path) -> MergerResult<Self> {
        let content = fs::read_to_string(path).await.map_err(MergerError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| MergerError::Config(ConfigError::InvalidFormat(e.to_string())))
    }

    // Save configuration to a JSON file
    pub async fn save(&self, path: &Path) -> MergerResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| MergerError::Config(ConfigError::SerializationError(e.to_string())))?;
        fs::write(path, content).await.map_err(MergerError::Io)
    }

    // Template written by generate-config: every field spelled out
    pub fn template() -> Self {
        Self {
            output_dir: Some(PathBuf::from(".")),
            separator: Some(DEFAULT_SEPARATOR.clone()),
            ..Self::default()
        }
    }

    /// Separator to use, falling back to the default rule
    pub fn separator(&self) -> String {
        self.separator
            .clone()
            .unwrap_or_else(|| DEFAULT_SEPARATOR.clone())
    }

    pub fn encoding_strategy(&self) -> Result<EncodingStrategy, ConfigError> {
        EncodingStrategy::from_label(&self.encoding)
    }

    /// Full path of the merged document
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.output_name)
    }

    // Interactive configuration setup using command-line prompts
    pub async fn guided_setup() -> MergerResult<Self> {
        let output_name: String = Input::new()
            .with_prompt("Output filename")
            .default(DEFAULT_OUTPUT_NAME.into())
            .interact_text()?;

        let output_dir: String = Input::new()
            .with_prompt("Output directory")
            .default(".".into())
            .interact_text()?;

        let use_custom_separator = Confirm::new()
            .with_prompt("Use custom separator?")
            .default(false)
            .interact()?;

        let separator = if use_custom_separator {
            let raw: String = Input::new()
                .with_prompt("Custom separator (\\n for line break)")
                .interact_text()?;
            Some(crate::cli::unescape_separator(&raw))
        } else {
            None
        };

        let encoding: String = Input::new()
            .with_prompt("Encoding (auto or a label like windows-1252)")
            .default("auto".into())
            .interact_text()?;

        let show_progress = Confirm::new()
            .with_prompt("Show progress bar?")
            .default(false)
            .interact()?;

        let config = Self {
            output_name,
            output_dir: Some(PathBuf::from(output_dir)),
            separator,
            encoding,
            show_progress,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_settings()?;
        self.validate_output_dir()
    }

    /// Everything except the output directory
    pub fn validate_settings(&self) -> Result<(), ConfigError> {
        let name = self.output_name.as_str();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyOutputName);
        }

        if name.trim() != name {
            return Err(ConfigError::OutputNameHasWhitespace(name.to_string()));
        }

        if Path::new(name).components().count() != 1 || name.contains(['/', '\\']) {
            return Err(ConfigError::OutputNameHasPath(name.to_string()));
        }

        self.encoding_strategy()?;
        Ok(())
    }

    /// The output directory, when set, exists and takes new files
    pub fn validate_output_dir(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output_dir {
            if !dir.is_dir() {
                return Err(ConfigError::OutputDirectoryMissing(dir.clone()));
            }

            // Probe writability with a throwaway file
            match tempfile::Builder::new()
                .prefix(".mergemate-write-")
                .tempfile_in(dir)
            {
                Ok(probe) => {
                    let _ = probe.close();
                }
                Err(_) => return Err(ConfigError::OutputDirectoryNotWritable(dir.clone())),
            }
        }

        Ok(())
    }
}
