// Import required dependencies
use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    app_state::AppState,
    cli::{unescape_separator, GenerateConfigArgs, GuidedSetupArgs, MergeArgs},
    config::Config,
    core::{resolve_input, MergeInput, MergedDocument, ProcessingCore},
    display::StatusDisplay,
    encoding::EncodingStats,
    errors::MergerError,
    file_utils::{FileUtils, SourceFile},
    filter::supported_extensions,
    merge::MergeSpecification,
    stats::MergeSummary,
};

/// What a merge run reports back (printed as JSON with --json)
#[derive(Debug, Serialize)]
pub struct MergeReport {
    pub output: PathBuf,
    pub summary: MergeSummary,
    pub encodings: EncodingStats,
    pub files: Vec<SourceFile>,
    pub scratch_dir: Option<PathBuf>,
}

// Command handler for processing CLI commands
pub struct CommandHandler;

impl CommandHandler {
    // Handle the merge command
    pub async fn handle_merge(args: MergeArgs, app_state: Arc<AppState>) -> Result<MergeReport> {
        info!("Starting merge operation");

        let mut config = match &args.config {
            Some(path) => Config::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };
        Self::apply_overrides(&mut config, &args);
        config.validate_settings().map_err(MergerError::Config)?;
        // An explicit --output replaces the configured directory
        if args.output.is_none() {
            config.validate_output_dir().map_err(MergerError::Config)?;
        }

        let input = Self::merge_input(&args)?;
        let output_path = args.output.clone().unwrap_or_else(|| config.output_path());

        let resolved = tokio::task::spawn_blocking(move || resolve_input(input))
            .await
            .map_err(MergerError::from)??;
        if let Some(dir) = &resolved.scratch_dir {
            app_state.register_scratch(dir);
        }

        let outcome = Self::merge_and_write(&config, &args, resolved.paths, &output_path).await;

        let kept_scratch = match &resolved.scratch_dir {
            Some(dir) if config.keep_scratch => {
                info!("Keeping extracted files in {}", dir.display());
                app_state.unregister_scratch(dir);
                Some(dir.clone())
            }
            Some(dir) => {
                FileUtils::remove_scratch(dir).await;
                app_state.unregister_scratch(dir);
                None
            }
            None => None,
        };

        let (doc, encodings, files) = outcome?;
        let report = MergeReport {
            output: output_path,
            summary: doc.summary,
            encodings,
            files,
            scratch_dir: kept_scratch,
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            let display = StatusDisplay::new();
            if args.list {
                display.print_file_list(&report.files);
            }
            if args.preview {
                display.print_preview(&doc.text, config.preview_chars);
            }
            display.print_summary(&report.summary);
            if args.list || log::log_enabled!(log::Level::Debug) {
                report.encodings.print_summary();
            }
            println!("📥 Written to {}", report.output.display());
        }

        info!("Merge operation completed");
        Ok(report)
    }

    // CLI flags win over the config file
    fn apply_overrides(config: &mut Config, args: &MergeArgs) {
        if args.no_separator {
            config.separator = Some(String::new());
        } else if let Some(raw) = &args.separator {
            config.separator = Some(unescape_separator(raw));
        }
        if let Some(label) = &args.encoding {
            config.encoding = label.clone();
        }
        if let Some(name) = args.output.as_ref().and_then(|p| p.file_name()) {
            config.output_name = name.to_string_lossy().into_owned();
        }
        config.show_progress |= args.progress;
        config.keep_scratch |= args.keep_scratch;
    }

    fn merge_input(args: &MergeArgs) -> Result<MergeInput, MergerError> {
        match (&args.archive, args.files.is_empty()) {
            (Some(archive), true) => Ok(MergeInput::Archive(archive.clone())),
            (None, false) => Ok(MergeInput::Files(args.files.clone())),
            (Some(_), false) => Err(MergerError::InputValidation(
                "Give either files or --archive, not both".to_string(),
            )),
            (None, true) => Err(MergerError::InputValidation(
                "No input given (pass files or --archive <ZIP>)".to_string(),
            )),
        }
    }

    async fn merge_and_write(
        config: &Config,
        args: &MergeArgs,
        paths: Vec<PathBuf>,
        output_path: &Path,
    ) -> Result<(MergedDocument, EncodingStats, Vec<SourceFile>)> {
        let files: Vec<SourceFile> = if args.list || args.json {
            paths.iter().map(|p| SourceFile::inspect(p)).collect()
        } else {
            Vec::new()
        };

        let spec = MergeSpecification::new(paths)
            .with_separator(config.separator())
            .with_output_name(config.output_name.clone());
        let strategy = config.encoding_strategy().map_err(MergerError::Config)?;
        let show_progress = config.show_progress;

        let (doc, encodings) = tokio::task::spawn_blocking(move || {
            let mut core = ProcessingCore::new(strategy, show_progress);
            let doc = core.run(&spec);
            (doc, core.encoding_stats().clone())
        })
        .await
        .map_err(MergerError::from)?;

        if !encodings.is_clean() {
            warn!(
                "{} file(s) could not be read and are marked in the output, {} decoded lossily",
                encodings.read_failures(),
                encodings.lossy_fallbacks()
            );
        }

        Self::write_output(output_path, &doc).await?;
        Ok((doc, encodings, files))
    }

    async fn write_output(path: &Path, doc: &MergedDocument) -> Result<(), MergerError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            FileUtils::ensure_dir(parent)
                .await
                .map_err(|source| MergerError::Output {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        FileUtils::atomic_write(path, doc.text.as_bytes())
            .await
            .map_err(|source| MergerError::Output {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Merged document written to {}", path.display());
        Ok(())
    }

    // Print the allow-list, one per line
    pub fn handle_extensions() -> Result<()> {
        for ext in supported_extensions() {
            println!("{}", ext);
        }
        Ok(())
    }

    // Handle configuration file generation
    pub async fn handle_generate_config(args: GenerateConfigArgs) -> Result<()> {
        info!("Generating configuration file");
        Config::template().save(&args.output).await?;
        info!("Configuration file generated at: {:?}", args.output);
        Ok(())
    }

    // Handle interactive setup process
    pub async fn handle_guided_setup(args: GuidedSetupArgs) -> Result<()> {
        info!("Starting guided setup");
        let config = Config::guided_setup().await?;
        config.save(&args.output).await?;
        info!("Configuration saved to: {:?}", args.output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    #[tokio::test]
    async fn test_merge_files_writes_output() -> Result<()> {
        let dir = TempDir::new()?;
        let foo = dir.path().join("foo.txt");
        let bar = dir.path().join("bar.txt");
        tokio::fs::write(&foo, "hi").await?;
        tokio::fs::write(&bar, "bye").await?;
        let output = dir.path().join("out").join("merged.txt");

        let args = MergeArgs {
            files: vec![foo, bar],
            output: Some(output.clone()),
            ..MergeArgs::default()
        };
        let report = CommandHandler::handle_merge(args, Arc::new(AppState::new())).await?;

        let written = tokio::fs::read_to_string(&output).await?;
        assert_eq!(
            written,
            format!(
                "\nfoo.txt:\n--------\nhi\n{}\n\nbar.txt:\n--------\nbye",
                "=".repeat(80)
            )
        );
        assert_eq!(report.summary.file_count, 2);
        assert!(report.scratch_dir.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_merge_archive_cleans_scratch() -> Result<()> {
        let dir = TempDir::new()?;
        let zip_path = dir.path().join("upload.zip");
        let mut writer = ZipWriter::new(std::fs::File::create(&zip_path)?);
        for (name, content) in [("b.py", "b"), ("a.txt", "a"), ("c.bin", "c")] {
            writer.start_file(name, SimpleFileOptions::default())?;
            writer.write_all(content.as_bytes())?;
        }
        writer.finish()?;

        let output = dir.path().join("merged.txt");
        let state = Arc::new(AppState::new());
        let args = MergeArgs {
            archive: Some(zip_path),
            output: Some(output.clone()),
            no_separator: true,
            ..MergeArgs::default()
        };
        let report = CommandHandler::handle_merge(args, Arc::clone(&state)).await?;

        assert_eq!(
            tokio::fs::read_to_string(&output).await?,
            "\na.txt:\n------\na\nb.py:\n-----\nb"
        );
        assert_eq!(report.summary.file_count, 2);
        assert!(report.scratch_dir.is_none());
        assert!(state.scratch_dirs().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_no_input_is_rejected() {
        let result = CommandHandler::handle_merge(MergeArgs::default(), Arc::new(AppState::new())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unwritable_output_is_fatal() -> Result<()> {
        let dir = TempDir::new()?;
        let input = dir.path().join("a.txt");
        tokio::fs::write(&input, "a").await?;
        // A regular file where the output directory should be
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "").await?;

        let args = MergeArgs {
            files: vec![input],
            output: Some(blocker.join("merged.txt")),
            ..MergeArgs::default()
        };
        let err = CommandHandler::handle_merge(args, Arc::new(AppState::new()))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MergerError>(),
            Some(MergerError::Output { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_explicit_output_ignores_configured_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let input = dir.path().join("a.txt");
        tokio::fs::write(&input, "a").await?;
        let config_path = dir.path().join("mergemate.json");
        Config {
            output_dir: Some(dir.path().join("gone")),
            ..Config::default()
        }
        .save(&config_path)
        .await?;

        let output = dir.path().join("merged.txt");
        let args = MergeArgs {
            files: vec![input],
            output: Some(output.clone()),
            config: Some(config_path.clone()),
            list: true,
            ..MergeArgs::default()
        };
        let report = CommandHandler::handle_merge(args, Arc::new(AppState::new())).await?;

        assert!(output.is_file());
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].encoding.as_deref(), Some("UTF-8"));
        assert!(report.encodings.is_clean());

        // Without -o the configured directory still has to exist
        let args = MergeArgs {
            files: vec![dir.path().join("a.txt")],
            config: Some(config_path),
            ..MergeArgs::default()
        };
        let err = CommandHandler::handle_merge(args, Arc::new(AppState::new()))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MergerError>(),
            Some(MergerError::Config(ConfigError::OutputDirectoryMissing(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let args = MergeArgs {
            separator: Some("\\n***\\n".to_string()),
            encoding: Some("latin1".to_string()),
            output: Some(PathBuf::from("/tmp/all.txt")),
            keep_scratch: true,
            ..MergeArgs::default()
        };
        CommandHandler::apply_overrides(&mut config, &args);
        assert_eq!(config.separator(), "\n***\n");
        assert_eq!(config.encoding, "latin1");
        assert_eq!(config.output_name, "all.txt");
        assert!(config.keep_scratch);
    }
}
