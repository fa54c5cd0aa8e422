use log::warn;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

use crate::encoding::EncodingDetector;
use crate::merge::display_name;

/// A file selected for merging, as shown in the file list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub exists: bool,
    /// Detected encoding label, `None` when the file is missing
    pub encoding: Option<String>,
}

impl SourceFile {
    // Missing files are reported with size 0 rather than as an error
    pub fn inspect(path: &Path) -> Self {
        let (size, exists) = match std::fs::metadata(path) {
            Ok(meta) => (meta.len(), true),
            Err(_) => (0, false),
        };
        let encoding = exists.then(|| EncodingDetector::detect_file(path).name().to_string());
        Self {
            path: path.to_path_buf(),
            name: display_name(path),
            size,
            exists,
            encoding,
        }
    }
}

// Define a struct for file utility functions
pub struct FileUtils;

impl FileUtils {
    // Ensure a directory exists, creating it if necessary
    pub async fn ensure_dir(path: &Path) -> io::Result<()> {
        if !path.exists() {
            tokio::fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    // Write to a sibling temp file, then rename over the target
    pub async fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        if let Err(e) = tokio::fs::write(&temp_path, content).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e);
        }
        match tokio::fs::rename(&temp_path, path).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = tokio::fs::remove_file(&temp_path).await;
                Err(e)
            }
        }
    }

    // Remove a scratch directory; failures are logged, not returned
    pub async fn remove_scratch(dir: &Path) {
        if let Err(e) = tokio::fs::remove_dir_all(dir).await {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove scratch directory {:?}: {}", dir, e);
            }
        }
    }
}
