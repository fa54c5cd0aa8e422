use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// Session bookkeeping owned by the CLI: scratch directories to clean up
// once the merge is done, or when the Ctrl+C handler fires.
#[derive(Default)]
pub struct AppState {
    scratch_dirs: Mutex<Vec<PathBuf>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_scratch(&self, dir: &Path) {
        if let Ok(mut dirs) = self.scratch_dirs.lock() {
            dirs.push(dir.to_path_buf());
        }
    }

    pub fn unregister_scratch(&self, dir: &Path) {
        if let Ok(mut dirs) = self.scratch_dirs.lock() {
            dirs.retain(|d| d != dir);
        }
    }

    pub fn scratch_dirs(&self) -> Vec<PathBuf> {
        self.scratch_dirs
            .lock()
            .map(|dirs| dirs.clone())
            .unwrap_or_default()
    }

    /// Remove every registered scratch directory; returns how many went away
    pub fn cleanup_scratch(&self) -> usize {
        let dirs = match self.scratch_dirs.lock() {
            Ok(mut dirs) => std::mem::take(&mut *dirs),
            Err(_) => return 0,
        };

        let mut removed = 0;
        for dir in dirs {
            match std::fs::remove_dir_all(&dir) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove scratch directory {:?}: {}", dir, e),
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_removes_registered_dirs() {
        let root = TempDir::new().unwrap();
        let first = root.path().join("mergemate-1");
        let second = root.path().join("mergemate-2");
        std::fs::create_dir_all(first.join("nested")).unwrap();
        std::fs::create_dir_all(&second).unwrap();

        let state = AppState::new();
        state.register_scratch(&first);
        state.register_scratch(&second);
        state.unregister_scratch(&second);

        assert_eq!(state.scratch_dirs(), vec![first.clone()]);
        assert_eq!(state.cleanup_scratch(), 1);
        assert!(!first.exists());
        assert!(second.exists());
        assert!(state.scratch_dirs().is_empty());
    }
}
