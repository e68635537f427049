//! In-memory filesystem adapter for testing.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use layerforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::LayerforgeResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to the service and
/// inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<BTreeSet<PathBuf>>>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// All directories created so far, including implied parents, sorted.
    pub fn directories(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|dirs| dirs.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> LayerforgeResult<()> {
        let mut dirs = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            dirs.insert(current.clone());
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|dirs| dirs.contains(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_parents() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("out/Shop/Shop.Api")).unwrap();

        assert!(fs.exists(Path::new("out")));
        assert!(fs.exists(Path::new("out/Shop")));
        assert!(fs.exists(Path::new("out/Shop/Shop.Api")));
        assert!(!fs.exists(Path::new("out/Shop/Shop.Domain")));
    }

    #[test]
    fn repeated_creation_is_a_no_op() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("Shop")).unwrap();
        fs.create_dir_all(Path::new("Shop")).unwrap();
        assert_eq!(fs.directories(), [PathBuf::from("Shop")]);
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.create_dir_all(Path::new("Shop")).unwrap();
        assert!(other.exists(Path::new("Shop")));
        assert_eq!(other.directories(), fs.directories());
    }
}
