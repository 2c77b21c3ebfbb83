//! Output storage.
//!
//! Builders read component markup and write pages through [`Storage`], using
//! `/`-separated paths relative to the output root.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Read and write access to the output tree.
pub trait Storage {
    /// Read a text file.
    fn read_to_string(&self, path: &str) -> io::Result<String>;

    /// Write a file, replacing any existing content.
    fn write(&self, path: &str, contents: &[u8]) -> io::Result<()>;
}

/// File system storage rooted at an output directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a storage path against the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Storage for FsStorage {
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn write(&self, path: &str, contents: &[u8]) -> io::Result<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, contents)
    }
}
