use crate::error::MemoryError;
use std::fs;
use std::path::{Path, PathBuf};

pub const MEMINFO_PATH: &str = "/proc/meminfo";

/// Where the resolver gets meminfo text from.
pub trait MeminfoSource: Send + Sync {
    fn read_meminfo(&self) -> Result<String, MemoryError>;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::new(MEMINFO_PATH)
    }
}

impl MeminfoSource for FileSource {
    fn read_meminfo(&self) -> Result<String, MemoryError> {
        let bytes = fs::read(&self.path).map_err(|source| MemoryError::FileAccess {
            path: self.path.clone(),
            source,
        })?;
        // The read succeeded, so undecodable content is a content problem.
        String::from_utf8(bytes).map_err(|e| MemoryError::parse("meminfo", e.to_string()))
    }
}
