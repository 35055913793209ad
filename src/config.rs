use crate::backend::MEMINFO_PATH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub meminfo_path: PathBuf,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            meminfo_path: PathBuf::from(MEMINFO_PATH),
        }
    }
}

impl ResolverConfig {
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Read the config at `path`, falling back to defaults if it is absent or invalid.
    pub fn load_from(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read config {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };
        serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!("Invalid config {}: {}, using defaults", path.display(), e);
            Self::default()
        })
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
    }
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("meminfo-facts")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ResolverConfig::load_from(&dir.path().join("config.json"));
        assert_eq!(config.meminfo_path, Path::new("/proc/meminfo"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = ResolverConfig {
            meminfo_path: PathBuf::from("/tmp/fake-meminfo"),
        };

        config.save_to(&path).unwrap();
        assert_eq!(ResolverConfig::load_from(&path), config);
    }

    #[test]
    fn invalid_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(ResolverConfig::load_from(&path), ResolverConfig::default());
    }

    #[test]
    fn empty_object_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(ResolverConfig::load_from(&path), ResolverConfig::default());
    }
}
