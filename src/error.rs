use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The meminfo file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required label was missing or carried an unusable value.
    #[error("failed to parse {label}: {detail}")]
    Parse { label: &'static str, detail: String },

    #[error("unknown memory fact '{name}'")]
    UnknownFact { name: String },
}

impl MemoryError {
    pub(crate) fn parse(label: &'static str, detail: impl Into<String>) -> Self {
        MemoryError::Parse {
            label,
            detail: detail.into(),
        }
    }
}
