mod manager;
pub mod meminfo;
mod memory;
mod source;

pub use manager::{CacheManager, Invalidate};
pub use memory::{MemoryFactsProvider, MemoryResolver};
pub use source::{FileSource, MeminfoSource, MEMINFO_PATH};
