//! Memory and swap facts read from `/proc/meminfo`.
//!
//! A [`MemoryResolver`] reads the file once, derives eight facts from it and
//! serves every later query from a cache until it is invalidated, either
//! directly or through a shared [`CacheManager`].

pub mod backend;
pub mod config;
pub mod error;
pub mod model;

pub use backend::{
    CacheManager, FileSource, Invalidate, MeminfoSource, MemoryFactsProvider, MemoryResolver,
};
pub use config::ResolverConfig;
pub use error::MemoryError;
pub use model::{FactName, FactValue, MemoryFactSet, MemoryFacts};
