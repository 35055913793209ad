mod fact;
mod memory_facts;

pub use fact::{FactName, FactValue, MemoryFactSet};
pub use memory_facts::{bytes_to_human_readable, MemoryFacts, MemorySection};
