//! Vector index adapters.

pub mod memory;

pub use memory::InMemoryVectorIndex;
