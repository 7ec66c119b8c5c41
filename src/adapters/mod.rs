//! Adapter implementations of the domain ports.

pub mod catalog;
pub mod embeddings;
pub mod generation;
pub mod index;
