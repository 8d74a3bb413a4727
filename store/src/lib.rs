//! Quad storage for diagram data.
//!
//! [`QuadStore`] is the seam the derivation, deletion and session layers
//! talk to. [`MemoryStore`] is the in-memory implementation with
//! position indexes.

mod index;
mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::QuadStore;
