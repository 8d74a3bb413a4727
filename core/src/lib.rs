//! RDF Grapher Core Types
//!
//! This crate provides the foundational types used throughout the engine:
//! - RDF terms (IRIs, blank nodes, literals)
//! - Graph names and quads
//! - Quad patterns for store lookups
//! - Prefix tables for shortening and expanding names
//! - The vocabulary the engine is configured with
//! - Common error types

mod error;
mod pattern;
mod prefix;
mod quad;
mod term;
mod vocab;

pub use error::*;
pub use pattern::*;
pub use prefix::*;
pub use quad::*;
pub use term::*;
pub use vocab::*;
