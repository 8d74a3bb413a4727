//! Queries over diagram data.
//!
//! The engine never builds free-form query strings. Every question it
//! asks is one of the [`Query`] templates; a [`QueryFacade`] answers it
//! with a list of [`Binding`]s. [`StoreQueryFacade`] evaluates templates
//! directly against a [`rdfg_store::QuadStore`], and every template can be
//! rendered as SPARQL for logging or for an external endpoint.

mod binding;
mod error;
mod facade;
mod query;

pub use binding::{var, Binding};
pub use error::{QueryError, QueryResult};
pub use facade::{QueryFacade, StoreQueryFacade};
pub use query::Query;
