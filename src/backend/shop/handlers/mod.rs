//! Shop Handlers
//!
//! One set of generic handlers serves every [`Resource`](super::Resource).
//! Routes instantiate them per type, e.g. `create::<Product>`.

pub mod resource;

pub use resource::{create, delete, get, list, update};
