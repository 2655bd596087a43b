//! Shared Module
//!
//! Types that travel over the HTTP API. They carry no server dependencies so
//! API clients can reuse them for (de)serialization.

/// Product and basket documents
pub mod models;

/// Response envelopes
pub mod response;

pub use models::{Basket, BasketStatus, BasketUpdate, Document, Product, ProductUpdate};
pub use response::{ApiResponse, ErrorResponse};
