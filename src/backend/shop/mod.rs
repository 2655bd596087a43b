//! Shop Module
//!
//! Product and basket CRUD. Both resources are stored as JSON documents
//! through [`DocumentStore`] and served by the generic handlers in
//! [`handlers`]. Every route here requires a bearer token.
//!
//! - **`db`** - Document table access
//! - **`handlers`** - Generic create/list/get/update/delete handlers

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};

use crate::shared::models::{Basket, BasketUpdate, DocumentUpdate, Product, ProductUpdate};

pub mod db;
pub mod handlers;

pub use db::{Collection, DocumentStore};

/// A resource served by the generic CRUD handlers
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name in the document table
    const COLLECTION: &'static str;
    /// Singular name used in response messages
    const NAME: &'static str;

    type Update: DocumentUpdate<Self> + DeserializeOwned + Send + 'static;

    /// Hook run on a new resource before it is stored
    fn prepare_new(&mut self) {}
}

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const NAME: &'static str = "product";
    type Update = ProductUpdate;
}

impl Resource for Basket {
    const COLLECTION: &'static str = "baskets";
    const NAME: &'static str = "basket";
    type Update = BasketUpdate;

    fn prepare_new(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(Utc::now());
        }
    }
}

impl DocumentStore {
    /// Collection backing resource `R`
    pub fn resource<R: Resource>(&self) -> Collection<R> {
        self.collection(R::COLLECTION)
    }
}
