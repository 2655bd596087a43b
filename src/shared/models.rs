//! Product and basket documents
//!
//! Each resource has a full schema used on creation and an update schema whose
//! fields are all optional. Updates only touch the fields that are present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document: the generated id plus the resource body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    /// Document ID (UUID string)
    pub id: String,
    #[serde(flatten)]
    pub body: T,
}

/// Partial update applied onto a stored resource
pub trait DocumentUpdate<T> {
    /// True when the update carries no fields at all
    fn is_empty(&self) -> bool;

    /// Overwrite the fields present in this update
    fn apply_to(self, target: &mut T);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl DocumentUpdate<Product> for ProductUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }

    fn apply_to(self, target: &mut Product) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(description) = self.description {
            target.description = Some(description);
        }
        if let Some(price) = self.price {
            target.price = price;
        }
    }
}

/// Fulfilment status of a basket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasketStatus {
    Received,
    Processing,
    Delivered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub items: Vec<Product>,
    pub status: BasketStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasketUpdate {
    #[serde(default)]
    pub items: Option<Vec<Product>>,
    #[serde(default)]
    pub status: Option<BasketStatus>,
}

impl DocumentUpdate<Basket> for BasketUpdate {
    fn is_empty(&self) -> bool {
        self.items.is_none() && self.status.is_none()
    }

    fn apply_to(self, target: &mut Basket) {
        if let Some(items) = self.items {
            target.items = items;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
        target.updated_at = Some(Utc::now());
    }
}
