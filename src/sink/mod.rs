use serde::Serialize;
use uuid::Uuid;

use crate::aggregate::PassStatus;
use crate::product::types::ProductRecord;

mod console;
#[cfg(test)]
pub mod recording;

pub use console::ConsoleSink;

/// A wishlist whose product listing failed during a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefFailure {
    pub wishlist_id: i64,
    pub reason: String,
}

/// Terminal output of one pass. `products` is in settlement order.
#[derive(Debug, Clone, Serialize)]
pub struct Emission {
    pub pass_id: Uuid,
    pub status: PassStatus,
    pub message: String,
    pub products: Vec<ProductRecord>,
    pub failures: Vec<RefFailure>,
    /// Wishlists whose requests were abandoned by a deadline or cancellation.
    pub outstanding: Vec<i64>,
}

pub trait PresentationSink: Send + Sync {
    /// Called exactly once per pass.
    fn render(&self, emission: Emission);
}
