use uuid::Uuid;

use crate::product::types::ProductRecord;
use crate::sink::{Emission, RefFailure};
use crate::wishlist::types::WishlistRef;

use super::status::{FetchOutcome, Interrupt, PassStatus};

/// Join state of a single pass. Owned by that pass only; `finish` consumes
/// it, so a pass can emit at most once.
#[derive(Debug)]
pub struct AggregationState {
    pass_id: Uuid,
    total: usize,
    completed: usize,
    collected: Vec<ProductRecord>,
    had_failure: bool,
    failures: Vec<RefFailure>,
    outstanding: Vec<i64>,
}

impl AggregationState {
    pub fn new(pass_id: Uuid, refs: &[WishlistRef]) -> Self {
        Self {
            pass_id,
            total: refs.len(),
            completed: 0,
            collected: Vec::new(),
            had_failure: false,
            failures: Vec::new(),
            outstanding: refs.iter().map(|r| r.id).collect(),
        }
    }

    pub fn total(&self) -> usize { self.total }
    pub fn completed(&self) -> usize { self.completed }
    pub fn is_terminal(&self) -> bool { self.completed >= self.total }

    /// Records one settlement. Success appends in arrival order; failure
    /// appends nothing but still counts.
    pub fn settle(&mut self, wishlist_id: i64, outcome: FetchOutcome) {
        self.completed += 1;
        if let Some(pos) = self.outstanding.iter().position(|id| *id == wishlist_id) {
            self.outstanding.remove(pos);
        }
        match outcome {
            FetchOutcome::Success(records) => self.collected.extend(records),
            FetchOutcome::Failure(reason) => {
                self.had_failure = true;
                self.failures.push(RefFailure { wishlist_id, reason });
            }
        }
    }

    pub fn finish(self, interrupt: Option<Interrupt>) -> Emission {
        let status = match interrupt {
            _ if self.total == 0 => PassStatus::Empty,
            Some(Interrupt::Deadline) if !self.outstanding.is_empty() => PassStatus::TimedOut,
            Some(Interrupt::Cancelled) if !self.outstanding.is_empty() => PassStatus::Cancelled,
            _ if self.had_failure => PassStatus::Partial,
            _ => PassStatus::All,
        };
        let message = match status {
            PassStatus::All => format!("All {} wishlists loaded ({} products)", self.total, self.collected.len()),
            PassStatus::Partial => format!("Loaded with errors: {} of {} wishlists failed", self.failures.len(), self.total),
            PassStatus::Empty => "No wishlists found".to_string(),
            PassStatus::TimedOut => format!("Timed out: {} of {} wishlists still pending", self.outstanding.len(), self.total),
            PassStatus::Cancelled => format!("Cancelled: {} of {} wishlists still pending", self.outstanding.len(), self.total),
            PassStatus::DirectoryFailed => "Could not load wishlists".to_string(),
        };
        let outstanding = if status == PassStatus::TimedOut || status == PassStatus::Cancelled { self.outstanding } else { Vec::new() };
        Emission {
            pass_id: self.pass_id,
            status,
            message,
            products: self.collected,
            failures: self.failures,
            outstanding,
        }
    }
}

/// Emission for a pass whose directory never arrived.
pub fn directory_failed(pass_id: Uuid, reason: &str) -> Emission {
    Emission {
        pass_id,
        status: PassStatus::DirectoryFailed,
        message: format!("Could not load wishlists: {}", reason),
        products: Vec::new(),
        failures: Vec::new(),
        outstanding: Vec::new(),
    }
}
