use serde::Serialize;

use crate::product::types::ProductRecord;

/// Terminal status of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStatus {
    All,
    Partial,
    Empty,
    DirectoryFailed,
    TimedOut,
    Cancelled,
}

impl PassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassStatus::All => "all",
            PassStatus::Partial => "partial",
            PassStatus::Empty => "empty",
            PassStatus::DirectoryFailed => "directory_failed",
            PassStatus::TimedOut => "timed_out",
            PassStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Result of one wishlist's product listing within a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Vec<ProductRecord>),
    Failure(String),
}

/// Why a pass stopped before every request settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Deadline,
    Cancelled,
}
