use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Aggregate;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Directory, Dispatch, Settle, Emit }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Directory => "directory",
        Phase::Dispatch => "dispatch",
        Phase::Settle => "settle",
        Phase::Emit => "emit",
    }}
    fn span(&self) -> Span { match self {
        Phase::Directory => info_span!("directory"),
        Phase::Dispatch => info_span!("dispatch"),
        Phase::Settle => info_span!("settle"),
        Phase::Emit => info_span!("emit"),
    }}
}

impl OpMarker for Aggregate {
    const NAME: &'static str = "aggregate";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("aggregate") }
}
