use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Wishlist;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Create, Get, List, Rename, Delete }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Plan => "plan", Phase::Create => "create", Phase::Get => "get",
        Phase::List => "list", Phase::Rename => "rename", Phase::Delete => "delete",
    }}
    fn span(&self) -> Span { match self {
        Phase::Plan => info_span!("plan"), Phase::Create => info_span!("create"), Phase::Get => info_span!("get"),
        Phase::List => info_span!("list"), Phase::Rename => info_span!("rename"), Phase::Delete => info_span!("delete"),
    }}
}

impl OpMarker for Wishlist {
    const NAME: &'static str = "wishlist";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("wishlist") }
}
