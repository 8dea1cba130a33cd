use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Product;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Add, Get, List, Patch, Delete }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Plan => "plan", Phase::Add => "add", Phase::Get => "get",
        Phase::List => "list", Phase::Patch => "patch", Phase::Delete => "delete",
    }}
    fn span(&self) -> Span { match self {
        Phase::Plan => info_span!("plan"), Phase::Add => info_span!("add"), Phase::Get => info_span!("get"),
        Phase::List => info_span!("list"), Phase::Patch => info_span!("patch"), Phase::Delete => info_span!("delete"),
    }}
}

impl OpMarker for Product {
    const NAME: &'static str = "product";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("product") }
}
