use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{ApiRoutes, ClientConfig};
use crate::product::types::{ProductRecord, ProductWire};
use crate::sink::{Emission, PresentationSink};
use crate::telemetry::{self};
use crate::telemetry::ops::aggregate::Phase as AggregatePhase;
use crate::transport::{expect_body, ApiRequest, Transport};
use crate::wishlist::directory;
use crate::wishlist::types::WishlistRef;

use super::state::{self, AggregationState};
use super::status::{FetchOutcome, Interrupt, PassStatus};

#[derive(Clone, Debug, Default)]
pub struct PassOptions {
    /// Emit early with `TimedOut` once this much time has passed.
    pub deadline: Option<Duration>,
    pub cancel: CancellationToken,
}

impl PassOptions {
    pub fn with_deadline(deadline: Option<Duration>) -> Self {
        Self { deadline, cancel: CancellationToken::new() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PassSummary {
    pub pass_id: Uuid,
    pub status: PassStatus,
    pub records: usize,
    pub failed: usize,
    pub outstanding: usize,
}

impl From<&Emission> for PassSummary {
    fn from(e: &Emission) -> Self {
        PassSummary {
            pass_id: e.pass_id,
            status: e.status,
            records: e.products.len(),
            failed: e.failures.len(),
            outstanding: e.outstanding.len(),
        }
    }
}

/// Loads the directory, then aggregates every wishlist's products. A failed
/// directory emits `DirectoryFailed` without issuing product requests.
pub async fn load_all<T, S>(t: &T, cfg: &ClientConfig, sink: &S, opts: &PassOptions) -> PassSummary
where
    T: Transport + ?Sized,
    S: PresentationSink + ?Sized,
{
    let log = telemetry::aggregate();
    let loaded = directory::load(t, cfg)
        .instrument(log.span(&AggregatePhase::Directory))
        .await;

    match loaded {
        Ok(refs) => aggregate(t, &cfg.routes, sink, refs, opts).await,
        Err(err) => {
            let pass_id = Uuid::new_v4();
            log.warn_kv("directory failed", [("pass_id", pass_id.to_string()), ("error", err.to_string())]);
            emit(sink, state::directory_failed(pass_id, &err.reason()))
        }
    }
}

/// One pass: fan out a product listing per ref, join on the settlement
/// count, emit once.
pub async fn aggregate<T, S>(t: &T, routes: &ApiRoutes, sink: &S, refs: Vec<WishlistRef>, opts: &PassOptions) -> PassSummary
where
    T: Transport + ?Sized,
    S: PresentationSink + ?Sized,
{
    let log = telemetry::aggregate();
    let pass_id = Uuid::new_v4();
    let root = log.root_span_kv([
        ("pass_id", pass_id.to_string()),
        ("wishlists", refs.len().to_string()),
        ("deadline_ms", format!("{:?}", opts.deadline.map(|d| d.as_millis()))),
    ]);
    let emission = run_pass(t, routes, pass_id, refs, opts).instrument(root.clone()).await;
    let _g = root.entered();
    emit(sink, emission)
}

async fn run_pass<T>(t: &T, routes: &ApiRoutes, pass_id: Uuid, refs: Vec<WishlistRef>, opts: &PassOptions) -> Emission
where
    T: Transport + ?Sized,
{
    let log = telemetry::aggregate();
    let mut state = AggregationState::new(pass_id, &refs);
    if refs.is_empty() {
        return state.finish(None);
    }

    let mut pending: FuturesUnordered<_> = {
        let _s = log.span(&AggregatePhase::Dispatch).entered();
        refs.iter().map(|r| fetch_products(t, routes, r.id)).collect()
    };
    log.debug_kv("dispatched", [("requests", pending.len().to_string())]);

    let deadline = async {
        match opts.deadline {
            Some(d) => tokio::time::sleep(d).await,
            None => futures::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let mut interrupt = None;
    while !state.is_terminal() {
        tokio::select! {
            biased;
            _ = opts.cancel.cancelled() => { interrupt = Some(Interrupt::Cancelled); break; }
            _ = &mut deadline => { interrupt = Some(Interrupt::Deadline); break; }
            next = pending.next() => {
                let Some((wishlist_id, outcome)) = next else { break };
                let _s = log.span(&AggregatePhase::Settle).entered();
                let (ok, records) = match &outcome {
                    FetchOutcome::Success(r) => (true, r.len()),
                    FetchOutcome::Failure(reason) => {
                        log.warn_kv("product listing failed", [("wishlist_id", wishlist_id.to_string()), ("reason", reason.clone())]);
                        (false, 0)
                    }
                };
                state.settle(wishlist_id, outcome);
                log.settled(wishlist_id, ok, records, state.completed(), state.total());
            }
        }
    }

    // Abandoned requests are dropped here; their settlements never reach the state.
    drop(pending);
    state.finish(interrupt)
}

async fn fetch_products<T>(t: &T, routes: &ApiRoutes, wishlist_id: i64) -> (i64, FetchOutcome)
where
    T: Transport + ?Sized,
{
    let listed = t
        .request(ApiRequest::get(routes.items(wishlist_id)))
        .await
        .and_then(expect_body::<Vec<ProductWire>>);
    let outcome = match listed {
        Ok(wires) => FetchOutcome::Success(attribute(wishlist_id, wires)),
        Err(err) => FetchOutcome::Failure(err.reason()),
    };
    (wishlist_id, outcome)
}

fn attribute(wishlist_id: i64, wires: Vec<ProductWire>) -> Vec<ProductRecord> {
    let received = wires.len();
    let records: Vec<ProductRecord> = wires.into_iter().filter_map(|w| w.into_record(wishlist_id)).collect();
    if records.len() < received {
        telemetry::aggregate().warn_kv("dropped foreign products", [
            ("wishlist_id", wishlist_id.to_string()),
            ("dropped", (received - records.len()).to_string()),
        ]);
    }
    records
}

fn emit<S: PresentationSink + ?Sized>(sink: &S, emission: Emission) -> PassSummary {
    let log = telemetry::aggregate();
    let _s = log.span(&AggregatePhase::Emit).entered();
    let summary = PassSummary::from(&emission);
    log.pass_summary(&summary.pass_id.to_string(), summary.status.as_str(), summary.records, summary.failed, summary.outstanding);
    sink.render(emission);
    summary
}
