use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, error, info, warn, Level, Span};

use crate::output::config::OutputConfig;
use crate::output::types::Envelope;
use crate::output::Emitter;

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

/// Logging handle typed by operation. In JSON log mode every event carries
/// `op` and a flattened `details` string.
pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    /// Root span for one invocation; logs a `start` event with its inputs.
    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        self.event(Level::INFO, "start", None, Some(kv_to_string(fields)));
        self.root_span()
    }

    pub fn span(&self, ph: &O::Phase) -> Span {
        self.event(Level::DEBUG, "phase", Some(ph.name()), None);
        ph.span()
    }

    pub fn info(&self, msg: impl AsRef<str>) { self.event(Level::INFO, msg.as_ref(), None, None) }
    pub fn warn(&self, msg: impl AsRef<str>) { self.event(Level::WARN, msg.as_ref(), None, None) }

    pub fn debug_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        self.event(Level::DEBUG, msg, None, Some(kv_to_string(kv)));
    }

    pub fn warn_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        self.event(Level::WARN, msg, None, Some(kv_to_string(kv)));
    }

    pub fn error_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        self.event(Level::ERROR, msg, None, Some(kv_to_string(kv)));
    }

    // Text mode keeps details inline so stderr stays readable.
    fn event(&self, level: Level, msg: &str, phase: Option<&'static str>, details: Option<String>) {
        let details = details.filter(|d| !d.is_empty());
        if !self.json {
            let mut line = match phase {
                Some(p) => format!("{}={}", msg, p),
                None => msg.to_string(),
            };
            if let Some(d) = &details {
                line = format!("{} ({})", line, d);
            }
            match level {
                Level::ERROR => error!("{}", line),
                Level::WARN => warn!("{}", line),
                Level::DEBUG | Level::TRACE => debug!("{}", line),
                _ => info!("{}", line),
            }
            return;
        }
        let op = self.op_name();
        let phase = phase.unwrap_or("");
        let details = details.unwrap_or_default();
        match level {
            Level::ERROR => error!(op, phase, details = %details, "{}", msg),
            Level::WARN => warn!(op, phase, details = %details, "{}", msg),
            Level::DEBUG | Level::TRACE => debug!(op, phase, details = %details, "{}", msg),
            _ => info!(op, phase, details = %details, "{}", msg),
        }
    }

    pub fn plan<T: Serialize>(&self, plan: &T) -> Result<()> {
        let env = Envelope::plan(self.op_name(), plan, None)?;
        Emitter::from_env(OutputConfig::current()).emit(&env)?;
        Ok(())
    }

    pub fn result<T: Serialize>(&self, result: &T) -> Result<()> {
        let env = Envelope::result(self.op_name(), result, None)?;
        Emitter::from_env(OutputConfig::current()).emit(&env)?;
        Ok(())
    }
}

// Aggregate-specific helpers on the typed context
impl LogCtx<crate::telemetry::ops::aggregate::Aggregate> {
    pub fn settled(&self, wishlist_id: i64, ok: bool, records: usize, completed: usize, total: usize) {
        if self.json { debug!(op = %self.op_name(), wishlist_id, ok, records, completed, total, "settled"); }
        else { debug!("{} wishlist {}: records={} ({}/{})", if ok { "✅" } else { "❌" }, wishlist_id, records, completed, total); }
    }

    pub fn pass_summary(&self, pass_id: &str, status: &str, records: usize, failed: usize, outstanding: usize) {
        if self.json { info!(op = %self.op_name(), pass_id, status, records, failed, outstanding, "pass_summary"); }
        else { info!("📊 Pass {}: status={} records={} failed={} outstanding={}", pass_id, status, records, failed, outstanding); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    kv.into_iter().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<_>>().join(" ")
}
