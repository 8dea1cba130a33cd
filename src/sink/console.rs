use crate::output::config::OutputConfig;
use crate::output::types::{Envelope, Meta};
use crate::output::Emitter;
use crate::product::types::sort_for_display;
use crate::telemetry;

use super::{Emission, PresentationSink};

/// Writes each emission to stdout, products sorted for display.
pub struct ConsoleSink {
    emitter: Emitter,
}

impl ConsoleSink {
    pub fn new(cfg: OutputConfig) -> Self {
        Self { emitter: Emitter::from_env(cfg) }
    }

    pub(crate) fn envelope(mut emission: Emission) -> Result<Envelope, serde_json::Error> {
        sort_for_display(&mut emission.products);
        let meta = Meta { pass_id: Some(emission.pass_id), status: Some(emission.status.as_str()) };
        Envelope::result("aggregate", &emission, Some(meta))
    }
}

impl PresentationSink for ConsoleSink {
    fn render(&self, emission: Emission) {
        let log = telemetry::aggregate();
        let pass_id = emission.pass_id;
        let written = Self::envelope(emission)
            .map_err(anyhow::Error::from)
            .and_then(|env| self.emitter.emit(&env).map_err(anyhow::Error::from));
        if let Err(err) = written {
            log.error_kv("render failed", [("pass_id", pass_id.to_string()), ("error", err.to_string())]);
        }
    }
}
