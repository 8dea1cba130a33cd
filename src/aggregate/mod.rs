use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::config::ClientConfig;
use crate::output::config::OutputConfig;
use crate::sink::ConsoleSink;
use crate::telemetry::{self};
use crate::transport::HttpTransport;

mod pass;
mod state;
mod status;

pub use pass::{aggregate, load_all, PassOptions};
pub use status::PassStatus;

/// wishlist load-all
#[derive(Args, Debug)]
pub struct LoadAllCmd {
    /// Stop waiting after this many milliseconds and emit what has settled
    #[arg(long)]
    pub deadline_ms: Option<u64>,
    /// Walk the directory in pages of this size
    #[arg(long)]
    pub page_size: Option<u32>,
}

pub async fn run(cfg: &ClientConfig, args: LoadAllCmd) -> Result<()> {
    let log = telemetry::aggregate();
    let mut cfg = cfg.clone();
    if let Some(size) = args.page_size.filter(|s| *s > 0) { cfg.directory_page_size = Some(size); }
    let deadline = args.deadline_ms.map(Duration::from_millis).or(cfg.pass_deadline);

    let transport = HttpTransport::new(&cfg)?;
    let sink = ConsoleSink::new(OutputConfig::current());
    let opts = PassOptions::with_deadline(deadline);

    let cancel = opts.cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() { cancel.cancel(); }
    });

    let summary = load_all(&transport, &cfg, &sink, &opts).await;
    interrupt.abort();

    if summary.status == PassStatus::DirectoryFailed {
        log.warn("Wishlist directory unavailable; nothing was loaded.");
    }
    Ok(())
}
