use anyhow::Result;
use tracing::{debug, error, info, trace, warn};

/// Emits a spread of records so the tinting can be eyeballed on a real
/// terminal. Run with LOG_LEVEL=trace to see everything.
fn main() -> Result<()> {
    tintlog::init()?;

    info!("tintlog demo starting");
    info!(port = 8080, host = "0.0.0.0", "server listening");
    debug!(workers = 4, "pool sized");
    trace!("poll tick");
    warn!(retries = 3, backoff_ms = 250, "upstream flapping");
    error!(code = 500, path = "/rules", "request failed");
    info!("multi-line payload:\n  line one\n  line two");
    info!("a \x1b[1mbold\x1b[0m word keeps its background after the reset");
    info!("done");

    Ok(())
}
