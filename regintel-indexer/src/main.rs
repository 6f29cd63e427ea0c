//! Regulatory intelligence search indexer.
//!
//! Reads one ingestion event per line (NDJSON) from stdin and runs each
//! through the ingestion gateway. The event transport that produces these
//! lines is external; redelivery of failed events is its responsibility, so
//! a failure here is logged and the loop moves on.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use regintel_indexer::{Dependencies, IndexingError};

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting regintel indexer");

    let deps = Dependencies::new().await?;
    let gateway = deps.gateway;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) if line.trim().is_empty() => continue,
                    Some(line) => {
                        match gateway.process_event(&line).await {
                            Ok(receipt) => {
                                info!(
                                    record_id = %receipt.record_id,
                                    index = %receipt.index,
                                    "Event processed"
                                );
                            }
                            Err(e) => {
                                // Already logged with stage context by the
                                // gateway; keep consuming events.
                                warn!(error = %e, "Event failed, continuing");
                            }
                        }
                    }
                    None => {
                        info!("Input stream ended");
                        break;
                    }
                }
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    error!(error = %e, "Failed to listen for shutdown signal");
                }
                info!("Received shutdown signal");
                break;
            }
        }
    }

    info!("Indexer shutdown complete");
    Ok(())
}
