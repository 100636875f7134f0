//! dequeue command handler: run the dispatcher, one-shot or polling.

use std::path::Path;

use anyhow::Result;
use fetchq::{CommandInvoker, Database, Dispatcher, POLL_INTERVAL, Queue};
use tracing::info;

pub async fn run_dequeue_command(
    db_file: &Path,
    downloader: &str,
    limit: i64,
    continuous: bool,
) -> Result<()> {
    let db = Database::new(db_file).await?;
    let dispatcher = Dispatcher::new(Queue::new(db), CommandInvoker::new(downloader));

    if continuous {
        // Runs until the process is terminated.
        dispatcher.run_polling(limit, POLL_INTERVAL).await?;
        return Ok(());
    }

    let stats = dispatcher.run_once(limit).await?;
    info!(ready = stats.ready, failed = stats.failed, "done");

    // Failed jobs are a recorded state, not a process error: exit 0 either
    // way and leave them visible via `fetchq failed`.
    Ok(())
}
