//! enqueue command handler: validate the destination, then insert jobs.

use std::path::Path;

use anyhow::Result;
use fetchq::{Database, Queue, resolve_destdir};
use tracing::{debug, info};

pub async fn run_enqueue_command(db_file: &Path, urls: &[String], destdir: &Path) -> Result<()> {
    // Validation happens before any insert so an invalid destination rejects
    // the whole command.
    let destdir = resolve_destdir(destdir)?;

    info!(count = urls.len(), destdir = %destdir.display(), "enqueuing download urls");

    let db = Database::new(db_file).await?;
    let queue = Queue::new(db);

    // One committed insert per URL: rows already inserted stay durable even
    // if a later insert fails.
    let destdir_str = destdir.display().to_string();
    for url in urls {
        let id = queue.enqueue(url, &destdir_str).await?;
        debug!(job_id = id, url = %url, "enqueued");
    }

    Ok(())
}
