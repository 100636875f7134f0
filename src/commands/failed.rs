//! failed command handler: list failed jobs, most recently handled first.

use std::path::Path;

use anyhow::Result;
use fetchq::{Database, Queue};

use crate::output;

pub async fn run_failed_command(db_file: &Path, limit: i64) -> Result<()> {
    let db = Database::new(db_file).await?;
    let queue = Queue::new(db);

    let jobs = queue.recent_failures(limit).await?;
    let rows: Vec<Vec<String>> = jobs.iter().map(output::failed_row).collect();

    println!(
        "{}",
        output::render_table(&["#", "url", "destdir", "handled at"], &rows)
    );

    Ok(())
}
