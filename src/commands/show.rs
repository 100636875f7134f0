//! show command handler: list queued jobs, oldest first.

use std::path::Path;

use anyhow::Result;
use fetchq::{Database, JobStatus, Queue};

use crate::output;

pub async fn run_show_command(db_file: &Path, limit: i64) -> Result<()> {
    let db = Database::new(db_file).await?;
    let queue = Queue::new(db);

    let jobs = queue.list_by_status(JobStatus::Queued, limit).await?;
    let rows: Vec<Vec<String>> = jobs.iter().map(output::queued_row).collect();

    println!(
        "{}",
        output::render_table(&["#", "url", "destdir", "created at"], &rows)
    );

    Ok(())
}
