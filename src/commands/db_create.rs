//! db-create command handler: idempotently create the job schema.

use std::path::Path;

use anyhow::Result;
use fetchq::Database;
use tracing::info;

pub async fn run_db_create_command(db_file: &Path) -> Result<()> {
    info!(path = %db_file.display(), "creating job table");

    let db = Database::new(db_file).await?;
    db.close().await;

    info!("job table ready");
    Ok(())
}
