//! External downloader invocation.
//!
//! The dispatcher talks to the downloader through the [`Invoker`] trait so
//! tests can substitute deterministic exit codes without spawning processes.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Downloader program used when none is configured.
pub const DEFAULT_DOWNLOADER: &str = "yle-dl";

/// Errors from attempting to run the downloader.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The program could not be launched at all (missing binary, permissions).
    #[error("failed to launch {program}: {source}")]
    Launch {
        /// Program that failed to spawn.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },
}

/// Capability to run the external downloader for one job.
///
/// Implementations block until the program exits and report only its exit
/// code; output files land in `destdir` as a side effect of the program.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Runs the downloader for `url`, writing into `destdir`.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::Launch`] when the program cannot be spawned.
    /// A launch failure is a per-job outcome for the dispatcher, never a
    /// fatal error.
    async fn run(&self, url: &str, destdir: &Path) -> Result<i32, InvokeError>;
}

#[async_trait]
impl<I: Invoker + ?Sized> Invoker for std::sync::Arc<I> {
    async fn run(&self, url: &str, destdir: &Path) -> Result<i32, InvokeError> {
        (**self).run(url, destdir).await
    }
}

/// Production invoker: spawns `<program> --destdir <destdir> <url>` and waits.
#[derive(Debug, Clone)]
pub struct CommandInvoker {
    program: String,
}

impl CommandInvoker {
    /// Creates an invoker for the given downloader program.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the configured program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Invoker for CommandInvoker {
    async fn run(&self, url: &str, destdir: &Path) -> Result<i32, InvokeError> {
        debug!(
            command = %format!("{} --destdir {} {}", self.program, destdir.display(), url),
            "spawning downloader"
        );

        let status = Command::new(&self.program)
            .arg("--destdir")
            .arg(destdir)
            .arg(url)
            .status()
            .await
            .map_err(|source| InvokeError::Launch {
                program: self.program.clone(),
                source,
            })?;

        // Termination by signal leaves no exit code; report it as a failure.
        Ok(status.code().unwrap_or(-1))
    }
}
