//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fetchq::DEFAULT_DOWNLOADER;

/// Persistent download queue with a polling dispatcher.
///
/// Jobs are stored in SQLite and handed one at a time to an external
/// downloader; outcomes are recorded so failures stay visible.
#[derive(Parser, Debug)]
#[command(name = "fetchq")]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the queue database file
    #[arg(long, global = true, default_value = "fetchq.db")]
    pub db_file: PathBuf,

    /// Path to the detailed log file
    #[arg(long, global = true, default_value = "fetchq.log")]
    pub log_file: PathBuf,

    /// Downloader program invoked per job as `<program> --destdir DIR URL`
    #[arg(long, global = true, default_value = DEFAULT_DOWNLOADER)]
    pub downloader: String,

    /// Increase console verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error console output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the job table (no-op if it already exists)
    DbCreate,

    /// Add download jobs to the queue
    Enqueue {
        /// URLs to download
        #[arg(required = true)]
        urls: Vec<String>,

        /// Directory the downloader writes into (must exist and be writable)
        #[arg(long, default_value = ".")]
        destdir: PathBuf,
    },

    /// List queued jobs, oldest first
    Show {
        /// Maximum rows to list (0 or less lists all)
        #[arg(long = "n", default_value_t = -1, allow_negative_numbers = true)]
        n: i64,
    },

    /// Process queued jobs in creation order
    Dequeue {
        /// Maximum jobs to process per pass (0 or less processes all)
        #[arg(long = "n", default_value_t = -1, allow_negative_numbers = true)]
        n: i64,

        /// Keep polling the queue every 5 seconds instead of exiting
        #[arg(long)]
        continuous: bool,
    },

    /// List failed jobs, most recently handled first
    Failed {
        /// Maximum rows to list (0 or less lists all)
        #[arg(long = "n", default_value_t = -1, allow_negative_numbers = true)]
        n: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_db_create_parses() {
        let cli = Cli::try_parse_from(["fetchq", "db-create"]).unwrap();
        assert!(matches!(cli.command, Command::DbCreate));
        assert_eq!(cli.db_file, PathBuf::from("fetchq.db"));
        assert_eq!(cli.log_file, PathBuf::from("fetchq.log"));
        assert_eq!(cli.downloader, DEFAULT_DOWNLOADER);
    }

    #[test]
    fn test_cli_enqueue_requires_urls() {
        let result = Cli::try_parse_from(["fetchq", "enqueue"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_enqueue_multiple_urls_and_destdir() {
        let cli = Cli::try_parse_from([
            "fetchq",
            "enqueue",
            "https://example.com/a",
            "https://example.com/b",
            "--destdir",
            "/tmp/x",
        ])
        .unwrap();

        let Command::Enqueue { urls, destdir } = cli.command else {
            panic!("expected enqueue");
        };
        assert_eq!(urls.len(), 2);
        assert_eq!(destdir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_cli_enqueue_destdir_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["fetchq", "enqueue", "https://example.com/a"]).unwrap();
        let Command::Enqueue { destdir, .. } = cli.command else {
            panic!("expected enqueue");
        };
        assert_eq!(destdir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_show_limit_defaults_to_unbounded() {
        let cli = Cli::try_parse_from(["fetchq", "show"]).unwrap();
        let Command::Show { n } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(n, -1);
    }

    #[test]
    fn test_cli_show_limit_flag() {
        let cli = Cli::try_parse_from(["fetchq", "show", "--n", "5"]).unwrap();
        let Command::Show { n } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(n, 5);
    }

    #[test]
    fn test_cli_dequeue_defaults() {
        let cli = Cli::try_parse_from(["fetchq", "dequeue"]).unwrap();
        let Command::Dequeue { n, continuous } = cli.command else {
            panic!("expected dequeue");
        };
        assert_eq!(n, -1);
        assert!(!continuous);
    }

    #[test]
    fn test_cli_dequeue_continuous_flag() {
        let cli = Cli::try_parse_from(["fetchq", "dequeue", "--n", "1", "--continuous"]).unwrap();
        let Command::Dequeue { n, continuous } = cli.command else {
            panic!("expected dequeue");
        };
        assert_eq!(n, 1);
        assert!(continuous);
    }

    #[test]
    fn test_cli_failed_limit_flag() {
        let cli = Cli::try_parse_from(["fetchq", "failed", "--n", "10"]).unwrap();
        let Command::Failed { n } = cli.command else {
            panic!("expected failed");
        };
        assert_eq!(n, 10);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fetchq", "show", "--db-file", "/tmp/q.db"]).unwrap();
        assert_eq!(cli.db_file, PathBuf::from("/tmp/q.db"));
    }

    #[test]
    fn test_cli_verbose_and_quiet_flags() {
        let cli = Cli::try_parse_from(["fetchq", "-vv", "show"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["fetchq", "--quiet", "show"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_unknown_subcommand_rejected() {
        let result = Cli::try_parse_from(["fetchq", "purge"]);
        assert!(result.is_err());
    }
}
