//! CLI command handlers.

mod db_create;
mod dequeue;
mod enqueue;
mod failed;
mod show;

pub use db_create::run_db_create_command;
pub use dequeue::run_dequeue_command;
pub use enqueue::run_enqueue_command;
pub use failed::run_failed_command;
pub use show::run_show_command;
