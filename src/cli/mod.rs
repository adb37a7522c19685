mod commands;
mod handlers;

pub use commands::{Cli, Commands, IngestArgs};
pub use handlers::{handle_add, handle_get, handle_ingest, handle_list};
