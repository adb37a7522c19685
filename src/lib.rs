pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod warnings;

pub use error::{NotekeepError, Result};
pub use storage::NoteStore;
