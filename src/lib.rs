pub mod cli;
pub mod entity;
pub mod error;
pub mod export;
pub mod server;
pub mod store;

pub use error::{IljiError, Result};
pub use store::JournalStore;
