pub mod migrations;
pub mod store;

pub use store::{KeyValueStore, MemoryStore, SqliteStore};
