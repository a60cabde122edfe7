//! Malaysian prayer times from JAKIM e-Solat.
//!
//! Monthly tables are fetched per zone and kept in a local key-value store
//! until the calendar month rolls over. Current and next prayer are derived
//! from today's row of that table.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod prayer_times;
pub mod preferences;
pub mod utils;

pub use error::{CalcError, FetchError};
