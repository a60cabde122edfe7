//! JAKIM e-Solat client.
//!
//! One endpoint: `GET {base}?r=esolatApi/TakwimSolat&period={today|week|month}&zone={code}`.
//! The payload carries its own status marker which must read `OK!` even on
//! HTTP 200.

pub mod client;

pub use client::{EsolatClient, PrayerSource, DEFAULT_BASE_URL};
