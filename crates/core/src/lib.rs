//! Domain logic for the Lucrum training service.
//!
//! This crate has no database dependencies. Persistence is reached through
//! the [`store::ProgressStore`] trait, implemented by `lucrum-db` for
//! PostgreSQL and by [`memory_store`] for tests.

pub mod access_gate;
pub mod error;
pub mod library;
pub mod memory_store;
pub mod progression;
pub mod quiz;
pub mod referral;
pub mod store;
pub mod training;
pub mod types;
pub mod video_sources;
