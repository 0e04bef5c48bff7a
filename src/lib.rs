//! # League Forge
//!
//! Backend for a fictional football universe with a synthetic season
//! generator.
//!
//! ## Architecture
//!
//! - **models**: Records (nations, leagues, clubs, seasons, table rows)
//! - **simulate**: Strength model, match results and table building
//! - **season**: Load inputs, generate drafts, save seasons
//! - **storage**: JSONL record store
//! - **import**: Bulk loading of records from a JSON bundle
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod import;
pub mod models;
pub mod season;
pub mod simulate;
pub mod storage;

pub use models::*;
