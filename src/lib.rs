//! # Scrim Lens
//!
//! A local Valorant scrim analytics engine.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match rounds, agent picks, derived stats)
//! - **storage**: CSV table loading with schema validation
//! - **filter**: Date-range and categorical filtering over immutable records
//! - **calculate**: Statistics and derived metrics computation
//! - **config**: Configuration and calibration tables

pub mod calculate;
pub mod config;
pub mod filter;
pub mod models;
pub mod storage;

pub use models::*;
