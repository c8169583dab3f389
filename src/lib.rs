//! Customer analytics service: segment lookups and market-basket product
//! recommendations served from artifacts produced by the offline trainer.

pub mod api;
pub mod config;
pub mod error;
pub mod mining;
pub mod models;
pub mod services;
pub mod store;
pub mod telemetry;
