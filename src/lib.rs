//! Taller Reports
//!
//! Reporting and dashboard read paths for a vehicle service shop: order,
//! revenue and customer aggregates over the shop's MySQL store, served as
//! JSON over actix-web.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::dashboard;
pub use modules::reports;
