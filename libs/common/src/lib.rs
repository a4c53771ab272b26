//! Common library for the Marquee application
//!
//! Database connectivity, runtime mode and logging setup shared by the
//! Marquee crates.

pub mod config;
pub mod database;
pub mod error;
pub mod telemetry;
