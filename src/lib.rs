//! CTF Achievements - an achievement board service for CTF competitions
//!
//! This library computes "achievement" badges (most category solves, first
//! bloods, lone wolf, and friends) from the competition's solve records and
//! serves them as an authenticated, cached HTML page.
//!
//! # Architecture
//! - `storage`: SeaORM storage backend and the aggregate queries
//! - `services`: achievement board assembly (ranking, ties, dominator)
//! - `api`: HTTP services and middleware
//! - `cache`: rendered-page memoization
//! - `config`: configuration management
//! - `runtime`: application lifecycle and server startup
//! - `system`: logging and system utilities

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
