//! Finance Tracker - personal income and expense tracking for the terminal
//!
//! This library provides the core functionality for the `finance` binary:
//! an append-only transaction store, the query and aggregation layer over
//! it, and three front ends that share them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Transactions, money and calendar months
//! - `storage`: The line-oriented transaction file
//! - `services`: Input validation, filters and monthly totals
//! - `display`: Plain-text tables and summaries
//! - `cli`: One-shot commands and the interactive menu
//! - `tui`: The ratatui dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{Settings, TrackerPaths};
//! use finance_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new(None)?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::TrackerError;
