//! Healthgrid Core Library
//!
//! Name resolution and date-keyed reconciliation for a personal health
//! tracker stored on a tabular grid.

pub mod activity;
pub mod aggregate;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod eventlog;
pub mod grid;
pub mod layout;
pub mod lock;
pub mod logging;
pub mod similarity;
pub mod store;
pub mod submit;
pub mod suggest;
pub mod tally;
pub mod text;
