//! launchdash: interactive explorer for rocket launch records.
//!
//! The library holds the reusable core: an immutable [`dataset::Dataset`],
//! a per-session [`filter::FilterState`], the pure derivations in [`views`]
//! and the chart-ready adapters in [`presentation`]. The binary wires these
//! into a CLI and an embedded web dashboard.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod logging;
pub mod presentation;
pub mod session;
pub mod views;
pub mod web;
