//! Simulated system-monitoring dashboard.
//!
//! `core` holds the domain logic (threshold classification, alert derivation,
//! process filtering, session handling and the metric ticker). `app`,
//! `screens` and `widgets` are the ratatui front end; `cli` is the clap
//! surface used by the `sysmon` binary.

pub mod app;
pub mod cli;
pub mod core;
pub mod screens;
pub mod utils;
pub mod widgets;
