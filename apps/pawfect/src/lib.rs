//! # pawfect
//!
//! Site runtime and command line tool for the PAWfect widgets.
//!
//! - [`runtime`] drives the widgets from `pawfect-core` on tokio: the
//!   delivery delay, banner and notice dismissal, the page fade-in and the
//!   deferred map setup
//! - [`config`] holds the timings and switches, loaded from TOML
//! - [`cli`] exposes the workflows over page fixtures

pub mod cli;
pub mod config;
pub mod runtime;

pub use pawfect_core;
