//! # resilience-ioc
//!
//! Wires a [`ResilienceRetry`](resilience_core::ResilienceRetry) engine to a
//! notification hook and hands it out with a chosen service lifetime.
//! Optionally installs a console logger so retries are visible out of the box.

pub mod logging;
pub mod support;

pub use logging::init_console_logging;
pub use support::{ResilienceProvider, ResilienceSupport};
