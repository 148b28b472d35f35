//! rtprobe server library entry.
//!
//! This crate wires the live process registry, config, request metrics and
//! the HTTP transport around the core query engine. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod logging;
pub mod obs;
pub mod ops;
pub mod registry;
pub mod router;
pub mod transport;
