//! Transport layer (HTTP).
//!
//! Exposes the metric handlers and the middleware stack wrapped around them.
//! Wire format is JSON; the core engine never sees it.

pub mod handlers;
pub mod middleware;
