//! Top-level facade crate for rtprobe.
//!
//! Re-exports the core engine and the server library so users can depend on a single crate.

pub mod core {
    pub use rtprobe_core::*;
}

pub mod server {
    pub use rtprobe_server::*;
}
