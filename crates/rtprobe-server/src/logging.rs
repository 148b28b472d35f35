//! Tracing subscriber bootstrap.
//!
//! `RUST_LOG` wins when set; otherwise `info`. Production mode emits JSON
//! lines, development mode the human-readable formatter.

use tracing_subscriber::{fmt, EnvFilter};

use rtprobe_core::error::{ProbeError, Result};

pub fn init(production: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let res = if production {
        fmt().json().with_env_filter(filter).try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };

    res.map_err(|e| ProbeError::Internal(format!("logger init failed: {e}")))
}
