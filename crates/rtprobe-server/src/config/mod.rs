//! Server config loader (strict parsing, env overrides on top).

pub mod schema;

use std::fs;

use rtprobe_core::error::{ProbeError, Result};

pub use schema::{ProbeConfig, ServerSection};

/// Used when neither a CLI argument nor `RTPROBE_CONFIG` names a file.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yml";

/// Read a file, apply process-env overrides, validate.
pub fn load_from_file(path: &str) -> Result<ProbeConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ProbeError::Internal(format!("read config failed ({path}): {e}")))?;
    let mut cfg = parse(&s)?;
    cfg.apply_env(|k| std::env::var(k).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

/// Parse and validate without consulting the environment.
pub fn load_from_str(s: &str) -> Result<ProbeConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn parse(s: &str) -> Result<ProbeConfig> {
    serde_yaml::from_str(s).map_err(|e| ProbeError::BadRequest(format!("invalid yaml: {e}")))
}
