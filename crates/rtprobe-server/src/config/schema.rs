use serde::Deserialize;
use rtprobe_core::error::{ProbeError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    pub version: u32,

    /// Production mode: JSON log lines instead of the human formatter.
    #[serde(default)]
    pub production: bool,

    #[serde(default)]
    pub server: ServerSection,
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ProbeError::BadRequest(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;   // Verify the scope of value

        Ok(())
    }

    /// Apply `RTPROBE_*` overrides from `lookup` (usually the process env).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RTPROBE_PRODUCTION") {
            self.production = parse_bool("RTPROBE_PRODUCTION", &v)?;
        }
        if let Some(v) = lookup("RTPROBE_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("RTPROBE_PORT") {
            self.server.port = v
                .trim()
                .parse()
                .map_err(|e| ProbeError::BadRequest(format!("RTPROBE_PORT: {e}")))?;
        }
        if let Some(v) = lookup("RTPROBE_TIMEOUT") {
            self.server.request_timeout_seconds = v
                .trim()
                .parse()
                .map_err(|e| ProbeError::BadRequest(format!("RTPROBE_TIMEOUT: {e}")))?;
        }
        if let Some(v) = lookup("RTPROBE_DISABLE_CORS") {
            self.server.disable_cors = parse_bool("RTPROBE_DISABLE_CORS", &v)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    #[serde(default)]
    pub disable_cors: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout_seconds(),
            disable_cors: false,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ProbeError::BadRequest("server.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ProbeError::BadRequest("server.port must not be 0".into()));
        }
        if !(1..=3600).contains(&self.request_timeout_seconds) {
            return Err(ProbeError::BadRequest(
                "server.request_timeout_seconds must be between 1 and 3600".into(),
            ));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ProbeError::BadRequest(format!("{key}: not a boolean: {other}"))),
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout_seconds() -> u64 {
    60
}
