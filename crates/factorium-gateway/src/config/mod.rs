//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use factorium_core::error::{FactoError, Result};

pub use schema::{FactorialSection, ServerSection, ServiceConfig};

/// Load the YAML file at `path`; a missing file yields the defaults.
pub fn load_or_default(path: &str) -> Result<ServiceConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            let cfg = ServiceConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
        Err(e) => Err(FactoError::BadConfig(format!(
            "read config failed ({path}): {e}"
        ))),
    }
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| FactoError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
