use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use factorium_core::error::{FactoError, Result};

const MAX_DELAY_MS: u64 = 60_000;
const MAX_NUMBER_CEILING: u64 = 100_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub factorial: FactorialSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            factorial: FactorialSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FactoError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.factorial.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            FactoError::BadConfig(format!(
                "server.listen must be a valid SocketAddr ({}): {e}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorialSection {
    /// Simulated downstream latency added before every computation.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Largest `n` the service computes; anything above fails with 500.
    #[serde(default = "default_max_number")]
    pub max_number: u64,
}

impl Default for FactorialSection {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            max_number: default_max_number(),
        }
    }
}

impl FactorialSection {
    pub fn validate(&self) -> Result<()> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(FactoError::BadConfig(format!(
                "factorial.delay_ms must be at most {MAX_DELAY_MS}"
            )));
        }
        if self.max_number > MAX_NUMBER_CEILING {
            return Err(FactoError::BadConfig(format!(
                "factorial.max_number must be at most {MAX_NUMBER_CEILING}"
            )));
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_delay_ms() -> u64 {
    2000
}
fn default_max_number() -> u64 {
    10_000
}
