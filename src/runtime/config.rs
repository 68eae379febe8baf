//! Runtime configuration.

use crate::binding::SignatureStyle;
use thiserror::Error;

/// Environment variable overriding the worker count.
pub const ENV_WORKERS: &str = "TOF_WORKERS";
/// Environment variable overriding the sequential cutoff.
pub const ENV_MIN_CHUNK: &str = "TOF_MIN_CHUNK";
/// Environment variable selecting `named` or `positional` arguments.
pub const ENV_SIGNATURE: &str = "TOF_SIGNATURE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Number of worker threads.
    pub worker_count: usize,
    /// Channels shorter than this are matched on the calling thread.
    pub min_chunk_len: usize,
    /// Argument style of the exported `TOF`.
    pub signature: SignatureStyle,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_count: num_cpus::get(),
            min_chunk_len: 4096,
            signature: SignatureStyle::Named,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overlaid with `TOF_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_WORKERS) {
            config.worker_count = parse_count(ENV_WORKERS, &value)?;
        }
        if let Some(value) = lookup(ENV_MIN_CHUNK) {
            config.min_chunk_len = parse_count(ENV_MIN_CHUNK, &value)?;
        }
        if let Some(value) = lookup(ENV_SIGNATURE) {
            config.signature = value.parse().map_err(|reason| ConfigError::Invalid {
                var: ENV_SIGNATURE,
                value: value.clone(),
                reason,
            })?;
        }

        Ok(config)
    }
}

/// Parse a count; `0` workers means auto-detect.
fn parse_count(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    let n: usize = value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if n == 0 && var == ENV_WORKERS {
        Ok(num_cpus::get())
    } else {
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert!(config.worker_count >= 1);
    }

    #[test]
    fn test_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            (ENV_WORKERS, "3"),
            (ENV_MIN_CHUNK, " 128 "),
            (ENV_SIGNATURE, "positional"),
        ]))
        .unwrap();

        assert_eq!(config.worker_count, 3);
        assert_eq!(config.min_chunk_len, 128);
        assert_eq!(config.signature, SignatureStyle::Positional);
    }

    #[test]
    fn test_zero_workers_means_auto() {
        let config = RuntimeConfig::from_lookup(lookup(&[(ENV_WORKERS, "0")])).unwrap();
        assert_eq!(config.worker_count, num_cpus::get());
    }

    #[test]
    fn test_invalid_values() {
        let err = RuntimeConfig::from_lookup(lookup(&[(ENV_WORKERS, "many")])).unwrap_err();
        assert!(err.to_string().contains(ENV_WORKERS));

        let err = RuntimeConfig::from_lookup(lookup(&[(ENV_SIGNATURE, "kwargs")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_SIGNATURE, .. }));
    }
}
