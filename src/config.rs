use crate::simulator::SimulatorConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub failure_rate: f64,
    pub rng_seed: Option<u64>, // Reproducible lookups when set
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            min_delay_ms: 900,
            max_delay_ms: 1500,
            failure_rate: 0.10,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            port: var("PORT")
                .map(|p| p.trim().parse::<u16>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?
                .unwrap_or(defaults.port),
            min_delay_ms: var("LOOKUP_MIN_DELAY_MS")
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .map_err(|_| {
                    anyhow::anyhow!("LOOKUP_MIN_DELAY_MS must be a whole number of milliseconds")
                })?
                .unwrap_or(defaults.min_delay_ms),
            max_delay_ms: var("LOOKUP_MAX_DELAY_MS")
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .map_err(|_| {
                    anyhow::anyhow!("LOOKUP_MAX_DELAY_MS must be a whole number of milliseconds")
                })?
                .unwrap_or(defaults.max_delay_ms),
            failure_rate: var("LOOKUP_FAILURE_RATE")
                .map(|v| v.trim().parse::<f64>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("LOOKUP_FAILURE_RATE must be a number"))?
                .unwrap_or(defaults.failure_rate),
            rng_seed: var("LOOKUP_RNG_SEED")
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("LOOKUP_RNG_SEED must be an unsigned integer"))?,
        };

        if config.port == 0 {
            anyhow::bail!("PORT must be a valid number between 1-65535");
        }
        if config.min_delay_ms >= config.max_delay_ms {
            anyhow::bail!(
                "LOOKUP_MIN_DELAY_MS ({}) must be below LOOKUP_MAX_DELAY_MS ({})",
                config.min_delay_ms,
                config.max_delay_ms
            );
        }
        if !(0.0..=1.0).contains(&config.failure_rate) {
            anyhow::bail!("LOOKUP_FAILURE_RATE must be between 0 and 1");
        }

        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!(
            "Lookup delay window: {}..{}ms, failure rate: {}",
            config.min_delay_ms,
            config.max_delay_ms,
            config.failure_rate
        );
        if let Some(seed) = config.rng_seed {
            tracing::info!("Lookup RNG seeded with {}", seed);
        }

        Ok(config)
    }

    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            failure_rate: self.failure_rate,
        }
    }
}
