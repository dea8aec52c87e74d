/// Simulated document lookup
///
/// Emulates a remote registry call:
/// 1. Sleep a uniformly random delay (network latency)
/// 2. Roll the failure branch
/// 3. Stamp a reference id and completion timestamp
///
/// Time and randomness come from injected [`Clock`] and [`RandomSource`]
/// implementations so both outcomes can be forced in tests.
use crate::models::{LookupPayload, LookupResult, SIMULATION_ERROR_CODE};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const REFERENCE_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const REFERENCE_SUFFIX_LEN: usize = 9;

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Thread-local RNG; each call is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible RNG seeded from a fixed value.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        // A panic while holding the lock leaves the RNG state intact.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen::<f64>()
    }
}

/// Tunables for the simulated lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Inclusive lower bound of the latency window.
    pub min_delay: Duration,
    /// Exclusive upper bound of the latency window.
    pub max_delay: Duration,
    /// Probability of a `SIMULATION_ERROR` outcome.
    pub failure_rate: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(900),
            max_delay: Duration::from_millis(1500),
            failure_rate: 0.10,
        }
    }
}

/// ISO-8601 UTC with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Clamps a sample into `[0, 1]`; non-finite samples become 0.
fn unit(sample: f64) -> f64 {
    if sample.is_finite() {
        sample.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[derive(Clone)]
pub struct LookupSimulator {
    config: SimulatorConfig,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl LookupSimulator {
    /// Simulator backed by the system clock and thread-local RNG.
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_sources(config, Arc::new(SystemClock), Arc::new(ThreadRandom))
    }

    pub fn with_sources(
        config: SimulatorConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            clock,
            random,
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Draws a latency in `[min_delay, max_delay)`.
    ///
    /// Returns `min_delay` when the window is empty.
    pub fn next_delay(&self) -> Duration {
        let min = self.config.min_delay;
        let span = self.config.max_delay.saturating_sub(min);
        if span.is_zero() {
            return min;
        }

        let span_nanos = span.as_nanos() as f64;
        let offset = (span_nanos * unit(self.random.next_f64())) as u128;
        let offset = offset.min(span.as_nanos() - 1);
        min + Duration::from_nanos(offset as u64)
    }

    fn roll_failure(&self) -> bool {
        unit(self.random.next_f64()) < self.config.failure_rate
    }

    fn reference_suffix(&self) -> String {
        (0..REFERENCE_SUFFIX_LEN)
            .map(|_| {
                let idx = (unit(self.random.next_f64()) * REFERENCE_CHARSET.len() as f64) as usize;
                REFERENCE_CHARSET[idx.min(REFERENCE_CHARSET.len() - 1)] as char
            })
            .collect()
    }

    /// Runs one simulated lookup.
    ///
    /// Always resolves after exactly one delay; failures are returned as data.
    pub async fn lookup(&self, payload: LookupPayload) -> LookupResult {
        let delay = self.next_delay();
        tracing::debug!(
            "Simulating lookup for {} {} ({}ms)",
            payload.document_type,
            payload.document_number,
            delay.as_millis()
        );

        tokio::time::sleep(delay).await;

        let is_error = self.roll_failure();
        let now = self.clock.now();
        let reference = format!("REF-{}-{}", now.timestamp_millis(), self.reference_suffix());
        let timestamp = iso_timestamp(now);

        if is_error {
            tracing::warn!("⚠️  Simulated lookup failure: reference={}", reference);
            return LookupResult::failed(
                reference,
                timestamp,
                payload,
                SIMULATION_ERROR_CODE,
                "Simulated error occurred during lookup",
            );
        }

        tracing::info!(
            "✓ Lookup completed: reference={}, type={}",
            reference,
            payload.document_type
        );
        let last_updated = iso_timestamp(self.clock.now());
        LookupResult::found(reference, timestamp, payload, last_updated)
    }

    /// Runs the lookup on its own task.
    ///
    /// If the task dies before producing a result, an `UNKNOWN_ERROR` result
    /// is returned instead so the caller always gets a record.
    pub async fn lookup_detached(&self, payload: LookupPayload) -> LookupResult {
        let simulator = self.clone();
        let query = payload.clone();

        match tokio::spawn(async move { simulator.lookup(payload).await }).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Lookup task failed: {}", e);
                LookupResult::unknown_failure(query, self.clock.now())
            }
        }
    }
}

impl std::fmt::Debug for LookupSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupSimulator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
