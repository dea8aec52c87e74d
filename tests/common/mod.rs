//! Shared test doubles for the clock and random source.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use doc_lookup_api::simulator::{Clock, LookupSimulator, RandomSource, SimulatorConfig};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Replays queued samples, then repeats `fallback`.
pub struct ScriptedRandom {
    samples: Mutex<VecDeque<f64>>,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(samples: &[f64], fallback: f64) -> Self {
        Self {
            samples: Mutex::new(samples.iter().copied().collect()),
            fallback,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&self) -> f64 {
        self.samples
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

/// Random source that blows up, used to kill the lookup task.
pub struct PanickingRandom;

impl RandomSource for PanickingRandom {
    fn next_f64(&self) -> f64 {
        panic!("random source exhausted")
    }
}

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
}

/// Simulator with a pinned clock and scripted delay and failure draws.
///
/// A `failure_sample` below 0.10 takes the failure branch under the default
/// config. Reference suffix draws all return 0.0 (`000000000`).
pub fn simulator_with(delay_sample: f64, failure_sample: f64) -> LookupSimulator {
    LookupSimulator::with_sources(
        SimulatorConfig::default(),
        Arc::new(FixedClock(fixed_instant())),
        Arc::new(ScriptedRandom::new(&[delay_sample, failure_sample], 0.0)),
    )
}
