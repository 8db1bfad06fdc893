use crossbeam_channel::{unbounded, RecvTimeoutError};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::draw::build_source;
use crate::engine::{EngineOptions, SimulationEngine};
use crate::error::{Error, Result};
use crate::models::{DrawConfig, SimConfig, MAX_NUMBER, MIN_NUMBER, PICK_COUNT};
use crate::state::SimulationState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    Jackpot,
    RoundLimit,
    Duration,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Jackpot => write!(f, "jackpot"),
            StopReason::RoundLimit => write!(f, "round limit"),
            StopReason::Duration => write!(f, "duration"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub draw: String,
    pub stop_reason: StopReason,
    pub state: SimulationState,
}

/// Runs one engine until a jackpot, the round limit, or `duration_ms` elapses.
///
/// `on_round` sees every snapshot in order on the calling thread.
pub fn run_simulation<F>(config: &SimConfig, mut on_round: F) -> Result<RunReport>
where
    F: FnMut(&SimulationState),
{
    validate_config(config)?;
    let source = build_source(config.draw, config.seed)?;
    let options = EngineOptions {
        timeout_ms: Some(config.timeout_ms),
        user_numbers: config.user_numbers.clone().map(|mut numbers| {
            numbers.sort_unstable();
            numbers
        }),
        max_rounds: config.max_rounds,
    };

    let (tx, rx) = unbounded();
    let mut engine = SimulationEngine::with_source(options, source, move |state| {
        let _ = tx.send(state);
    });
    engine.start(None);

    let deadline = Instant::now() + Duration::from_millis(config.duration_ms);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(state) => {
                on_round(&state);
                if !state.is_running {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    engine.stop();
    for state in rx.try_iter() {
        on_round(&state);
    }

    let state = engine.state();
    let stop_reason = if state.is_jackpot {
        StopReason::Jackpot
    } else if config.max_rounds.map_or(false, |limit| state.round >= limit) {
        StopReason::RoundLimit
    } else {
        StopReason::Duration
    };
    debug!(round = state.round, %stop_reason, "run finished");

    Ok(RunReport {
        draw: config.draw.label_with_seed(config.seed),
        stop_reason,
        state,
    })
}

pub fn validate_config(config: &SimConfig) -> Result<()> {
    if config.timeout_ms == 0 {
        return Err(Error::InvalidTimeout);
    }
    if config.duration_ms == 0 {
        return Err(Error::InvalidDuration);
    }
    if config.max_rounds == Some(0) {
        return Err(Error::InvalidMaxRounds);
    }
    if matches!(config.draw, DrawConfig::Seeded) && config.seed.is_none() {
        return Err(Error::SeedRequired);
    }
    if let Some(numbers) = &config.user_numbers {
        validate_user_numbers(numbers)?;
    }
    Ok(())
}

/// Checks for exactly five distinct numbers in [1, 90].
pub fn validate_user_numbers(numbers: &[u32]) -> Result<()> {
    let invalid = || Error::InvalidUserNumbers(join_numbers(numbers));
    if numbers.len() != PICK_COUNT {
        return Err(invalid());
    }
    let mut seen = HashSet::new();
    for &number in numbers {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) || !seen.insert(number) {
            return Err(invalid());
        }
    }
    Ok(())
}

pub fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|number| number.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
