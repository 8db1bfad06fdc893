use crossbeam_channel::{bounded, select, tick, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

use crate::draw::{DrawSource, SecureDraw};
use crate::models::{DEFAULT_TIMEOUT_MS, MAX_NUMBER, MIN_NUMBER, PICK_COUNT};
use crate::state::{Phase, SimulationState};

pub type RoundCallback = Box<dyn FnMut(SimulationState) + Send>;

#[derive(Clone, Debug, Default)]
pub struct EngineOptions {
    /// Cadence between rounds; defaults to 100ms.
    pub timeout_ms: Option<u64>,
    /// Player's numbers; freshly drawn when absent.
    pub user_numbers: Option<Vec<u32>>,
    /// Stop on its own once this many rounds have run.
    pub max_rounds: Option<u64>,
}

struct Core {
    state: SimulationState,
    source: Box<dyn DrawSource>,
    on_round: RoundCallback,
    max_rounds: Option<u64>,
}

impl Core {
    fn pick_numbers(&mut self) -> Vec<u32> {
        self.source
            .draw(PICK_COUNT, MIN_NUMBER, MAX_NUMBER)
            .unwrap_or_else(|err| {
                error!(%err, "failed to pick user numbers");
                Vec::new()
            })
    }

    fn limit_reached(&self) -> bool {
        self.max_rounds.map_or(false, |limit| self.state.round >= limit)
    }

    fn advance(&mut self) -> Option<SimulationState> {
        if !self.state.is_running {
            return None;
        }

        let numbers = match self.source.draw(PICK_COUNT, MIN_NUMBER, MAX_NUMBER) {
            Ok(numbers) => numbers,
            Err(err) => {
                error!(%err, "draw failed, round skipped");
                return None;
            }
        };
        self.state.record_round(numbers);
        trace!(
            round = self.state.round,
            matched = self.state.round_matched,
            "round complete"
        );

        if self.state.is_jackpot {
            info!(round = self.state.round, "jackpot");
        } else if self.limit_reached() {
            debug!(round = self.state.round, "round limit reached");
            self.state.is_running = false;
        }

        let snapshot = self.state.clone();
        (self.on_round)(snapshot.clone());
        Some(snapshot)
    }
}

/// Worker thread that advances the engine once per cadence tick.
struct Ticker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(core: Arc<Mutex<Core>>, timeout_ms: u64) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticks = tick(Duration::from_millis(timeout_ms));
        let handle = thread::spawn(move || loop {
            select! {
                recv(stop_rx) -> _ => break,
                recv(ticks) -> _ => {
                    let mut core = core.lock();
                    core.advance();
                    if !core.state.is_running {
                        break;
                    }
                }
            }
        });
        Self { stop_tx, handle }
    }

    /// Signals the worker and waits for any in-flight round to finish.
    fn halt(self) {
        drop(self.stop_tx);
        if self.handle.join().is_err() {
            warn!("round worker panicked");
        }
    }
}

/// Lottery simulation engine.
///
/// All state lives behind one lock; a round (draw, tally, callback) runs
/// entirely under it, so rounds never overlap. The callback runs on the
/// worker thread and must not call back into the engine.
pub struct SimulationEngine {
    core: Arc<Mutex<Core>>,
    ticker: Option<Ticker>,
}

impl SimulationEngine {
    pub fn new<F>(options: EngineOptions, on_round: F) -> Self
    where
        F: FnMut(SimulationState) + Send + 'static,
    {
        Self::with_source(options, Box::new(SecureDraw), on_round)
    }

    pub fn with_source<F>(
        options: EngineOptions,
        source: Box<dyn DrawSource>,
        on_round: F,
    ) -> Self
    where
        F: FnMut(SimulationState) + Send + 'static,
    {
        let mut core = Core {
            state: SimulationState {
                timeout_ms: cadence_ms(options.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)),
                ..SimulationState::default()
            },
            source,
            on_round: Box::new(on_round),
            max_rounds: options.max_rounds,
        };
        core.state.user_numbers = match options.user_numbers {
            Some(numbers) => numbers,
            None => core.pick_numbers(),
        };

        Self {
            core: Arc::new(Mutex::new(core)),
            ticker: None,
        }
    }

    pub fn state(&self) -> SimulationState {
        self.core.lock().state.clone()
    }

    /// Starts periodic rounds, optionally with a new cadence.
    ///
    /// No-op while running. After a jackpot the engine stays terminal until
    /// [`reset`](Self::reset).
    pub fn start(&mut self, timeout_ms: Option<u64>) {
        let cadence = {
            let mut core = self.core.lock();
            match core.state.phase() {
                Phase::Running => {
                    debug!("start ignored, already running");
                    return;
                }
                Phase::Jackpot => {
                    warn!("start ignored, jackpot reached; reset first");
                    return;
                }
                Phase::Idle => {}
            }
            if core.limit_reached() {
                debug!(round = core.state.round, "start ignored, round limit reached");
                return;
            }
            if let Some(ms) = timeout_ms {
                core.state.timeout_ms = cadence_ms(ms);
            }
            core.state.is_running = true;
            core.state.timeout_ms
        };

        debug!(timeout_ms = cadence, "simulation started");
        self.restart_ticker(Some(cadence));
    }

    /// Halts round production; counters are kept.
    pub fn stop(&mut self) {
        {
            let mut core = self.core.lock();
            if core.state.is_running {
                core.state.is_running = false;
                debug!(round = core.state.round, "simulation stopped");
            }
        }
        self.restart_ticker(None);
    }

    /// Halts and restores every field, cadence included, to its initial value.
    pub fn reset(&mut self) {
        self.core.lock().state = SimulationState::default();
        self.restart_ticker(None);
        debug!("simulation reset");
    }

    pub fn set_timeout_ms(&mut self, timeout_ms: u64) {
        let cadence = cadence_ms(timeout_ms);
        let running = {
            let mut core = self.core.lock();
            core.state.timeout_ms = cadence;
            core.state.is_running
        };
        debug!(timeout_ms = cadence, running, "cadence changed");
        if running {
            self.restart_ticker(Some(cadence));
        }
    }

    /// Sets the player's numbers, or draws a fresh set when `None`.
    ///
    /// Supplied numbers are taken as-is; matching only needs set intersection.
    pub fn set_user_numbers(&mut self, numbers: Option<Vec<u32>>) {
        let mut core = self.core.lock();
        let numbers = match numbers {
            Some(numbers) => numbers,
            None => core.pick_numbers(),
        };
        core.state.user_numbers = numbers;
    }

    /// Runs one round now if the engine is running.
    ///
    /// Returns the published snapshot, or `None` when nothing ran.
    pub fn advance_round(&self) -> Option<SimulationState> {
        self.core.lock().advance()
    }

    fn restart_ticker(&mut self, timeout_ms: Option<u64>) {
        if let Some(ticker) = self.ticker.take() {
            ticker.halt();
        }
        self.ticker = timeout_ms.map(|ms| Ticker::spawn(Arc::clone(&self.core), ms));
    }
}

impl Drop for SimulationEngine {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.halt();
        }
    }
}

fn cadence_ms(timeout_ms: u64) -> u64 {
    if timeout_ms == 0 {
        warn!("timeout of 0ms raised to 1ms");
        1
    } else {
        timeout_ms
    }
}
