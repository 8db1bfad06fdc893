use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::DEFAULT_TIMEOUT_MS;

/// Immutable snapshot of the engine, handed out by value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub is_running: bool,
    pub is_jackpot: bool,
    pub round: u64,
    pub round_matched: usize,
    pub user_numbers: Vec<u32>,
    pub round_numbers: Vec<u32>,
    pub timeout_ms: u64,
    pub won2: u64,
    pub won3: u64,
    pub won4: u64,
    pub won5: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Jackpot,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            is_running: false,
            is_jackpot: false,
            round: 0,
            round_matched: 0,
            user_numbers: Vec::new(),
            round_numbers: Vec::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            won2: 0,
            won3: 0,
            won4: 0,
            won5: 0,
        }
    }
}

impl SimulationState {
    pub fn phase(&self) -> Phase {
        if self.is_jackpot {
            Phase::Jackpot
        } else if self.is_running {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    /// Cumulative count of rounds with exactly `matched` hits; 0 and 1 are never tallied.
    pub fn won(&self, matched: usize) -> u64 {
        match matched {
            2 => self.won2,
            3 => self.won3,
            4 => self.won4,
            5 => self.won5,
            _ => 0,
        }
    }

    pub(crate) fn record_round(&mut self, numbers: Vec<u32>) {
        self.round += 1;
        self.round_numbers = numbers;
        self.round_matched = count_matches(&self.user_numbers, &self.round_numbers);

        match self.round_matched {
            2 => self.won2 += 1,
            3 => self.won3 += 1,
            4 => self.won4 += 1,
            5 => self.won5 += 1,
            _ => {}
        }

        if self.round_matched == 5 {
            self.is_jackpot = true;
            self.is_running = false;
        }
    }
}

/// Size of the set intersection of `user` and `round`; repeated entries count once.
pub fn count_matches(user: &[u32], round: &[u32]) -> usize {
    let user: BTreeSet<u32> = user.iter().copied().collect();
    user.iter().filter(|num| round.contains(num)).count()
}
