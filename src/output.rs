use crate::models::{FormatArg, SimConfig};
use crate::runner::{join_numbers, RunReport};
use crate::state::SimulationState;

pub trait Formatter {
    /// Line printed as each round completes, if any.
    fn write_round(&self, state: &SimulationState) -> Option<String>;
    fn write(&self, report: &RunReport) -> String;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

pub fn formatter_for(format: FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}

impl Formatter for HumanFormatter {
    fn write_round(&self, state: &SimulationState) -> Option<String> {
        let mut line = format!(
            "-- round: {} --- number: {}",
            state.round,
            join_numbers(&state.round_numbers)
        );
        if state.round_matched > 1 {
            line.push_str(&format!(" --- matching: {}", state.round_matched));
        }
        Some(line)
    }

    fn write(&self, report: &RunReport) -> String {
        write_summary(report)
    }
}

impl Formatter for SummaryFormatter {
    fn write_round(&self, _state: &SimulationState) -> Option<String> {
        None
    }

    fn write(&self, report: &RunReport) -> String {
        write_summary(report)
    }
}

impl Formatter for JsonFormatter {
    fn write_round(&self, _state: &SimulationState) -> Option<String> {
        None
    }

    fn write(&self, report: &RunReport) -> String {
        let mut output = serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
        output.push('\n');
        output
    }
}

fn write_summary(report: &RunReport) -> String {
    let state = &report.state;
    let mut output = String::new();
    output.push_str(&format!("Draw: {}\n", report.draw));
    output.push_str(&format!("User numbers: {}\n", join_numbers(&state.user_numbers)));
    output.push_str(&format!("Simulated rounds: {}\n", state.round));
    for matched in 2..=5 {
        output.push_str(&format!(
            "Matched {} numbers: {} times\n",
            matched,
            state.won(matched)
        ));
    }
    output.push_str(&format!("Stopped: {}\n", report.stop_reason));
    output
}

pub fn write_config(config: &SimConfig) -> String {
    let numbers = match &config.user_numbers {
        Some(numbers) => join_numbers(numbers),
        None => "random".to_string(),
    };
    let max_rounds = match config.max_rounds {
        Some(limit) => limit.to_string(),
        None => "none".to_string(),
    };
    let mut output = String::new();
    output.push_str(&format!("Timeout: {}ms\n", config.timeout_ms));
    output.push_str(&format!("Duration: {}ms\n", config.duration_ms));
    output.push_str(&format!("Max rounds: {}\n", max_rounds));
    output.push_str(&format!("Draw: {}\n", config.draw.label_with_seed(config.seed)));
    output.push_str(&format!("User numbers: {}\n", numbers));
    output
}
