use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{DrawConfig, FormatArg, SimConfig, MAX_NUMBER, MIN_NUMBER, PICK_COUNT};
use crate::runner::{validate_config, validate_user_numbers};

#[derive(Parser, Debug)]
#[command(name = "lotto-sim", about = "Simulate a recurring 5-of-90 lottery draw")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw rounds on a timer until a jackpot, the round limit, or the duration.
    Run(RunArgs),
    /// Draw one set of distinct numbers and print it.
    Draw(DrawArgs),
    /// Print the merged configuration without running.
    ShowConfig(RunArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[arg(long, help = "TOML or JSON config file; flags override its values")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Milliseconds between rounds")]
    pub timeout_ms: Option<u64>,
    #[arg(long, help = "Five distinct numbers in 1..=90, e.g. 5,10,15,20,25")]
    pub numbers: Option<String>,
    #[arg(long)]
    pub max_rounds: Option<u64>,
    #[arg(long, help = "Wall-clock budget of the run in milliseconds")]
    pub duration_ms: Option<u64>,
    #[arg(long, help = "Seed the draws for a reproducible run")]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct DrawArgs {
    #[arg(long, default_value_t = PICK_COUNT)]
    pub count: usize,
    #[arg(long, default_value_t = MIN_NUMBER)]
    pub min: u32,
    #[arg(long, default_value_t = MAX_NUMBER)]
    pub max: u32,
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => Error::Cli(e.to_string()),
    })
}

pub fn build_config(args: &RunArgs) -> Result<(SimConfig, FormatArg)> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };

    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(numbers) = &args.numbers {
        config.user_numbers = Some(parse_numbers(numbers)?);
    }
    if let Some(max_rounds) = args.max_rounds {
        config.max_rounds = Some(max_rounds);
    }
    if let Some(duration_ms) = args.duration_ms {
        config.duration_ms = duration_ms;
    }
    if let Some(seed) = args.seed {
        config.draw = DrawConfig::Seeded;
        config.seed = Some(seed);
    }

    validate_config(&config)?;
    Ok((config, args.format))
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Parses `a,b,c,d,e` into five sorted, distinct lottery numbers.
pub fn parse_numbers(input: &str) -> Result<Vec<u32>> {
    let mut numbers = input
        .split(',')
        .map(|entry| entry.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::InvalidUserNumbers(input.to_string()))?;
    validate_user_numbers(&numbers)?;
    numbers.sort_unstable();
    Ok(numbers)
}
