use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cannot draw {count} distinct numbers from [{min}, {max}]")]
    InvalidRange { count: usize, min: u32, max: u32 },
    #[error("timeout must be greater than 0ms")]
    InvalidTimeout,
    #[error("duration must be greater than 0ms")]
    InvalidDuration,
    #[error("max rounds must be greater than 0")]
    InvalidMaxRounds,
    #[error("invalid user numbers '{0}'")]
    InvalidUserNumbers(String),
    #[error("seed required when draw is seeded")]
    SeedRequired,
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
