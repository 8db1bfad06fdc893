use lotto_sim::config::{self, Command, DrawArgs};
use lotto_sim::draw::{DrawSource, SecureDraw, SeededDraw};
use lotto_sim::error::Result;
use lotto_sim::output::{formatter_for, write_config};
use lotto_sim::runner::{self, join_numbers};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;
    match cli.command {
        Command::Run(args) => {
            let (config, format) = config::build_config(&args)?;
            let formatter = formatter_for(format);
            let report = runner::run_simulation(&config, |state| {
                if let Some(line) = formatter.write_round(state) {
                    println!("{}", line);
                }
            })?;
            print!("{}", formatter.write(&report));
        }
        Command::Draw(args) => {
            let numbers = draw_once(&args)?;
            println!("{}", join_numbers(&numbers));
        }
        Command::ShowConfig(args) => {
            let (config, _) = config::build_config(&args)?;
            print!("{}", write_config(&config));
        }
    }
    Ok(())
}

fn draw_once(args: &DrawArgs) -> Result<Vec<u32>> {
    let mut source: Box<dyn DrawSource> = match args.seed {
        Some(seed) => Box::new(SeededDraw::new(seed)),
        None => Box::new(SecureDraw),
    };
    source.draw(args.count, args.min, args.max)
}
