use std::error::Error;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser};
use intcode::program;
use intcode::runner::{self, RunConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "intcode", about = "Run an Intcode program")]
#[command(group(ArgGroup::new("source").required(true).args(["intcode", "file"])))]
struct Cli {
    /// Program given directly as comma-separated integers.
    #[arg(short = 'i', long, allow_hyphen_values = true)]
    intcode: Option<String>,

    /// Read the program from a file.
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Memory size for the computer (raised to the program length if smaller).
    #[arg(short = 'm', long, default_value_t = 0)]
    memory: usize,

    /// Input values queued before anything read from stdin.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    input: Vec<i64>,

    /// Feed further input values from stdin.
    #[arg(long)]
    stdin: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run_cli(cli, &mut io::stdout()) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run_cli<W: Write + Send>(cli: Cli, sink: &mut W) -> Result<(), Box<dyn Error>> {
    let program = match (&cli.intcode, &cli.file) {
        (Some(text), _) => program::parse(text)?,
        (None, Some(path)) => program::load(path)?,
        (None, None) => return Err("please provide intcode to run".into()),
    };
    debug!(len = program.len(), "loaded program");

    let config = RunConfig {
        program,
        memory_size: cli.memory,
        inputs: cli.input,
    };
    let feed = cli.stdin.then(|| BufReader::new(io::stdin()));
    runner::run(config, feed, sink)?;
    Ok(())
}
