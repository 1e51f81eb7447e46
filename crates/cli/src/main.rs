//! Branch trace replay CLI.

use clap::Parser;
use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process;

use bpsim::config::PredictorConfig;
use bpsim::trace::TraceReader;
use bpsim::{BranchPredictor, SimStats, TraceError, bp, sim};

#[derive(Parser, Debug)]
#[command(
    name = "bpsim",
    author,
    version,
    about = "Replay a branch trace through a direction predictor",
    long_about = None,
)]
struct Cli {
    /// Predictor spec: static, gshare[:<ghistory>], tournament[:<ghistory>:<lhistory>:<pc-index>] or custom.
    #[arg(short, long)]
    predictor: Option<String>,

    /// JSON predictor configuration; --predictor overrides its type and widths.
    #[arg(short, long)]
    config: Option<String>,

    /// Print every branch with its prediction.
    #[arg(short, long)]
    verbose: bool,

    /// Print the statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Trace file (reads stdin when omitted).
    trace: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(&cli).unwrap_or_else(|e| fatal(&e));
    let mut predictor = bp::build(&config).unwrap_or_else(|e| fatal(&e));

    let input: Box<dyn BufRead> = match &cli.trace {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                eprintln!("\n[!] FATAL: Could not read trace '{}': {}", path, e);
                process::exit(1);
            });
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let stats = match replay(predictor.as_mut(), input, cli.verbose.then_some(&mut out)) {
        Ok(stats) => stats,
        Err(ReplayError::Trace(e)) => {
            if let Err(flush) = out.flush() {
                output_failed(flush);
            }
            fatal(&e)
        }
        Err(ReplayError::Output(e)) => output_failed(e),
    };

    if let Err(e) = report(&stats, cli.json, &mut out).and_then(|()| out.flush()) {
        output_failed(e);
    }
}

/// Why a replay stopped before the end of the trace.
#[derive(Debug)]
enum ReplayError {
    Trace(TraceError),
    /// Writing a verbose line failed.
    Output(io::Error),
}

/// Replays `input` through `predictor`, writing one line per branch to
/// `verbose` when given. The first failed write ends the replay.
fn replay<R: BufRead, W: Write>(
    predictor: &mut dyn BranchPredictor,
    input: R,
    mut verbose: Option<&mut W>,
) -> Result<SimStats, ReplayError> {
    let stopped = Cell::new(false);
    let mut write_error = None;
    let records = TraceReader::new(input).take_while(|_| !stopped.get());

    let stats = sim::run(predictor, records, |record, prediction| {
        if let Some(out) = verbose.as_mut() {
            if let Err(e) = writeln!(out, "{} {}", record, prediction) {
                write_error = Some(e);
                stopped.set(true);
            }
        }
    })
    .map_err(ReplayError::Trace)?;

    match write_error {
        Some(e) => Err(ReplayError::Output(e)),
        None => Ok(stats),
    }
}

fn load_config(cli: &Cli) -> Result<PredictorConfig, bpsim::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => PredictorConfig::load(path)?,
        None => PredictorConfig::default(),
    };
    if let Some(spec) = &cli.predictor {
        config.apply_spec(spec)?;
    }
    config.validate()?;
    log::info!("predictor: {}", config.bp_type);
    Ok(config)
}

fn report<W: Write>(stats: &SimStats, json: bool, out: &mut W) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, stats)?;
        writeln!(out)
    } else {
        stats.write_to(out)
    }
}

/// A closed stdout (e.g. `bpsim -v trace | head`) ends the run quietly.
fn output_failed(e: io::Error) -> ! {
    if e.kind() == io::ErrorKind::BrokenPipe {
        log::debug!("stdout closed, stopping");
        process::exit(0);
    }
    fatal(&e)
}

fn fatal(e: &dyn std::fmt::Display) -> ! {
    eprintln!("\n[!] FATAL: {}", e);
    process::exit(1);
}
