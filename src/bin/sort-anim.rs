//! Terminal front end: animates one algorithm as a single line of bars.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sort_anim::config::parse_delay;
use sort_anim::{Algorithm, Category, RunConfig, RunOutcome, RunReport, Snapshot, VisualElement, Visualizer};

/// Sorting algorithm animator
#[derive(Parser)]
#[command(name = "sort-anim")]
#[command(about = "Animates a sorting algorithm step by step in the terminal")]
#[command(version)]
struct Args {
    /// Algorithm to run, by key (quick-sort) or name (quick)
    #[arg(short, long, default_value = "bubble-sort")]
    algorithm: Algorithm,

    /// Number of random values to sort, clamped to 5..=200
    #[arg(short, long, env = "SORT_ANIM_SIZE")]
    size: Option<usize>,

    /// Sort these values instead of random ones
    #[arg(long, value_delimiter = ',')]
    values: Option<Vec<u32>>,

    /// Step delay: slow, normal, fast, very-fast, ultra-fast or milliseconds
    #[arg(long, value_parser = parse_delay)]
    speed: Option<Duration>,

    /// Seed for the random array
    #[arg(long)]
    seed: Option<u64>,

    /// List the available algorithms and exit
    #[arg(long)]
    list: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "sort_anim=info")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_level);

    if args.list {
        list_algorithms();
        return ExitCode::SUCCESS;
    }

    match animate(args).await {
        Ok(report) => exit_code(&report.outcome),
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn animate(args: Args) -> anyhow::Result<RunReport> {
    let mut config = RunConfig::from_env();
    if let Some(size) = args.size {
        config = config.with_array_size(size);
    }
    if let Some(delay) = args.speed {
        config = config.with_delay(delay);
    }

    let mut vis = match args.seed {
        Some(seed) => Visualizer::with_seed(config, seed),
        None => Visualizer::new(config),
    };
    if let Some(values) = &args.values {
        vis.set_array(values)?;
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<Snapshot>();
    vis.start_run(args.algorithm, tx)?;

    if let Some(token) = vis.cancel_token() {
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("interrupted, cancelling run");
                token.cancel();
            }
        });
    }

    let ceiling = vis.array().iter().map(|e| e.value).max().unwrap_or(0);
    let mut stdout = io::stdout().lock();
    while let Some(snapshot) = rx.recv().await {
        render(&mut stdout, &snapshot, ceiling).context("failed to draw")?;
    }
    writeln!(stdout)?;

    let report = vis.wait().await.context("sorting run failed")?;
    writeln!(stdout, "{}: {}", args.algorithm, describe(&report))?;

    Ok(report)
}

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn render(out: &mut impl Write, elements: &[VisualElement], ceiling: u32) -> io::Result<()> {
    write!(out, "\r")?;
    for e in elements {
        let level = (e.value as usize * (BARS.len() - 1)) / ceiling.max(1) as usize;
        let bar = BARS[level.min(BARS.len() - 1)];

        if e.comparing {
            write!(out, "\x1b[31m{bar}\x1b[0m")?;
        } else if e.sorted {
            write!(out, "\x1b[32m{bar}\x1b[0m")?;
        } else {
            write!(out, "{bar}")?;
        }
    }
    out.flush()
}

fn describe(report: &RunReport) -> String {
    match report.outcome {
        RunOutcome::Completed => format!("sorted in {:.2?}", report.elapsed),
        RunOutcome::Cancelled => format!("cancelled after {:.2?}", report.elapsed),
        RunOutcome::PreconditionFailed(precondition) => format!("not run, {precondition}"),
        RunOutcome::Exhausted { attempts } => format!("gave up after {attempts} shuffles"),
    }
}

fn exit_code(outcome: &RunOutcome) -> ExitCode {
    match outcome {
        RunOutcome::Completed => ExitCode::SUCCESS,
        RunOutcome::Cancelled => ExitCode::from(130),
        RunOutcome::PreconditionFailed(_) => ExitCode::from(2),
        RunOutcome::Exhausted { .. } => ExitCode::from(3),
    }
}

fn list_algorithms() {
    for (category, heading) in [
        (Category::Logarithmic, "Logarithmic"),
        (Category::Quadratic, "Quadratic"),
        (Category::Odd, "Odd"),
    ] {
        println!("{heading}:");
        for algorithm in Algorithm::by_category(category) {
            let d = algorithm.descriptor();
            println!(
                "  {:<18} {:<16} avg {}",
                d.key, d.title, d.complexity.average
            );
        }
    }
}
