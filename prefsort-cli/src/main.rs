mod config;
mod images;
mod input;
mod output;
mod simulate;

use clap::Parser;
use prefsort_core::{EngineConfig, Phase, RankingEngine};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::input::Command;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "prefsort", version, about = "Rank images by preference with quick multi-way comparisons")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run an interactive ranking session over a set of images
    Rank(RankArgs),
    /// Benchmark the engine against a simulated judge with hidden preferences
    Simulate(SimulateArgs),
    /// Create a default config file at ~/.config/prefsort/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// Directory of images to rank (non-recursive)
    #[arg(long)]
    images: Option<PathBuf>,

    /// Single image file (repeatable)
    #[arg(long = "image")]
    inline_images: Vec<PathBuf>,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Fixed RNG seed for reproducible group order
    #[arg(long)]
    seed: Option<u64>,

    /// Path to config file (default: ~/.config/prefsort/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pause before showing results, in milliseconds. Default: 600.
    #[arg(long)]
    finish_delay_ms: Option<u64>,

    /// Images per comparison during exploration (2-6)
    #[arg(long)]
    exploration_group_size: Option<usize>,

    /// Images per comparison during precision (2-6)
    #[arg(long)]
    precision_group_size: Option<usize>,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser)]
struct SimulateArgs {
    /// Number of images in each simulated session
    #[arg(long, default_value_t = 30)]
    items: usize,

    /// Number of independent sessions to run
    #[arg(long, default_value_t = 1)]
    trials: usize,

    /// Standard deviation of the judge's perception noise (hidden scores have sd 1)
    #[arg(long, default_value_t = 0.3)]
    noise: f64,

    /// Probability that the judge skips a group instead of choosing
    #[arg(long, default_value_t = 0.0)]
    skip_rate: f64,

    /// Base seed; trial i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Path to config file; only the [engine] table is used
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log per-trial details to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "prefsort=info,prefsort_core=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => {
            init_tracing(args.verbose);
            run_rank(args).await;
        }
        Commands::Simulate(args) => {
            init_tracing(args.verbose);
            run_simulate(args);
        }
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default image directory, group sizes, etc.");
        }
    }
}

fn run_simulate(args: SimulateArgs) {
    if args.items < 2 {
        bail(format!("Need at least 2 items to simulate, got {}", args.items));
    }
    if args.trials == 0 {
        bail("--trials must be at least 1");
    }
    if args.noise < 0.0 {
        bail("--noise must not be negative");
    }
    if !(0.0..=1.0).contains(&args.skip_rate) {
        bail("--skip-rate must be between 0.0 and 1.0");
    }

    let engine = match args.config {
        Some(ref path) => config::load_config(path).engine,
        None => config::load_config(&config::config_path()).engine,
    };

    let opts = simulate::SimulationOptions {
        items: args.items,
        trials: args.trials,
        noise: args.noise,
        skip_rate: args.skip_rate,
        seed: args.seed,
        engine,
    };
    simulate::run_simulation(&opts, args.json);
}

async fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let images_dir = args.images.clone().or_else(|| cfg.images.map(PathBuf::from));
    let finish_delay_ms = args.finish_delay_ms.or(cfg.finish_delay_ms).unwrap_or(config::DEFAULT_FINISH_DELAY_MS);
    let seed = args.seed.or(cfg.seed);

    let engine_config = EngineConfig {
        exploration_group_size: args.exploration_group_size.unwrap_or(cfg.engine.exploration_group_size),
        precision_group_size: args.precision_group_size.unwrap_or(cfg.engine.precision_group_size),
        ..cfg.engine
    };

    if images_dir.is_none() && args.inline_images.is_empty() {
        bail(format!(
            "No images provided. Use --images <dir>, --image <file>, or set images in {}",
            config_path.display()
        ));
    }

    let paths = images::collect_images(images_dir.as_deref(), &args.inline_images)
        .unwrap_or_else(|e| bail(format!("Failed to collect images: {e}")));
    if paths.len() < 2 {
        bail(format!("Need at least 2 images to rank, got {}", paths.len()));
    }

    let rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut engine = RankingEngine::with_rng(engine_config, rng);
    engine
        .initialize_items(images::to_inputs(&paths))
        .unwrap_or_else(|e| bail(e));
    engine.start_session().unwrap_or_else(|e| bail(e));

    info!(images = paths.len(), ?seed, "session started");
    eprintln!("Ranking {} images. Type ? for help.", paths.len());

    if !interactive_loop(&mut engine) {
        eprintln!("Session abandoned.");
        return;
    }

    // Let the "session ended" state sit briefly before the results replace it.
    if let Some(reason) = engine.finish_reason() {
        eprintln!("\nSession ended: {reason}");
    }
    tokio::time::sleep(Duration::from_millis(finish_delay_ms)).await;

    let ranking = engine.final_ranking();
    let report = output::Report {
        ranking: &ranking,
        items: engine.items(),
        finish_reason: engine.finish_reason(),
        total_comparisons: engine.total_actions(),
    };
    if args.json {
        output::print_json(&report);
    } else {
        output::print_table(&report);
    }
}

fn print_group(engine: &RankingEngine<SmallRng>) {
    let phase = match engine.phase() {
        Phase::Exploration => "exploring",
        Phase::Precision => "refining",
    };
    eprintln!(
        "\n[{}% | {} | {} active, {} settled, {} dropped{}]",
        engine.progress(),
        phase,
        engine.active_count(),
        engine.frozen_count(),
        engine.eliminated_count(),
        if engine.pass_streak() > 0 { format!(" | {} skip(s) in a row", engine.pass_streak()) } else { String::new() },
    );
    for (i, item) in engine.current_group().iter().enumerate() {
        eprintln!("  {}) {}  {}", i + 1, item.name, item.image_ref);
    }
}

/// Drive the session from stdin. Returns false if the user quit without results.
fn interactive_loop(engine: &mut RankingEngine<SmallRng>) -> bool {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while engine.is_running() {
        print_group(engine);
        eprint!("> ");
        let _ = io::stderr().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => bail(format!("Failed to read from stdin: {e}")),
            // EOF: same as quitting
            None => {
                engine.quit_session();
                return false;
            }
        };

        let group = engine.current_group_ids().to_vec();
        let command = match input::parse_command(&line, group.len()) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };

        let result = match command {
            Command::Choose(idx) => engine.record_choice(group[idx]),
            Command::Skip => engine.record_skip(),
            Command::Undo => match engine.undo_last() {
                Ok(true) => Ok(()),
                Ok(false) => {
                    eprintln!("Nothing to undo.");
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Finish => engine.request_early_finish(),
            Command::Quit => {
                engine.quit_session();
                return false;
            }
            Command::Help => {
                eprintln!("{}", input::HELP);
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!(error = %e, "engine declined command");
            eprintln!("{e}");
        }
    }

    true
}
