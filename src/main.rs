use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use termlife::app::{self, App};
use termlife::config::{RunConfig, Viewport};
use termlife::settings::Settings;
use termlife::terminal::{Terminal, TerminalDisplay};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "termlife")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Conway's Game of Life filling the terminal window", long_about = None)]
struct Cli {
    /// Random seed for reproducibility
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Character to draw live cells with
    #[arg(short, long)]
    char: Option<String>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a board to stdout after some generations (no interactive display)
    Print {
        /// Viewport width in terminal columns
        #[arg(short = 'W', long, default_value = "80")]
        width: u16,

        /// Viewport height in terminal rows
        #[arg(short = 'H', long, default_value = "24")]
        height: u16,

        /// Generations to advance before printing
        #[arg(short, long, default_value = "0")]
        generations: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RunConfig::default();
    let settings_error = match Settings::load() {
        Ok(settings) => {
            settings.apply(&mut config);
            None
        }
        Err(err) => Some(err),
    };
    if let Some(ch) = cli.char.as_deref().and_then(|s| s.chars().next()) {
        config.draw_char = ch;
    }
    config.seed = cli.seed;
    if cli.log_file.is_some() {
        config.log_file = cli.log_file;
    }

    init_tracing(config.log_file.as_deref())?;
    if let Some(err) = settings_error {
        warn!("{err}");
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Some(Commands::Print {
            width,
            height,
            generations,
        }) => {
            let viewport = Viewport::new(width, height);
            let lines = app::run_headless(viewport, generations, rng, config.draw_char)?;
            for line in lines {
                println!("{}", line);
            }
        }
        None => {
            let term = Terminal::new().context("failed to set up terminal")?;
            let display = TerminalDisplay::new(
                term,
                config.draw_char,
                config.color_scheme,
                config.show_status,
            );
            info!(seed = ?config.seed, "starting");
            App::new(display, rng).run()?;
        }
    }

    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!(err))
                .context("failed to install log subscriber")?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| anyhow!(err))
                .context("failed to install log subscriber")?;
        }
    }
    Ok(())
}
