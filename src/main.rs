use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_arcade::arcade::{GameKind, Session};
use grid_arcade::config::FRAME_POLL_MS;
use grid_arcade::food::FoodPlacement;
use grid_arcade::input::InputHandler;
use grid_arcade::settings::{Settings, load_settings, save_settings, settings_path};
use grid_arcade::snake::ReversalPolicy;
use grid_arcade::snapshot::Status;
use grid_arcade::terminal_runtime::ArcadeScreen;
use grid_arcade::ui::hud::HudInfo;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Game to start with: crates or snake.
    #[arg(long, default_value = "crates")]
    game: GameKind,

    /// Seed for snake food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Snake tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Where food may respawn.
    #[arg(long, value_enum)]
    food: Option<FoodPlacement>,

    /// How a turn straight back is handled.
    #[arg(long, value_enum)]
    reversal: Option<ReversalPolicy>,

    /// Write logs to this file (RUST_LOG controls the filter).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print the starting board as text and exit.
    #[arg(long)]
    print: bool,

    /// Store the effective settings as the new defaults.
    #[arg(long = "save-settings")]
    save_settings: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let settings = effective_settings(&cli, load_settings_or_default());
    if cli.save_settings {
        match save_settings(&settings) {
            Ok(()) => println!("Saved settings to {}", settings_path().display()),
            Err(error) => eprintln!("Failed to save settings: {error}"),
        }
    }

    let mut session = Session::new(cli.game, settings.snake_rules(), settings.seed);

    if cli.print {
        let snapshot = session.snapshot();
        println!("{snapshot}");
        return Ok(());
    }

    info!(game = %cli.game, ?settings, "starting");
    run(&mut session, &settings)
}

fn run(session: &mut Session, settings: &Settings) -> io::Result<()> {
    let mut screen = ArcadeScreen::enter()?;
    let mut input = InputHandler::new(Duration::from_millis(FRAME_POLL_MS));
    let tick_interval = settings.tick_interval();
    let tick_interval_ms = u64::try_from(tick_interval.as_millis()).unwrap_or(u64::MAX);

    let mut last_tick = Instant::now();
    let mut last_status = session.snapshot().status;

    loop {
        let snapshot = session.snapshot();
        let hud = HudInfo {
            paused: session.is_paused(),
            tick_interval_ms,
        };
        screen.draw(&snapshot, hud)?;

        if snapshot.status != last_status {
            if snapshot.status != Status::Playing {
                info!(
                    game = %session.active(),
                    status = ?snapshot.status,
                    score = snapshot.score,
                    moves = snapshot.moves,
                    "game finished"
                );
            }
            last_status = snapshot.status;
        }

        if let Some(game_input) = input.poll_input()? {
            if !session.apply_input(game_input) {
                break;
            }
        }

        if last_tick.elapsed() >= tick_interval {
            session.tick();
            last_tick = Instant::now();
        }
    }

    info!(frames = screen.frames(), "quit");
    Ok(())
}

fn load_settings_or_default() -> Settings {
    match load_settings() {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("Ignoring settings file: {error}");
            warn!(%error, "settings file unreadable, using defaults");
            Settings::default()
        }
    }
}

/// Command-line values win over the settings file.
fn effective_settings(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(tick_ms) = cli.tick_ms {
        settings.tick_interval_ms = tick_ms;
    }
    if let Some(food) = cli.food {
        settings.food_placement = food;
    }
    if let Some(reversal) = cli.reversal {
        settings.reversal = reversal;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    settings
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
