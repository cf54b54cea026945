mod game_driver;
mod input;
mod renderer;
mod server_config;
mod spectator;
mod stores;
mod tick_events;

use clap::{Parser, ValueEnum};
use tokio::sync::mpsc;

use common::config::{ConfigManager, Validate};
use common::snake::GameMode;
use common::{log, log_warn, logger, SessionRng};
use game_driver::GameDriver;
use renderer::{LogRenderer, NullRenderer, Renderer};
use server_config::{ArcadeConfig, DEFAULT_CONFIG_PATH};
use spectator::SpectatorRunner;
use stores::{ArcadeStores, AuthError};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Walls,
    Passthrough,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Walls => GameMode::Walls,
            ModeArg::Passthrough => GameMode::Passthrough,
        }
    }
}

#[derive(Parser)]
#[command(name = "snake_arcade_server")]
struct Args {
    /// YAML config; defaults apply when the file is missing
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Base seed for every session rng
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    spectators: Option<usize>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Log an ASCII frame for every tick of the player's game
    #[arg(long)]
    render: bool,

    #[arg(long)]
    use_log_prefix: bool,

    /// Save the effective config (file plus flag overrides) back to --config
    #[arg(long)]
    write_config: bool,

    /// Play a game on stdin (w/a/s/d) as this user
    #[arg(long, requires = "password")]
    player: Option<String>,

    #[arg(long)]
    password: Option<String>,
}

fn load_config(args: &Args) -> Result<ArcadeConfig, String> {
    let manager: ConfigManager<_, ArcadeConfig> = ConfigManager::from_yaml_file(&args.config);
    let mut config = manager.get_config().unwrap_or_else(|e| {
        log_warn!("Failed to load {}: {}. Using defaults", args.config, e);
        ArcadeConfig::default()
    });

    if let Some(spectators) = args.spectators {
        config.spectator_count = spectators;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }

    config.validate()?;
    if args.write_config {
        manager.set_config(&config)?;
        log!("Saved config to {}", args.config);
    }
    Ok(config)
}

async fn sign_in(stores: &ArcadeStores, username: &str, password: &str) -> Result<(), AuthError> {
    match stores.users.log_in(username, password).await {
        Ok(player) => {
            log!("Logged in as {}", player);
            Ok(())
        }
        Err(AuthError::InvalidCredentials) => {
            let player = stores.users.sign_up(username, password).await?;
            log!("Signed up as {}", player);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn print_leaderboard(stores: &ArcadeStores, size: usize) {
    let entries = stores.leaderboard.top(size).await;
    if entries.is_empty() {
        log!("Leaderboard is empty");
        return;
    }

    log!("Leaderboard:");
    for (index, entry) in entries.iter().enumerate() {
        log!(
            "  #{} {} {} ({:?}{})",
            index + 1,
            entry.player,
            entry.score,
            entry.mode,
            if entry.is_bot { ", bot" } else { "" }
        );
    }
}

async fn play(
    args: &Args,
    config: &ArcadeConfig,
    seed: u64,
    stores: &ArcadeStores,
) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(username), Some(password)) = (&args.player, &args.password) {
        sign_in(stores, username, password).await?;
    }

    let (sender, receiver) = mpsc::channel(16);
    let input_task = input::spawn_stdin_input(sender);
    let renderer: Box<dyn Renderer> = if args.render {
        Box::new(LogRenderer)
    } else {
        Box::new(NullRenderer)
    };

    let driver = GameDriver::new(config, seed, receiver, renderer, stores.clone())?;
    log!("Steer with w/a/s/d followed by Enter");
    let outcome = driver.run().await;
    input_task.abort();

    log!(
        "[session:{}] {} finished with score {} after {} ticks ({} inputs recorded)",
        outcome.session_id,
        outcome.player,
        outcome.final_state.score,
        outcome.recording.total_ticks,
        outcome.recording.inputs.len()
    );
    if let Some(best) = stores.leaderboard.best_for(&outcome.player).await {
        log!("Best score for {}: {}", outcome.player, best.score);
    }
    if let Ok(player) = stores.users.log_out().await {
        log!("Logged out {}", player);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Arcade".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(|| SessionRng::from_random().seed());
    log!("Snake arcade starting with seed {}", seed);

    let stores = ArcadeStores::new(config.leaderboard_size);
    let spectators = SpectatorRunner::new(&config, seed.wrapping_add(1), stores.clone(), NullRenderer)?;
    let spectator_task = tokio::spawn(spectators.run());

    if args.player.is_some() {
        tokio::select! {
            result = play(&args, &config, seed, &stores) => result?,
            _ = tokio::signal::ctrl_c() => log!("Shutdown signal received"),
        }
        spectator_task.abort();
    } else {
        tokio::select! {
            result = spectator_task => {
                if let Ok(ticks) = result {
                    log!("Spectators finished after {} ticks", ticks);
                }
            }
            _ = tokio::signal::ctrl_c() => log!("Shutdown signal received"),
        }
    }

    for (player, snapshot) in stores.active_players.list().await {
        log!("Still playing: {} score {} length {}", player, snapshot.score, snapshot.length);
    }
    print_leaderboard(&stores, config.leaderboard_size).await;
    log!("Arcade shut down gracefully");

    Ok(())
}
