mod app;
mod config;
mod render;
mod simulate;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tictactoe_engine::games::tictactoe::Difficulty;
use tictactoe_engine::{SessionRng, log, logger};

use app::PlayApp;
use config::{CONFIG_FILE, OpponentKind, get_config_manager};
use render::render_summary;
use simulate::run_simulation;

#[derive(Parser)]
#[command(name = "tictactoe_terminal")]
struct Args {
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively against a human or the computer
    Play {
        #[arg(long, value_enum)]
        opponent: Option<OpponentKind>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play computer-vs-computer games and print the analytics as YAML
    Simulate {
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn session_rng(seed: Option<u64>) -> SessionRng {
    let rng = seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    log!("Session seed: {}", rng.seed());
    rng
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let mut config = get_config_manager(&args.config).get_config()?;
    log!("Loaded config from {}", args.config.display());

    let command = args.command.unwrap_or(Command::Play {
        opponent: None,
        difficulty: None,
        seed: None,
    });

    match command {
        Command::Play { opponent, difficulty, seed } => {
            if let Some(opponent) = opponent {
                config.game.opponent = opponent;
            }
            if let Some(difficulty) = difficulty {
                config.game.difficulty = difficulty;
            }
            let rng = session_rng(seed.or(config.game.seed));
            log!("Starting session against {:?}", config.game.opponent());

            let mut app = PlayApp::new(
                config.game.opponent(),
                rng,
                Duration::from_millis(u64::from(config.display.computer_move_delay_ms)),
                config.display.show_analytics_after_game,
            );
            app.run(io::stdin().lock(), &mut io::stdout())?;
            print!("{}", render_summary(&app.stats().summary()));
        }
        Command::Simulate { games, difficulty, seed } => {
            let difficulty = difficulty.unwrap_or(config.game.difficulty);
            let mut rng = session_rng(seed.or(config.game.seed));
            log!("Simulating {} games against {} computer", games, difficulty);

            let stats = run_simulation(games, difficulty, &mut rng)?;
            print!("{}", serde_yaml_ng::to_string(&stats.summary())?);
        }
    }

    Ok(())
}
