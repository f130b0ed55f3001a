mod app;
mod config;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use nrow_common::config::Validate;
use nrow_common::games::tictactoe::{Difficulty, GameMode, GameSession};
use nrow_common::{log, logger};

use app::TerminalApp;
use config::{ClientConfig, get_config_manager};

#[derive(Parser)]
#[command(name = "nrow", about = "N-in-a-row against a friend or the computer")]
struct Args {
    /// Board side length (3..=20)
    #[arg(long)]
    size: Option<usize>,

    /// Marks in a row needed to win; defaults by board size
    #[arg(long)]
    win_length: Option<usize>,

    /// pvp or pvc
    #[arg(long)]
    mode: Option<GameMode>,

    /// easy, medium, hard or very-hard; implies pvc unless --mode is given
    #[arg(long)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    x_name: Option<String>,

    #[arg(long)]
    o_name: Option<String>,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    ai_delay_ms: Option<u64>,

    /// Config file; defaults to nrow_config.yaml next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the merged settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_to(&self, config: &mut ClientConfig) {
        let game = &mut config.game;
        if let Some(size) = self.size {
            game.size = size;
            game.win_length = None;
        }
        if let Some(win_length) = self.win_length {
            game.win_length = Some(win_length);
        }
        if let Some(difficulty) = self.difficulty {
            game.difficulty = Some(difficulty);
            game.mode = GameMode::HumanVsAi;
        }
        if let Some(mode) = self.mode {
            game.mode = mode;
        }
        if let Some(name) = &self.x_name {
            game.player_x_name = Some(name.clone());
        }
        if let Some(name) = &self.o_name {
            game.player_o_name = Some(name.clone());
        }
        if let Some(ai_delay_ms) = self.ai_delay_ms {
            config.ai_delay_ms = ai_delay_ms;
        }
        if self.verbose {
            config.log = true;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("nrow".to_string())
    } else {
        None
    };

    let config_manager = get_config_manager(args.config.clone());
    let mut client_config = config_manager.get_config()?;
    args.apply_to(&mut client_config);
    client_config.validate()?;

    logger::init_logger(prefix, client_config.log);

    if args.save_config {
        config_manager.set_config(&client_config)?;
        log!("Saved settings to {}", config_manager.provider().path().display());
    }

    let session = match args.seed {
        Some(seed) => GameSession::with_seed(&client_config.game, seed)?,
        None => GameSession::new(&client_config.game)?,
    };

    let stdin = io::stdin();
    let mut app = TerminalApp::new(
        session,
        client_config.game,
        stdin.lock(),
        io::stdout(),
        Duration::from_millis(client_config.ai_delay_ms),
    );
    app.run()?;

    Ok(())
}
