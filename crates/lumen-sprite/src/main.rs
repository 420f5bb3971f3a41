mod game;

use std::process::ExitCode;

use lumen_engine::logging::{init_logging, LoggingConfig};

use crate::game::Game;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let result = Game::init().and_then(|mut game| game.run());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
