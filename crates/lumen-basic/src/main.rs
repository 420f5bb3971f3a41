//! FPS-overlay demo.
//!
//! Reads two assets relative to the working directory, neither of which ships
//! with the crate:
//! - `assets/fonts/Hack-Regular.ttf` (override with `--font`)
//! - `assets/images/tilesheet.png` (override with `--tilesheet`, skip with
//!   `--no-tilesheet`)
//!
//! A missing asset is a startup error (exit code 1).

mod app;
mod cli;
mod config;

use std::process::ExitCode;

use clap::Parser;
use lumen_engine::device::GpuInit;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::window::Runtime;

use crate::app::BasicApp;
use crate::cli::Cli;
use crate::config::BasicConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LoggingConfig::default());

    let config = cli.apply(BasicConfig::default());

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: BasicConfig) -> anyhow::Result<()> {
    let runtime = config.runtime();
    let app = BasicApp::new(config)?;
    Runtime::run(runtime, GpuInit::default(), app)
}
