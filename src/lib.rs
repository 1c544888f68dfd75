pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod processor;
pub mod reporter;
pub mod writer;

use anyhow::Context;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::ParseError;

fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    let mut logger = stderrlog::new();
    logger.module(module_path!());
    match settings.verbosity {
        Some(verbosity) => logger.verbosity(verbosity),
        None => logger.quiet(true),
    };
    logger.init().context("Setting up stderr logger")?;
    Ok(())
}

/// Binary entry point. Parse failures are reported here and turned into
/// their exit status; only set-up problems come back as `Err`.
pub fn run() -> anyhow::Result<ExitCode> {
    let settings = Settings::from_env();
    init_logging(&settings)?;

    // 1. ── Arguments ──────────────────────────────────────────────────
    match cli::parse_args(std::env::args_os()) {
        Ok(Command::Parse) => {}
        Ok(Command::Help) => {
            let mut out = io::stdout().lock();
            if let Err(e) = out.write_all(cli::USAGE.as_bytes()) {
                return Ok(reporter::report(&ParseError::OutputWrite(e), settings.diagnostics));
            }
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => return Ok(reporter::report(&e, settings.diagnostics)),
    }

    // 2. ── Parse ──────────────────────────────────────────────────────
    let document = match processor::parse_source(io::stdin().lock()) {
        Ok(document) => document,
        Err(e) => return Ok(reporter::report(&e, settings.diagnostics)),
    };
    log::info!("document ready, {} bytes", document.len());

    // 3. ── Write output ───────────────────────────────────────────────
    if let Err(e) = writer::emit(&document, io::stdout().lock()) {
        return Ok(reporter::report(&ParseError::OutputWrite(e), settings.diagnostics));
    }

    Ok(ExitCode::SUCCESS)
}
