use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod error;
mod settings;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: cli::Cli) -> error::Result<()> {
    let mut settings = settings::Settings::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        settings.engine.data_dir = data_dir;
    }
    if let Some(mode) = cli.mode {
        settings.engine.mode = mode;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "crowdfund={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = engine::Engine::builder()
        .data_dir(&settings.engine.data_dir)
        .mode(settings.engine.mode)
        .build()?;
    tracing::debug!(mode = %engine.mode(), "dispatching command");

    commands::dispatch(&engine, cli.command, cli.json)
}
