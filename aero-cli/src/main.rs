use aero_cli::cli::{Cli, Command, DraftAction};
use aero_cli::{AppError, AppState, Controller, ListView, Shell};
use aero_store::{Config, FileStore};
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aero_cli=info,aero_order=info,aero_store=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(cli, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = out.flush();
            let mut stderr = io::stderr();
            let _ = err.report(&mut stderr);
            err.exit_code()
        }
    }
}

async fn run(cli: Cli, out: &mut dyn Write) -> Result<(), AppError> {
    let mut config = Config::load_from(&cli.config_dir).context("Failed to load config")?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    tracing::debug!("Using data directory {}", config.storage.data_dir.display());

    let state: AppState<FileStore> = AppState::open(config).context("Failed to open storage")?;
    let controller = Controller::new(state);

    match cli.command {
        Command::Book(args) => {
            controller.book(&args, out)?;
        }
        Command::Preview(args) => {
            controller.preview(&args, out)?;
        }
        Command::Draft { action } => match action {
            DraftAction::Save(args) => controller.draft_save(&args, out)?,
            DraftAction::Show => controller.draft_show(out)?,
            DraftAction::Clear => controller.draft_clear(out)?,
        },
        Command::Seats { demo, seed } => controller.seats(demo, seed, out)?,
        Command::List { page, query } => {
            controller.list(&ListView { query: query.unwrap_or_default(), page }, out)?;
        }
        Command::Search { query, page } => {
            controller.list(&ListView { query, page }, out)?;
        }
        Command::View { id, json } => controller.view(id, json, out)?,
        Command::Edit { id, form } => {
            controller.edit(id, &form, out)?;
        }
        Command::Delete { id } => {
            controller.delete(id, out)?;
        }
        Command::Clear { yes } => controller.clear(yes, out)?,
        Command::Export { output } => {
            controller.export(output, out)?;
        }
        Command::Shell => {
            let mut shell = Shell::new(controller);
            shell.run(BufReader::new(tokio::io::stdin()), out).await?;
        }
    }
    Ok(())
}
