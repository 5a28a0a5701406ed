use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod auth;
mod cli;
mod config;
mod db;
mod domain;
mod format;
mod scheduler;

use crate::{app::AppContext, cli::args::Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let app = AppContext::new()?;
    cli::commands::dispatch(&app, cli)
}
