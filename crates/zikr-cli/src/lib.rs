pub mod cli;
pub mod dispatch;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zikr_app::App;
use zikr_core::store::JsonFileStore;

use crate::cli::Cli;

pub fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let root = JsonFileStore::resolve_default_root().context("failed to resolve store path")?;
    let store = JsonFileStore::new(root);
    let app = App::new(&store);

    dispatch::run_with_deps(cli, &app)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ZIKR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
