//! Initialize the terminal's ticket store.
//!
//! Opens (creating if needed) the configured database, runs pending
//! migrations, and seeds the default admin account. Safe to re-run.

use anyhow::{Context, Result};
use log::info;

use ticketing_core::config::TerminalConfig;
use ticketing_core::db::{AdminRepository, RepositoryFactory, RepositoryType};

fn main() -> Result<()> {
    env_logger::init();

    let config =
        TerminalConfig::from_default_location().context("loading terminal configuration")?;
    info!("using database at {}", config.store.database_path);

    let repo = RepositoryFactory::create(
        RepositoryType::from_env(),
        Some(config.store.database_path.as_str()),
    )
    .context("opening the ticket store")?;

    repo.upsert_admin("admin", "admin123")
        .context("seeding the default admin account")?;
    info!("default admin account is in place");

    println!("Ticket store initialized at {}", config.store.database_path);
    Ok(())
}
