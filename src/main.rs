use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::Mutex;

use randomusers::{
    infrastructure::{
        cli::Cli,
        config::{Config, StorageBackend},
        local::{InMemoryUserStore, SqliteUserStore, UserLocalDataSource},
        remote::RandomUserApi,
        tui::real::RealTui,
    },
    integration::app_runner::AppRunner,
    repositories::UserRepository,
    utils::{initialize_logging, initialize_panic_handler},
};

fn build_repository(config: &Config) -> Result<UserRepository> {
    let remote = Arc::new(RandomUserApi::new(&config.api)?);
    let local: Arc<dyn UserLocalDataSource> = match config.storage.backend {
        StorageBackend::Sqlite => {
            let path = config.storage.database_path(config.data_dir());
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            log::info!("Using user cache at {}", path.display());
            Arc::new(SqliteUserStore::open(&path)?)
        }
        StorageBackend::Memory => {
            log::info!("Using in-memory user cache");
            Arc::new(InMemoryUserStore::new())
        }
    };
    Ok(UserRepository::new(remote, local))
}

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let mut config = Config::new()?;
    args.apply(&mut config);

    let repository = build_repository(&config)?;

    let tui = Arc::new(Mutex::new(
        RealTui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate),
    ));
    let mut runner = AppRunner::new(config, repository, tui);
    runner.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
