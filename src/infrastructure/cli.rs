use clap::Parser;

use crate::{
    infrastructure::config::{Config, StorageBackend},
    utils::version,
};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 4.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 60.0
    )]
    pub frame_rate: f64,

    #[arg(long, value_name = "SEED", help = "Override api.seed from the config file")]
    pub seed: Option<String>,

    #[arg(
        short = 'n',
        long,
        value_name = "COUNT",
        help = "Override paging.results_per_page from the config file",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub page_size: Option<u32>,

    #[arg(long, help = "Keep the user cache in memory instead of SQLite")]
    pub memory: bool,
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = &self.seed {
            config.api.seed = seed.clone();
        }
        if let Some(page_size) = self.page_size {
            config.paging.results_per_page = page_size;
        }
        if self.memory {
            config.storage.backend = StorageBackend::Memory;
        }
    }
}
