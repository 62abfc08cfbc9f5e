mod charts;
mod config;
mod db;
mod logging;
mod models;
mod report;
mod run;
mod ui;

use anyhow::Result;

use crate::config::Config;
use crate::logging::{init_logger, LogSink};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let (config, rest) = Config::from_args(&args)?;

    if rest.is_empty() {
        init_logger(config.log_level, LogSink::File, &config.log_path)?;
        // No store, no dashboard
        let table = db::load_all(&config.db_path)?;
        run::as_tui(&table, &config)
    } else {
        init_logger(config.log_level, LogSink::Stderr, &config.log_path)?;
        run::as_cli(&rest, &config)
    }
}
