use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::io;
use std::path::PathBuf;

use crate::config::RabbitConfig;
use crate::session::Session;

pub mod list;

#[derive(Parser, Debug)]
#[command(
    name = "rabbit",
    version,
    about = "Rabbit Hole: data that goes deeper"
)]
pub struct Cli {
    /// Data file (overrides RABBIT_DATA_FILE, default items.csv)
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Item limit (overrides RABBIT_MAX_ITEMS, default 100)
    #[arg(long)]
    pub max_items: Option<usize>,
    /// Without a command an interactive session is started.
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print stored items and exit (non-interactive)
    List {
        /// JSON output (array of {"name","value"})
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Cli {
    /// Defaults <- ENV <- flags.
    pub fn config(&self) -> RabbitConfig {
        let mut cfg = RabbitConfig::from_env();
        if let Some(p) = &self.file {
            cfg = cfg.with_data_file(p.clone());
        }
        if let Some(n) = self.max_items {
            cfg = cfg.with_max_items(n);
        }
        cfg
    }
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    let cfg = cli.config();
    debug!("{}", cfg);

    match cli.cmd {
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(cfg, stdin.lock(), stdout.lock());
            session.run().context("interactive session")?;
        }
        Some(Cmd::List { json }) => {
            let stdout = io::stdout();
            list::exec(&cfg, json, &mut stdout.lock())?;
        }
    }
    Ok(())
}
