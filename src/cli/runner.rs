//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{SeedData, ServerConfig};
use crate::database::{DatabaseEngine, IN_MEMORY};
use crate::error::{Error, Result};
use crate::types::category_map;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { host, port, seed } => {
                let config = ServerConfig {
                    host: *host,
                    port: *port,
                    database: self.cli.database.clone(),
                    seed: seed.clone(),
                };
                crate::cli::serve(config).await
            }
            Commands::Seed { file } => self.seed(file),
            Commands::Categories => self.categories(),
        }
    }

    /// Open the configured database for a one-shot command
    ///
    /// An in-memory store would vanish when the command exits.
    fn open_database(&self, command: &str) -> Result<DatabaseEngine> {
        if self.cli.database == IN_MEMORY {
            return Err(Error::config(format!(
                "'{command}' needs a database file; {IN_MEMORY} is discarded on exit"
            )));
        }
        DatabaseEngine::open(&self.cli.database)
    }

    /// Load a seed file into the configured database
    fn seed(&self, file: &Path) -> Result<()> {
        let db = self.open_database("seed")?;
        let seed = SeedData::load(file)?;
        let summary = db.load_seed(&seed)?;

        println!(
            "Loaded {} categories and {} questions into {}",
            summary.categories,
            summary.questions,
            db.location()
        );
        Ok(())
    }

    /// Print categories as JSON
    fn categories(&self) -> Result<()> {
        let db = self.open_database("categories")?;
        let categories = db.list_categories()?;
        println!("{}", serde_json::to_string_pretty(&category_map(&categories))?);
        Ok(())
    }
}
