//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Trivia quiz API
#[derive(Parser, Debug)]
#[command(name = "trivia-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file, or ":memory:" for a throwaway store (serve only)
    #[arg(
        short,
        long,
        global = true,
        env = "TRIVIA_DATABASE",
        default_value = "trivia.duckdb"
    )]
    pub database: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server mode
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "5000")]
        port: u16,

        /// Seed file (YAML) loaded before serving
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Load categories and questions from a seed file (YAML)
    Seed {
        /// Seed file path
        file: PathBuf,
    },

    /// Print categories as JSON
    Categories,
}
