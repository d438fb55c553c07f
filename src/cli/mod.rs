//! CLI module
//!
//! Command-line interface for the trivia API.
//!
//! # Commands
//!
//! - `serve` - Start HTTP server mode
//! - `seed` - Load categories and questions from a YAML file
//! - `categories` - Print the stored categories

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::serve;
