//! CLI module for the travel blog account service

pub mod serve;

use clap::{Parser, Subcommand};

/// Travel blog accounts - login, registration and profile form validation
#[derive(Parser)]
#[command(name = "travelblog-accounts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),
}
