//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chainscope")]
#[command(version)]
#[command(about = "Retrieve, decode and verify TLS certificate chains", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retrieve and decode the chain of a single host
    Check(CheckArgs),

    /// Retrieve chains for several host:port targets concurrently
    Batch(BatchArgs),

    /// Answer a raw query string (host=..&port=.., or hosts=.. with --multi)
    Query(QueryArgs),

    /// Decode certificates from a local PEM or DER file
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Host to check
    #[arg(required = true)]
    pub host: String,

    /// Port, sanitised like any other input
    #[arg(long, default_value = "443")]
    pub port: String,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Targets as host:port
    #[arg(value_name = "HOST:PORT")]
    pub hosts: Vec<String>,

    /// File containing targets (one host:port per line)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// URL-encoded query string
    #[arg(required = true)]
    pub query: String,

    /// Treat the query as a multi-host lookup
    #[arg(short, long)]
    pub multi: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// PEM bundle or DER certificate
    #[arg(required = true)]
    pub file: PathBuf,
}
