//! Resolve a small service configuration from prefixed environment variables.
//!
//! Run with: cargo run --example service_config -- --prefix APP_
//!
//! Try `APP_PORT=notanumber` to see a fallback warning, and
//! `RUST_LOG=debug` to see every resolved value.

use std::process;

use anyhow::{Result, bail};
use clap::Parser;
use envor::{KeyPrefix, ParseError, TimeDelta};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Print the configuration a service would start with.
#[derive(Parser, Debug)]
#[command(name = "service_config")]
struct Cli {
    /// Prefix prepended to every variable name (no separator is added).
    #[arg(long, default_value = "APP_")]
    prefix: String,

    /// Exit with an error if any variable is set but malformed.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Debug)]
struct ServiceConfig {
    name: String,
    port: u32,
    debug: bool,
    workers: u32,
    max_body_bytes: u64,
    sample_rate: f64,
    request_timeout: TimeDelta,
}

impl ServiceConfig {
    fn print(&self) {
        println!("name            = {}", self.name);
        println!("port            = {}", self.port);
        println!("debug           = {}", self.debug);
        println!("workers         = {}", self.workers);
        println!("max_body_bytes  = {}", self.max_body_bytes);
        println!("sample_rate     = {}", self.sample_rate);
        println!("request_timeout = {}", self.request_timeout);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = KeyPrefix::new(cli.prefix);
    let mut errors: Vec<ParseError> = Vec::new();

    let mut note = |err: Option<ParseError>| {
        if let Some(err) = err {
            warn!(
                key = %err.key,
                value = %err.value,
                kind = %err.kind,
                "{}, using default",
                err.reason
            );
            errors.push(err);
        }
    };

    let name = env.string("NAME", "service");
    let (port, err) = env.u32("PORT", 8080);
    note(err);
    let (debug, err) = env.bool("DEBUG", false);
    note(err);
    let (workers, err) = env.u32("WORKERS", 4);
    note(err);
    let (max_body_bytes, err) = env.u64("MAX_BODY_BYTES", 1 << 20);
    note(err);
    let (sample_rate, err) = env.f64("SAMPLE_RATE", 1.0);
    note(err);
    let mut request_timeout = TimeDelta::zero();
    note(
        env.duration_var(&mut request_timeout, "REQUEST_TIMEOUT", TimeDelta::seconds(30))
            .err(),
    );

    let config = ServiceConfig {
        name,
        port,
        debug,
        workers,
        max_body_bytes,
        sample_rate,
        request_timeout,
    };
    debug!(prefix = %env, ?config, "resolved configuration");

    if cli.strict && !errors.is_empty() {
        bail!("{} malformed variable(s) under prefix '{env}'", errors.len());
    }

    config.print();
    Ok(())
}
