//! Runtime configuration from the command line and environment.
//!
//! Environment variables:
//! - `BLOCKFALL_SEED`: piece sequence seed (default: random)
//! - `BLOCKFALL_LOG_FILE`: write logs to this file (default: no logging)
//! - `BLOCKFALL_LOG`: log filter, e.g. `debug` or `blockfall_core=trace` (default: `info`)
//! - `BLOCKFALL_BASE_GRAVITY_MS`: starting gravity interval (default: 800)
//! - `BLOCKFALL_LEVEL_LENGTH_MS`: time between speed-ups (default: 60000)
//! - `BLOCKFALL_KEY_RELEASE_TIMEOUT_MS`: held-key timeout for terminals without
//!   release events (default: 150)
//!
//! Command line flags take precedence over the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{ensure, Context, Result};
use clap::Parser;

use crate::core::SessionConfig;
use crate::input::handler::DEFAULT_KEY_RELEASE_TIMEOUT_MS;

pub const SEED_ENV: &str = "BLOCKFALL_SEED";
pub const LOG_FILE_ENV: &str = "BLOCKFALL_LOG_FILE";
pub const BASE_GRAVITY_ENV: &str = "BLOCKFALL_BASE_GRAVITY_MS";
pub const LEVEL_LENGTH_ENV: &str = "BLOCKFALL_LEVEL_LENGTH_MS";
pub const KEY_RELEASE_TIMEOUT_ENV: &str = "BLOCKFALL_KEY_RELEASE_TIMEOUT_MS";

#[derive(Parser, Debug, Default, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seed for the piece sequence, given as a 64-bit integer.
    /// The same seed replays the same pieces and spawn columns.
    /// Example: `blockfall --seed 42`.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Append logs to this file. The terminal itself is used by the game.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub seed: u64,
    pub log_file: Option<PathBuf>,
    pub session: SessionConfig,
    pub key_release_timeout_ms: u32,
}

impl AppConfig {
    /// Resolve from command line arguments and the process environment.
    pub fn load(args: &Args) -> Result<Self> {
        Self::from_lookup(args, |key| env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn from_lookup(args: &Args, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let seed = match args.seed {
            Some(seed) => seed,
            None => parse_var(&lookup, SEED_ENV)?.unwrap_or_else(rand::random),
        };

        let log_file = args
            .log_file
            .clone()
            .or_else(|| non_empty(&lookup, LOG_FILE_ENV).map(PathBuf::from));

        let mut session = SessionConfig::default();
        if let Some(ms) = parse_var(&lookup, BASE_GRAVITY_ENV)? {
            session.base_gravity_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, LEVEL_LENGTH_ENV)? {
            session.level_length_ms = ms;
        }
        ensure!(session.base_gravity_ms > 0, "{BASE_GRAVITY_ENV} must be positive");
        ensure!(session.level_length_ms > 0, "{LEVEL_LENGTH_ENV} must be positive");

        let key_release_timeout_ms = parse_var(&lookup, KEY_RELEASE_TIMEOUT_ENV)?
            .unwrap_or(DEFAULT_KEY_RELEASE_TIMEOUT_MS);

        Ok(Self {
            seed,
            log_file,
            session,
            key_release_timeout_ms,
        })
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup, key) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .with_context(|| format!("invalid {key}={raw:?}")),
    }
}
