//! timedmap demo - a session-token store built on `TimedMap`
//!
//! Fills a map with session tokens, hammers it from reader threads, keeps
//! half of the sessions alive with `reset`, then lets the rest expire and
//! purges them.

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use timedmap::TimedMap;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Errors produced while parsing command-line arguments.
#[derive(Debug, Error, PartialEq)]
enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("invalid value for {flag}: {value}")]
    InvalidNumber { flag: &'static str, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Demo configuration
#[derive(Debug, Clone, PartialEq)]
struct Config {
    /// Default TTL of every session
    ttl: Duration,
    /// Number of sessions to create
    sessions: usize,
    /// Number of concurrent reader threads
    readers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(1500),
            sessions: 8,
            readers: 4,
        }
    }
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum Action {
    Run(Config),
    Help,
    Version,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded)
    fn from_args<I>(args: I) -> Result<Action, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--ttl-ms" => {
                    let ms = parse_number("--ttl-ms", args.next())?;
                    config.ttl = Duration::from_millis(ms as u64);
                }
                "--sessions" => config.sessions = parse_number("--sessions", args.next())?,
                "--readers" => config.readers = parse_number("--readers", args.next())?,
                "--help" | "-h" => return Ok(Action::Help),
                "--version" | "-v" => return Ok(Action::Version),
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        Ok(Action::Run(config))
    }
}

fn parse_number(flag: &'static str, value: Option<String>) -> Result<usize, ConfigError> {
    let value = value.ok_or(ConfigError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { flag, value })
}

fn print_help() {
    println!(
        r#"
timedmap-demo - session-token store on an expiring map

USAGE:
    timedmap-demo [OPTIONS]

OPTIONS:
        --ttl-ms <MS>        Session TTL in milliseconds (default: 1500)
        --sessions <N>       Number of sessions to create (default: 8)
        --readers <N>        Number of reader threads (default: 4)
    -v, --version            Print version information
    -h, --help               Print this help message

Set RUST_LOG=debug to see purge events.
"#
    );
}

fn main() -> anyhow::Result<()> {
    let config = match Config::from_args(std::env::args().skip(1))? {
        Action::Run(config) => config,
        Action::Help => {
            print_help();
            return Ok(());
        }
        Action::Version => {
            println!("timedmap-demo version {}", timedmap::VERSION);
            return Ok(());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let summary = run(&config);
    debug!(?summary, "Demo finished");
    Ok(())
}

/// Counters reported by one demo run
#[derive(Debug, PartialEq)]
struct Summary {
    renewed: usize,
    live: usize,
    purged: usize,
}

fn session_key(i: usize) -> String {
    format!("session:{}", i)
}

fn run(config: &Config) -> Summary {
    let sessions: Arc<TimedMap<String, Arc<str>>> = Arc::new(TimedMap::new(config.ttl));
    info!(ttl_ms = config.ttl.as_millis(), "Session store created");

    for i in 0..config.sessions {
        let token: Arc<str> = Arc::from(format!("token-{:04x}", i * 7919));
        sessions.set(session_key(i), token);
    }
    info!(sessions = sessions.len(), "Sessions issued");

    let handles: Vec<_> = (0..config.readers)
        .map(|reader| {
            let sessions = Arc::clone(&sessions);
            let count = config.sessions;
            thread::spawn(move || {
                let hits = (0..count)
                    .filter(|i| sessions.get(&session_key(*i)).is_some())
                    .count();
                debug!(reader = reader, hits = hits, "Reader finished");
                hits
            })
        })
        .collect();

    let total_hits: usize = handles
        .into_iter()
        .map(|handle| handle.join().unwrap_or(0))
        .sum();
    info!(hits = total_hits, "Readers done");

    // Keep the even sessions alive for one more TTL
    thread::sleep(config.ttl / 2);
    let renewed = (0..config.sessions)
        .step_by(2)
        .filter(|i| sessions.reset(&session_key(*i)))
        .count();
    info!(renewed = renewed, "Active sessions renewed");

    thread::sleep(config.ttl / 2 + config.ttl / 4);

    let live = sessions.dump();
    let mut keys: Vec<_> = live.keys().cloned().collect();
    keys.sort();
    info!(live = live.len(), stored = sessions.len(), ?keys, "Snapshot taken");

    let purged = sessions.purge();
    info!(
        purged = purged,
        remaining = sessions.len(),
        "Expired sessions purged"
    );

    Summary {
        renewed,
        live: live.len(),
        purged,
    }
}
