use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::warn;

use crate::cards::set_range::ALL_SETS;
use crate::utilities::constants::{CARDS_DIR, DEFAULT_REQUEST_TIMEOUT_SECS, NETRUNNERDB_URL};

/// Command line overrides. Anything not given here falls back to the
/// environment and then to the defaults.
#[derive(Debug, Default, Parser)]
#[command(version, about = "Downloads Netrunner card data and artwork into a local cache")]
pub struct Cli {
    /// Root directory of the card cache
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Set to fetch: `all`, core, genesis, cac, spin, hap or lunar
    #[arg(long)]
    pub set: Option<String>,
    /// Base URL of the NetrunnerDB instance
    #[arg(long)]
    pub base_url: Option<String>,
    /// Per request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Skip cards that fail to fetch instead of ending their set
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub cards_path: PathBuf,
    pub set: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub stop_on_fetch_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cards_path: default_cards_path(),
            set: ALL_SETS.to_string(),
            base_url: NETRUNNERDB_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            stop_on_fetch_error: true,
        }
    }
}

/// `cards` next to the executable, or in the working directory if the
/// executable path is unknown.
fn default_cards_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CARDS_DIR)))
        .unwrap_or_else(|| PathBuf::from(CARDS_DIR))
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        let mut config = Config::default();
        config.update_from_env();
        config.update_from_cli(cli);
        config
    }

    fn update_from_env(&mut self) {
        self.update_from(|key| env::var(key).ok());
    }

    fn update_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("CARDS_PATH").filter(|p| !p.is_empty()) {
            self.cards_path = PathBuf::from(path);
        }
        if let Some(set) = lookup("CARD_SET").filter(|s| !s.is_empty()) {
            self.set = set;
        }
        if let Some(base_url) = lookup("NETRUNNERDB_URL").filter(|u| !u.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring REQUEST_TIMEOUT_SECS={}, keeping {:?}",
                    timeout, self.request_timeout
                ),
            }
        }
        if let Some(stop) = lookup("STOP_ON_FETCH_ERROR") {
            self.stop_on_fetch_error = stop == "1";
        }
    }

    fn update_from_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.path {
            self.cards_path = path.clone();
        }
        if let Some(set) = &cli.set {
            self.set = set.clone();
        }
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(secs) = cli.timeout.filter(|secs| *secs > 0) {
            self.request_timeout = Duration::from_secs(secs);
        }
        if cli.keep_going {
            self.stop_on_fetch_error = false;
        }
    }

    /// Base URL without a trailing slash, ready to have paths appended.
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
