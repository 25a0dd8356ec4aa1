use std::env;

use bindkit_core::error::{CoreError, Result};

pub const DEFAULT_ENDPOINT_NAME: &str = "environment";
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_ROUNDS: usize = 16;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Harness settings: command line first, then `BINDKIT_*` env vars, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint_name: String,
    pub workers: usize,
    pub rounds: usize,
    pub activate_early: bool,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_name: DEFAULT_ENDPOINT_NAME.to_string(),
            workers: DEFAULT_WORKERS,
            rounds: DEFAULT_ROUNDS,
            activate_early: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_args() -> Result<Self> {
        Self::from_args_iter(env::args())
    }

    pub fn from_args_iter<I, S>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut endpoint_name = env::var("BINDKIT_ENDPOINT_NAME")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT_NAME.to_string());
        let mut workers = match env::var("BINDKIT_WORKERS") {
            Ok(value) => parse_count("BINDKIT_WORKERS", &value)?,
            Err(_) => DEFAULT_WORKERS,
        };
        let mut rounds = match env::var("BINDKIT_ROUNDS") {
            Ok(value) => parse_count("BINDKIT_ROUNDS", &value)?,
            Err(_) => DEFAULT_ROUNDS,
        };
        let mut activate_early = env::var("BINDKIT_ACTIVATE_EARLY")
            .ok()
            .and_then(parse_bool)
            .unwrap_or(false);
        let mut log_filter =
            env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                "--endpoint-name" => {
                    if let Some(value) = args.next() {
                        endpoint_name = value.as_ref().to_string();
                    }
                }
                "--workers" => {
                    if let Some(value) = args.next() {
                        workers = parse_count("--workers", value.as_ref())?;
                    }
                }
                "--rounds" => {
                    if let Some(value) = args.next() {
                        rounds = parse_count("--rounds", value.as_ref())?;
                    }
                }
                "--log" => {
                    if let Some(value) = args.next() {
                        log_filter = value.as_ref().to_string();
                    }
                }
                "--activate-early" => {
                    activate_early = true;
                }
                _ if arg.starts_with("--endpoint-name=") => {
                    endpoint_name = arg["--endpoint-name=".len()..].to_string();
                }
                _ if arg.starts_with("--workers=") => {
                    workers = parse_count("--workers", &arg["--workers=".len()..])?;
                }
                _ if arg.starts_with("--rounds=") => {
                    rounds = parse_count("--rounds", &arg["--rounds=".len()..])?;
                }
                _ if arg.starts_with("--log=") => {
                    log_filter = arg["--log=".len()..].to_string();
                }
                _ => {}
            }
        }

        Ok(Self {
            endpoint_name,
            workers,
            rounds,
            activate_early,
            log_filter,
        })
    }
}

fn print_usage() {
    println!(
        "bindkit_host [--endpoint-name <name>] [--workers <n>] [--rounds <n>] [--activate-early] [--log <filter>]"
    );
}

fn parse_count(key: &'static str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CoreError::invalid_config(key, value.to_string())),
    }
}

fn parse_bool(value: String) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
