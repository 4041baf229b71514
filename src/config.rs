//! Application configuration loaded from environment variables.
//!
//! All inputs are plain files under a single data directory:
//! - `STATEWATCH_DATA_DIR` — directory holding the three input files
//!   (default `data/`)
//! - `STATEWATCH_TRADES` — override path for the trade table CSV
//! - `STATEWATCH_ROSTER` — override path for the member roster CSV
//! - `STATEWATCH_TOPOLOGY` — override path for the boundary topology JSON
//! - `STATEWATCH_TICK_MS` — UI tick interval in milliseconds

use std::path::PathBuf;

/// Default data directory relative to the working directory.
const DEFAULT_DATA_DIR: &str = "data";

/// Default file names inside the data directory.
const TRADES_FILE: &str = "trade_data.csv";
const ROSTER_FILE: &str = "member_info.csv";
const TOPOLOGY_FILE: &str = "states-albers-10m.json";

/// Default UI tick interval.
const DEFAULT_TICK_MS: u64 = 250;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub data: DataPaths,
    pub tick_ms: u64,
}

/// Resolved locations of the three input sources.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub trades: PathBuf,
    pub roster: PathBuf,
    pub topology: PathBuf,
}

/// Loads the application configuration from environment variables.
///
/// Each input path defaults to a well-known file name under the data
/// directory and can be overridden individually.
///
/// # Errors
///
/// Returns [`StatewatchError::Config`](crate::StatewatchError::Config) if
/// `STATEWATCH_TICK_MS` is set but not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let data_dir = PathBuf::from(
        non_empty_var("STATEWATCH_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
    );

    let path_or_default = |var: &str, file: &str| -> PathBuf {
        non_empty_var(var)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(file))
    };

    let tick_ms = match non_empty_var("STATEWATCH_TICK_MS") {
        None => DEFAULT_TICK_MS,
        Some(raw) => match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => {
                return Err(crate::StatewatchError::Config(format!(
                    "STATEWATCH_TICK_MS must be a positive integer, got {raw:?}"
                )));
            }
        },
    };

    Ok(AppConfig {
        data: DataPaths {
            trades: path_or_default("STATEWATCH_TRADES", TRADES_FILE),
            roster: path_or_default("STATEWATCH_ROSTER", ROSTER_FILE),
            topology: path_or_default("STATEWATCH_TOPOLOGY", TOPOLOGY_FILE),
            data_dir,
        },
        tick_ms,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// # Safety
    ///
    /// Tests using this helper must run with `--test-threads=1` or otherwise
    /// ensure no other threads read these env vars concurrently.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let originals: Vec<(&str, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            // SAFETY: config tests run single-threaded (see test runner config).
            unsafe {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values, same single-threaded context.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    const ALL_VARS: [&str; 5] = [
        "STATEWATCH_DATA_DIR",
        "STATEWATCH_TRADES",
        "STATEWATCH_ROSTER",
        "STATEWATCH_TOPOLOGY",
        "STATEWATCH_TICK_MS",
    ];

    fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|v| (*v, None)).collect()
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&cleared(), || {
            let config = fetch_config().unwrap();
            assert_eq!(config.data.data_dir, PathBuf::from("data"));
            assert_eq!(config.data.trades, PathBuf::from("data/trade_data.csv"));
            assert_eq!(config.data.roster, PathBuf::from("data/member_info.csv"));
            assert_eq!(
                config.data.topology,
                PathBuf::from("data/states-albers-10m.json")
            );
            assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
        });
    }

    #[test]
    fn data_dir_moves_default_files() {
        let mut vars = cleared();
        vars[0] = ("STATEWATCH_DATA_DIR", Some("/srv/watch"));
        with_env(&vars, || {
            let config = fetch_config().unwrap();
            assert_eq!(config.data.trades, PathBuf::from("/srv/watch/trade_data.csv"));
            assert_eq!(config.data.roster, PathBuf::from("/srv/watch/member_info.csv"));
        });
    }

    #[test]
    fn per_file_override_wins_over_data_dir() {
        let mut vars = cleared();
        vars[0] = ("STATEWATCH_DATA_DIR", Some("/srv/watch"));
        vars[1] = ("STATEWATCH_TRADES", Some("/tmp/other.csv"));
        with_env(&vars, || {
            let config = fetch_config().unwrap();
            assert_eq!(config.data.trades, PathBuf::from("/tmp/other.csv"));
            assert_eq!(config.data.roster, PathBuf::from("/srv/watch/member_info.csv"));
        });
    }

    #[test]
    fn rejects_non_numeric_tick() {
        let mut vars = cleared();
        vars[4] = ("STATEWATCH_TICK_MS", Some("fast"));
        with_env(&vars, || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("STATEWATCH_TICK_MS"));
        });
    }

    #[test]
    fn rejects_zero_tick() {
        let mut vars = cleared();
        vars[4] = ("STATEWATCH_TICK_MS", Some("0"));
        with_env(&vars, || {
            assert!(fetch_config().is_err());
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        let vars: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|v| (*v, Some(""))).collect();
        with_env(&vars, || {
            let config = fetch_config().unwrap();
            assert_eq!(config.data.data_dir, PathBuf::from("data"));
            assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
        });
    }
}
