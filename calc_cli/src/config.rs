//! Where the CLI keeps its price table.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Environment variable overriding the price-table path
pub const PRICES_ENV: &str = "ESTIMATOR_PRICES";

const APP_DIR: &str = "estimator";
const PRICES_FILE: &str = "prices.json";

/// Resolve the price-table file: explicit flag, then `ESTIMATOR_PRICES`,
/// then `<config dir>/estimator/prices.json`.
pub fn price_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    resolve(env::var_os(PRICES_ENV).map(PathBuf::from), dirs::config_dir())
}

fn resolve(from_env: Option<PathBuf>, config_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    config_dir
        .map(|dir| dir.join(APP_DIR).join(PRICES_FILE))
        .ok_or_else(|| anyhow!("no config directory on this platform; pass --prices or set {}", PRICES_ENV))
}

/// Name recorded in lock files
pub fn user_id() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| APP_DIR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let path = price_path(Some(PathBuf::from("/tmp/p.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/p.json"));
    }

    #[test]
    fn test_env_before_config_dir() {
        let path = resolve(Some(PathBuf::from("/srv/prices.json")), Some(PathBuf::from("/home/u/.config"))).unwrap();
        assert_eq!(path, PathBuf::from("/srv/prices.json"));
    }

    #[test]
    fn test_config_dir_fallback() {
        let path = resolve(Some(PathBuf::new()), Some(PathBuf::from("/home/u/.config"))).unwrap();
        assert_eq!(path, PathBuf::from("/home/u/.config/estimator/prices.json"));
        assert!(resolve(None, None).is_err());
    }
}
