use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional user configuration. Only holds defaults the CLI can override.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub language: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path();
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&config_path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("addic7ed-dl"))
        // If the standard path could not be found (e.g. `$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(r#"language = "en""#).unwrap();
        assert_eq!(config.language.as_deref(), Some("en"));
        let empty: Config = toml::from_str("").unwrap();
        assert!(empty.language.is_none());
    }
}
