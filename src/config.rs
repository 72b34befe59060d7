use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default currency all values are quoted in.
fn default_quote_currency() -> String {
    "USD".to_string()
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the data directory (datasets + credentials). If relative,
    /// resolved from the config file location. Defaults to `data/`.
    pub data_dir: Option<PathBuf>,

    /// Path to the report output directory. Defaults to `output/`.
    pub output_dir: Option<PathBuf>,

    /// Currency all prices and values are quoted in (e.g., "USD").
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_dir: None,
            quote_currency: default_quote_currency(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn resolve_dir(dir: Option<&PathBuf>, config_dir: &Path, default: &str) -> PathBuf {
        match dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => config_dir.join(dir),
            None => config_dir.join(default),
        }
    }
}

/// Loaded configuration with resolved paths.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub quote_currency: String,
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./coinfolio.toml` if it exists in the current directory
/// 2. `~/.local/share/coinfolio/coinfolio.toml` (XDG data directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("coinfolio.toml");
    if local_config.exists() {
        return local_config;
    }

    if let Some(data_dir) = dirs::data_dir() {
        return data_dir.join("coinfolio").join("coinfolio.toml");
    }

    local_config
}

impl ResolvedConfig {
    /// Load and resolve config from a file path.
    ///
    /// Directories are resolved relative to the config file's parent
    /// directory. A missing config file yields the defaults, anchored at
    /// the config path's intended directory.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        let config = if config_path.exists() {
            Config::load(config_path)?
        } else {
            Config::default()
        };

        let config_path = if config_path.is_relative() {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(config_path)
        } else {
            config_path.to_path_buf()
        };

        let config_dir = config_path
            .parent()
            .context("Config path has no parent directory")?;

        Ok(Self {
            data_dir: Config::resolve_dir(config.data_dir.as_ref(), config_dir, "data"),
            output_dir: Config::resolve_dir(config.output_dir.as_ref(), config_dir, "output"),
            quote_currency: config.quote_currency,
        })
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.data_dir.join("credentials.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn default_directories_hang_off_the_config_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("coinfolio.toml");

        let resolved = ResolvedConfig::load_or_default(&config_path)?;
        assert_eq!(resolved.data_dir, dir.path().join("data"));
        assert_eq!(resolved.output_dir, dir.path().join("output"));
        assert_eq!(resolved.quote_currency, "USD");
        Ok(())
    }

    #[test]
    fn relative_directories_resolve_against_the_config_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("coinfolio.toml");

        let mut file = std::fs::File::create(&config_path)?;
        writeln!(file, "data_dir = \"./my-data\"")?;
        writeln!(file, "output_dir = \"reports\"")?;

        let resolved = ResolvedConfig::load_or_default(&config_path)?;
        assert_eq!(resolved.data_dir, dir.path().join("./my-data"));
        assert_eq!(resolved.output_dir, dir.path().join("reports"));
        Ok(())
    }

    #[test]
    fn absolute_directories_win() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("coinfolio.toml");

        let mut file = std::fs::File::create(&config_path)?;
        writeln!(file, "data_dir = \"/var/coinfolio/data\"")?;

        let resolved = ResolvedConfig::load_or_default(&config_path)?;
        assert_eq!(resolved.data_dir, PathBuf::from("/var/coinfolio/data"));
        Ok(())
    }

    #[test]
    fn quote_currency_is_configurable() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("coinfolio.toml");

        let mut file = std::fs::File::create(&config_path)?;
        writeln!(file, "quote_currency = \"EUR\"")?;

        let resolved = ResolvedConfig::load_or_default(&config_path)?;
        assert_eq!(resolved.quote_currency, "EUR");
        Ok(())
    }

    #[test]
    fn empty_config_file_is_all_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("coinfolio.toml");
        std::fs::File::create(&config_path)?;

        let config = Config::load(&config_path)?;
        assert_eq!(config.data_dir, None);
        assert_eq!(config.quote_currency, "USD");
        Ok(())
    }

    #[test]
    fn credentials_file_lives_in_the_data_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let resolved = ResolvedConfig::load_or_default(&dir.path().join("coinfolio.toml"))?;
        assert_eq!(
            resolved.credentials_file(),
            dir.path().join("data").join("credentials.json")
        );
        Ok(())
    }
}
