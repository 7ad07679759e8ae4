use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
///
/// `PRINTJOB_TOOLS__PDF_PRINTER__PATH=/opt/pp` overrides `tools.pdf_printer.path`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("PRINTJOB_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load the configuration file alone, ignoring environment overrides
///
/// Used when the file is about to be rewritten, so that overrides meant for
/// a single run are not stored.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Write `config` to `path`, keeping the previous file as `<path>.bak`
///
/// Returns the backup path when a previous file existed.
pub fn store_config(path: &Path, config: &Config) -> Result<Option<PathBuf>, ConfigError> {
    let text =
        toml::to_string_pretty(config).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    let backup = if path.exists() {
        let mut name = path.as_os_str().to_owned();
        name.push(".bak");
        let backup = PathBuf::from(name);
        std::fs::rename(path, &backup).map_err(|source| ConfigError::StoreFailed {
            path: backup.clone(),
            source,
        })?;
        Some(backup)
    } else {
        None
    };

    std::fs::write(path, text).map_err(|source| ConfigError::StoreFailed {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Stored configuration to {}", path.display());
    Ok(backup)
}
