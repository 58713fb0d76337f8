//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{DeployConfig, apply_setting, validate_config};

/// Load configuration and check its bounds.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or a
/// value is out of range.
pub fn load_config(store: &impl ConfigStore) -> Result<DeployConfig> {
    let config = store.load()?;
    if let Err(e) = validate_config(&config) {
        let path = store.path()?;
        return Err(e.context(format!("invalid settings in {}", path.display())));
    }
    Ok(config)
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &DeployConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist one setting, returning the updated configuration.
///
/// The stored file is read without bounds checks so `config set` can repair
/// it. Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or on I/O failure.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<DeployConfig> {
    let mut config = store.load()?;
    apply_setting(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
