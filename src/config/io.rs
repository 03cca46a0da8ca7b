use std::path::{Path, PathBuf};

use super::{schema::Config, validate::ConfigError};

/// Loads the base TOML file, merges an optional `<stem>_custom.toml` sitting
/// next to it on top, validates, and returns the result.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut value = read_toml_value(path)?;

    if let Some(custom_path) = custom_override_path(path) {
        if custom_path.exists() {
            log::info!("custom config override found at {}", custom_path.display());
            let custom = read_toml_value(&custom_path)?;
            merge_value(&mut value, custom);
        } else {
            log::info!("no custom config override at {}", custom_path.display());
        }
    }

    let config: Config = value.try_into().map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

fn read_toml_value(path: &Path) -> Result<toml::Value, ConfigError> {
    let path_str = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_str.clone(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path_str,
        source,
    })
}

fn custom_override_path(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    Some(path.with_file_name(format!("{stem}_custom.toml")))
}

/// Overlay tables merge per-key; any other value kind replaces the base.
fn merge_value(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
