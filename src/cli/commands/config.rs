//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::Path;

/// Run the config command.
///
/// `config_path` is the `--config` flag; `init` and `path` fall back to the
/// default location without it.
pub fn run_config(
    action: &ConfigAction,
    config_path: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let path = config_path
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Init => {
            if init_config(&path)? {
                Output::success(&format!("Created config at {:?}", path));
            } else {
                Output::warning(&format!("Config already exists at {:?}", path));
            }
        }

        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Write default settings to `path` unless a file is already there.
///
/// Environment overrides are not written. Returns whether a file was created.
fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Settings::default().save_to(path)?;
    Ok(true)
}
