use std::path::PathBuf;

use folio::config::{open_config, Config};

/// Reads the configuration and reports where it came from on stderr.
pub(crate) fn load_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let (config, source) = open_config(cfg_path).map_err(|e| e.to_string())?;

    match source {
        Some(path) => eprintln!("Reading config from {}", path.display()),
        None => eprintln!("No folio.toml found. Using defaults"),
    }

    match config.log {
        Some(ref log) => match log.location {
            Some(ref location) => eprintln!("Log enabled. Files will be written in {}", location.display()),
            None => eprintln!("Log enabled. Using stderr"),
        },
        None => eprintln!("Log not configured. Using stderr"),
    }

    Ok(config)
}
