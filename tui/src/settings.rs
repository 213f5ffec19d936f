//! Reading and writing configuration files.

use log::info;
use rlifesim_lib::Config;
use std::{error::Error, fs, path::Path};

/// Supported configuration file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    /// Chooses the format by the extension of the file.
    fn from_path(path: &Path) -> Result<Self, String> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(Format::Toml),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(format!(
                "unknown configuration format for {}, expected .toml, .yaml, .yml or .json",
                path.display()
            )),
        }
    }
}

/// Reads a configuration file.
///
/// Missing fields take their default values.
pub(crate) fn read_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let config = match format {
        Format::Toml => toml::from_str(&text)?,
        Format::Yaml => serde_yaml::from_str(&text)?,
        Format::Json => serde_json::from_str(&text)?,
    };
    info!("Read configuration from {}", path.display());
    Ok(config)
}

/// Writes a configuration file.
pub(crate) fn write_config(path: &Path, config: &Config) -> Result<(), Box<dyn Error>> {
    let text = match Format::from_path(path)? {
        Format::Toml => toml::to_string_pretty(config)?,
        Format::Yaml => serde_yaml::to_string(config)?,
        Format::Json => serde_json::to_string_pretty(config)?,
    };
    fs::write(path, text)?;
    info!("Wrote configuration to {}", path.display());
    Ok(())
}
