use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Tool configuration loaded from `~/.config/ytsub/config.toml`.
///
/// This is configuration for the tool itself, not the subscription document:
/// the document keeps its own sectioned text format (see `document`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YtsubConfig {
    /// Downloader executable invoked per URL. An absolute path or a name
    /// resolved via PATH (e.g. a wrapper script).
    #[serde(default = "default_downloader_bin")]
    pub downloader_bin: String,
}

fn default_downloader_bin() -> String {
    "yt-dlp".to_string()
}

impl Default for YtsubConfig {
    fn default() -> Self {
        Self {
            downloader_bin: default_downloader_bin(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytsub")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<YtsubConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = YtsubConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: YtsubConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = YtsubConfig::default();
        assert_eq!(cfg.downloader_bin, "yt-dlp");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = YtsubConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: YtsubConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.downloader_bin, cfg.downloader_bin);
    }

    #[test]
    fn config_toml_custom_downloader() {
        let toml = r#"downloader_bin = "/opt/yt-dlp/yt-dlp""#;
        let cfg: YtsubConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.downloader_bin, "/opt/yt-dlp/yt-dlp");
    }

    #[test]
    fn config_toml_empty_uses_defaults() {
        let cfg: YtsubConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.downloader_bin, "yt-dlp");
    }
}
