use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Desktop Chrome UA; the site serves an empty shell to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings for `vidgrab upgrade-tool` (optional `[updater]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Python interpreter used to run `-m pip`.
    pub python: String,
    /// Package to upgrade; also invoked as `<package> --version` afterwards.
    pub package: String,
    /// Optional standalone binary that supports self-update via `-U`.
    #[serde(default)]
    pub local_binary: Option<PathBuf>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            package: "yt-dlp".to_string(),
            local_binary: None,
        }
    }
}

/// Global configuration loaded from `~/.config/vidgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VidgrabConfig {
    /// User-Agent sent with page, API and media requests.
    pub user_agent: String,
    /// Referer sent with every request.
    pub referer: String,
    /// Accept-Language sent with page and API requests.
    pub accept_language: String,
    /// Netscape-format cookie file; `None` means no cookies.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,
    /// Directory downloads are written to.
    pub output_dir: PathBuf,
    /// Timeout in seconds for page and API fetches.
    pub timeout_secs: u64,
    /// Timeout in seconds for a whole media download.
    pub download_timeout_secs: u64,
    /// Detail endpoint template; `{id}` is replaced with the video id.
    pub api_detail_url: String,
    #[serde(default)]
    pub updater: UpdaterConfig,
}

impl Default for VidgrabConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: "https://www.douyin.com/".to_string(),
            accept_language: "zh-CN,zh;q=0.8,en-US;q=0.5,en;q=0.3".to_string(),
            cookie_file: None,
            output_dir: PathBuf::from("downloads"),
            timeout_secs: 30,
            download_timeout_secs: 3600,
            api_detail_url: "https://www.douyin.com/aweme/v1/web/aweme/detail/?aweme_id={id}"
                .to_string(),
            updater: UpdaterConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vidgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VidgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VidgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: VidgrabConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
