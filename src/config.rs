use gloo::console::{log, warn};
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::api::{MediaKind, DEFAULT_API_BASE};

// Relative so it resolves next to index.html wherever the page is hosted.
pub const CONFIG_URL: &str = "./generator-config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    ImageOnly,
    #[default]
    ImageAndVideo,
}

impl Variant {
    pub fn kinds(self) -> &'static [MediaKind] {
        match self {
            Variant::ImageOnly => &[MediaKind::Image],
            Variant::ImageAndVideo => &[MediaKind::Image, MediaKind::Video],
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Variant::ImageOnly => "AI Art Generator",
            Variant::ImageAndVideo => "AI Art & Video Generator",
        }
    }

    /// Idle text of the trigger button for `kind`.
    pub fn idle_label(self, kind: MediaKind) -> &'static str {
        match (self, kind) {
            (Variant::ImageOnly, MediaKind::Image) => "Generate AI Art",
            (_, MediaKind::Image) => "Generate Image",
            (_, MediaKind::Video) => "Generate Video",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub variant: Variant,
    pub title: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            variant: Variant::default(),
            title: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let mut cfg: AppConfig =
            serde_json::from_str(json).map_err(|e| format!("Failed parsing {CONFIG_URL}: {e}"))?;
        if cfg.api_base.trim().is_empty() {
            cfg.api_base = DEFAULT_API_BASE.to_string();
        }
        Ok(cfg)
    }

    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.variant.default_title())
    }
}

async fn fetch_config() -> Result<AppConfig, String> {
    let resp = Request::get(CONFIG_URL)
        .send()
        .await
        .map_err(|e| format!("Failed fetching {CONFIG_URL}: {e}"))?;
    if !resp.ok() {
        return Err(format!("{CONFIG_URL}: HTTP {}", resp.status()));
    }
    let text = resp
        .text()
        .await
        .map_err(|e| format!("Failed reading {CONFIG_URL}: {e}"))?;
    AppConfig::from_json(&text)
}

/// Loads the optional config file, falling back to defaults on any failure.
pub async fn load() -> AppConfig {
    match fetch_config().await {
        Ok(cfg) => {
            log!(format!(
                "config loaded: {:?} against {}",
                cfg.variant, cfg.api_base
            ));
            cfg
        }
        Err(e) => {
            warn!(format!("{e}; using defaults"));
            AppConfig::default()
        }
    }
}
