// Wire contract with the generation service.
use gloo::console::log;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenerationError;
use crate::state::Artifact;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            MediaKind::Image => "generate/",
            MediaKind::Video => "generate_video/",
        }
    }

    /// JSON field the service fills on success.
    pub fn path_field(self) -> &'static str {
        match self {
            MediaKind::Image => "image_path",
            MediaKind::Video => "video_path",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Body returned by both endpoints. Only one of the path fields is ever set.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct GenerateResponse {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    // FastAPI validation failures (HTTP 422)
    #[serde(default)]
    pub detail: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub artifact: Artifact,
    pub message: Option<String>,
}

fn server_error(error: Option<String>, detail: Option<Value>) -> Option<GenerationError> {
    if let Some(e) = error {
        return Some(GenerationError::Server(e));
    }
    detail.map(|d| match d {
        Value::String(s) => GenerationError::Server(s),
        other => GenerationError::Server(other.to_string()),
    })
}

impl GenerateResponse {
    pub fn into_generated(self, kind: MediaKind) -> Result<Generated, GenerationError> {
        let GenerateResponse {
            image_path,
            video_path,
            error,
            message,
            detail,
        } = self;

        let path = match kind {
            MediaKind::Image => image_path,
            MediaKind::Video => video_path,
        };

        // An empty path counts as absent.
        match path.filter(|p| !p.is_empty()) {
            Some(p) => Ok(Generated {
                artifact: Artifact::new(kind, p),
                message,
            }),
            None => Err(server_error(error, detail).unwrap_or(GenerationError::MissingArtifact(kind))),
        }
    }
}

pub fn generation_url(api_base: &str, kind: MediaKind, prompt: &str) -> String {
    format!(
        "{}/{}?prompt={}",
        api_base.trim_end_matches('/'),
        kind.endpoint(),
        urlencoding::encode(prompt)
    )
}

/// Maps a raw HTTP status + body onto the outcome the UI cares about.
pub fn interpret(kind: MediaKind, status: u16, body: &str) -> Result<Generated, GenerationError> {
    let ok = (200..300).contains(&status);
    match serde_json::from_str::<GenerateResponse>(body) {
        Ok(parsed) if ok => parsed.into_generated(kind),
        Ok(parsed) => Err(server_error(parsed.error, parsed.detail)
            .unwrap_or(GenerationError::Status(status))),
        Err(_) if !ok => Err(GenerationError::Status(status)),
        Err(e) => Err(GenerationError::Decode(e.to_string())),
    }
}

pub async fn generate(
    api_base: &str,
    kind: MediaKind,
    prompt: &str,
) -> Result<Generated, GenerationError> {
    let url = generation_url(api_base, kind, prompt);
    log!(format!("GET {url}"));

    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| GenerationError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| GenerationError::Network(e.to_string()))?;

    interpret(kind, status, &body)
}
