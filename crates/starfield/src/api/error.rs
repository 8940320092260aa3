use thiserror::Error;

/// Errors surfaced by scene setup. Nothing in the per-frame path fails.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scene config: {0}")]
    InvalidConfig(String),

    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}
