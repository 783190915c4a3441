use thiserror::Error;

/// Errors produced by the cloning pipeline.
///
/// Acquisition variants are fatal to a clone request and surface as a failed
/// `CloneResult`. The `Vision*` variants never escape the visual analyzer,
/// which substitutes a built-in default analysis instead.
#[derive(Error, Debug)]
pub enum CloneError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no WebDriver server reachable (tried {0} and fallbacks)")]
    WebDriverUnavailable(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("navigation to {url} timed out after {seconds}s")]
    NavigationTimeout { url: String, seconds: u64 },

    #[error("screenshot capture failed: {0}")]
    Capture(String),

    #[error("vision model call failed: {0}")]
    Vision(String),

    #[error("vision reply did not decode as an analysis: {0}")]
    VisionDecode(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}
