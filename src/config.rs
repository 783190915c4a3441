use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the cloning pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Maximum number of scrapes allowed to run against the shared browser
    #[serde(default = "default_max_concurrent_scrapes")]
    pub max_concurrent_scrapes: usize,

    /// How long to wait for navigation before giving up
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Fixed delay after navigation so late-loading content can render
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Browser window width used for the capture
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Vision model settings
    #[serde(default)]
    pub vision: VisionConfig,
}

/// Configuration for the vision-capable chat-completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Chat-completions endpoint (OpenAI-compatible)
    #[serde(default = "default_vision_api_url")]
    pub api_url: String,

    /// Model name sent with each request
    #[serde(default = "default_vision_model")]
    pub model: String,

    /// API key; falls back to the VISION_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upper bound on the whole vision call
    #[serde(default = "default_vision_timeout_secs")]
    pub timeout_secs: u64,

    /// Token budget for the model reply
    #[serde(default = "default_vision_max_tokens")]
    pub max_tokens: u32,
}

impl CloneConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            max_concurrent_scrapes: default_max_concurrent_scrapes(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            settle_delay_ms: default_settle_delay_ms(),
            viewport_width: default_viewport_width(),
            vision: VisionConfig::default(),
        }
    }
}

impl VisionConfig {
    /// The configured key, or the VISION_API_KEY environment variable
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("VISION_API_KEY").ok())
            .filter(|key| !key.is_empty())
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_url: default_vision_api_url(),
            model: default_vision_model(),
            api_key: None,
            timeout_secs: default_vision_timeout_secs(),
            max_tokens: default_vision_max_tokens(),
        }
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for max_concurrent_scrapes
fn default_max_concurrent_scrapes() -> usize {
    4
}

fn default_navigation_timeout_secs() -> u64 {
    30
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_vision_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o".to_string()
}

fn default_vision_timeout_secs() -> u64 {
    60
}

fn default_vision_max_tokens() -> u32 {
    4096
}
