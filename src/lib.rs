// Re-export modules
pub mod config;
pub mod error;
pub mod extract;
pub mod merge;
pub mod pipeline;
pub mod results;
pub mod scrape;
pub mod sections;
pub mod vision;

// Re-export commonly used types for convenience
pub use error::CloneError;
pub use pipeline::ClonePipeline;
pub use results::{CloneResult, LandingConfig};

use config::CloneConfig;
use std::path::Path;

/// Builder for a configured cloning pipeline
pub struct Cloner {
    config: CloneConfig,
}

impl Cloner {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CloneConfig::default(),
        }
    }

    /// Apply a full configuration
    pub fn with_config(mut self, config: CloneConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        self.config = CloneConfig::from_file(path)?;
        Ok(self)
    }

    /// Override the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver_url = url.into();
        self
    }

    /// Override how many scrapes may run against the shared browser at once
    pub fn with_max_concurrent_scrapes(mut self, value: usize) -> Self {
        self.config.max_concurrent_scrapes = value;
        self
    }

    /// Override the vision model name
    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.config.vision.model = model.into();
        self
    }

    /// Build the pipeline. The WEBDRIVER_URL environment variable, when set,
    /// overrides the configured endpoint.
    pub fn build(mut self) -> ClonePipeline {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }
        ClonePipeline::new(self.config)
    }
}

impl Default for Cloner {
    fn default() -> Self {
        Self::new()
    }
}
