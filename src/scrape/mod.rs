pub mod styles;

pub use styles::{ExtractedStyles, Spacing, Typography};

use crate::config::CloneConfig;
use crate::error::CloneError;
use crate::extract::{self, ExtractedAssets, ExtractedContent};
use fantoccini::{Client, ClientBuilder};
use tokio::sync::Semaphore;
use tokio::time::{Duration, sleep, timeout};
use url::Url;

/// Everything captured from one page load. Ephemeral: lives for the duration
/// of a single clone request, then the screenshot buffer is dropped.
#[derive(Debug, Clone)]
pub struct ScrapedWebsite {
    pub url: String,
    /// Full-page PNG
    pub screenshot: Vec<u8>,
    pub html: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub styles: ExtractedStyles,
    pub content: ExtractedContent,
    pub assets: ExtractedAssets,
}

/// Shared WebDriver access for the pipeline.
///
/// The pool is an explicit dependency passed into the pipeline rather than a
/// module-level global. Each scrape opens a fresh session (an isolated
/// browsing context; cookies and storage are not shared across requests) and
/// closes it on completion. The semaphore bounds how many scrapes may run
/// against the shared browser at once.
pub struct BrowserPool {
    webdriver_url: String,
    permits: Semaphore,
}

impl BrowserPool {
    pub fn new(webdriver_url: impl Into<String>, max_concurrent: usize) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            permits: Semaphore::new(max_concurrent.max(1)),
        }
    }

    pub fn webdriver_url(&self) -> &str {
        &self.webdriver_url
    }

    /// Opens a session against the configured endpoint, trying common
    /// alternative WebDriver ports when it is unreachable.
    async fn open_session(&self) -> Result<Client, CloneError> {
        match ClientBuilder::native().connect(&self.webdriver_url).await {
            Ok(client) => return Ok(client),
            Err(e) => {
                ::log::warn!(
                    "failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
            }
        }

        let fallback_urls = [
            "http://localhost:9515", // ChromeDriver default
            "http://localhost:4444", // Selenium/geckodriver default
            "http://127.0.0.1:4444", // Try with IP instead of localhost
        ];
        for url in fallback_urls {
            if url == self.webdriver_url {
                continue;
            }
            ::log::info!("trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                return Ok(client);
            }
        }

        Err(CloneError::WebDriverUnavailable(self.webdriver_url.clone()))
    }
}

/// Loads the target URL in a fresh browsing context and captures screenshot,
/// HTML, computed style samples, extracted content and assets.
///
/// The session is closed on every path, including errors.
pub async fn scrape_website(
    pool: &BrowserPool,
    url: &str,
    config: &CloneConfig,
) -> Result<ScrapedWebsite, CloneError> {
    Url::parse(url)?;

    let _permit = pool
        .permits
        .acquire()
        .await
        .map_err(|_| CloneError::WebDriverUnavailable(pool.webdriver_url.clone()))?;
    ::log::debug!("acquired scrape permit for {}", url);

    let client = pool.open_session().await?;
    let captured = capture(&client, url, config).await;
    if let Err(e) = client.close().await {
        ::log::warn!("failed to close WebDriver session for {}: {}", url, e);
    }
    captured
}

async fn capture(
    client: &Client,
    url: &str,
    config: &CloneConfig,
) -> Result<ScrapedWebsite, CloneError> {
    let nav_timeout = Duration::from_secs(config.navigation_timeout_secs);
    match timeout(nav_timeout, client.goto(url)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(CloneError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            });
        }
        Err(_) => {
            return Err(CloneError::NavigationTimeout {
                url: url.to_string(),
                seconds: config.navigation_timeout_secs,
            });
        }
    }

    // Let late-loading content render before capture
    sleep(Duration::from_millis(config.settle_delay_ms)).await;

    // Size the window to the full document so the screenshot covers the page.
    // Height is capped; pixel-perfect capture is not a goal.
    let height = match client
        .execute("return document.body.scrollHeight;", vec![])
        .await
    {
        Ok(value) => value.as_u64().unwrap_or(720).clamp(720, 8000) as u32,
        Err(e) => {
            ::log::warn!("could not measure page height for {}: {}", url, e);
            720
        }
    };
    if let Err(e) = client.set_window_size(config.viewport_width, height).await {
        ::log::warn!("failed to resize window for {}: {}", url, e);
    }

    let screenshot = client
        .screenshot()
        .await
        .map_err(|e| CloneError::Capture(e.to_string()))?;

    let html = client.source().await.map_err(|e| CloneError::Navigation {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let styles = match client.execute(styles::STYLE_PROBE, vec![]).await {
        Ok(value) => styles::parse_style_probe(&value),
        Err(e) => {
            ::log::warn!("style probe failed for {}: {}", url, e);
            ExtractedStyles::default()
        }
    };

    let content = extract::extract_content(&html);
    let assets = extract::extract_assets(&html);
    let title = extract::page_title(&html);
    let description = extract::page_description(&html);

    ::log::info!(
        "scraped {}: {} bytes of HTML, {} byte screenshot, {} images, {} fonts",
        url,
        html.len(),
        screenshot.len(),
        assets.images.len(),
        assets.fonts.len()
    );

    Ok(ScrapedWebsite {
        url: url.to_string(),
        screenshot,
        html,
        title,
        description,
        styles,
        content,
        assets,
    })
}
