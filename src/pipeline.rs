use crate::config::CloneConfig;
use crate::error::CloneError;
use crate::merge;
use crate::results::{CloneResult, CloneStats, LandingConfig};
use crate::scrape::{self, BrowserPool};
use crate::sections;
use crate::vision::VisionAnalyzer;
use std::collections::HashSet;
use std::sync::Arc;

/// Sequences the full cloning pipeline: scrape → visual analysis →
/// reconciliation → section mapping → assembly.
///
/// Stages run strictly in order within one request; the browser pool bounds
/// how many requests scrape concurrently. Acquisition failures are fatal to
/// the request; visual-analysis failures are absorbed by the analyzer and
/// never reach the error boundary here.
pub struct ClonePipeline {
    pool: Arc<BrowserPool>,
    analyzer: VisionAnalyzer,
    config: CloneConfig,
}

impl ClonePipeline {
    pub fn new(config: CloneConfig) -> Self {
        let pool = Arc::new(BrowserPool::new(
            config.webdriver_url.clone(),
            config.max_concurrent_scrapes,
        ));
        Self::with_pool(config, pool)
    }

    /// Construct with an injected pool, shared across pipelines if desired
    pub fn with_pool(config: CloneConfig, pool: Arc<BrowserPool>) -> Self {
        let analyzer = VisionAnalyzer::new(config.vision.clone());
        Self {
            pool,
            analyzer,
            config,
        }
    }

    /// Clones the reference site into a renderable landing config.
    ///
    /// Never panics and never returns `Err`: every failure mode is folded
    /// into the returned `CloneResult`.
    pub async fn clone_website(&self, url: &str, user_intent: Option<&str>) -> CloneResult {
        if let Some(intent) = user_intent {
            ::log::debug!("clone intent for {}: {}", url, intent);
        }

        match self.run(url).await {
            Ok((config, stats)) => {
                ::log::info!(
                    "cloned {}: {} sections detected, {} colors, {} fonts",
                    url,
                    stats.sections_detected,
                    stats.colors_extracted,
                    stats.fonts_detected
                );
                CloneResult::succeeded(config, url.to_string(), stats)
            }
            Err(e) => {
                ::log::error!("clone of {} failed: {}", url, e);
                CloneResult::failed(url.to_string(), e.to_string())
            }
        }
    }

    async fn run(&self, url: &str) -> Result<(LandingConfig, CloneStats), CloneError> {
        let scraped = scrape::scrape_website(&self.pool, url, &self.config).await?;
        let visual = self.analyzer.analyze(&scraped.screenshot).await;

        let view = merge::reconcile(&visual, &scraped);
        let stats = CloneStats {
            sections_detected: visual.sections.len(),
            colors_extracted: distinct_colors(&view),
            fonts_detected: scraped.assets.fonts.len(),
        };
        // The screenshot buffer has served its purpose; release it before the
        // mapping stages run.
        drop(scraped);

        let mapped: Vec<_> = view
            .sections
            .iter()
            .filter_map(|section| sections::map_section(section, &view))
            .collect();
        let landing = sections::assemble(mapped, &view, url);

        Ok((landing, stats))
    }
}

fn distinct_colors(view: &merge::MergedView) -> usize {
    let colors = &view.colors;
    [
        &colors.primary,
        &colors.secondary,
        &colors.accent,
        &colors.background,
        &colors.foreground,
        &colors.muted,
        &colors.border,
    ]
    .into_iter()
    .collect::<HashSet<_>>()
    .len()
}
