use clap::Parser;
use mirror_page::Cloner;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    ::log::info!("Starting clone of: {}", args.url);
    // stdout is reserved for the landing config JSON; hints go to stderr
    eprintln!("Note: cloning requires a WebDriver server (e.g. chromedriver).");
    eprintln!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let mut cloner = Cloner::new();
    if let Some(path) = &args.config {
        cloner = match cloner.with_config_file(path) {
            Ok(cloner) => cloner,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(2);
            }
        };
    }
    if let Some(url) = &args.webdriver_url {
        cloner = cloner.with_webdriver_url(url);
    }
    if let Some(concurrency) = args.concurrency {
        cloner = cloner.with_max_concurrent_scrapes(concurrency);
    }

    let pipeline = cloner.build();
    let start_time = std::time::Instant::now();
    let result = pipeline.clone_website(&args.url, args.intent.as_deref()).await;

    if !result.success {
        ::log::error!(
            "Clone failed: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
        std::process::exit(1);
    }

    if let Some(stats) = &result.stats {
        ::log::info!(
            "Clone complete in {:.2}s - {} sections, {} colors, {} fonts",
            start_time.elapsed().as_secs_f64(),
            stats.sections_detected,
            stats.colors_extracted,
            stats.fonts_detected
        );
    }

    let Some(config) = result.config else {
        ::log::error!("Successful result carried no config");
        std::process::exit(1);
    };

    let json = match serde_json::to_string_pretty(&config) {
        Ok(json) => json,
        Err(e) => {
            ::log::error!("Failed to serialize landing config: {}", e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &json) {
                ::log::error!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            ::log::info!("Wrote landing config to {}", path.display());
        }
        None => println!("{json}"),
    }
}
