use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mirror-page")]
#[command(about = "Clones a reference website into a renderable landing-page config")]
#[command(version)]
pub struct Args {
    /// URL of the reference site to clone
    pub url: String,

    /// Free-text intent passed through to the pipeline
    #[arg(short, long)]
    pub intent: Option<String>,

    /// Write the landing config JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// WebDriver endpoint (overrides the config file)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Maximum concurrent scrapes against the shared browser
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
