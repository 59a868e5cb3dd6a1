use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `uxaudit` - AI-assisted UX/UI and performance audits for websites.
#[derive(Parser, Debug)]
#[command(name = "uxaudit")]
#[command(version)]
#[command(about = "Audit a website's UX/UI and performance with Gemini.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.uxaudit/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full five-section audit with search-grounded citations
    Audit {
        /// Website to audit (http or https)
        #[arg(value_parser = parse_site_url)]
        url: String,

        /// Print the raw report JSON instead of the formatted view
        #[arg(long)]
        json: bool,

        /// Generate a wireframe for every visualizable improvement point
        /// and write them to this directory
        #[arg(long, value_name = "DIR")]
        visualize_dir: Option<PathBuf>,
    },

    /// Describe the site's visual style (colors, typography, layout)
    Style {
        /// Website to analyze (http or https)
        #[arg(value_parser = parse_site_url)]
        url: String,
    },

    /// Generate a wireframe demonstrating one improvement
    Visualize {
        /// Website the improvement applies to (http or https)
        #[arg(value_parser = parse_site_url)]
        url: String,

        /// Improvement point to illustrate
        #[arg(short, long)]
        point: String,

        /// Output image path
        #[arg(short, long, default_value = "visual-example.jpg")]
        output: PathBuf,
    },
}

/// Accept only absolute http(s) URLs with a host.
fn parse_site_url(raw: &str) -> Result<String, String> {
    let parsed = url::Url::parse(raw.trim()).map_err(|e| format!("invalid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}', use http or https", parsed.scheme()));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("URL has no host".into());
    }
    Ok(parsed.to_string())
}
