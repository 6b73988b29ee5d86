use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vtt_thumbnails::config::AppConfig;
use vtt_thumbnails::paths::{fully_qualified_url, resolve_source};
use vtt_thumbnails::{
    CueFetcher, CueParser, InlineStyleElement, Options, PreloadTracker, SourceFetcher,
    ThumbnailController,
};

#[derive(Parser)]
#[command(name = "vtt-thumbnails")]
#[command(about = "Progress-bar thumbnails from WebVTT sprite cue files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a cue file and print what it contains
    Inspect {
        /// Cue file path or URL
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Page URL relative sources are resolved against
        #[arg(long)]
        page_url: Option<String>,

        /// Export parsed cues to file (supports .json, .toml)
        #[arg(long)]
        export: Option<String>,
    },
    /// Find the thumbnail shown for a pointer position on the progress bar
    Locate {
        /// Cue file path or URL
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Pointer position along the bar, 0.0 to 1.0
        #[arg(long)]
        fraction: f64,

        /// Video duration in seconds
        #[arg(long)]
        duration: f64,

        /// Progress bar width in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Page URL relative sources are resolved against
        #[arg(long)]
        page_url: Option<String>,
    },
    /// Resolve a path against a base URL the way image references are
    Resolve {
        path: String,

        #[arg(long, default_value = "")]
        base: String,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::Inspect {
            source,
            page_url,
            export,
        } => {
            let page_url = page_url.unwrap_or_else(|| config.page.url.clone());
            let url = resolve_source(&source, &page_url);
            let fetcher = SourceFetcher::new(config.fetch.timeout())?;
            let text = fetcher
                .fetch(&url)
                .with_context(|| format!("Failed to load cues from {}", source))?;
            let parsed = CueParser::for_source(&source, &page_url).parse(&text);

            println!("Source: {}", url);
            print!("{}", parsed.summarize());

            if let Some(path) = export {
                let path = Path::new(&path);
                let content = if path.extension().is_some_and(|ext| ext == "toml") {
                    toml::to_string_pretty(&parsed)?
                } else {
                    serde_json::to_string_pretty(&parsed)?
                };
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write export: {}", path.display()))?;
                println!("Exported to: {}", path.display());
            }
        }
        Commands::Locate {
            source,
            fraction,
            duration,
            width,
            page_url,
        } => {
            let page_url = page_url.unwrap_or_else(|| config.page.url.clone());
            let bar_width = width.unwrap_or(config.display.bar_width);
            let mut controller = load_controller(&config, &source, &page_url)?;

            controller.pointer_enter();
            let instruction = controller
                .pointer_move(fraction, bar_width, duration)
                .map(serde_json::to_value)
                .transpose()?;

            let output = match instruction {
                Some(instruction) => json!({
                    "hidden": false,
                    "instruction": instruction,
                    "style": controller.port().styles(),
                }),
                None => json!({ "hidden": true }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Resolve { path, base } => {
            println!("{}", fully_qualified_url(&path, &base));
        }
    }

    Ok(())
}

fn load_controller(
    config: &AppConfig,
    source: &str,
    page_url: &str,
) -> Result<ThumbnailController<InlineStyleElement>> {
    let options = Options {
        src: Some(source.to_string()),
        show_timestamp: config.display.show_timestamp,
        page_url: page_url.to_string(),
    };
    let fetcher = SourceFetcher::new(config.fetch.timeout())?;
    let mut controller = ThumbnailController::new(
        options,
        Arc::new(PreloadTracker::default()),
        InlineStyleElement::new(),
    );
    controller
        .load(&fetcher)
        .with_context(|| format!("Failed to load cues from {}", source))?;
    Ok(controller)
}
