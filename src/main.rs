//! msgnet CLI: forum message network → GEXF batch job.

use std::path::PathBuf;

use clap::Parser;
use miette::Result;

use msgnet::config::PipelineConfig;
use msgnet::pipeline;

#[derive(Parser)]
#[command(
    name = "msgnet",
    version,
    about = "Extract a weighted interaction graph from forum CSV dumps"
)]
struct Cli {
    /// Optional TOML file overriding the built-in paths and threshold.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => PipelineConfig::from_toml(&path)?,
        None => PipelineConfig::default(),
    };

    let summary = pipeline::run(&config)?;
    println!("{summary}");
    Ok(())
}
