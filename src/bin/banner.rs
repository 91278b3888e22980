//! Banner binary - resolves a banner style and prints the copyable snippet
//!
//! Usage:
//!   cargo run --bin banner                              # medium, default color
//!   cargo run --bin banner -- large "#FACC15"           # custom size and color
//!   cargo run --bin banner -- small "#111827" --copy out.html
//!
//! Unrecognized sizes fall back to medium. With `--copy <file>` the snippet is
//! also written through the file clipboard.

use anyhow::{bail, Context, Result};
use landing_site::banner::{
    render_preview, BannerConfig, BannerSize, BannerStyle, CopyLabels, FileClipboard,
    SnippetExporter, DEFAULT_RESET_DELAY,
};
use std::sync::Arc;
use tracing::info;

struct Args {
    config: BannerConfig,
    label: String,
    copy_to: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut positional = Vec::new();
    let mut copy_to = None;
    let mut label = "Featured on Landing".to_string();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--copy" => {
                copy_to = Some(iter.next().context("--copy needs a file path")?.clone());
            }
            "--label" => {
                label = iter.next().context("--label needs a value")?.clone();
            }
            flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
            value => positional.push(value.to_string()),
        }
    }

    let defaults = BannerConfig::default();
    Ok(Args {
        config: BannerConfig {
            size: positional
                .first()
                .map(|s| BannerSize::from_selector(s))
                .unwrap_or(defaults.size),
            color: positional.get(1).cloned().unwrap_or(defaults.color),
        },
        label,
        copy_to,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("landing_site=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let style = BannerStyle::resolve(&args.config);
    println!("size:        {}", args.config.size);
    println!("padding:     {}", style.padding);
    println!("font-size:   {}", style.font_size);
    println!("icon-size:   {}", style.icon_size);
    println!("background:  {}", style.background_color);
    println!("text color:  {}", style.text_color);

    let markup = render_preview(&args.config, &args.label);

    match args.copy_to {
        Some(path) => {
            let mut exporter =
                SnippetExporter::new(Arc::new(FileClipboard::new(&path)), DEFAULT_RESET_DELAY);
            let snippet = exporter
                .copy(&markup, CopyLabels::default())
                .await
                .with_context(|| format!("Failed to copy snippet to {}", path))?;
            println!("\n{}", snippet);
            info!("✓ Snippet written to {}", path);
        }
        None => println!("\n{}", landing_site::banner::export_snippet(&markup)),
    }

    Ok(())
}
