// src/main.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use tessel::{build, parse, DemoWidget};
use tessel_layout::{LayoutConfig, Point, Rect, Size};
use tessel_core::widget_ref;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the .json layout description
    #[arg(value_name = "FILE")]
    layout_file: String,

    /// Width of the root rectangle (defaults to the minimal width)
    #[arg(long)]
    width: Option<i32>,

    /// Height of the root rectangle (defaults to the minimal height)
    #[arg(long)]
    height: Option<i32>,

    /// Display scale factor used for default borders
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Fit a window to the layout instead of using --width/--height
    #[arg(long)]
    fit: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the --debug default
    let default_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if !Path::new(&args.layout_file).exists() {
        anyhow::bail!("Layout file not found: {}", args.layout_file);
    }
    if !args.layout_file.ends_with(".json") {
        warn!("File doesn't have .json extension: {}", args.layout_file);
    }
    if args.scale.is_nan() || args.scale <= 0.0 {
        anyhow::bail!("Scale factor must be positive, got {}", args.scale);
    }

    info!("Loading layout file: {}", args.layout_file);
    let text = fs::read_to_string(&args.layout_file)
        .with_context(|| format!("Failed to read {}", args.layout_file))?;
    let node = parse(&text)?;
    let mut scene = build(&node, LayoutConfig::with_scale_factor(args.scale))?;

    let min = scene.root.min_size();
    if args.fit {
        let window = widget_ref(DemoWidget::new("window", Size::ZERO));
        let size = scene.root.fit(&window);
        info!("Fitted window to {}x{}", size.width, size.height);
    } else {
        let size = Size::new(
            args.width.unwrap_or(min.width),
            args.height.unwrap_or(min.height),
        );
        if size.width < min.width || size.height < min.height {
            warn!(
                "Root rectangle {}x{} is smaller than the minimum {}x{}",
                size.width, size.height, min.width, min.height
            );
        }
        scene.root.set_dimension(Rect::from_parts(Point::ZERO, size));
    }

    println!("min {} {}", min.width, min.height);
    for line in scene.report() {
        println!("{line}");
    }
    Ok(())
}
