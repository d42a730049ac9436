//! pic - inspect, crop and search RGBA images
//!
//! Thin front end over pic-core views, pic-ops search and pic-io PNG files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pic_core::Rect;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pic")]
#[command(author, version, about = "Inspect, crop and search RGBA images")]
#[command(long_about = "
Zero-copy sub-image views over PNG files.

Examples:
  pic info shot.png                            # Size and layout
  pic crop shot.png -x 30 -y 30 -w 120 -H 120 -o crop.png
  pic view shot.png -x 30 -y 30 -w 120 -H 120 -o view.png --checked
  pic diff a.png b.png                         # Exact pixel comparison
  pic locate shot.png button.png --all         # Find a sub-image
  RUST_LOG=pic_ops=trace pic locate shot.png button.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Copy a region into a new image
    Crop(CropArgs),

    /// Write a region through a relative view, without an intermediate copy
    View(ViewArgs),

    /// Compare images pixel for pixel
    #[command(visible_alias = "d")]
    Diff(DiffArgs),

    /// Find where one image occurs inside another
    #[command(visible_alias = "find")]
    Locate(LocateArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Region selection shared by crop and view.
#[derive(Args, Clone, Copy)]
struct RegionArgs {
    /// X offset
    #[arg(short)]
    x: u32,

    /// Y offset
    #[arg(short)]
    y: u32,

    /// Width
    #[arg(short)]
    w: u32,

    /// Height
    #[arg(short = 'H')]
    h: u32,
}

impl RegionArgs {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Args)]
struct CropArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    region: RegionArgs,
}

#[derive(Args)]
struct ViewArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    region: RegionArgs,

    /// Reject regions outside the image before writing
    #[arg(long)]
    checked: bool,
}

#[derive(Args)]
struct DiffArgs {
    /// First image
    a: PathBuf,

    /// Second image
    b: PathBuf,
}

#[derive(Args)]
struct LocateArgs {
    /// Image to search in
    haystack: PathBuf,

    /// Image to search for
    needle: PathBuf,

    /// Also test placements touching the right and bottom edges
    #[arg(long)]
    inclusive: bool,

    /// Report every match instead of the first
    #[arg(short, long)]
    all: bool,

    /// Search rows in parallel
    #[arg(short, long)]
    parallel: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Crop(args) => commands::crop::run(args, cli.verbose),
        Commands::View(args) => commands::view::run(args, cli.verbose),
        Commands::Diff(args) => commands::diff::run(args, cli.verbose),
        Commands::Locate(args) => commands::locate::run(args, cli.verbose),
    }
}
