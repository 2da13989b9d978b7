use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "boxoffice", version, about = "Render movie revenue data as a treemap")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart to an SVG, HTML or PNG file (picked by extension).
    Render(RenderArgs),
    /// Print the laid-out tiles as JSON.
    Inspect(ChartArgs),
    /// Print the tooltip shown with the pointer at a position, as JSON.
    Hover(HoverArgs),
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Dataset URL or file path (defaults to the published movie dataset).
    #[arg(long)]
    source: Option<String>,

    /// Chart config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tiling method.
    #[arg(long, value_enum)]
    tile: Option<TileChoice>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    chart: ChartArgs,

    /// Output path (.svg, .html or .png).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct HoverArgs {
    #[command(flatten)]
    chart: ChartArgs,

    /// Pointer x in page pixels.
    #[arg(long, allow_hyphen_values = true)]
    x: f64,

    /// Pointer y in page pixels.
    #[arg(long, allow_hyphen_values = true)]
    y: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TileChoice {
    Squarify,
    Binary,
    Slice,
    Dice,
    SliceDice,
}

impl From<TileChoice> for boxoffice::TileKind {
    fn from(c: TileChoice) -> Self {
        match c {
            TileChoice::Squarify => Self::Squarify,
            TileChoice::Binary => Self::Binary,
            TileChoice::Slice => Self::Slice,
            TileChoice::Dice => Self::Dice,
            TileChoice::SliceDice => Self::SliceDice,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Hover(args) => cmd_hover(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &ChartArgs) -> anyhow::Result<boxoffice::Config> {
    let mut cfg = match &args.config {
        Some(path) => boxoffice::Config::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => boxoffice::Config::default(),
    };
    if let Some(source) = &args.source {
        cfg.source = source.clone();
    }
    if let Some(tile) = args.tile {
        cfg.tile = tile.into();
    }
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    cfg.validate().context("invalid chart config")?;
    Ok(cfg)
}

fn build_chart(args: &ChartArgs) -> anyhow::Result<boxoffice::Chart> {
    let cfg = load_config(args)?;
    let chart =
        boxoffice::run(&cfg).with_context(|| format!("render chart from '{}'", cfg.source))?;
    Ok(chart)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    // Fail on a bad extension before touching the network.
    boxoffice::OutputFormat::from_path(&args.out)?;
    let chart = build_chart(&args.chart)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    chart
        .write(&args.out)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: ChartArgs) -> anyhow::Result<()> {
    let chart = build_chart(&args)?;
    print_json(&chart.inspect())
}

fn cmd_hover(args: HoverArgs) -> anyhow::Result<()> {
    let mut chart = build_chart(&args.chart)?;
    let report = chart.hover(boxoffice::Point::new(args.x, args.y));
    print_json(&report)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("encode JSON")?;
    println!("{s}");
    Ok(())
}

