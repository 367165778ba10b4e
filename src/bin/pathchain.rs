use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use pathchain::{
    Canvas, ChainDoc, FollowState, FollowerConfig, Frame, PathChain, PathFollower, Pose,
    SegmentMapper, Stage, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "pathchain", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chain at one point in time as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence (`frame_00000.png`, ...).
    Frames(FramesArgs),
    /// Print one JSON pose per tick to stdout.
    Trace(TraceArgs),
    /// Print the chain document as pretty JSON.
    Chain(ChainArgs),
}

#[derive(Args, Debug)]
struct SimArgs {
    /// Chain document JSON. Defaults to the built-in demo chain.
    #[arg(long)]
    chain: Option<PathBuf>,

    /// Simulation ticks per second.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Seconds per segment (overrides `PATHCHAIN_SEGMENT_SECS`).
    #[arg(long)]
    segment_secs: Option<f64>,

    /// Stop at the end of the chain instead of starting over.
    #[arg(long)]
    no_loop: bool,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Square canvas size in pixels.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..=65535))]
    size: u32,

    /// Theme preset (`light` or `dark`).
    #[arg(long, default_value = "light")]
    theme: String,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    sim: SimArgs,

    #[command(flatten)]
    view: ViewArgs,

    /// Simulated time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    sim: SimArgs,

    #[command(flatten)]
    view: ViewArgs,

    /// Length of the sequence in seconds. Defaults to one pass over the chain.
    #[arg(long)]
    seconds: Option<f64>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Length of the trace in seconds. Defaults to one pass over the chain.
    #[arg(long)]
    seconds: Option<f64>,
}

#[derive(Parser, Debug)]
struct ChainArgs {
    /// Chain document JSON. Defaults to the built-in demo chain.
    #[arg(long)]
    chain: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct TraceLine {
    tick: u64,
    elapsed: f64,
    segment: Option<usize>,
    state: FollowState,
    pose: Pose,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Trace(args) => cmd_trace(args),
        Command::Chain(args) => cmd_chain(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let ticks = tick_count(args.time, args.sim.fps).context("invalid --time")?;
    let dt = tick_delta(args.sim.fps);
    let mut stage = build_stage(&args.sim, &args.view)?;

    for _ in 0..ticks {
        stage.step(dt).context("advance simulation")?;
    }
    let frame = stage.render_frame();
    write_png(&frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let seconds = sequence_seconds(args.seconds, &args.sim)?;
    let count = tick_count(seconds, args.sim.fps).context("invalid --seconds")?;
    let dt = tick_delta(args.sim.fps);
    let mut stage = build_stage(&args.sim, &args.view)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for i in 0..count {
        let frame = stage.render_frame();
        write_png(&frame, &args.out_dir.join(format!("frame_{i:05}.png")))?;
        stage.step(dt).context("advance simulation")?;
    }

    eprintln!("wrote {count} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let seconds = sequence_seconds(args.seconds, &args.sim)?;
    let count = tick_count(seconds, args.sim.fps).context("invalid --seconds")?;
    let dt = tick_delta(args.sim.fps);
    // Pose tracing does not draw; the smallest canvas keeps surface work negligible.
    let mut follower = build_follower(&args.sim, Canvas::square(1), Theme::default())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for tick in 0..=count {
        let line = TraceLine {
            tick,
            elapsed: follower.elapsed(),
            segment: follower.active_segment(),
            state: follower.state(),
            pose: follower.pose(),
        };
        serde_json::to_writer(&mut out, &line).context("serialize trace line")?;
        writeln!(out).context("write trace line")?;
        follower.tick(dt).context("advance simulation")?;
    }
    Ok(())
}

fn cmd_chain(args: ChainArgs) -> anyhow::Result<()> {
    let doc = load_doc(args.chain.as_deref())?;
    doc.validate()?;
    println!("{}", doc.to_json_pretty()?);
    Ok(())
}

fn build_stage(sim: &SimArgs, view: &ViewArgs) -> anyhow::Result<Stage> {
    let theme = Theme::by_name(&view.theme)
        .with_context(|| format!("unknown theme '{}' (expected light or dark)", view.theme))?;
    let canvas = Canvas::square(view.size);
    let follower = build_follower(sim, canvas, theme.clone())?;
    if follower.renderer().is_some_and(|r| r.base().is_blank()) {
        tracing::warn!(size = view.size, "chain draws nothing on this canvas");
    }

    let mut stage = Stage::new(canvas, theme);
    stage.add(Box::new(follower));
    Ok(stage)
}

/// Explicit `--seconds`, or the time one pass over the chain takes.
fn sequence_seconds(seconds: Option<f64>, sim: &SimArgs) -> anyhow::Result<f64> {
    if let Some(seconds) = seconds {
        return Ok(seconds);
    }
    let chain = load_chain(sim.chain.as_deref())?;
    let mapper = SegmentMapper::new(follower_config(sim).segment_duration);
    let seconds = mapper.chain_duration(chain.len());
    tracing::debug!(segments = chain.len(), seconds, "sequence length from chain");
    Ok(seconds)
}

fn follower_config(sim: &SimArgs) -> FollowerConfig {
    let mut config = FollowerConfig::from_env();
    if let Some(secs) = sim.segment_secs {
        config.segment_duration = secs;
    }
    if sim.no_loop {
        config.looping = false;
    }
    config
}

/// A follower that has already consumed its warm-up ticks and sits at time zero.
fn build_follower(sim: &SimArgs, canvas: Canvas, theme: Theme) -> anyhow::Result<PathFollower> {
    let chain = load_chain(sim.chain.as_deref())?;
    let config = follower_config(sim);
    let warmup = config.skip_ticks;

    let mut follower = PathFollower::new(config, canvas, theme);
    follower
        .follow_path(chain)
        .context("prepare path surfaces")?;
    for _ in 0..=warmup {
        follower.tick(Duration::ZERO)?;
    }
    Ok(follower)
}

fn load_doc(path: Option<&Path>) -> anyhow::Result<ChainDoc> {
    Ok(match path {
        Some(path) => ChainDoc::from_path(path)
            .with_context(|| format!("load chain '{}'", path.display()))?,
        None => ChainDoc::demo(),
    })
}

fn load_chain(path: Option<&Path>) -> anyhow::Result<PathChain> {
    Ok(load_doc(path)?.to_chain()?)
}

fn tick_count(seconds: f64, fps: u32) -> anyhow::Result<u64> {
    anyhow::ensure!(
        seconds.is_finite() && seconds >= 0.0,
        "expected a non-negative number of seconds, got {seconds}"
    );
    Ok((seconds * f64::from(fps)).round() as u64)
}

fn tick_delta(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps))
}

fn write_png(frame: &Frame, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
