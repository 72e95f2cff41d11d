use std::path::PathBuf;

use clap::Parser;
use orbitcast::{
    Canvas, FRAMES_PER_SOURCE, FfplaySink, FrameSink, OrbitParams, PngSequenceSink, RenderOpts,
    TeeSink,
};

/// Render every `.ply` point cloud in a folder from an orbiting camera into PNG frames.
#[derive(Parser, Debug)]
#[command(name = "orbit-frames", version)]
struct Cli {
    /// Folder containing the `.ply` point clouds.
    ply_folder: PathBuf,

    /// Folder the PNG frames are written to (created if absent).
    #[arg(short, long)]
    output: PathBuf,

    /// Orbit radius.
    #[arg(short, long, default_value_t = 10.0, allow_negative_numbers = true)]
    radius: f32,

    /// Fixed camera Z coordinate.
    #[arg(short, long, default_value_t = -100.0, allow_negative_numbers = true)]
    distance: f32,

    /// Frame rate; with `--period` sets the angular step between frames.
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Seconds per full rotation.
    #[arg(long, default_value_t = 4)]
    period: u32,

    /// Output image size.
    #[arg(
        long,
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        default_values_t = vec![640u32, 512]
    )]
    resolution: Vec<u32>,

    /// Uniform scale applied to every point.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    psf: f32,

    /// Static model (PLY) rendered next to every point cloud.
    #[arg(long)]
    endoscope: Option<PathBuf>,

    /// Show a reference grid behind the geometry.
    #[arg(long)]
    grid: bool,

    /// Also stream frames to a preview window (requires `ffplay` on PATH).
    #[arg(long)]
    display: bool,

    /// Log per-frame details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let &[width, height] = cli.resolution.as_slice() else {
        anyhow::bail!("--resolution takes exactly two values: WIDTH HEIGHT");
    };

    let params = OrbitParams {
        radius: cli.radius,
        distance: cli.distance,
        fps: cli.fps,
        period_secs: cli.period,
    };
    let opts = RenderOpts {
        canvas: Canvas::new(width, height),
        psf: cli.psf,
        overlay: cli.endoscope,
        grid: cli.grid,
        ..RenderOpts::default()
    };

    let pngs = PngSequenceSink::new(&cli.output, FRAMES_PER_SOURCE);
    let mut sink: Box<dyn FrameSink> = if cli.display {
        Box::new(TeeSink::new(pngs, FfplaySink::new("orbit-frames")))
    } else {
        Box::new(pngs)
    };

    let stats = orbitcast::render_orbit(&cli.ply_folder, &params, &opts, sink.as_mut())?;
    tracing::debug!(
        sources = stats.sources,
        frames = stats.frames_written,
        final_angle = stats.final_angle,
        "render finished"
    );
    println!("All frames saved.");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();
}
