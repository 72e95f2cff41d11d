use std::path::PathBuf;

use clap::Parser;
use orbitcast::AssembleOpts;

/// Concatenate every `.png`/`.jpg`/`.jpeg` image in a folder, in name order, into an MP4
/// (requires `ffmpeg` on PATH).
#[derive(Parser, Debug)]
#[command(name = "frames-to-video", version)]
struct Cli {
    /// Folder containing the images.
    image_folder: PathBuf,

    /// Output video path.
    #[arg(short, long)]
    out: PathBuf,

    /// Output frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    overwrite: bool,

    /// Log skipped images.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();

    let opts = AssembleOpts {
        fps: cli.fps,
        overwrite: cli.overwrite,
    };
    let stats = orbitcast::assemble_video(&cli.image_folder, &cli.out, &opts)?;

    println!(
        "wrote {} ({} frames, {} skipped)",
        cli.out.display(),
        stats.frames_written,
        stats.frames_skipped
    );
    Ok(())
}
