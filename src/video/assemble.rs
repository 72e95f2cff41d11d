use std::path::{Path, PathBuf};

use crate::assets::decode::decode_image_file;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, Rgba8};
use crate::foundation::error::{OrbitError, OrbitResult};
use crate::foundation::fs::list_files_with_suffix;
use crate::render::backend::FrameRGBA;

/// File name suffixes picked up by the assembler.
pub const IMAGE_SUFFIXES: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Options for [`assemble_video`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssembleOpts {
    /// Output frame rate.
    pub fps: u32,
    /// Replace an existing output file.
    pub overwrite: bool,
}

impl Default for AssembleOpts {
    fn default() -> Self {
        Self {
            fps: 30,
            overwrite: true,
        }
    }
}

impl AssembleOpts {
    pub fn validate(&self) -> OrbitResult<()> {
        if self.fps == 0 {
            return Err(OrbitError::validation("video fps must be > 0"));
        }
        Ok(())
    }
}

/// Counters for one assembler run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssembleStats {
    /// Images appended to the video.
    pub frames_written: u64,
    /// Images that failed to decode or did not match the first image's size.
    pub frames_skipped: u64,
}

/// Image files in `dir`, sorted by name.
pub fn list_images(dir: &Path) -> OrbitResult<Vec<PathBuf>> {
    list_files_with_suffix(dir, &IMAGE_SUFFIXES)
}

/// Stream `files` into `sink` in the given order.
///
/// The first image fixes the frame size and must decode. Later images that fail to decode, or
/// whose size differs, are skipped.
pub fn assemble_frames(
    files: &[PathBuf],
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> OrbitResult<AssembleStats> {
    let Some((head, rest)) = files.split_first() else {
        return Err(OrbitError::validation("no images to assemble"));
    };
    let first = decode_image_file(head)?;
    stream_frames(first, rest, fps, sink)
}

/// Concatenate every image in `input_dir` into the video at `out_path`.
///
/// Fails with [`OrbitError::EmptyInput`] before touching `out_path` when the folder holds no
/// images.
#[tracing::instrument(level = "info", skip(opts), fields(fps = opts.fps))]
pub fn assemble_video(
    input_dir: &Path,
    out_path: &Path,
    opts: &AssembleOpts,
) -> OrbitResult<AssembleStats> {
    opts.validate()?;
    let files = list_images(input_dir)?;
    let Some((head, rest)) = files.split_first() else {
        return Err(OrbitError::empty_input(input_dir));
    };

    let first = decode_image_file(head)?;
    tracing::info!(
        images = files.len(),
        width = first.width,
        height = first.height,
        "assembling video"
    );

    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: out_path.to_path_buf(),
        overwrite: opts.overwrite,
        background: Rgba8::BLACK,
    });
    stream_frames(first, rest, Fps::whole(opts.fps)?, &mut sink)
}

fn stream_frames(
    first: FrameRGBA,
    rest: &[PathBuf],
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> OrbitResult<AssembleStats> {
    let cfg = SinkConfig {
        width: first.width,
        height: first.height,
        fps,
    };
    sink.begin(cfg)?;
    sink.push_frame(FrameIndex(0), &first)?;

    let mut stats = AssembleStats {
        frames_written: 1,
        frames_skipped: 0,
    };
    for path in rest {
        match decode_image_file(path) {
            Ok(frame) if frame.width == cfg.width && frame.height == cfg.height => {
                sink.push_frame(FrameIndex(stats.frames_written), &frame)?;
                stats.frames_written += 1;
            }
            Ok(frame) => {
                tracing::debug!(
                    path = %path.display(),
                    width = frame.width,
                    height = frame.height,
                    "skipping image with mismatched size"
                );
                stats.frames_skipped += 1;
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable image");
                stats.frames_skipped += 1;
            }
        }
    }

    sink.end()?;
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/video/assemble.rs"]
mod tests;
