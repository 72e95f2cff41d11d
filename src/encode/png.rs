use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{OrbitError, OrbitResult};
use crate::render::backend::FrameRGBA;

/// File name of frame `idx` when frames come in groups of `per_group`:
/// `{group:04}_{sub:04}.png`.
pub fn frame_file_name(idx: FrameIndex, per_group: u32) -> String {
    let per_group = u64::from(per_group.max(1));
    format!("{:04}_{:04}.png", idx.0 / per_group, idx.0 % per_group)
}

/// Writes every frame as a PNG into one folder.
///
/// Frames are grouped by source: with `per_group = 2`, frame 5 lands in `0002_0001.png`.
pub struct PngSequenceSink {
    out_dir: PathBuf,
    per_group: u32,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: usize,
}

impl PngSequenceSink {
    pub fn new(out_dir: impl Into<PathBuf>, per_group: u32) -> Self {
        Self {
            out_dir: out_dir.into(),
            per_group,
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Frames written since the last `begin`.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> OrbitResult<()> {
        if self.per_group == 0 {
            return Err(OrbitError::validation("png sink group size must be > 0"));
        }
        std::fs::create_dir_all(&self.out_dir).with_context(|| {
            format!(
                "failed to create output directory '{}'",
                self.out_dir.display()
            )
        })?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OrbitResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| OrbitError::encode("png sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(OrbitError::encode(
                "png sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(OrbitError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last_idx = Some(idx);

        let path = self.out_dir.join(frame_file_name(idx, self.per_group));
        image::save_buffer_with_format(
            &path,
            &frame.to_straight_rgba8(),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "frame written");
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> OrbitResult<()> {
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
