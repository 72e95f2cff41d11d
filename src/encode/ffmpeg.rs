use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, Rgba8};
use crate::foundation::error::{OrbitError, OrbitResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output video path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background used to flatten translucent pixels.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::BLACK,
        }
    }
}

/// A child process fed raw frames over stdin, with its stderr drained on a side thread.
struct PipedChild {
    program: &'static str,
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl PipedChild {
    fn spawn(program: &'static str, mut cmd: Command) -> OrbitResult<Self> {
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        let mut child = cmd.spawn().map_err(|e| {
            OrbitError::encode(format!(
                "failed to spawn {program} (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| OrbitError::encode(format!("failed to open {program} stdin")))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| OrbitError::encode(format!("failed to open {program} stderr")))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        Ok(Self {
            program,
            child,
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
        })
    }

    fn write(&mut self, bytes: &[u8]) -> OrbitResult<()> {
        let program = self.program;
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(OrbitError::encode(format!("{program} input already closed")));
        };
        stdin.write_all(bytes).map_err(|e| {
            OrbitError::encode(format!("failed to write frame to {program} stdin: {e}"))
        })
    }

    /// Close stdin and wait for the process; a non-zero exit becomes an error carrying stderr.
    fn finish(mut self) -> OrbitResult<()> {
        let program = self.program;
        drop(self.stdin.take());
        let status = self.child.wait().map_err(|e| {
            OrbitError::encode(format!("failed to wait for {program} to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| OrbitError::encode(format!("{program} stderr drain thread panicked")))?
                .map_err(|e| OrbitError::encode(format!("{program} stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(OrbitError::encode(format!(
                "{program} exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to stdin (H.264 in MP4).
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    proc: Option<PipedChild>,
    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            proc: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Check everything `begin` would reject before a process is spawned or a file touched.
    pub fn preflight(&self, cfg: &SinkConfig) -> OrbitResult<()> {
        validate_raw_input(cfg)?;
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(OrbitError::validation(format!(
                "video width/height must be even (required for yuv420p mp4 output), got {}x{}",
                cfg.width, cfg.height
            )));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(OrbitError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(OrbitError::encode(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> OrbitResult<()> {
        self.preflight(&cfg)?;
        ensure_parent_dir(&self.opts.out_path)?;

        let mut cmd = Command::new("ffmpeg");
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error"]);
        push_raw_input(&mut cmd, &cfg);
        cmd.args([
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&self.opts.out_path);

        self.proc = Some(PipedChild::spawn("ffmpeg", cmd)?);
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OrbitResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| OrbitError::encode("ffmpeg sink not started"))?;
        check_frame(cfg, self.last_idx, idx, frame, "ffmpeg")?;
        self.last_idx = Some(idx);

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.background,
        )?;
        let proc = self
            .proc
            .as_mut()
            .ok_or_else(|| OrbitError::encode("ffmpeg sink is already finalized"))?;
        proc.write(&self.scratch)
    }

    fn end(&mut self) -> OrbitResult<()> {
        let proc = self
            .proc
            .take()
            .ok_or_else(|| OrbitError::encode("ffmpeg sink not started"))?;
        self.cfg = None;
        proc.finish()
    }
}

/// Live preview: streams frames into a system `ffplay` window.
///
/// `end` blocks until the user closes the window. Closing it early stops the preview but not
/// the run.
pub struct FfplaySink {
    title: String,
    proc: Option<PipedChild>,
    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    closed: bool,
}

impl FfplaySink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            proc: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
            closed: false,
        }
    }
}

impl FrameSink for FfplaySink {
    fn begin(&mut self, cfg: SinkConfig) -> OrbitResult<()> {
        validate_raw_input(&cfg)?;
        if !is_ffplay_on_path() {
            return Err(OrbitError::encode(
                "ffplay is required for the preview window, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffplay");
        // ffplay has no `-r`; the rawvideo demuxer options cover size, format and rate.
        cmd.args(["-loglevel", "error", "-window_title", &self.title])
            .args([
                "-f",
                "rawvideo",
                "-pixel_format",
                "rgba",
                "-video_size",
                &format!("{}x{}", cfg.width, cfg.height),
                "-framerate",
                &format!("{}/{}", cfg.fps.num, cfg.fps.den),
                "-i",
                "pipe:0",
            ]);

        self.proc = Some(PipedChild::spawn("ffplay", cmd)?);
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.closed = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OrbitResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| OrbitError::encode("ffplay sink not started"))?;
        check_frame(cfg, self.last_idx, idx, frame, "ffplay")?;
        self.last_idx = Some(idx);
        if self.closed {
            return Ok(());
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            Rgba8::WHITE,
        )?;
        let proc = self
            .proc
            .as_mut()
            .ok_or_else(|| OrbitError::encode("ffplay sink is already finalized"))?;
        if let Err(e) = proc.write(&self.scratch) {
            tracing::warn!(error = %e, "preview window closed, continuing without it");
            self.closed = true;
        }
        Ok(())
    }

    fn end(&mut self) -> OrbitResult<()> {
        let proc = self
            .proc
            .take()
            .ok_or_else(|| OrbitError::encode("ffplay sink not started"))?;
        self.cfg = None;
        if !self.closed {
            tracing::info!("close the preview window to finish");
        }
        if let Err(e) = proc.finish() {
            tracing::warn!(error = %e, "preview exited abnormally");
        }
        Ok(())
    }
}

fn validate_raw_input(cfg: &SinkConfig) -> OrbitResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(OrbitError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(OrbitError::validation("frame width/height must be non-zero"));
    }
    Ok(())
}

fn check_frame(
    cfg: &SinkConfig,
    last: Option<FrameIndex>,
    idx: FrameIndex,
    frame: &FrameRGBA,
    program: &str,
) -> OrbitResult<()> {
    if let Some(last) = last
        && idx.0 <= last.0
    {
        return Err(OrbitError::encode(format!(
            "{program} sink received out-of-order frame index"
        )));
    }
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(OrbitError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// Raw RGBA8 frames on stdin at `cfg.fps`.
fn push_raw_input(cmd: &mut Command, cfg: &SinkConfig) {
    cmd.args([
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        &format!("{}x{}", cfg.width, cfg.height),
    ]);
    push_input_fps(cmd, cfg.fps);
    cmd.args(["-i", "pipe:0"]);
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // `-r` before `-i` sets the rawvideo input rate.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg: Rgba8,
) -> OrbitResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(OrbitError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }

    let bg_rgb = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255_u16(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255_u16(bg_rgb[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> OrbitResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    responds_to_version("ffmpeg")
}

/// Return `true` when `ffplay` can be invoked from `PATH`.
pub fn is_ffplay_on_path() -> bool {
    responds_to_version("ffplay")
}

fn responds_to_version(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
