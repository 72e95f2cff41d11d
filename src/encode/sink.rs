use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{OrbitError, OrbitResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

/// Sink contract for consuming frames in output order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order between
/// one `begin` and its `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> OrbitResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OrbitResult<()>;
    fn end(&mut self) -> OrbitResult<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn begin(&mut self, cfg: SinkConfig) -> OrbitResult<()> {
        (**self).begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OrbitResult<()> {
        (**self).push_frame(idx, frame)
    }

    fn end(&mut self) -> OrbitResult<()> {
        (**self).end()
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    ended: bool,
    /// Frames in push order.
    pub frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Whether `end` was called after the last `begin`.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> OrbitResult<()> {
        self.cfg = Some(cfg);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OrbitResult<()> {
        if self.cfg.is_none() {
            return Err(OrbitError::encode("in-memory sink not started"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> OrbitResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Fans every call out to two sinks, `primary` first.
pub struct TeeSink<A, B> {
    primary: A,
    secondary: B,
}

impl<A: FrameSink, B: FrameSink> TeeSink<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.primary, self.secondary)
    }
}

impl<A: FrameSink, B: FrameSink> FrameSink for TeeSink<A, B> {
    fn begin(&mut self, cfg: SinkConfig) -> OrbitResult<()> {
        self.primary.begin(cfg)?;
        self.secondary.begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OrbitResult<()> {
        self.primary.push_frame(idx, frame)?;
        self.secondary.push_frame(idx, frame)
    }

    fn end(&mut self) -> OrbitResult<()> {
        // Both sinks get finalized even if the first one fails.
        let first = self.primary.end();
        let second = self.secondary.end();
        first.and(second)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
