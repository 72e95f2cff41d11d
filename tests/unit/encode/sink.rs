use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::whole(10).unwrap(),
    }
}

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![v; 8],
        premultiplied: false,
    }
}

struct FailingEnd;

impl FrameSink for FailingEnd {
    fn begin(&mut self, _cfg: SinkConfig) -> OrbitResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> OrbitResult<()> {
        Ok(())
    }

    fn end(&mut self) -> OrbitResult<()> {
        Err(OrbitError::encode("boom"))
    }
}

#[test]
fn in_memory_sink_requires_begin() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &frame(1)).is_err());

    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(2)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg()));
    assert!(sink.ended());
    assert_eq!(sink.frames.len(), 2);
    assert_eq!(sink.frames[1].0, FrameIndex(1));
    assert_eq!(sink.frames[1].1.data[0], 2);
}

#[test]
fn tee_feeds_both_sinks() {
    let mut tee = TeeSink::new(InMemorySink::new(), InMemorySink::new());
    tee.begin(cfg()).unwrap();
    tee.push_frame(FrameIndex(0), &frame(7)).unwrap();
    tee.end().unwrap();

    let (a, b) = tee.into_inner();
    assert_eq!(a.frames, b.frames);
    assert_eq!(a.frames.len(), 1);
    assert!(a.ended() && b.ended());
}

#[test]
fn tee_ends_secondary_when_primary_fails() {
    let mut tee = TeeSink::new(FailingEnd, InMemorySink::new());
    tee.begin(cfg()).unwrap();
    assert!(tee.end().is_err());
    let (_, b) = tee.into_inner();
    assert!(b.ended());
}

#[test]
fn boxed_sink_forwards() {
    let mut sink: Box<dyn FrameSink> = Box::new(InMemorySink::new());
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(3)).unwrap();
    sink.end().unwrap();
}
