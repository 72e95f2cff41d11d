use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::whole(30).unwrap(),
    }
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, Rgba8::WHITE).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_straight_and_premul_agree_over_black() {
    let mut premul = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut premul, &[128, 0, 0, 128], true, Rgba8::BLACK).unwrap();
    let mut straight = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut straight, &[255, 0, 0, 128], false, Rgba8::BLACK).unwrap();
    assert_eq!(premul, vec![128, 0, 0, 255]);
    assert_eq!(straight, premul);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0; 4], false, Rgba8::BLACK).is_err());
}

#[test]
fn preflight_rejects_odd_and_empty_sizes() {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_ffmpeg/never.mp4"));
    assert!(matches!(
        sink.preflight(&cfg(641, 480)),
        Err(OrbitError::Validation(_))
    ));
    assert!(matches!(
        sink.preflight(&cfg(0, 480)),
        Err(OrbitError::Validation(_))
    ));
}

#[test]
fn preflight_respects_no_overwrite() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/unit_ffmpeg");
    std::fs::create_dir_all(&dir).unwrap();
    let existing = dir.join("existing.mp4");
    std::fs::write(&existing, b"x").unwrap();

    let mut opts = FfmpegSinkOpts::new(&existing);
    opts.overwrite = false;
    assert!(matches!(
        FfmpegSink::new(opts).preflight(&cfg(2, 2)),
        Err(OrbitError::Validation(_))
    ));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_ffmpeg/never.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: false,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());

    let mut preview = FfplaySink::new("test");
    assert!(preview.push_frame(FrameIndex(0), &frame).is_err());
}

#[test]
fn encodes_small_clip_when_ffmpeg_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target/unit_ffmpeg/clip.mp4");
    let _ = std::fs::remove_file(&out);

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    for i in 0..3u8 {
        let frame = FrameRGBA {
            width: 16,
            height: 16,
            data: [i * 80, 0, 0, 255].repeat(16 * 16),
            premultiplied: false,
        };
        sink.push_frame(FrameIndex(u64::from(i)), &frame).unwrap();
    }
    sink.end().unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}
