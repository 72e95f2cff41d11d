use super::*;

#[test]
fn default_opts_match_cli_defaults() {
    let opts = RenderOpts::default();
    assert_eq!(opts.canvas, Canvas::new(640, 512));
    assert_eq!(opts.psf, 1.0);
    assert!(opts.overlay.is_none());
    assert!(!opts.grid);
    assert!(opts.world_axes && opts.camera_axes);
    assert_eq!(opts.background, Rgba8::WHITE);
    assert!(opts.validate().is_ok());
}

#[test]
fn validation_rejects_bad_scale_and_size() {
    let zero_scale = RenderOpts {
        psf: 0.0,
        ..RenderOpts::default()
    };
    assert!(zero_scale.validate().is_err());

    let mirrored = RenderOpts {
        psf: -1.0,
        ..RenderOpts::default()
    };
    assert!(mirrored.validate().is_ok());

    let nan_points = RenderOpts {
        point_size_px: f32::NAN,
        ..RenderOpts::default()
    };
    assert!(nan_points.validate().is_err());

    let empty = RenderOpts {
        canvas: Canvas::new(640, 0),
        ..RenderOpts::default()
    };
    assert!(empty.validate().is_err());
}

#[test]
fn decorations_follow_opts() {
    let scene = decorated_scene(&RenderOpts::default());
    assert_eq!(scene.decorations().len(), 6);
    assert!(scene.world_axes());
    assert!(!scene.grid());
    assert!(scene.geometry().is_empty());

    let bare = decorated_scene(&RenderOpts {
        camera_axes: false,
        world_axes: false,
        grid: true,
        ..RenderOpts::default()
    });
    assert!(bare.decorations().is_empty());
    assert!(bare.grid());
}
