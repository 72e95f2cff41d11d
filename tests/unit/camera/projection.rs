use super::*;
use crate::camera::orbit::{ORBIT_VIEW_UP, OrbitParams, OrbitPath};

fn pose_at(position: Vec3, focal_point: Vec3) -> CameraPose {
    CameraPose {
        position,
        focal_point,
        view_up: ORBIT_VIEW_UP,
    }
}

#[test]
fn focal_point_projects_to_canvas_center() {
    let canvas = Canvas::new(640, 512);
    let path = OrbitPath::new(OrbitParams::default()).unwrap();
    let focal = Vec3::new(0.5, -0.25, 3.0);
    let mut cam = Camera::new(path.pose(1, focal), canvas);
    cam.reset_clipping_range(Bounds3::from_points(&[focal]));

    let sp = cam.project(focal).unwrap();
    assert!((sp.x - 320.0).abs() < 1e-2, "{sp:?}");
    assert!((sp.y - 256.0).abs() < 1e-2, "{sp:?}");
    assert!(sp.depth > 0.0);
}

#[test]
fn negative_y_maps_to_the_top_of_the_image() {
    let canvas = Canvas::new(100, 100);
    let mut cam = Camera::new(pose_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO), canvas);
    let pts = [Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
    cam.reset_clipping_range(Bounds3::from_points(&pts));

    let above = cam.project(pts[0]).unwrap();
    let below = cam.project(pts[1]).unwrap();
    assert!(above.y < 50.0 && below.y > 50.0, "{above:?} {below:?}");
}

#[test]
fn clipping_range_brackets_the_bounds() {
    let canvas = Canvas::new(64, 64);
    let mut cam = Camera::new(pose_at(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO), canvas);
    let b = Bounds3::from_points(&[Vec3::splat(-1.0), Vec3::splat(1.0)]);
    cam.reset_clipping_range(b);
    let clip = cam.clip();
    assert!(clip.near < 99.0 && clip.near > 0.0);
    assert!(clip.far > 101.0);

    // Everything behind the camera: fall back to the default range.
    let behind = Bounds3::from_points(&[Vec3::new(0.0, 0.0, -200.0)]);
    cam.reset_clipping_range(behind);
    assert_eq!(cam.clip(), DEFAULT_CLIP);
}

#[test]
fn points_behind_the_camera_are_rejected() {
    let cam = Camera::new(pose_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO), Canvas::new(32, 32));
    assert!(cam.project(Vec3::new(0.0, 0.0, -20.0)).is_none());
}

#[test]
fn degenerate_up_vector_still_projects() {
    let cam = Camera::new(
        pose_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO),
        Canvas::new(32, 32),
    );
    let sp = cam.project(Vec3::ZERO).unwrap();
    assert!(sp.x.is_finite() && sp.y.is_finite());
}
