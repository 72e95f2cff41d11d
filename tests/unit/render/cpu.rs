use super::*;
use crate::camera::orbit::CameraPose;

fn camera_on_z(canvas: Canvas) -> Camera {
    Camera::new(
        CameraPose {
            position: Vec3::new(0.0, 0.0, -10.0),
            focal_point: Vec3::ZERO,
            view_up: Vec3::new(0.0, -1.0, 0.0),
        },
        canvas,
    )
}

fn big_triangle(z: f32, color: Rgba8) -> Geometry {
    Geometry::Triangles {
        positions: vec![
            Vec3::new(-5.0, -5.0, z),
            Vec3::new(5.0, -5.0, z),
            Vec3::new(0.0, 5.0, z),
        ],
        colors: vec![color; 3],
        triangles: vec![[0, 1, 2]],
    }
}

fn non_white(frame: &FrameRGBA) -> usize {
    frame
        .data
        .chunks_exact(4)
        .filter(|px| px[..3] != [255, 255, 255])
        .count()
}

#[test]
fn rejects_zero_canvas() {
    assert!(CpuRasterizer::new(Canvas::new(0, 10)).is_err());
}

#[test]
fn empty_scene_is_background() {
    let canvas = Canvas::new(32, 24);
    let mut r = CpuRasterizer::new(canvas).unwrap();
    let frame = r
        .render(&Scene::new(Rgba8::WHITE), &camera_on_z(canvas))
        .unwrap();
    assert_eq!(frame.width, 32);
    assert_eq!(frame.height, 24);
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 32 * 24 * 4);
    assert_eq!(non_white(&frame), 0);
}

#[test]
fn point_at_focal_lands_in_center() {
    let canvas = Canvas::new(64, 48);
    let mut scene = Scene::new(Rgba8::WHITE);
    scene.add(Geometry::Points {
        positions: vec![Vec3::ZERO],
        colors: vec![Rgba8::RED],
        size_px: 4.0,
    });
    let mut r = CpuRasterizer::new(canvas).unwrap();
    let frame = r.render(&scene, &camera_on_z(canvas)).unwrap();
    assert_eq!(frame.pixel(32, 24), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn nearer_triangle_covers_farther_one() {
    let canvas = Canvas::new(64, 48);
    let mut scene = Scene::new(Rgba8::WHITE);
    // Insert near first: painter ordering must still put it on top.
    scene.add(big_triangle(-2.0, Rgba8::RED));
    scene.add(big_triangle(2.0, Rgba8::BLUE));
    let mut r = CpuRasterizer::new(canvas).unwrap();
    let frame = r.render(&scene, &camera_on_z(canvas)).unwrap();
    assert_eq!(frame.pixel(32, 24), Some([255, 0, 0, 255]));
}

#[test]
fn grid_and_triad_add_ink() {
    let canvas = Canvas::new(200, 200);
    let camera = camera_on_z(canvas);
    let mut scene = Scene::new(Rgba8::WHITE);
    scene.add(Geometry::Points {
        positions: vec![Vec3::splat(-1.0), Vec3::splat(1.0)],
        colors: vec![Rgba8::BLACK; 2],
        size_px: 2.0,
    });
    let mut r = CpuRasterizer::new(canvas).unwrap();
    let plain = non_white(&r.render(&scene, &camera).unwrap());

    scene.set_grid(true);
    let with_grid = non_white(&r.render(&scene, &camera).unwrap());
    assert!(with_grid > plain);

    scene.set_grid(false);
    scene.set_world_axes(true);
    let frame = r.render(&scene, &camera).unwrap();
    let corner_ink = (0..40)
        .flat_map(|x| (160..200).map(move |y| (x, y)))
        .filter(|&(x, y)| frame.pixel(x, y).is_some_and(|px| px[..3] != [255, 255, 255]))
        .count();
    assert!(corner_ink > 0);
}

#[test]
fn segment_quad_has_requested_width() {
    let q = segment_quad(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0).unwrap();
    assert_eq!(q[0], Point::new(0.0, 1.0));
    assert_eq!(q[3], Point::new(0.0, -1.0));
    assert!(segment_quad(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 2.0).is_none());
}
