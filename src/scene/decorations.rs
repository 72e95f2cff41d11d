//! Reference geometry that is not part of any source file.

use std::f32::consts::TAU;

use crate::foundation::core::{Bounds3, Rgba8, Vec3};
use crate::scene::model::Geometry;

/// Scale of the camera-axis arrows, in world units.
pub const CAMERA_AXIS_SCALE: f32 = 0.015;

/// Grid lines per face of the reference grid.
pub const GRID_DIVISIONS: u32 = 10;

pub const GRID_COLOR: Rgba8 = Rgba8::rgb(160, 160, 160);

const ARROW_SHAFT: f32 = 0.75;
const ARROW_TIP_RADIUS: f32 = 0.1;
const ARROW_SEGMENTS: u32 = 12;

/// Red, green and blue arrows along +X, +Y and +Z starting at the origin.
pub fn camera_axis_arrows(scale: f32) -> Vec<Geometry> {
    [
        (Vec3::X, Rgba8::RED),
        (Vec3::Y, Rgba8::GREEN),
        (Vec3::Z, Rgba8::BLUE),
    ]
    .into_iter()
    .flat_map(|(dir, color)| arrow(Vec3::ZERO, dir, scale, color))
    .collect()
}

/// Arrow of length `scale`: a line shaft and a cone head.
pub fn arrow(origin: Vec3, dir: Vec3, scale: f32, color: Rgba8) -> [Geometry; 2] {
    let dir = dir.normalize_or_zero();
    let base = origin + dir * (ARROW_SHAFT * scale);
    let tip = origin + dir * scale;
    let (u, v) = dir.any_orthonormal_pair();
    let r = ARROW_TIP_RADIUS * scale;

    let mut positions = vec![tip];
    positions.extend((0..ARROW_SEGMENTS).map(|i| {
        let t = i as f32 / ARROW_SEGMENTS as f32 * TAU;
        base + (u * t.cos() + v * t.sin()) * r
    }));
    let triangles = (0..ARROW_SEGMENTS)
        .map(|i| [0, 1 + i, 1 + (i + 1) % ARROW_SEGMENTS])
        .collect();

    [
        Geometry::Lines {
            segments: vec![[origin, base]],
            color,
            width_px: 2.0,
        },
        Geometry::Triangles {
            colors: vec![color; positions.len()],
            positions,
            triangles,
        },
    ]
}

/// Grid lines on the three faces of `bounds` that lie farthest from the viewer.
///
/// `view_dir` is the camera's viewing direction; a face is "far" when its outward normal
/// points along it.
pub fn grid_segments(bounds: Bounds3, view_dir: Vec3, divisions: u32) -> Vec<[Vec3; 2]> {
    let divisions = divisions.max(1);
    let (lo, hi) = (bounds.min, bounds.max);
    let mut out = Vec::with_capacity(3 * 2 * (divisions as usize + 1));

    for axis in 0..3 {
        let plane = if view_dir[axis] >= 0.0 { hi[axis] } else { lo[axis] };
        let (a, b) = ((axis + 1) % 3, (axis + 2) % 3);
        for i in 0..=divisions {
            let t = i as f32 / divisions as f32;
            // Lines parallel to axis `b` at stepped positions along `a`, then the transpose.
            for (step, run) in [(a, b), (b, a)] {
                let mut p0 = Vec3::ZERO;
                p0[axis] = plane;
                p0[step] = lo[step] + (hi[step] - lo[step]) * t;
                let mut p1 = p0;
                p0[run] = lo[run];
                p1[run] = hi[run];
                out.push([p0, p1]);
            }
        }
    }
    out
}

/// Reference grid for the current geometry, as a drawable batch.
pub fn grid(bounds: Bounds3, view_dir: Vec3) -> Geometry {
    Geometry::Lines {
        segments: grid_segments(bounds, view_dir, GRID_DIVISIONS),
        color: GRID_COLOR,
        width_px: 1.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/decorations.rs"]
mod tests;
