//! Perspective projection from world space to canvas pixels.

use glam::vec2;

use crate::camera::orbit::CameraPose;
use crate::foundation::core::{Bounds3, Canvas, Mat4, Vec3};

/// Vertical view angle in degrees.
pub const VIEW_ANGLE_DEG: f32 = 30.0;

const DEFAULT_CLIP: ClipRange = ClipRange {
    near: 0.01,
    far: 1000.01,
};

/// Smallest allowed near/far ratio, keeps depth precision sane for deep scenes.
const NEAR_FAR_RATIO: f32 = 1e-3;

/// Near and far clipping distances along the view direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRange {
    pub near: f32,
    pub far: f32,
}

/// A projected vertex: pixel coordinates plus view-space depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Distance in front of the camera along the view direction.
    pub depth: f32,
}

/// Perspective camera bound to one canvas.
#[derive(Clone, Debug)]
pub struct Camera {
    pose: CameraPose,
    canvas: Canvas,
    clip: ClipRange,
    view: Mat4,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(pose: CameraPose, canvas: Canvas) -> Self {
        let mut cam = Self {
            pose,
            canvas,
            clip: DEFAULT_CLIP,
            view: Mat4::IDENTITY,
            view_proj: Mat4::IDENTITY,
        };
        cam.rebuild();
        cam
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn clip(&self) -> ClipRange {
        self.clip
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Unit vector from the camera position toward the focal point.
    pub fn direction(&self) -> Vec3 {
        (self.pose.focal_point - self.pose.position)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }

    /// Fit near/far planes around `bounds` for the current pose.
    ///
    /// The planes bracket every corner of the box; `None` or a box fully behind the camera
    /// restores the default range.
    pub fn reset_clipping_range(&mut self, bounds: Option<Bounds3>) {
        self.clip = bounds
            .and_then(|b| self.fit_clip(b))
            .unwrap_or(DEFAULT_CLIP);
        self.rebuild();
    }

    fn fit_clip(&self, bounds: Bounds3) -> Option<ClipRange> {
        let dir = self.direction();
        let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
        for c in bounds.corners() {
            let d = (c - self.pose.position).dot(dir);
            lo = lo.min(d);
            hi = hi.max(d);
        }
        if hi <= 0.0 {
            return None;
        }
        let far = hi * 1.01 + 1e-3;
        let near = (lo * 0.99).max(far * NEAR_FAR_RATIO);
        Some(ClipRange { near, far })
    }

    /// Project a world point. `None` when it falls outside the clipping range.
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        let px = (vec2(ndc.x, -ndc.y) + 1.0) * 0.5
            * vec2(self.canvas.width as f32, self.canvas.height as f32);
        Some(ScreenPoint {
            x: px.x,
            y: px.y,
            depth: clip.w,
        })
    }

    /// World-space axis expressed in camera space (x right, y up, z toward the viewer).
    pub fn to_view_direction(&self, axis: Vec3) -> Vec3 {
        self.view.transform_vector3(axis)
    }

    fn rebuild(&mut self) {
        let dir = self.direction();
        let up = usable_up(dir, self.pose.view_up);
        self.view = Mat4::look_to_rh(self.pose.position, dir, up);
        let proj = Mat4::perspective_rh(
            VIEW_ANGLE_DEG.to_radians(),
            self.canvas.aspect(),
            self.clip.near,
            self.clip.far,
        );
        self.view_proj = proj * self.view;
    }
}

/// `up` unless it is parallel to the view direction, otherwise the first world axis that is not.
fn usable_up(dir: Vec3, up: Vec3) -> Vec3 {
    if dir.cross(up).length_squared() > 1e-8 {
        return up;
    }
    [Vec3::Z, Vec3::Y, Vec3::X]
        .into_iter()
        .find(|a| dir.cross(*a).length_squared() > 1e-8)
        .unwrap_or(Vec3::Z)
}

#[cfg(test)]
#[path = "../../tests/unit/camera/projection.rs"]
mod tests;
