use std::f64::consts::TAU;

use crate::foundation::core::{Fps, Vec3};
use crate::foundation::error::{OrbitError, OrbitResult};

/// Number of frames rendered per source point cloud.
///
/// Fixed; `fps` and `period_secs` only set the angular step between frames.
pub const FRAMES_PER_SOURCE: u32 = 2;

/// View-up vector shared by every pose on the orbit.
pub const ORBIT_VIEW_UP: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// Circular camera path parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitParams {
    /// Radius of the circle traced in the XY plane.
    pub radius: f32,
    /// Fixed camera Z coordinate.
    pub distance: f32,
    /// Output frame rate.
    pub fps: u32,
    /// Seconds per full rotation.
    pub period_secs: u32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            radius: 10.0,
            distance: -100.0,
            fps: 10,
            period_secs: 4,
        }
    }
}

impl OrbitParams {
    pub fn validate(&self) -> OrbitResult<()> {
        if self.fps == 0 {
            return Err(OrbitError::validation("orbit fps must be > 0"));
        }
        if self.period_secs == 0 {
            return Err(OrbitError::validation("orbit period must be > 0 seconds"));
        }
        if !self.radius.is_finite() || !self.distance.is_finite() {
            return Err(OrbitError::validation(
                "orbit radius and distance must be finite",
            ));
        }
        Ok(())
    }

    /// Angle advanced per frame: `2π / (fps × period)`.
    pub fn angle_step(&self) -> f64 {
        TAU / (f64::from(self.fps) * f64::from(self.period_secs))
    }

    pub fn frame_rate(&self) -> OrbitResult<Fps> {
        Fps::whole(self.fps)
    }
}

/// Camera placement for one rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub focal_point: Vec3,
    pub view_up: Vec3,
}

/// Position on the orbit at `angle` radians: `(r·cos θ, −r·sin θ, d)`.
pub fn orbit_position(radius: f32, distance: f32, angle: f64) -> Vec3 {
    let r = f64::from(radius);
    Vec3::new(
        (r * angle.cos()) as f32,
        (-r * angle.sin()) as f32,
        distance,
    )
}

/// Running state of the orbit: the cumulative angle, carried across every source file.
#[derive(Clone, Debug)]
pub struct OrbitPath {
    params: OrbitParams,
    angle: f64,
}

impl OrbitPath {
    pub fn new(params: OrbitParams) -> OrbitResult<Self> {
        params.validate()?;
        Ok(Self { params, angle: 0.0 })
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    /// Angle at sub-frame 0 of the current source.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Angle of sub-frame `sub` of the current source.
    pub fn subframe_angle(&self, sub: u32) -> f64 {
        self.angle + f64::from(sub) * self.params.angle_step()
    }

    /// Camera pose of sub-frame `sub`, looking at `focal_point`.
    pub fn pose(&self, sub: u32, focal_point: Vec3) -> CameraPose {
        CameraPose {
            position: orbit_position(
                self.params.radius,
                self.params.distance,
                self.subframe_angle(sub),
            ),
            focal_point,
            view_up: ORBIT_VIEW_UP,
        }
    }

    /// Move past the current source: `FRAMES_PER_SOURCE` steps.
    pub fn advance(&mut self) {
        self.angle += f64::from(FRAMES_PER_SOURCE) * self.params.angle_step();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/orbit.rs"]
mod tests;
