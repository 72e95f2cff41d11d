use crate::foundation::core::{Bounds3, Rgba8, Vec3};
use crate::foundation::error::{OrbitError, OrbitResult};

/// Colored points loaded from one source file.
///
/// `positions` and `colors` are parallel arrays; the constructor enforces equal length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    colors: Vec<Rgba8>,
}

impl PointCloud {
    /// Build a cloud from parallel position/color arrays.
    pub fn new(positions: Vec<Vec3>, colors: Vec<Rgba8>) -> OrbitResult<Self> {
        if positions.len() != colors.len() {
            return Err(OrbitError::validation(format!(
                "point cloud has {} positions but {} colors",
                positions.len(),
                colors.len()
            )));
        }
        Ok(Self { positions, colors })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    /// Multiply every position by `factor` (uniform scale about the origin).
    pub fn scale(&mut self, factor: f32) {
        for p in &mut self.positions {
            *p *= factor;
        }
    }

    /// Axis-aligned bounds, `None` for an empty cloud.
    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_points(&self.positions)
    }

    /// Center of the bounding box. Empty clouds report the origin.
    pub fn center(&self) -> Vec3 {
        self.bounds().map(Bounds3::center).unwrap_or(Vec3::ZERO)
    }

    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Rgba8>) {
        (self.positions, self.colors)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cloud/point_cloud.rs"]
mod tests;
