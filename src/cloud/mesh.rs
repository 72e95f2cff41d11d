use crate::foundation::core::{Bounds3, Rgba8, Vec3};
use crate::foundation::error::{OrbitError, OrbitResult};

/// Static triangle mesh composited into every frame (for example an instrument CAD model).
///
/// A mesh without faces is drawn as a point set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    colors: Vec<Rgba8>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Build a mesh, checking array lengths and that every index addresses a vertex.
    pub fn new(
        positions: Vec<Vec3>,
        colors: Vec<Rgba8>,
        triangles: Vec<[u32; 3]>,
    ) -> OrbitResult<Self> {
        if positions.len() != colors.len() {
            return Err(OrbitError::validation(format!(
                "mesh has {} positions but {} colors",
                positions.len(),
                colors.len()
            )));
        }
        let n = positions.len();
        if let Some(bad) = triangles
            .iter()
            .flatten()
            .find(|&&i| i as usize >= n)
        {
            return Err(OrbitError::validation(format!(
                "mesh face references vertex {bad}, but only {n} vertices exist"
            )));
        }
        Ok(Self {
            positions,
            colors,
            triangles,
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn has_faces(&self) -> bool {
        !self.triangles.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_points(&self.positions)
    }

    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Rgba8>, Vec<[u32; 3]>) {
        (self.positions, self.colors, self.triangles)
    }
}

/// Split a polygon into a triangle fan anchored at its first vertex.
pub(crate) fn fan_triangulate(polygon: &[u32]) -> impl Iterator<Item = [u32; 3]> + '_ {
    let anchor = polygon.first().copied();
    polygon
        .windows(2)
        .skip(1)
        .filter_map(move |w| anchor.map(|a| [a, w[0], w[1]]))
}

#[cfg(test)]
#[path = "../../tests/unit/cloud/mesh.rs"]
mod tests;
