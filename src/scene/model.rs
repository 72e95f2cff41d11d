use crate::cloud::mesh::Mesh;
use crate::cloud::point_cloud::PointCloud;
use crate::foundation::core::{Bounds3, Rgba8, Vec3};

/// Point size used for point clouds, in pixels.
pub const DEFAULT_POINT_SIZE_PX: f32 = 2.0;

/// One drawable batch in world space.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Screen-aligned square splats.
    Points {
        positions: Vec<Vec3>,
        colors: Vec<Rgba8>,
        size_px: f32,
    },
    /// Constant-width line segments.
    Lines {
        segments: Vec<[Vec3; 2]>,
        color: Rgba8,
        width_px: f32,
    },
    /// Indexed triangles; each face takes the mean of its vertex colors.
    Triangles {
        positions: Vec<Vec3>,
        colors: Vec<Rgba8>,
        triangles: Vec<[u32; 3]>,
    },
}

impl Geometry {
    pub fn bounds(&self) -> Option<Bounds3> {
        match self {
            Self::Points { positions, .. } | Self::Triangles { positions, .. } => {
                Bounds3::from_points(positions)
            }
            Self::Lines { segments, .. } => {
                let flat: Vec<Vec3> = segments.iter().flatten().copied().collect();
                Bounds3::from_points(&flat)
            }
        }
    }

    /// Number of primitives (points, segments or triangles).
    pub fn primitive_count(&self) -> usize {
        match self {
            Self::Points { positions, .. } => positions.len(),
            Self::Lines { segments, .. } => segments.len(),
            Self::Triangles { triangles, .. } => triangles.len(),
        }
    }
}

/// The render scene: a persistent decoration layer plus per-source geometry.
///
/// [`Scene::clear_geometry`] only empties the per-source layer. Decorations (camera-axis
/// arrows, reference grid, world-axes triad) are set up once and appear in every frame.
#[derive(Clone, Debug)]
pub struct Scene {
    background: Rgba8,
    decorations: Vec<Geometry>,
    geometry: Vec<Geometry>,
    grid: bool,
    world_axes: bool,
}

impl Scene {
    pub fn new(background: Rgba8) -> Self {
        Self {
            background,
            decorations: Vec::new(),
            geometry: Vec::new(),
            grid: false,
            world_axes: false,
        }
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Add to the persistent layer.
    pub fn add_decoration(&mut self, g: Geometry) {
        self.decorations.push(g);
    }

    /// Add to the per-source layer.
    pub fn add(&mut self, g: Geometry) {
        self.geometry.push(g);
    }

    pub fn add_point_cloud(&mut self, cloud: PointCloud, size_px: f32) {
        let (positions, colors) = cloud.into_parts();
        self.add(Geometry::Points {
            positions,
            colors,
            size_px,
        });
    }

    /// Faceless meshes are drawn as points.
    pub fn add_mesh(&mut self, mesh: Mesh) {
        let has_faces = mesh.has_faces();
        let (positions, colors, triangles) = mesh.into_parts();
        if has_faces {
            self.add(Geometry::Triangles {
                positions,
                colors,
                triangles,
            });
        } else {
            self.add(Geometry::Points {
                positions,
                colors,
                size_px: DEFAULT_POINT_SIZE_PX,
            });
        }
    }

    /// Drop every per-source batch; decorations stay.
    pub fn clear_geometry(&mut self) {
        self.geometry.clear();
    }

    pub fn geometry(&self) -> &[Geometry] {
        &self.geometry
    }

    pub fn decorations(&self) -> &[Geometry] {
        &self.decorations
    }

    pub fn set_grid(&mut self, on: bool) {
        self.grid = on;
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    pub fn set_world_axes(&mut self, on: bool) {
        self.world_axes = on;
    }

    pub fn world_axes(&self) -> bool {
        self.world_axes
    }

    /// Bounds of the per-source layer only.
    pub fn geometry_bounds(&self) -> Option<Bounds3> {
        self.geometry
            .iter()
            .fold(None, |acc, g| Bounds3::merge(acc, g.bounds()))
    }

    /// Bounds of everything drawn in world space.
    pub fn bounds(&self) -> Option<Bounds3> {
        self.decorations
            .iter()
            .fold(self.geometry_bounds(), |acc, g| Bounds3::merge(acc, g.bounds()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
