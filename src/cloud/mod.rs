//! Point-cloud and mesh data, plus PLY loading.

pub(crate) mod mesh;
pub(crate) mod ply;
pub(crate) mod point_cloud;
