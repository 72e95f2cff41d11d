use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Ply, Property};

use crate::cloud::mesh::{Mesh, fan_triangulate};
use crate::cloud::point_cloud::PointCloud;
use crate::foundation::core::{Rgba8, Vec3};
use crate::foundation::error::{OrbitError, OrbitResult};

/// Color used for vertices that carry no color properties.
pub const DEFAULT_VERTEX_COLOR: Rgba8 = Rgba8::GRAY;

const COLOR_KEYS: [[&str; 3]; 3] = [
    ["red", "green", "blue"],
    ["diffuse_red", "diffuse_green", "diffuse_blue"],
    ["r", "g", "b"],
];
const FACE_INDEX_KEYS: [&str; 2] = ["vertex_indices", "vertex_index"];

/// Read a colored point cloud from an ASCII or binary PLY file.
///
/// Only the `vertex` element is used; faces, if present, are ignored.
#[tracing::instrument(level = "debug")]
pub fn read_point_cloud(path: &Path) -> OrbitResult<PointCloud> {
    let ply = open_ply(path)?;
    let (positions, colors) =
        vertices(&ply).map_err(|e| OrbitError::load(format!("{}: {e}", path.display())))?;
    PointCloud::new(positions, colors)
}

/// Read a mesh (vertices plus optional polygon faces) from a PLY file.
#[tracing::instrument(level = "debug")]
pub fn read_mesh(path: &Path) -> OrbitResult<Mesh> {
    let ply = open_ply(path)?;
    mesh_from_ply(&ply).map_err(|e| match e {
        OrbitError::Load(msg) | OrbitError::Validation(msg) => {
            OrbitError::load(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// Parse a point cloud from any reader, for callers that already hold the bytes.
pub fn point_cloud_from_reader<R: Read>(reader: &mut R) -> OrbitResult<PointCloud> {
    let ply = parse_ply(reader)?;
    let (positions, colors) = vertices(&ply)?;
    PointCloud::new(positions, colors)
}

/// Parse a mesh from any reader.
pub fn mesh_from_reader<R: Read>(reader: &mut R) -> OrbitResult<Mesh> {
    let ply = parse_ply(reader)?;
    mesh_from_ply(&ply)
}

fn open_ply(path: &Path) -> OrbitResult<Ply<DefaultElement>> {
    let file = File::open(path).with_context(|| format!("open ply '{}'", path.display()))?;
    let mut reader = BufReader::new(file);
    parse_ply(&mut reader).map_err(|e| match e {
        OrbitError::Load(msg) => OrbitError::load(format!("{}: {msg}", path.display())),
        other => other,
    })
}

fn parse_ply<R: Read>(reader: &mut R) -> OrbitResult<Ply<DefaultElement>> {
    let parser = Parser::<DefaultElement>::new();
    parser
        .read_ply(reader)
        .map_err(|e| OrbitError::load(format!("malformed ply: {e}")))
}

fn mesh_from_ply(ply: &Ply<DefaultElement>) -> OrbitResult<Mesh> {
    let (positions, colors) = vertices(ply)?;
    let mut triangles = Vec::new();
    if let Some(faces) = ply.payload.get("face") {
        for (i, face) in faces.iter().enumerate() {
            let polygon = FACE_INDEX_KEYS
                .iter()
                .find_map(|k| face.get(*k))
                .and_then(list_indices)
                .ok_or_else(|| {
                    OrbitError::load(format!("face {i} has no integer vertex index list"))
                })?;
            triangles.extend(fan_triangulate(&polygon));
        }
    }
    Mesh::new(positions, colors, triangles)
}

fn vertices(ply: &Ply<DefaultElement>) -> OrbitResult<(Vec<Vec3>, Vec<Rgba8>)> {
    let Some(elements) = ply.payload.get("vertex") else {
        return Err(OrbitError::load("ply has no 'vertex' element"));
    };

    let mut positions = Vec::with_capacity(elements.len());
    let mut colors = Vec::with_capacity(elements.len());
    for (i, v) in elements.iter().enumerate() {
        let coord = |key: &str| {
            v.get(key)
                .and_then(scalar_f32)
                .ok_or_else(|| OrbitError::load(format!("vertex {i} is missing scalar '{key}'")))
        };
        positions.push(Vec3::new(coord("x")?, coord("y")?, coord("z")?));
        colors.push(vertex_color(v).unwrap_or(DEFAULT_VERTEX_COLOR));
    }
    Ok((positions, colors))
}

fn vertex_color(v: &DefaultElement) -> Option<Rgba8> {
    COLOR_KEYS.iter().find_map(|[r, g, b]| {
        Some(Rgba8::rgb(
            color_channel(v.get(*r)?)?,
            color_channel(v.get(*g)?)?,
            color_channel(v.get(*b)?)?,
        ))
    })
}

fn scalar_f32(p: &Property) -> Option<f32> {
    Some(match *p {
        Property::Char(v) => f32::from(v),
        Property::UChar(v) => f32::from(v),
        Property::Short(v) => f32::from(v),
        Property::UShort(v) => f32::from(v),
        Property::Int(v) => v as f32,
        Property::UInt(v) => v as f32,
        Property::Float(v) => v,
        Property::Double(v) => v as f32,
        _ => return None,
    })
}

/// Integer channels are taken as 0..=255, float channels as 0.0..=1.0.
fn color_channel(p: &Property) -> Option<u8> {
    let unit = |f: f64| (f.clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(match *p {
        Property::UChar(v) => v,
        Property::Char(v) => v.max(0) as u8,
        Property::Short(v) => v.clamp(0, 255) as u8,
        Property::UShort(v) => v.min(255) as u8,
        Property::Int(v) => v.clamp(0, 255) as u8,
        Property::UInt(v) => v.min(255) as u8,
        Property::Float(v) => unit(f64::from(v)),
        Property::Double(v) => unit(v),
        _ => return None,
    })
}

fn list_indices(p: &Property) -> Option<Vec<u32>> {
    fn conv<T: Copy + TryInto<u32>>(xs: &[T]) -> Option<Vec<u32>> {
        xs.iter().map(|&x| x.try_into().ok()).collect()
    }
    match p {
        Property::ListChar(xs) => conv(xs),
        Property::ListUChar(xs) => conv(xs),
        Property::ListShort(xs) => conv(xs),
        Property::ListUShort(xs) => conv(xs),
        Property::ListInt(xs) => conv(xs),
        Property::ListUInt(xs) => Some(xs.clone()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cloud/ply.rs"]
mod tests;
