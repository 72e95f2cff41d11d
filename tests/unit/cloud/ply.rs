use std::io::Cursor;

use super::*;

const COLORED_CLOUD: &str = "ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
property uchar red
property uchar green
property uchar blue
end_header
0 0 0 255 0 0
1 2 3 0 255 0
-1 -2 -3 0 0 255
";

const QUAD_MESH: &str = "ply
format ascii 1.0
element vertex 4
property double x
property double y
property double z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
";

#[test]
fn reads_ascii_cloud_with_colors() {
    let pc = point_cloud_from_reader(&mut Cursor::new(COLORED_CLOUD)).unwrap();
    assert_eq!(pc.len(), 3);
    assert_eq!(pc.positions()[1], Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(pc.colors()[0], Rgba8::rgb(255, 0, 0));
    assert_eq!(pc.colors()[2], Rgba8::rgb(0, 0, 255));
    assert_eq!(pc.center(), Vec3::ZERO);
}

#[test]
fn uncolored_vertices_fall_back_to_default_color() {
    let src = "ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
end_header
5 6 7
";
    let pc = point_cloud_from_reader(&mut Cursor::new(src)).unwrap();
    assert_eq!(pc.colors(), &[DEFAULT_VERTEX_COLOR]);
}

#[test]
fn reads_binary_little_endian_cloud() {
    let mut src = b"ply
format binary_little_endian 1.0
element vertex 2
property float x
property float y
property float z
property uchar red
property uchar green
property uchar blue
end_header
"
    .to_vec();
    let vertices = [
        ([1.0f32, 2.0, 3.0], [10u8, 20, 30]),
        ([-1.0, -2.0, -3.0], [40, 50, 60]),
    ];
    for (pos, rgb) in vertices {
        for c in pos {
            src.extend_from_slice(&c.to_le_bytes());
        }
        src.extend_from_slice(&rgb);
    }

    let pc = point_cloud_from_reader(&mut Cursor::new(src)).unwrap();
    assert_eq!(
        pc.positions(),
        &[Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, -2.0, -3.0)]
    );
    assert_eq!(pc.colors(), &[Rgba8::rgb(10, 20, 30), Rgba8::rgb(40, 50, 60)]);
}

#[test]
fn float_color_channels_map_unit_range_to_bytes() {
    let src = "ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
property float red
property float green
property float blue
end_header
0 0 0 1.0 0.5 0.0
1 1 1 2.0 -0.5 0.25
";
    let pc = point_cloud_from_reader(&mut Cursor::new(src)).unwrap();
    assert_eq!(pc.colors()[0], Rgba8::rgb(255, 128, 0));
    assert_eq!(pc.colors()[1], Rgba8::rgb(255, 0, 64));
}

#[test]
fn quad_face_is_fan_triangulated() {
    let mesh = mesh_from_reader(&mut Cursor::new(QUAD_MESH)).unwrap();
    assert_eq!(mesh.positions().len(), 4);
    assert_eq!(mesh.triangles(), &[[0, 1, 2], [0, 2, 3]]);
}

#[test]
fn face_index_out_of_range_is_rejected() {
    let src = QUAD_MESH.replace("4 0 1 2 3", "3 0 1 9");
    assert!(mesh_from_reader(&mut Cursor::new(src)).is_err());
}

#[test]
fn missing_coordinate_is_a_load_error() {
    let src = "ply
format ascii 1.0
element vertex 1
property float x
property float y
end_header
1 2
";
    let err = point_cloud_from_reader(&mut Cursor::new(src)).unwrap_err();
    assert!(matches!(err, OrbitError::Load(_)), "{err}");
}

#[test]
fn missing_file_propagates() {
    assert!(read_point_cloud(Path::new("target/does-not-exist/none.ply")).is_err());
    assert!(read_mesh(Path::new("target/does-not-exist/model.ply")).is_err());
}
