use super::*;

#[test]
fn fan_covers_polygon() {
    let tris: Vec<[u32; 3]> = fan_triangulate(&[0, 1, 2, 3, 4]).collect();
    assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    assert_eq!(fan_triangulate(&[0, 1, 2]).count(), 1);
    assert_eq!(fan_triangulate(&[0, 1]).count(), 0);
    assert_eq!(fan_triangulate(&[]).count(), 0);
}

#[test]
fn rejects_out_of_range_faces() {
    let err = Mesh::new(vec![Vec3::ZERO; 3], vec![Rgba8::GRAY; 3], vec![[0, 1, 3]]);
    assert!(matches!(err, Err(OrbitError::Validation(_))));
}

#[test]
fn faces_are_optional() {
    let mesh = Mesh::new(vec![Vec3::ONE], vec![Rgba8::GRAY], Vec::new()).unwrap();
    assert!(!mesh.has_faces());
    assert_eq!(mesh.bounds().unwrap().min, Vec3::ONE);
}
