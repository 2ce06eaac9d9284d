//! Integration tests for the stlform transform engine
//!
//! These exercise the engine through its public API only: zero idempotence,
//! rotation round trips, fixed X→Y→Z order, scaling exactness and the
//! degenerate-axis guard.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use stlform_core::*;

/// A lopsided tetrahedron-like soup away from the origin
fn create_offset_mesh() -> TriangleSoup {
    let a = Point3d::new(3.0, 1.0, 2.0);
    let b = Point3d::new(7.5, 1.5, 2.0);
    let c = Point3d::new(4.0, 6.0, 2.5);
    let d = Point3d::new(5.0, 3.0, 9.0);
    TriangleSoup::from_triangles(vec![[a, b, c], [a, d, b], [b, d, c], [c, d, a]])
}

fn assert_meshes_close(a: &TriangleSoup, b: &TriangleSoup, epsilon: f64) {
    assert_eq!(a.triangle_count(), b.triangle_count());
    for (p, q) in a.vertices().zip(b.vertices()) {
        assert_abs_diff_eq!(*p, *q, epsilon = epsilon);
    }
}

#[test]
fn test_zero_delta_leaves_mesh_untouched() {
    for pivot in [Pivot::Origin, Pivot::Centroid] {
        let mut mesh = create_offset_mesh();
        let original = mesh.clone();
        apply_rigid(&mut mesh, &RigidDelta::default(), pivot).unwrap();
        assert_eq!(mesh, original);
    }
}

#[test]
fn test_rotation_round_trip() {
    for pivot in [Pivot::Origin, Pivot::Centroid] {
        for axis in Axis::ALL {
            let mut mesh = create_offset_mesh();
            let original = mesh.clone();
            rotate(&mut mesh, axis, 37.25, pivot).unwrap();
            rotate(&mut mesh, axis, -37.25, pivot).unwrap();
            assert_meshes_close(&mesh, &original, 1e-9);
        }
    }
}

#[test]
fn test_rotation_order_is_fixed() {
    let p = Point3d::new(1.0, 2.0, 3.0);
    let mut xy = TriangleSoup::from_triangles(vec![[p, p, p]]);
    let mut yz = xy.clone();

    rotate_xyz(&mut xy, EulerDegrees::new(90.0, 90.0, 0.0), Pivot::Origin).unwrap();
    rotate_xyz(&mut yz, EulerDegrees::new(0.0, 90.0, 90.0), Pivot::Origin).unwrap();

    let xy = xy.triangles()[0][0];
    let yz = yz.triangles()[0][0];
    assert_relative_eq!(xy, Point3d::new(2.0, -3.0, -1.0), epsilon = 1e-12);
    assert_relative_eq!(yz, Point3d::new(-2.0, 3.0, -1.0), epsilon = 1e-12);
    assert!((xy - yz).norm() > 1.0);

    // Y before X lands elsewhere again, so the combined call is not commuted
    let mut yx = TriangleSoup::from_triangles(vec![[p, p, p]]);
    rotate(&mut yx, Axis::Y, 90.0, Pivot::Origin).unwrap();
    rotate(&mut yx, Axis::X, 90.0, Pivot::Origin).unwrap();
    assert_relative_eq!(yx.triangles()[0][0], Point3d::new(3.0, 1.0, 2.0), epsilon = 1e-12);
}

#[test]
fn test_combined_rotation_preserves_topology() {
    let mut mesh = create_offset_mesh();
    let before = mesh.clone();
    apply_rigid(
        &mut mesh,
        &RigidDelta::new(EulerDegrees::new(12.0, -48.0, 170.0), Vector3d::new(1.0, 2.0, 3.0)),
        Pivot::Centroid,
    ).unwrap();

    assert_eq!(mesh.triangle_count(), before.triangle_count());
    // Rigid maps keep every edge length of every triangle
    for (t0, t1) in before.triangles().iter().zip(mesh.triangles()) {
        for (i, j) in [(0, 1), (1, 2), (2, 0)] {
            assert_relative_eq!(
                (t0[i] - t0[j]).norm(),
                (t1[i] - t1[j]).norm(),
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn test_uniform_scale_exactness() {
    let mut mesh = create_offset_mesh();
    let original = mesh.clone();
    let length = axis_length(&mesh, Axis::X);
    assert_eq!(length, 4.5);

    scale_uniform(&mut mesh, Axis::X, 18.0).unwrap();

    assert_relative_eq!(axis_length(&mesh, Axis::X), 18.0, epsilon = 1e-12);
    let factor = 18.0 / length;
    for (p, q) in original.vertices().zip(mesh.vertices()) {
        assert_eq!(*q, Point3d::from(p.coords * factor));
    }
}

#[test]
fn test_scaling_is_origin_anchored() {
    let mut uniform = create_offset_mesh();
    let before = centroid(&uniform);
    scale_uniform(&mut uniform, Axis::Z, 14.0).unwrap();
    let after = centroid(&uniform);
    assert_relative_eq!(after, Point3d::from(before.coords * 2.0), epsilon = 1e-12);
    assert!((after - before).norm() > 1.0);

    let mut single = create_offset_mesh();
    scale_axis_absolute(&mut single, Axis::X, 9.0).unwrap();
    let after = centroid(&single);
    assert_relative_eq!(after.x, before.x * 2.0, epsilon = 1e-12);
    assert_eq!(after.y, before.y);
    assert_eq!(after.z, before.z);
}

#[test]
fn test_axis_scale_isolation() {
    let mut mesh = create_offset_mesh();
    let original = mesh.clone();
    scale_axis_absolute(&mut mesh, Axis::Y, 42.0).unwrap();

    assert_relative_eq!(axis_length(&mesh, Axis::Y), 42.0, epsilon = 1e-12);
    for (p, q) in original.vertices().zip(mesh.vertices()) {
        assert_eq!(p.x.to_bits(), q.x.to_bits());
        assert_eq!(p.z.to_bits(), q.z.to_bits());
    }
}

#[test]
fn test_degenerate_axis_guard() {
    let mut mesh = create_offset_mesh();
    for vertex in mesh.vertices_mut() {
        vertex.x = 5.0;
    }
    let flattened = mesh.clone();

    let outcome = scale_uniform(&mut mesh, Axis::X, 100.0).unwrap();
    assert_eq!(outcome, ScaleOutcome::Skipped);
    assert_eq!(mesh, flattened);

    let outcome = scale_axis_absolute(&mut mesh, Axis::X, 100.0).unwrap();
    assert_eq!(outcome, ScaleOutcome::Skipped);
    assert_eq!(mesh, flattened);
}

#[test]
fn test_empty_mesh_transforms_are_noops() {
    let mut mesh = TriangleSoup::new();
    apply_rigid(
        &mut mesh,
        &RigidDelta::new(EulerDegrees::new(10.0, 20.0, 30.0), Vector3d::new(1.0, 1.0, 1.0)),
        Pivot::Centroid,
    ).unwrap();
    assert!(mesh.is_empty());
    assert_eq!(mesh.bounding_box(), BoundingBox::empty());
}

#[test]
fn test_unit_cube_scenario() {
    let mut cube = TriangleSoup::unit_cube();
    rotate(&mut cube, Axis::Z, 90.0, Pivot::Origin).unwrap();

    // (1,0,0) is the second vertex of the -Y face's first triangle
    let moved = cube.triangles()[4][1];
    assert_relative_eq!(moved, Point3d::new(0.0, 1.0, 0.0), epsilon = 1e-12);

    let bbox = cube.bounding_box();
    assert_relative_eq!(bbox.min, Point3d::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(bbox.max, Point3d::new(0.0, 1.0, 1.0), epsilon = 1e-12);

    scale_uniform(&mut cube, Axis::X, 10.0).unwrap();
    for axis in Axis::ALL {
        assert_relative_eq!(cube.axis_length(axis), 10.0, epsilon = 1e-9);
    }
    let bbox = cube.bounding_box();
    assert_relative_eq!(bbox.min, Point3d::new(-10.0, 0.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(bbox.max, Point3d::new(0.0, 10.0, 10.0), epsilon = 1e-9);
}
