mod support;

use csgtree::{csg::Csg, float_types::Real, polygon::Polygon};
use nalgebra::{Point3, Vector3};

use crate::support::canonical;

fn triangle_at(z: Real) -> Polygon<()> {
    Polygon::new(
        vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(0.0, 1.0, z),
        ],
        None,
    )
}

/// A quad on the x=0 plane facing +x.
fn x_plane_quad(extent: Real) -> Polygon<()> {
    Polygon::new(
        vec![
            Point3::new(0.0, -extent, -extent),
            Point3::new(0.0, extent, -extent),
            Point3::new(0.0, extent, extent),
            Point3::new(0.0, -extent, extent),
        ],
        None,
    )
}

/// A quad on the z=0 plane facing +z.
fn z_plane_quad(extent: Real) -> Polygon<()> {
    Polygon::new(
        vec![
            Point3::new(-extent, -extent, 0.0),
            Point3::new(extent, -extent, 0.0),
            Point3::new(extent, extent, 0.0),
            Point3::new(-extent, extent, 0.0),
        ],
        None,
    )
}

#[test]
fn new_and_build() {
    let csg = Csg::from_polygons(vec![triangle_at(0.0)]);
    let root = csg.root.as_deref().expect("one polygon builds a root");
    assert_eq!(root.polygons.len(), 1);
    assert!(root.front.is_none());
    assert!(root.back.is_none());
    assert_eq!(root.plane.normal(), Vector3::z());
}

#[test]
fn coplanar_polygons_share_the_bundle() {
    let mut shifted = triangle_at(0.0);
    for v in &mut shifted.vertices {
        v.x += 5.0;
    }
    let mut reversed = triangle_at(0.0);
    reversed.vertices.reverse();

    // Same plane three times over, one of them facing the other way:
    // everything lands in the root bundle, no children appear.
    let csg = Csg::from_polygons(vec![triangle_at(0.0), shifted, reversed]);
    let root = csg.root.as_deref().unwrap();
    assert_eq!(root.polygons.len(), 3);
    assert!(root.front.is_none());
    assert!(root.back.is_none());
}

#[test]
fn one_sided_polygons_become_children() {
    let csg = Csg::from_polygons(vec![triangle_at(0.0), triangle_at(1.0), triangle_at(-1.0)]);
    let root = csg.root.as_deref().unwrap();
    assert_eq!(root.polygons.len(), 1);
    assert!(root.front.is_some());
    assert!(root.back.is_some());
}

#[test]
fn spanning_insert_splits_and_records_parentage() {
    // The first polygon fixes the root plane at x=0; the second straddles
    // it and must be cut in two, one fragment per subtree.
    let csg = Csg::from_polygons(vec![x_plane_quad(2.0), z_plane_quad(1.0)]);
    let root = csg.root.as_deref().unwrap();

    assert_eq!(root.polygons.len(), 1);
    assert!(root.front.is_some());
    assert!(root.back.is_some());

    // Two inputs plus two fragments.
    assert_eq!(csg.arena.len(), 4);
    assert_eq!(csg.arena[2].parent, Some(1));
    assert_eq!(csg.arena[3].parent, Some(1));
    assert!(csg.arena[1].parent.is_none());
}

#[test]
fn surviving_fragments_coalesce_on_output() {
    let big = z_plane_quad(1.0);
    let csg = Csg::from_polygons(vec![x_plane_quad(2.0), big.clone()]);

    // Both fragments of the split quad are still in the tree, so the
    // output contains the original quad, not the two halves.
    let polygons = csg.to_polygons();
    assert_eq!(polygons.len(), 2);
    assert!(canonical(&polygons).contains(&canonical(&[big])[0]));
}

#[test]
fn coalescence_chains_through_grandparents() {
    // z_plane_quad is cut by x=0, then each half is cut again by y=0.
    // All four grandchildren survive, so the quad comes back out whole.
    let big = z_plane_quad(1.0);
    let y_quad: Polygon<()> = Polygon::new(
        vec![
            Point3::new(-2.0, 0.0, -2.0),
            Point3::new(-2.0, 0.0, 2.0),
            Point3::new(2.0, 0.0, 2.0),
            Point3::new(2.0, 0.0, -2.0),
        ],
        None,
    );
    let csg = Csg::from_polygons(vec![x_plane_quad(2.0), y_quad.clone(), big.clone()]);

    let polygons = csg.to_polygons();
    assert_eq!(polygons.len(), 3);
    let canon = canonical(&polygons);
    assert!(canon.contains(&canonical(&[big])[0]));
    assert!(canon.contains(&canonical(&[y_quad])[0]));
}

#[test]
fn invert_flips_planes_and_keeps_polygons() {
    let mut csg = Csg::from_polygons(vec![triangle_at(0.0)]);
    let original_normal = csg.root.as_deref().unwrap().plane.normal();

    csg.invert();
    let root = csg.root.as_deref().unwrap();
    assert_eq!(root.plane.normal(), -original_normal);
    assert_eq!(root.polygons.len(), 1);
    assert!(csg.arena[0].flipped);
}

#[test]
fn invert_is_involutive() {
    let cube: Csg<u32> = Csg::cube(Point3::origin(), 0.5, Some(3));
    let mut inverted = cube.clone();
    inverted.invert();
    inverted.invert();

    assert_eq!(cube.to_polygons(), inverted.to_polygons());
    assert_eq!(
        cube.root.as_deref().unwrap().plane,
        inverted.root.as_deref().unwrap().plane
    );
}

#[test]
fn invert_reverses_output_winding() {
    let mut csg = Csg::from_polygons(vec![triangle_at(0.0)]);
    csg.invert();
    let polygons = csg.to_polygons();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].plane().normal(), -Vector3::z());
}

#[test]
fn clip_to_enclosing_coplanar_solid_keeps_polygons() {
    let mut small = Csg::from_polygons(vec![triangle_at(0.0)]);
    let big = Csg::from_polygons(vec![z_plane_quad(10.0)]);
    small.clip_to(&big);
    assert_eq!(small.to_polygons().len(), 1);
}

#[test]
fn clip_to_empty_solid_is_identity() {
    let mut csg = Csg::from_polygons(vec![triangle_at(0.0), triangle_at(1.0)]);
    let before = csg.to_polygons();
    csg.clip_to(&Csg::new());
    assert_eq!(csg.to_polygons(), before);
}

#[test]
fn clip_to_removes_interior_parts() {
    // A large sheet through the middle of a cube loses its center.
    let mut sheet = Csg::from_polygons(vec![z_plane_quad(2.0)]);
    let cube: Csg<()> = Csg::cube(Point3::origin(), 0.5, None);
    sheet.clip_to(&cube);

    let polygons = sheet.to_polygons();
    assert!(!polygons.is_empty());
    for polygon in &polygons {
        for v in &polygon.vertices {
            let inside = v.x.abs() < 0.5 - 1e-6 && v.y.abs() < 0.5 - 1e-6;
            assert!(!inside, "vertex {v:?} lies strictly inside the cube");
        }
    }
}
