//! Test support library
//! Provides helper functions shared by the integration tests.

use csgtree::float_types::Real;
use csgtree::polygon::Polygon;
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box<S: Clone>(polygons: &[Polygon<S>]) -> [Real; 6] {
    let mut bb = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        -Real::MAX,
        -Real::MAX,
        -Real::MAX,
    ];
    for poly in polygons {
        for v in &poly.vertices {
            bb[0] = bb[0].min(v.x);
            bb[1] = bb[1].min(v.y);
            bb[2] = bb[2].min(v.z);
            bb[3] = bb[3].max(v.x);
            bb[4] = bb[4].max(v.y);
            bb[5] = bb[5].max(v.z);
        }
    }
    bb
}

/// Coordinates snapped to a fine grid so split points computed along
/// different operation orders compare equal.
pub fn quantize(p: &Point3<Real>) -> [i64; 3] {
    let snap = |v: Real| (v * 1e6).round() as i64;
    [snap(p.x), snap(p.y), snap(p.z)]
}

/// A canonical, order-insensitive form of a polygon set: each vertex loop
/// quantized and rotated to start at its lexicographic minimum (winding
/// preserved), then the set sorted by metadata and vertex list.
pub fn canonical<S: Clone + Ord>(polygons: &[Polygon<S>]) -> Vec<(Option<S>, Vec<[i64; 3]>)> {
    let mut out: Vec<(Option<S>, Vec<[i64; 3]>)> = polygons
        .iter()
        .map(|poly| {
            let mut verts: Vec<[i64; 3]> = poly.vertices.iter().map(quantize).collect();
            if let Some(start) = verts
                .iter()
                .enumerate()
                .min_by_key(|(_, v)| **v)
                .map(|(i, _)| i)
            {
                verts.rotate_left(start);
            }
            (poly.metadata.clone(), verts)
        })
        .collect();
    out.sort();
    out
}

/// The same polygon wound the other way.
pub fn reversed<S: Clone>(polygon: &Polygon<S>) -> Polygon<S> {
    let mut vertices = polygon.vertices.clone();
    vertices.reverse();
    Polygon::new(vertices, polygon.metadata.clone())
}
