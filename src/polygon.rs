//! The public boundary polygon type.

use crate::float_types::Real;
use crate::plane::Plane;
use nalgebra::Point3;

/// A convex planar polygon on a solid's boundary.
///
/// The winding of `vertices` implies the orientation: the outward normal
/// is the right-hand-rule normal of the first three vertices. Polygons
/// are taken at face value; planarity and convexity are the caller's
/// responsibility, and a polygon with fewer than three vertices is
/// silently ignored when it enters a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Point3<Real>>,
    /// Generic per-polygon tag (color, material id, brush id, ...),
    /// carried through splits and boolean operations untouched.
    pub metadata: Option<S>,
}

impl<S: Clone> Polygon<S> {
    pub const fn new(vertices: Vec<Point3<Real>>, metadata: Option<S>) -> Self {
        Polygon { vertices, metadata }
    }

    /// The plane spanned by the first three vertices.
    pub fn plane(&self) -> Plane {
        Plane::from_points(&self.vertices[0], &self.vertices[1], &self.vertices[2])
    }
}
