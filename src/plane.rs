//! Planes in 3D space and the polygon splitter built on them.

use crate::float_types::{PLANE_EPSILON, Real};
use nalgebra::{Point3, Vector3};

/// Orientation of a point (or of a whole polygon, as the bitwise OR of
/// its vertex orientations) with respect to a plane.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = FRONT | BACK;

/// An oriented plane, the locus `normal · p = w` for a unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    w: Real,
}

/// Outcome of splitting one convex polygon's vertex loop by a plane.
///
/// `Spanning` carries the two fragment loops produced by the split walk.
/// Every vertex classified on the plane appears in both loops, as do the
/// two edge intersection points, so the fragments share their cut edge.
#[derive(Debug, Clone)]
pub enum SplitPoints {
    /// Every vertex lies on the plane.
    Coplanar,
    /// No vertex lies strictly behind the plane.
    Front,
    /// No vertex lies strictly in front of the plane.
    Back,
    /// Vertices on both sides; the loop was cut in two.
    Spanning {
        front: Vec<Point3<Real>>,
        back: Vec<Point3<Real>>,
    },
}

impl Plane {
    /// Build the plane through three points, normal by the right-hand
    /// rule. Collinear points yield a NaN normal; callers that cannot
    /// tolerate that must validate first.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Plane {
            normal,
            w: normal.dot(&a.coords),
        }
    }

    /// Build a plane from a unit normal and its offset along that normal.
    pub const fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane { normal, w }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Reverse which side counts as front.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance of `point` from the plane.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify `point` as [`FRONT`], [`BACK`] or [`COPLANAR`] within the
    /// absolute [`PLANE_EPSILON`] tolerance.
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        if t > PLANE_EPSILON {
            FRONT
        } else if t < -PLANE_EPSILON {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Route a polygon that lies on this plane to [`FRONT`] or [`BACK`]
    /// by its facing: the classifier applied to the other plane's normal.
    /// Same-facing polygons go front, opposite-facing go back.
    pub fn orient_plane(&self, other: &Plane) -> i8 {
        if self.normal.dot(&other.normal) - self.w > 0.0 {
            FRONT
        } else {
            BACK
        }
    }

    /// Split a convex vertex loop by this plane.
    ///
    /// The spanning walk visits each edge once. A vertex not strictly
    /// behind the plane is emitted to the front loop, one not strictly in
    /// front to the back loop (on-plane vertices land in both), and each
    /// strictly straddling edge contributes its intersection point to
    /// both loops.
    pub fn split_points(&self, points: &[Point3<Real>]) -> SplitPoints {
        let types: Vec<i8> = points.iter().map(|p| self.orient_point(p)).collect();

        match types.iter().fold(COPLANAR, |acc, &t| acc | t) {
            COPLANAR => SplitPoints::Coplanar,
            FRONT => SplitPoints::Front,
            BACK => SplitPoints::Back,
            _ => {
                let mut front = Vec::with_capacity(points.len() + 1);
                let mut back = Vec::with_capacity(points.len() + 1);

                for i in 0..points.len() {
                    let j = (i + 1) % points.len();
                    let (ti, tj) = (types[i], types[j]);
                    let (vi, vj) = (points[i], points[j]);

                    if ti != BACK {
                        front.push(vi);
                    }
                    if ti != FRONT {
                        back.push(vi);
                    }
                    if (ti | tj) == SPANNING {
                        // The denominator cannot vanish: the edge strictly
                        // crosses the slab of width 2ε around the plane.
                        let t = (self.w - self.normal.dot(&vi.coords))
                            / self.normal.dot(&(vj - vi));
                        let v = vi + (vj - vi) * t;
                        front.push(v);
                        back.push(v);
                    }
                }

                SplitPoints::Spanning { front, back }
            },
        }
    }
}
