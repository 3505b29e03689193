//! Solid constructors.

use crate::csg::Csg;
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::polygon::Polygon;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Csg<S> {
    /// An axis-aligned cube of half-extent `radius` centered at `center`.
    pub fn cube(center: Point3<Real>, radius: Real, metadata: Option<S>) -> Self {
        Self::cuboid(center, Vector3::new(radius, radius, radius), metadata)
    }

    /// An axis-aligned box with the given half-extents, centered at
    /// `center`. Faces are wound counter-clockwise seen from outside, so
    /// every normal points outward.
    pub fn cuboid(center: Point3<Real>, half: Vector3<Real>, metadata: Option<S>) -> Self {
        let mins = center - half;
        let maxs = center + half;

        // The eight corners, named by which bound each axis takes.
        let p000 = Point3::new(mins.x, mins.y, mins.z);
        let p100 = Point3::new(maxs.x, mins.y, mins.z);
        let p110 = Point3::new(maxs.x, maxs.y, mins.z);
        let p010 = Point3::new(mins.x, maxs.y, mins.z);
        let p001 = Point3::new(mins.x, mins.y, maxs.z);
        let p101 = Point3::new(maxs.x, mins.y, maxs.z);
        let p111 = Point3::new(maxs.x, maxs.y, maxs.z);
        let p011 = Point3::new(mins.x, maxs.y, maxs.z);

        let faces = [
            // Bottom (-Z)
            [p000, p010, p110, p100],
            // Top (+Z)
            [p001, p101, p111, p011],
            // Front (-Y)
            [p000, p100, p101, p001],
            // Back (+Y)
            [p010, p011, p111, p110],
            // Left (-X)
            [p000, p001, p011, p010],
            // Right (+X)
            [p100, p110, p111, p101],
        ];

        Self::from_polygons(
            faces
                .into_iter()
                .map(|corners| Polygon::new(corners.to_vec(), metadata.clone()))
                .collect(),
        )
    }

    /// Build a solid from shared points and per-face index loops.
    ///
    /// This is the one validated entry point: faces must have at least
    /// three vertices, indices must be in range, and coordinates must be
    /// finite. Winding is taken from the index order, as everywhere else.
    pub fn polyhedron(
        points: &[Point3<Real>],
        faces: &[Vec<usize>],
        metadata: Option<S>,
    ) -> Result<Self, ValidationError> {
        for point in points {
            for &coord in point.coords.iter() {
                if !coord.is_finite() {
                    return Err(ValidationError::NotFinite(coord));
                }
            }
        }

        let mut polygons = Vec::with_capacity(faces.len());
        for face in faces {
            if face.len() < 3 {
                return Err(ValidationError::FaceTooSmall(face.len()));
            }
            let vertices = face
                .iter()
                .map(|&index| {
                    points.get(index).copied().ok_or(ValidationError::IndexOutOfRange {
                        index,
                        len: points.len(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            polygons.push(Polygon::new(vertices, metadata.clone()));
        }

        Ok(Self::from_polygons(polygons))
    }
}
