//! Constructive solid geometry on [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) trees.
//!
//! Solids are represented by their boundary: a set of convex, planar,
//! consistently wound polygons. [`Csg::union`](csg::Csg::union),
//! [`Csg::difference`](csg::Csg::difference) and
//! [`Csg::intersection`](csg::Csg::intersection) combine two such
//! boundaries and return a new one. All three are built from two
//! primitives on the underlying BSP tree, `clip_to` (remove the parts of
//! one tree's polygons that lie inside another solid) and `invert` (swap
//! solid and empty space).
//!
//! Polygons that get split against a partitioning plane remember the
//! polygon they came from. When both halves of a split survive an
//! operation, [`Csg::to_polygons`](csg::Csg::to_polygons) recombines them
//! into the original, so output meshes do not accumulate seams from
//! planes that ended up not mattering.
//!
//! ```
//! use csgtree::csg::Csg;
//! use nalgebra::Point3;
//!
//! let block: Csg<u32> = Csg::cube(Point3::origin(), 0.5, Some(1));
//! let bite: Csg<u32> = Csg::cube(Point3::new(0.5, 0.5, 0.5), 0.5, Some(2));
//!
//! let notched = block.difference(bite);
//! assert!(!notched.to_polygons().is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod bsp;
pub mod csg;
pub mod errors;
pub mod float_types;
pub mod plane;
pub mod polygon;
pub mod shapes;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");
