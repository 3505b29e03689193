//! Scalar type selection and the crate-wide classification tolerance.

/// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Absolute tolerance for signed-distance classification against a plane.
///
/// A point whose signed distance to a unit-normal plane is within
/// `±PLANE_EPSILON` counts as lying on that plane. The tolerance is in
/// world units and assumes coordinates of roughly unit magnitude; scenes
/// at much larger scales should be scaled down before clipping.
pub const PLANE_EPSILON: Real = 8e-5;
