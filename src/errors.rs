use crate::float_types::Real;

/// Validation issues raised by the indexed solid constructors.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// A face refers to a vertex index past the end of the point list.
    #[error("Face index {} is out of range (points.len = {})", .index, .len)]
    IndexOutOfRange { index: usize, len: usize },
    /// A face has too few vertices to span a plane.
    #[error("A face needs at least 3 vertices, got {}", .0)]
    FaceTooSmall(usize),
    /// A coordinate is NaN or infinite.
    #[error("Coordinate {} is not finite", .0)]
    NotFinite(Real),
}
