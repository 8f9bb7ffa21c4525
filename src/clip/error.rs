use crate::math::Vector;

/// Errors that can occur while clipping a volume.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq)]
pub enum ClipError {
    /// The input volume has no image data.
    #[error("the input volume has no image data")]
    MissingVolumeData,
    /// The grid-to-world transform of the volume cannot be inverted.
    #[error("the grid-to-world transform of the volume is not invertible")]
    InvalidVolumeTransform,
    /// The placement transform of the clipping region cannot be inverted.
    #[error("the transform of the clipping region is not invertible")]
    InvalidRegionTransform,
    /// A box region has negative or non-finite half-extents.
    #[error("invalid box half-extents: {half_extents}")]
    InvalidBoxExtents {
        /// The faulty half-extents.
        half_extents: Vector,
    },
}
