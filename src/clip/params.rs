use crate::math::Real;

/// Parameters of a clipping operation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
pub struct ClipParameters {
    /// If `true` (the default) the voxels inside the region keep their value
    /// and the voxels outside are filled. If `false`, the voxels inside are
    /// filled instead.
    pub keep_inside: bool,
    /// The value written to the excluded voxels.
    ///
    /// It is rounded and saturated to the range of the sample type of the
    /// clipped volume.
    pub fill_value: Real,
}

impl Default for ClipParameters {
    fn default() -> Self {
        Self {
            keep_inside: true,
            fill_value: 0.0,
        }
    }
}

impl ClipParameters {
    /// Parameters keeping the inside of the region, filling the rest with `fill_value`.
    pub fn keep_inside(fill_value: Real) -> Self {
        Self {
            keep_inside: true,
            fill_value,
        }
    }

    /// Parameters keeping the outside of the region, filling the rest with `fill_value`.
    pub fn keep_outside(fill_value: Real) -> Self {
        Self {
            keep_inside: false,
            fill_value,
        }
    }
}
