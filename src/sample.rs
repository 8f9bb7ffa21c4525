//! Scalar types that can be stored in a voxel image.

use crate::math::Real;
use num::{AsPrimitive, Bounded};
use core::fmt::Debug;

/// A scalar type usable as the sample type of an [`ImageData`](crate::volume::ImageData).
///
/// Fill values are always given as a [`Real`] and converted to the sample type
/// with [`Sample::from_fill_value`], so the clipping code never needs to know
/// the bit width of the samples it writes.
pub trait Sample: Copy + PartialEq + Debug + Send + Sync + Bounded + AsPrimitive<Real> {
    /// `true` for integer sample types.
    const IS_INTEGER: bool;

    /// Converts a fill value to this sample type.
    ///
    /// Integer types round to the nearest integer and saturate to their
    /// representable range (NaN becomes zero). Floating-point types cast.
    fn from_fill_value(value: Real) -> Self;

    /// Returns `true` if `value` is representable by this type without saturation.
    fn fill_value_in_range(value: Real) -> bool {
        let min: Real = Self::min_value().as_();
        let max: Real = Self::max_value().as_();
        let value = if Self::IS_INTEGER {
            value.round()
        } else {
            value
        };
        value >= min && value <= max
    }
}

macro_rules! impl_integer_sample(
    ($($t: ty),*) => {$(
        impl Sample for $t {
            const IS_INTEGER: bool = true;

            #[inline]
            fn from_fill_value(value: Real) -> Self {
                // Float-to-int `as` casts saturate and map NaN to zero.
                let rounded: Real = value.round();
                rounded.as_()
            }
        }
    )*}
);

macro_rules! impl_float_sample(
    ($($t: ty),*) => {$(
        impl Sample for $t {
            const IS_INTEGER: bool = false;

            #[inline]
            fn from_fill_value(value: Real) -> Self {
                value.as_()
            }
        }
    )*}
);

impl_integer_sample!(u8, i8, u16, i16, u32, i32, u64, i64);
impl_float_sample!(f32, f64);
