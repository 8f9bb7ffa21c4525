use super::{Span, Stencil, StencilRow};
use crate::bounding_volume::Aabb;
use crate::math::{affine_linear_part, Affine, Point, Real, DIM};
use smallvec::smallvec;

// Voxel centres this close (in index units) to a face are inside.
const INDEX_TOLERANCE: Real = 1.0e-6;

/// Rasterizes a box over the index extent `dims`.
///
/// `index_to_local` maps voxel indices to the frame where the box is the
/// axis-aligned `aabb`. A voxel is inside if its centre lies in the closed
/// box. Since `index_to_local` is affine, the inside voxels of a row form a
/// single interval that is computed analytically.
pub fn box_stencil(aabb: &Aabb, index_to_local: &Affine, dims: [usize; 3]) -> Stencil {
    let linear = affine_linear_part(index_to_local);
    let di = linear.column(0).into_owned();
    let tolerance = INDEX_TOLERANCE * linear.amax();

    Stencil::from_row_fn(dims, |j, k| {
        let a = index_to_local * Point::new(0.0, j as Real, k as Real);
        let mut tmin = -Real::MAX;
        let mut tmax = Real::MAX;

        for c in 0..DIM {
            if di[c] == 0.0 {
                // The row is parallel to this pair of faces.
                if a[c] < aabb.mins[c] - tolerance || a[c] > aabb.maxs[c] + tolerance {
                    return StencilRow::new();
                }
            } else {
                let t1 = (aabb.mins[c] - a[c]) / di[c];
                let t2 = (aabb.maxs[c] - a[c]) / di[c];
                tmin = tmin.max(t1.min(t2));
                tmax = tmax.min(t1.max(t2));
            }
        }

        index_interval(tmin, tmax, dims[0])
            .map(|(start, end)| smallvec![Span::new(start, end)])
            .unwrap_or_default()
    })
}

// The voxel indices `i` in `[0, nx)` with `tmin <= i <= tmax`, as a half-open interval.
pub(super) fn index_interval(tmin: Real, tmax: Real, nx: usize) -> Option<(usize, usize)> {
    if nx == 0 || tmin.is_nan() || tmax.is_nan() || tmin > tmax {
        return None;
    }

    let first = (tmin - INDEX_TOLERANCE).ceil().max(0.0);
    let last = (tmax + INDEX_TOLERANCE).floor().min((nx - 1) as Real);

    if first > last {
        None
    } else {
        Some((first as usize, last as usize + 1))
    }
}
