//! Rasterized inside/outside masks over the index extent of a volume.
//!
//! A [`Stencil`] stores, for each row of voxels `(j, k)`, the sorted and
//! disjoint intervals of `i` indices whose voxel centres lie inside a region.

pub use self::box_stencil::box_stencil;
pub use self::surface_stencil::surface_stencil;

use crate::sample::Sample;
use crate::volume::ImageData;
use smallvec::SmallVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

mod box_stencil;
mod surface_stencil;

/// A half-open interval `[start, end)` of voxel indices along `i`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Span {
    /// The first index inside the interval.
    pub start: usize,
    /// One past the last index inside the interval.
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The number of voxels covered by this span.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Does this span cover no voxel?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Does this span contain the index `i`?
    #[inline]
    pub fn contains(&self, i: usize) -> bool {
        i >= self.start && i < self.end
    }
}

/// The spans of a single row, sorted and disjoint.
pub type StencilRow = SmallVec<[Span; 2]>;

/// Error raised when assembling a stencil from inconsistent rows.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum StencilError {
    /// The number of rows does not match the extent.
    #[error("expected {expected} stencil rows for the extent, found {found}")]
    RowCountMismatch {
        /// The number of rows `ny * nz` implied by the extent.
        expected: usize,
        /// The number of rows provided.
        found: usize,
    },
    /// A row has empty, unsorted, overlapping or out-of-extent spans.
    #[error("the spans of stencil row {0} are not sorted, disjoint and within the extent")]
    InvalidRow(usize),
}

/// An inside/outside classification of every voxel of an image extent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(try_from = "RawStencil"))]
pub struct Stencil {
    dims: [usize; 3],
    // Indexed by `j + k * ny`.
    rows: Vec<StencilRow>,
}

#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawStencil {
    dims: [usize; 3],
    rows: Vec<StencilRow>,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<RawStencil> for Stencil {
    type Error = StencilError;

    fn try_from(raw: RawStencil) -> Result<Self, StencilError> {
        Self::from_rows(raw.dims, raw.rows)
    }
}

impl Stencil {
    /// A stencil where every voxel is outside.
    pub fn empty(dims: [usize; 3]) -> Self {
        Self {
            dims,
            rows: vec![StencilRow::new(); dims[1] * dims[2]],
        }
    }

    /// A stencil where every voxel is inside.
    pub fn full(dims: [usize; 3]) -> Self {
        let mut row = StencilRow::new();
        if dims[0] > 0 {
            row.push(Span::new(0, dims[0]));
        }

        Self {
            dims,
            rows: vec![row; dims[1] * dims[2]],
        }
    }

    /// Builds a stencil by evaluating `row_spans` on each row `(j, k)`.
    ///
    /// The spans returned for a row are clamped to `[0, nx)`, sorted, and
    /// overlapping or touching spans are merged.
    pub fn from_row_fn<F>(dims: [usize; 3], row_spans: F) -> Self
    where
        F: Fn(usize, usize) -> StencilRow + Sync,
    {
        let ny = dims[1];
        let num_rows = dims[1] * dims[2];
        let build_row = |id: usize| normalize_row(row_spans(id % ny, id / ny), dims[0]);

        #[cfg(feature = "parallel")]
        let rows = (0..num_rows).into_par_iter().map(build_row).collect();
        #[cfg(not(feature = "parallel"))]
        let rows = (0..num_rows).map(build_row).collect();

        Self { dims, rows }
    }

    /// Assembles a stencil from already normalized rows, indexed by `j + k * ny`.
    ///
    /// Each row must hold non-empty spans within `[0, nx)`, sorted and
    /// separated by at least one voxel.
    pub fn from_rows(dims: [usize; 3], rows: Vec<StencilRow>) -> Result<Self, StencilError> {
        let expected = dims[1] * dims[2];

        if rows.len() != expected {
            return Err(StencilError::RowCountMismatch {
                expected,
                found: rows.len(),
            });
        }

        for (id, row) in rows.iter().enumerate() {
            let mut min_start = 0;

            for span in row {
                if span.is_empty() || span.start < min_start || span.end > dims[0] {
                    return Err(StencilError::InvalidRow(id));
                }

                min_start = span.end + 1;
            }
        }

        Ok(Self { dims, rows })
    }

    /// The dimensions of the image extent covered by this stencil.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// The inside spans of the row `(j, k)`.
    ///
    /// Returns an empty slice if the row lies outside of the extent.
    pub fn row(&self, j: usize, k: usize) -> &[Span] {
        if j < self.dims[1] && k < self.dims[2] {
            &self.rows[j + k * self.dims[1]]
        } else {
            &[]
        }
    }

    /// Is the voxel `(i, j, k)` inside?
    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        self.row(j, k).iter().any(|span| span.contains(i))
    }

    /// The number of voxels inside.
    pub fn num_inside(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .map(Span::len)
            .sum()
    }

    /// Applies this stencil to an image.
    ///
    /// Voxels inside the stencil keep their value and the others are set to
    /// `background`. If `reverse` is `true`, the roles are swapped: voxels
    /// outside keep their value and the ones inside are set to `background`.
    ///
    /// Returns `None` if the dimensions of `image` differ from the stencil's.
    pub fn apply<T: Sample>(
        &self,
        image: &ImageData<T>,
        reverse: bool,
        background: T,
    ) -> Option<ImageData<T>> {
        if image.dims() != self.dims {
            return None;
        }

        let nx = self.dims[0];
        let mut result = image.clone();

        if nx == 0 {
            return Some(result);
        }

        let fill_row = |(samples, spans): (&mut [T], &StencilRow)| {
            if reverse {
                for span in spans {
                    samples[span.start..span.end].fill(background);
                }
            } else {
                let mut curr = 0;
                for span in spans {
                    samples[curr..span.start].fill(background);
                    curr = span.end;
                }
                samples[curr..].fill(background);
            }
        };

        #[cfg(feature = "parallel")]
        result
            .samples_mut()
            .par_chunks_mut(nx)
            .zip(self.rows.par_iter())
            .for_each(fill_row);
        #[cfg(not(feature = "parallel"))]
        result
            .samples_mut()
            .chunks_mut(nx)
            .zip(self.rows.iter())
            .for_each(fill_row);

        Some(result)
    }
}

fn normalize_row(mut spans: StencilRow, nx: usize) -> StencilRow {
    for span in spans.iter_mut() {
        span.end = span.end.min(nx);
    }
    spans.retain(|span| !span.is_empty());
    spans.sort_unstable_by_key(|span| span.start);

    let mut result = StencilRow::new();
    for span in spans {
        match result.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => result.push(span),
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::{Span, Stencil, StencilError, StencilRow};
    use crate::volume::ImageData;
    use smallvec::smallvec;

    #[test]
    fn rows_are_clamped_sorted_and_merged() {
        let stencil = Stencil::from_row_fn([10, 2, 1], |j, _| {
            if j == 0 {
                smallvec![Span::new(6, 20), Span::new(0, 2), Span::new(2, 4), Span::new(5, 5)]
            } else {
                StencilRow::new()
            }
        });

        assert_eq!(stencil.row(0, 0), &[Span::new(0, 4), Span::new(6, 10)]);
        assert!(stencil.row(1, 0).is_empty());
        assert!(stencil.row(2, 0).is_empty());
        assert_eq!(stencil.num_inside(), 8);
        assert!(stencil.contains(3, 0, 0));
        assert!(!stencil.contains(4, 0, 0));
    }

    #[test]
    fn assembled_rows_are_validated() {
        let rows = vec![
            smallvec![Span::new(0, 2), Span::new(3, 4)],
            StencilRow::new(),
        ];
        let stencil = Stencil::from_rows([4, 2, 1], rows.clone()).unwrap();
        assert_eq!(stencil.num_inside(), 3);

        assert_eq!(
            Stencil::from_rows([4, 3, 1], rows),
            Err(StencilError::RowCountMismatch {
                expected: 3,
                found: 2
            })
        );

        for bad in [
            smallvec![Span::new(0, 5)],
            smallvec![Span::new(2, 2)],
            smallvec![Span::new(0, 2), Span::new(2, 4)],
            smallvec![Span::new(3, 4), Span::new(0, 1)],
        ] {
            assert_eq!(
                Stencil::from_rows([4, 1, 1], vec![bad]),
                Err(StencilError::InvalidRow(0))
            );
        }
    }

    #[test]
    fn apply_and_reverse_are_complementary() {
        let image = ImageData::from_fn([4, 2, 2], |i, j, k| (1 + i + 4 * j + 8 * k) as i16);
        let stencil = Stencil::from_row_fn([4, 2, 2], |j, k| {
            if j == k {
                smallvec![Span::new(1, 3)]
            } else {
                StencilRow::new()
            }
        });

        let kept = stencil.apply(&image, false, -1).unwrap();
        let removed = stencil.apply(&image, true, -1).unwrap();

        for (id, (a, b)) in kept.samples().iter().zip(removed.samples()).enumerate() {
            let original = image.samples()[id];
            assert!((*a == original) != (*b == original));
            assert!(*a == -1 || *b == -1);
        }

        assert_eq!(kept.get(1, 1, 1), Some(14));
        assert_eq!(kept.get(0, 1, 1), Some(-1));
        assert_eq!(removed.get(0, 1, 1), Some(13));
    }

    #[test]
    fn full_and_empty_stencils() {
        let image = ImageData::filled([3, 3, 3], 7u8);

        assert_eq!(Stencil::full([3, 3, 3]).apply(&image, false, 0), Some(image.clone()));
        assert_eq!(Stencil::full([3, 3, 3]).num_inside(), 27);
        assert_eq!(
            Stencil::empty([3, 3, 3]).apply(&image, false, 0),
            Some(ImageData::filled([3, 3, 3], 0u8))
        );
        assert_eq!(Stencil::empty([2, 3, 3]).apply(&image, false, 0), None);
    }
}
