//! Voxel volumes: a sample buffer together with its placement in world space.

use crate::math::{affine_from_parts, Affine, Matrix, Point, Real, Vector};
use crate::sample::Sample;

/// Error raised when assembling an image from an inconsistent sample buffer.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum VolumeError {
    /// The number of samples does not match the image dimensions.
    #[error("expected {expected} samples for the image dimensions, found {found}")]
    SampleCountMismatch {
        /// The number of voxels implied by the image dimensions.
        expected: usize,
        /// The length of the provided sample buffer.
        found: usize,
    },
}

/// A regular 3D grid of scalar samples.
///
/// Samples are stored with the `i` index varying fastest: the voxel `(i, j, k)`
/// lives at `i + j * nx + k * nx * ny`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(
        try_from = "RawImageData<T>",
        bound(deserialize = "T: Sample + serde::Deserialize<'de>")
    )
)]
pub struct ImageData<T> {
    dims: [usize; 3],
    samples: Vec<T>,
}

// Deserialized images go through `ImageData::new` so the buffer length is checked.
#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawImageData<T> {
    dims: [usize; 3],
    samples: Vec<T>,
}

#[cfg(feature = "serde-serialize")]
impl<T: Sample> TryFrom<RawImageData<T>> for ImageData<T> {
    type Error = VolumeError;

    fn try_from(raw: RawImageData<T>) -> Result<Self, VolumeError> {
        Self::new(raw.dims, raw.samples)
    }
}

impl<T: Sample> ImageData<T> {
    /// Creates an image from its dimensions and sample buffer.
    pub fn new(dims: [usize; 3], samples: Vec<T>) -> Result<Self, VolumeError> {
        let expected = dims[0] * dims[1] * dims[2];

        if samples.len() != expected {
            return Err(VolumeError::SampleCountMismatch {
                expected,
                found: samples.len(),
            });
        }

        Ok(Self { dims, samples })
    }

    /// Creates an image where every voxel is set to `value`.
    pub fn filled(dims: [usize; 3], value: T) -> Self {
        Self {
            dims,
            samples: vec![value; dims[0] * dims[1] * dims[2]],
        }
    }

    /// Creates an image by evaluating `f` at each voxel index.
    pub fn from_fn(dims: [usize; 3], mut f: impl FnMut(usize, usize, usize) -> T) -> Self {
        let mut samples = Vec::with_capacity(dims[0] * dims[1] * dims[2]);

        for k in 0..dims[2] {
            for j in 0..dims[1] {
                for i in 0..dims[0] {
                    samples.push(f(i, j, k));
                }
            }
        }

        Self { dims, samples }
    }

    /// The number of voxels along each index axis.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// The total number of voxels.
    #[inline]
    pub fn num_voxels(&self) -> usize {
        self.samples.len()
    }

    /// The flat sample buffer.
    #[inline]
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// The flat sample buffer, mutably.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }

    /// Consumes the image, returning its sample buffer.
    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    /// The position of the voxel `(i, j, k)` in the flat sample buffer.
    ///
    /// Returns `None` if the index lies outside of the image extent.
    #[inline]
    pub fn linear_index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        if i < self.dims[0] && j < self.dims[1] && k < self.dims[2] {
            Some(i + self.dims[0] * (j + self.dims[1] * k))
        } else {
            None
        }
    }

    /// The sample at the voxel `(i, j, k)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<T> {
        self.linear_index(i, j, k).map(|id| self.samples[id])
    }

    /// Sets the sample at the voxel `(i, j, k)`, returning `false` if out of bounds.
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: T) -> bool {
        match self.linear_index(i, j, k) {
            Some(id) => {
                self.samples[id] = value;
                true
            }
            None => false,
        }
    }
}

/// The placement of a voxel grid in world space.
///
/// This is how medical volumes usually describe their index-to-world mapping:
/// the world position of the first voxel, the distance between voxels along
/// each index axis, and the world direction of each index axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VolumeGeometry {
    /// World position of the centre of the voxel `(0, 0, 0)`.
    pub origin: Point,
    /// Distance between two adjacent voxel centres along each index axis.
    pub spacing: Vector,
    /// Unit world directions of the `i`, `j`, `k` axes, stored as columns.
    pub directions: Matrix,
}

impl Default for VolumeGeometry {
    fn default() -> Self {
        Self {
            origin: Point::origin(),
            spacing: Vector::repeat(1.0),
            directions: Matrix::identity(),
        }
    }
}

impl VolumeGeometry {
    /// The grid-to-world (IJK to world) transform described by this geometry.
    pub fn grid_to_world(&self) -> Affine {
        let linear = self.directions * Matrix::from_diagonal(&self.spacing);
        affine_from_parts(&linear, &self.origin.coords)
    }
}

/// A voxel volume: optional image data and its grid-to-world transform.
///
/// A volume may exist without image data (for example an output slot that
/// has not been computed yet); clipping such a volume is an error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(bound(deserialize = "T: Sample + serde::Deserialize<'de>"))
)]
pub struct Volume<T> {
    image: Option<ImageData<T>>,
    grid_to_world: Affine,
}

impl<T: Sample> Volume<T> {
    /// Creates a volume from its image data and grid-to-world transform.
    pub fn new(image: ImageData<T>, grid_to_world: Affine) -> Self {
        Self {
            image: Some(image),
            grid_to_world,
        }
    }

    /// Creates a volume placed according to `geometry`.
    pub fn with_geometry(image: ImageData<T>, geometry: &VolumeGeometry) -> Self {
        Self::new(image, geometry.grid_to_world())
    }

    /// Creates a volume without any image data.
    pub fn without_image(grid_to_world: Affine) -> Self {
        Self {
            image: None,
            grid_to_world,
        }
    }

    /// The image data of this volume, if any.
    #[inline]
    pub fn image(&self) -> Option<&ImageData<T>> {
        self.image.as_ref()
    }

    /// Replaces the image data of this volume.
    pub fn set_image(&mut self, image: Option<ImageData<T>>) {
        self.image = image;
    }

    /// The transform mapping voxel indices to world coordinates.
    #[inline]
    pub fn grid_to_world(&self) -> &Affine {
        &self.grid_to_world
    }

    /// Sets the transform mapping voxel indices to world coordinates.
    pub fn set_grid_to_world(&mut self, grid_to_world: Affine) {
        self.grid_to_world = grid_to_world;
    }

    /// The world-space position of the centre of the voxel `(i, j, k)`.
    pub fn voxel_center(&self, i: usize, j: usize, k: usize) -> Point {
        self.grid_to_world * Point::new(i as Real, j as Real, k as Real)
    }
}
