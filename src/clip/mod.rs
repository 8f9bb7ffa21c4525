//! Clipping of voxel volumes by a region.
//!
//! Clipping classifies the centre of every voxel of a volume as inside or
//! outside a [`ClippingRegion`], then writes a fill value to the voxels lying on
//! the excluded side. The input volume is never modified.

pub use self::error::ClipError;
pub use self::params::ClipParameters;

use crate::math::{try_inverse_affine, Affine};
use crate::region::ClippingRegion;
use crate::sample::Sample;
use crate::stencil::{self, Stencil};
use crate::volume::Volume;

mod error;
mod params;

/// Computes the transform mapping voxel indices of a volume with the given
/// grid-to-world transform to the local frame of `region`.
pub fn index_to_local(grid_to_world: &Affine, region: &ClippingRegion) -> Result<Affine, ClipError> {
    if try_inverse_affine(grid_to_world).is_none() {
        return Err(ClipError::InvalidVolumeTransform);
    }

    let world_to_local = region
        .world_to_local()
        .ok_or(ClipError::InvalidRegionTransform)?;

    Ok(world_to_local * grid_to_world)
}

/// Rasterizes `region` over an image extent.
///
/// The voxel `(i, j, k)` is inside the returned stencil if its centre, mapped
/// by `grid_to_world`, lies inside `region`.
pub fn region_stencil(
    region: &ClippingRegion,
    grid_to_world: &Affine,
    dims: [usize; 3],
) -> Result<Stencil, ClipError> {
    let index_to_local = index_to_local(grid_to_world, region)?;

    match region {
        ClippingRegion::Box(region) => {
            if !region.has_valid_extents() {
                return Err(ClipError::InvalidBoxExtents {
                    half_extents: region.half_extents,
                });
            }

            Ok(stencil::box_stencil(
                &region.local_aabb(),
                &index_to_local,
                dims,
            ))
        }
        ClippingRegion::Surface(region) => {
            // Both factors of `index_to_local` are invertible, only round-off
            // can make this fail.
            let local_to_index =
                try_inverse_affine(&index_to_local).ok_or(ClipError::InvalidRegionTransform)?;

            Ok(stencil::surface_stencil(
                &region.mesh,
                &local_to_index,
                dims,
            ))
        }
    }
}

/// Clips a volume by a region.
///
/// Returns a new volume with the same dimensions and grid-to-world transform
/// as `volume`. A voxel keeps its value if it lies inside `region` and
/// `params.keep_inside` is `true`, or if it lies outside and
/// `params.keep_inside` is `false`. Every other voxel is set to
/// `params.fill_value`, converted to the sample type.
///
/// Voxels lying exactly on the boundary of a box region are inside. The
/// clipping surface of a surface region must be closed.
pub fn clip_volume<T: Sample>(
    volume: &Volume<T>,
    region: &ClippingRegion,
    params: &ClipParameters,
) -> Result<Volume<T>, ClipError> {
    let image = volume.image().ok_or(ClipError::MissingVolumeData)?;
    let dims = image.dims();
    let stencil = region_stencil(region, volume.grid_to_world(), dims)?;

    if !T::fill_value_in_range(params.fill_value) {
        log::warn!(
            "The fill value {} is out of range for the sample type and will be saturated.",
            params.fill_value
        );
    }

    let fill = T::from_fill_value(params.fill_value);
    let num_inside = stencil.num_inside();

    log::debug!(
        "Clipping a {}x{}x{} volume: {} of {} voxels inside the region, keep_inside = {}.",
        dims[0],
        dims[1],
        dims[2],
        num_inside,
        image.num_voxels(),
        params.keep_inside
    );

    let clipped = stencil
        .apply(image, !params.keep_inside, fill)
        .ok_or(ClipError::MissingVolumeData)?;

    Ok(Volume::new(clipped, *volume.grid_to_world()))
}
