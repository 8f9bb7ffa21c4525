//! Clipping regions: the closed volumes a voxel image can be clipped with.

use crate::bounding_volume::Aabb;
use crate::math::{try_inverse_affine, Affine, Point, Vector};
use crate::shape::TriMesh;

/// A closed triangle mesh used as a clipping region.
///
/// The mesh is expected to be closed and free of self-intersections: voxels
/// are classified with an even-odd rule, so holes make the inside/outside
/// classification depend on the row being rasterized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SurfaceRegion {
    /// The mesh bounding the region, in the region's local frame.
    pub mesh: TriMesh,
    /// The placement of the local frame in world space, identity if `None`.
    pub transform: Option<Affine>,
}

impl SurfaceRegion {
    /// A surface region whose local frame coincides with world space.
    pub fn new(mesh: TriMesh) -> Self {
        Self {
            mesh,
            transform: None,
        }
    }

    /// Places this region in world space with the local-to-world `transform`.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// An axis-aligned box used as a clipping region.
///
/// The box is axis-aligned in its local frame; `transform` may rotate,
/// scale or shear it in world space. Points lying exactly on a face are
/// inside.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoxRegion {
    /// The center of the box, in the region's local frame.
    pub center: Point,
    /// The half-extents of the box along each local axis. Must be non-negative.
    pub half_extents: Vector,
    /// The placement of the local frame in world space, identity if `None`.
    pub transform: Option<Affine>,
}

impl BoxRegion {
    /// A box region whose local frame coincides with world space.
    pub fn new(center: Point, half_extents: Vector) -> Self {
        Self {
            center,
            half_extents,
            transform: None,
        }
    }

    /// Places this region in world space with the local-to-world `transform`.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }

    /// The box as an AABB in its local frame.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, self.half_extents)
    }

    /// Are the half-extents finite and non-negative?
    pub fn has_valid_extents(&self) -> bool {
        self.half_extents.iter().all(|e| e.is_finite() && *e >= 0.0)
    }
}

/// The region a volume is clipped with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ClippingRegion {
    /// A region bounded by a closed triangle mesh.
    Surface(SurfaceRegion),
    /// A (possibly transformed) box.
    Box(BoxRegion),
}

impl From<SurfaceRegion> for ClippingRegion {
    fn from(region: SurfaceRegion) -> Self {
        ClippingRegion::Surface(region)
    }
}

impl From<BoxRegion> for ClippingRegion {
    fn from(region: BoxRegion) -> Self {
        ClippingRegion::Box(region)
    }
}

impl ClippingRegion {
    /// The local-to-world transform of this region, if any.
    pub fn transform(&self) -> Option<&Affine> {
        match self {
            ClippingRegion::Surface(s) => s.transform.as_ref(),
            ClippingRegion::Box(b) => b.transform.as_ref(),
        }
    }

    /// The transform mapping world coordinates to the region's local frame.
    ///
    /// Returns `None` if the region transform cannot be inverted.
    pub fn world_to_local(&self) -> Option<Affine> {
        match self.transform() {
            Some(transform) => try_inverse_affine(transform),
            None => Some(Affine::identity()),
        }
    }
}
