//! Reconstruction of closed clipping surfaces from scattered points.

use crate::math::Point;
use crate::region::SurfaceRegion;
use crate::shape::{TriMesh, TriMeshBuilderError};
use crate::transformation::{self, ConvexHullError};

/// The number of butterfly subdivision passes applied to reconstructed surfaces.
pub const NUM_SUBDIVISIONS: usize = 3;

/// The minimum number of points needed to reconstruct a surface.
pub const MIN_POINTS: usize = 3;

/// A named point, typically a fiducial placed by a user.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LabeledPoint {
    /// The name of the point. Labels are informative only and need not be unique.
    pub label: String,
    /// The position of the point, in world space.
    pub position: Point,
}

impl LabeledPoint {
    /// Creates a new labeled point.
    pub fn new(label: impl Into<String>, position: Point) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }
}

/// An ordered list of labeled points.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointSet {
    points: Vec<LabeledPoint>,
}

impl PointSet {
    /// Creates an empty point set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a point set from positions, labeling them `F-1`, `F-2`, etc.
    pub fn from_positions(positions: &[Point]) -> Self {
        positions
            .iter()
            .enumerate()
            .map(|(i, pt)| LabeledPoint::new(format!("F-{}", i + 1), *pt))
            .collect()
    }

    /// Appends a point.
    pub fn push(&mut self, point: LabeledPoint) {
        self.points.push(point);
    }

    /// The number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is this set empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points, in insertion order.
    #[inline]
    pub fn points(&self) -> &[LabeledPoint] {
        &self.points
    }

    /// The positions of the points, in insertion order.
    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(|p| p.position).collect()
    }
}

impl FromIterator<LabeledPoint> for PointSet {
    fn from_iter<I: IntoIterator<Item = LabeledPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Errors that can occur while reconstructing a surface from points.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Not enough points were given.
    #[error("at least 3 points are needed to reconstruct a surface, got {count}")]
    InsufficientPoints {
        /// The number of points given.
        count: usize,
    },
    /// The points do not span a surface.
    #[error(transparent)]
    Hull(#[from] ConvexHullError),
    /// The reconstructed buffers do not form a valid mesh.
    #[error(transparent)]
    Mesh(#[from] TriMeshBuilderError),
}

/// Reconstructs a smooth closed surface passing through `points`.
///
/// The surface is the boundary of the 3D Delaunay tetrahedralization of the
/// points, that is their convex hull, refined with [`NUM_SUBDIVISIONS`] passes
/// of butterfly subdivision. Points inside the hull do not contribute. If all
/// the points lie on a plane, the result is a flat, closed, two-sided polygon
/// whose sides only share its rim.
pub fn reconstruct_surface(points: &PointSet) -> Result<TriMesh, SurfaceError> {
    if points.len() < MIN_POINTS {
        return Err(SurfaceError::InsufficientPoints {
            count: points.len(),
        });
    }

    let (vertices, indices) = transformation::try_convex_hull(&points.positions())?;
    let num_hull_triangles = indices.len();
    let (vertices, indices) =
        transformation::butterfly_subdivision(&vertices, &indices, NUM_SUBDIVISIONS);

    log::debug!(
        "Reconstructed a surface from {} points: {} hull triangles, {} vertices and {} triangles after subdivision.",
        points.len(),
        num_hull_triangles,
        vertices.len(),
        indices.len()
    );

    Ok(TriMesh::new(vertices, indices)?)
}

/// A clipping surface kept up-to-date with a set of points.
#[derive(Clone, Debug, Default)]
pub struct ClippingSurface {
    mesh: Option<TriMesh>,
}

impl ClippingSurface {
    /// Creates a clipping surface without any mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the surface from `points`.
    ///
    /// Returns `Ok(false)`, leaving the current surface untouched, if there are
    /// fewer than three points. Any other reconstruction failure is returned
    /// as an error, and also leaves the current surface untouched.
    pub fn update_from_points(&mut self, points: &PointSet) -> Result<bool, SurfaceError> {
        match reconstruct_surface(points) {
            Ok(mesh) => {
                self.mesh = Some(mesh);
                Ok(true)
            }
            Err(SurfaceError::InsufficientPoints { count }) => {
                log::warn!(
                    "Cannot update the clipping surface from {} points: at least {} are needed.",
                    count,
                    MIN_POINTS
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// The current mesh, if any.
    pub fn mesh(&self) -> Option<&TriMesh> {
        self.mesh.as_ref()
    }

    /// Removes the current mesh.
    pub fn clear(&mut self) {
        self.mesh = None;
    }

    /// A clipping region bounded by the current mesh, in world space.
    pub fn to_region(&self) -> Option<SurfaceRegion> {
        self.mesh.clone().map(SurfaceRegion::new)
    }
}
