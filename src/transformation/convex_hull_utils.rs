use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// Returns the index of the support point of a list of points.
pub fn support_point_id(direction: &Vector, points: &[Point]) -> Option<usize> {
    let mut argmax = None;
    let mut max = -Real::MAX;

    for (id, pt) in points.iter().enumerate() {
        let dot = direction.dot(&pt.coords);

        if dot > max {
            argmax = Some(id);
            max = dot;
        }
    }

    argmax
}

/// Scale and center the given set of point depending on their AABB.
///
/// Returns the center and the diagonal length used for the normalization. The
/// points are left untouched if the diagonal is zero.
pub fn normalize(coords: &mut [Point]) -> (Point, Real) {
    let aabb = Aabb::from_points(coords.iter());
    let diag = na::distance(&aabb.mins, &aabb.maxs);
    let center = aabb.center();

    if diag > 0.0 {
        for c in coords.iter_mut() {
            *c = (*c + (-center.coords)) / diag;
        }
    }

    (center, diag)
}
