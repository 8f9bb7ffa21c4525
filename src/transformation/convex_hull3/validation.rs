use super::ConvexHullError;
use crate::math::{Point, Real};
use crate::shape::Triangle;
use crate::utils::hashmap::{Entry, HashMap};

/// Checks if a convex-hull is properly formed.
///
/// The mesh must be a closed, consistently oriented, genus-0 surface and no
/// point may lie in front of any of its triangles.
pub fn check_convex_hull(points: &[Point], triangles: &[[u32; 3]]) -> Result<(), ConvexHullError> {
    let mut edges: HashMap<(u32, u32), ()> = HashMap::default();

    for tri in triangles {
        if tri[0] == tri[1] || tri[0] == tri[2] || tri[1] == tri[2] {
            return Err(ConvexHullError::InternalError("degenerate triangle."));
        }

        for i in 0..3 {
            let edge = (tri[i], tri[(i + 1) % 3]);

            match edges.entry(edge) {
                Entry::Vacant(e) => {
                    let _ = e.insert(());
                }
                Entry::Occupied(_) => {
                    return Err(ConvexHullError::InternalError(
                        "inconsistent orientation or t-junction.",
                    ))
                }
            }
        }
    }

    if edges.keys().any(|(a, b)| !edges.contains_key(&(*b, *a))) {
        return Err(ConvexHullError::InternalError("unfinished triangle."));
    }

    // Check Euler characteristic.
    if points.len() + triangles.len() != edges.len() / 2 + 2 {
        return Err(ConvexHullError::InternalError("the hull is not a sphere."));
    }

    let scale = points
        .iter()
        .map(|pt| pt.coords.amax())
        .fold(1.0, Real::max);

    for tri in triangles {
        let tri = Triangle::new(
            points[tri[0] as usize],
            points[tri[1] as usize],
            points[tri[2] as usize],
        );

        if let Some(n) = tri.normal() {
            if points
                .iter()
                .any(|pt| n.dot(&(pt - tri.a)) > 1.0e-7 * scale)
            {
                return Err(ConvexHullError::InternalError("the hull is not convex."));
            }
        }
    }

    Ok(())
}
