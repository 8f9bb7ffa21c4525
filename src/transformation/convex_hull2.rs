use crate::math::Real;
use na::Point2;

/// Computes the indices of the 2D convex hull of a set of points, in counter-clockwise order.
///
/// Uses Andrew's monotone chain. Points lying on a hull edge are not part of the
/// result. Returns fewer than three indices if the points are collinear.
pub fn convex_hull2_idx(points: &[Point2<Real>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|a, b| {
        let (pa, pb) = (&points[*a], &points[*b]);
        pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
    });
    order.dedup_by(|a, b| points[*a] == points[*b]);

    if order.len() < 3 {
        return order;
    }

    let cross = |o: usize, a: usize, b: usize| -> Real {
        let oa = points[a] - points[o];
        let ob = points[b] - points[o];
        oa.x * ob.y - oa.y * ob.x
    };

    let mut hull: Vec<usize> = Vec::with_capacity(order.len() * 2);

    // Lower hull.
    for &id in &order {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], id) <= 0.0 {
            let _ = hull.pop();
        }
        hull.push(id);
    }

    // Upper hull.
    let lower_len = hull.len() + 1;
    for &id in order.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(hull[hull.len() - 2], hull[hull.len() - 1], id) <= 0.0
        {
            let _ = hull.pop();
        }
        hull.push(id);
    }

    // The last point is the first one.
    let _ = hull.pop();
    hull
}
