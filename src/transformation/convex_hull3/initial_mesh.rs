use super::{ConvexHullError, TriangleFacet};
use crate::math::{Point, Real, Vector};
use crate::shape::Triangle;
use crate::transformation;
use crate::transformation::convex_hull_utils::support_point_id;
use na::Point2;
use core::cmp::Ordering;

pub enum InitialMesh {
    Facets(Vec<TriangleFacet>),
    ResultMesh(Vec<Point>, Vec<[u32; 3]>),
}

// Closed two-sided triangulation of a planar convex polygon.
//
// Each side is a fan around its own copy of the polygon centroid, so the two
// sides only share the rim. This keeps the result a closed 2-manifold, and it
// stays one under subdivision.
fn build_planar_mesh(
    axis1: &Vector,
    axis2: &Vector,
    original_points: &[Point],
    normalized_points: &[Point],
) -> Result<InitialMesh, ConvexHullError> {
    let subspace_points: Vec<_> = normalized_points
        .iter()
        .map(|pt| Point2::new(pt.coords.dot(axis1), pt.coords.dot(axis2)))
        .collect();

    let idx = transformation::convex_hull2_idx(&subspace_points);
    let npoints = idx.len();

    if npoints < 3 {
        return Err(ConvexHullError::Degenerate);
    }

    let mut coords: Vec<Point> = idx.into_iter().map(|i| original_points[i]).collect();
    let centroid = coords
        .iter()
        .fold(Vector::zeros(), |acc, pt| acc + pt.coords)
        / npoints as Real;
    coords.push(Point::from(centroid));
    coords.push(Point::from(centroid));

    let n = npoints as u32;
    let (top, bottom) = (n, n + 1);
    let mut triangles = Vec::with_capacity(2 * npoints);

    for id in 0..n {
        let next = (id + 1) % n;
        triangles.push([top, id, next]);
        triangles.push([bottom, next, id]);
    }

    Ok(InitialMesh::ResultMesh(coords, triangles))
}

pub fn get_initial_mesh(
    original_points: &[Point],
    normalized_points: &[Point],
) -> Result<InitialMesh, ConvexHullError> {
    /*
     * Compute the eigenvectors to see if the input data live on a subspace.
     */
    let eig = crate::utils::cov(normalized_points).symmetric_eigen();
    let mut eigpairs = [
        (eig.eigenvectors.column(0).into_owned(), eig.eigenvalues[0]),
        (eig.eigenvectors.column(1).into_owned(), eig.eigenvalues[1]),
        (eig.eigenvectors.column(2).into_owned(), eig.eigenvalues[2]),
    ];

    /*
     * Sort in decreasing order wrt. eigenvalues.
     */
    eigpairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    /*
     * Count the dimension the data lives in.
     */
    let dimension = eigpairs
        .iter()
        .take_while(|pair| !relative_eq!(pair.1, 0.0, epsilon = 1.0e-7))
        .count();

    match dimension {
        0 | 1 => Err(ConvexHullError::Degenerate),
        2 => build_planar_mesh(
            &eigpairs[0].0,
            &eigpairs[1].0,
            original_points,
            normalized_points,
        ),
        _ => {
            // Find a initial triangle lying on the principal plane…
            let p1 = support_point_id(&eigpairs[0].0, normalized_points)
                .ok_or(ConvexHullError::InternalError("no support point found."))?;
            let p2 = support_point_id(&-eigpairs[0].0, normalized_points)
                .ok_or(ConvexHullError::InternalError("no support point found."))?;

            let mut max_area = 0.0;
            let mut p3 = None;

            for (i, point) in normalized_points.iter().enumerate() {
                let area =
                    Triangle::new(normalized_points[p1], normalized_points[p2], *point).area();

                if area > max_area {
                    max_area = area;
                    p3 = Some(i);
                }
            }

            let p3 = p3.ok_or(ConvexHullError::Degenerate)?;

            // … then the point furthest from its plane.
            let base = TriangleFacet::new(p1, p2, p3, normalized_points);
            let mut max_dist: Real = 0.0;
            let mut p4 = None;

            for i in 0..normalized_points.len() {
                let dist = base.distance_to_point(i, normalized_points).abs();

                if dist > max_dist {
                    max_dist = dist;
                    p4 = Some(i);
                }
            }

            let p4 = match p4 {
                Some(p4) if max_dist > super::triangle_facet::VISIBILITY_EPSILON => p4,
                // The covariance missed a (numerically) planar input.
                _ => {
                    return build_planar_mesh(
                        &eigpairs[0].0,
                        &eigpairs[1].0,
                        original_points,
                        normalized_points,
                    )
                }
            };

            // Build the tetrahedron with outward-facing facets.
            let tetra = [p1, p2, p3, p4];
            let mut facets = Vec::with_capacity(4);

            for opposite in 0..4 {
                let mut pts = [0; 3];
                let mut k = 0;
                for (i, pt) in tetra.iter().enumerate() {
                    if i != opposite {
                        pts[k] = *pt;
                        k += 1;
                    }
                }

                let mut facet = TriangleFacet::new(pts[0], pts[1], pts[2], normalized_points);
                if facet.distance_to_point(tetra[opposite], normalized_points) > 0.0 {
                    facet = TriangleFacet::new(pts[0], pts[2], pts[1], normalized_points);
                }
                facets.push(facet);
            }

            // … and attribute visible points to each one of them.
            for point in 0..normalized_points.len() {
                if tetra.contains(&point) {
                    continue;
                }

                let mut furthest = None;
                let mut furthest_dist = 0.0;

                for (i, curr_facet) in facets.iter().enumerate() {
                    if curr_facet.can_see_point(point, normalized_points) {
                        let distance = curr_facet.distance_to_point(point, normalized_points);

                        if distance > furthest_dist {
                            furthest = Some(i);
                            furthest_dist = distance;
                        }
                    }
                }

                // If none of the facet can be seen from the point, it is naturally deleted.
                if let Some(furthest) = furthest {
                    facets[furthest].add_visible_point(point, normalized_points);
                }
            }

            Ok(InitialMesh::Facets(facets))
        }
    }
}
