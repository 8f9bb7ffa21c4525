use super::{get_initial_mesh, ConvexHullError, InitialMesh, TriangleFacet};
use crate::math::Point;
use crate::transformation::convex_hull_utils::normalize;
use crate::utils;
use crate::utils::hashmap::{Entry, HashMap};

/// Computes the convex hull of a set of 3d points.
///
/// The hull is returned as a vertex buffer (a subset of `points`, in their
/// original order) and a counter-clockwise oriented index buffer. If all the
/// points lie on a plane, the result is a flat closed mesh: the convex polygon
/// triangulated once per side, each side as a fan around its own copy of the
/// polygon centroid. These two copies are the last two vertices.
pub fn try_convex_hull(points: &[Point]) -> Result<(Vec<Point>, Vec<[u32; 3]>), ConvexHullError> {
    if points.len() < 3 {
        return Err(ConvexHullError::IncompleteInput);
    }

    if let Some(bad) = points
        .iter()
        .position(|pt| pt.iter().any(|e| !e.is_finite()))
    {
        return Err(ConvexHullError::InvalidPoint(bad));
    }

    let mut normalized_points = points.to_vec();
    let (_, diag) = normalize(&mut normalized_points[..]);

    if diag == 0.0 {
        return Err(ConvexHullError::Degenerate);
    }

    let mut facets = match get_initial_mesh(points, &normalized_points)? {
        InitialMesh::Facets(facets) => facets,
        InitialMesh::ResultMesh(vertices, indices) => return Ok((vertices, indices)),
    };

    // Directed edge -> facet containing it.
    let mut edges: HashMap<(usize, usize), usize> = HashMap::default();
    for (id, facet) in facets.iter().enumerate() {
        for edge in facet.edges() {
            if edges.insert(edge, id).is_some() {
                return Err(ConvexHullError::InternalError(
                    "initial tetrahedron is not manifold.",
                ));
            }
        }
    }

    let mut visible = Vec::new();
    let mut horizon = Vec::new();
    let mut i = 0;

    while i < facets.len() {
        let eye = match facets[i].furthest_point {
            Some(eye) if facets[i].valid => eye,
            _ => {
                i += 1;
                continue;
            }
        };

        compute_visible_region(i, eye, &normalized_points, &mut facets, &edges, &mut visible)?;

        horizon.clear();
        for facet in &visible {
            for (a, b) in facets[*facet].edges() {
                let twin = *edges
                    .get(&(b, a))
                    .ok_or(ConvexHullError::InternalError("hull has a boundary edge."))?;

                if facets[twin].valid {
                    horizon.push((a, b));
                }
            }
        }

        for facet in &visible {
            for edge in facets[*facet].edges() {
                let _ = edges.remove(&edge);
            }
        }

        let first_new = facets.len();
        for (a, b) in &horizon {
            let facet = TriangleFacet::new(*a, *b, eye, &normalized_points);
            let id = facets.len();

            for edge in facet.edges() {
                match edges.entry(edge) {
                    Entry::Vacant(e) => {
                        let _ = e.insert(id);
                    }
                    Entry::Occupied(_) => {
                        return Err(ConvexHullError::InternalError(
                            "the horizon of a point is not a simple loop.",
                        ))
                    }
                }
            }

            facets.push(facet);
        }

        reassign_orphan_points(eye, &visible, first_new, &normalized_points, &mut facets);
        i += 1;
    }

    let mut idx: Vec<[u32; 3]> = facets
        .iter()
        .filter(|facet| facet.valid)
        .map(|facet| {
            [
                facet.pts[0] as u32,
                facet.pts[1] as u32,
                facet.pts[2] as u32,
            ]
        })
        .collect();

    if idx.is_empty() {
        return Err(ConvexHullError::InternalError("empty output mesh."));
    }

    let mut vertices = points.to_vec();
    utils::remove_unused_points(&mut vertices, &mut idx[..]);

    Ok((vertices, idx))
}

// Flood-fills, from `start`, the facets removed when `eye` is added to the
// hull. Removed facets are marked invalid.
fn compute_visible_region(
    start: usize,
    eye: usize,
    points: &[Point],
    facets: &mut [TriangleFacet],
    edges: &HashMap<(usize, usize), usize>,
    visible: &mut Vec<usize>,
) -> Result<(), ConvexHullError> {
    visible.clear();
    visible.push(start);
    facets[start].valid = false;

    let mut curr = 0;
    while curr < visible.len() {
        let facet = visible[curr];
        curr += 1;

        for (a, b) in facets[facet].edges() {
            let twin = *edges
                .get(&(b, a))
                .ok_or(ConvexHullError::InternalError("hull has a boundary edge."))?;

            if facets[twin].valid && facets[twin].is_removed_by_point(eye, points) {
                facets[twin].valid = false;
                visible.push(twin);
            }
        }
    }

    Ok(())
}

fn reassign_orphan_points(
    eye: usize,
    removed: &[usize],
    first_new: usize,
    points: &[Point],
    facets: &mut [TriangleFacet],
) {
    let (old_facets, new_facets) = facets.split_at_mut(first_new);

    for facet in removed {
        let orphans = core::mem::take(&mut old_facets[*facet].visible_points);

        for point in orphans {
            if point == eye || points[point] == points[eye] {
                continue;
            }

            let mut furthest = None;
            let mut furthest_dist = 0.0;

            for (j, candidate) in new_facets.iter().enumerate() {
                if candidate.can_see_point(point, points) {
                    let distance = candidate.distance_to_point(point, points);

                    if distance > furthest_dist {
                        furthest = Some(j);
                        furthest_dist = distance;
                    }
                }
            }

            // Points no longer seen by any facet are inside the hull.
            if let Some(furthest) = furthest {
                new_facets[furthest].add_visible_point(point, points);
            }
        }
    }
}
