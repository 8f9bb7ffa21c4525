//! Modified butterfly subdivision of triangle meshes.

use crate::math::{Point, Real, Vector};
use crate::utils::hashmap::HashMap;
use crate::utils::SortedPair;
use arrayvec::ArrayVec;
use smallvec::SmallVec;

/// The tension parameter `w` of the butterfly stencil.
///
/// The regular stencil weights are `1/2` for the edge endpoints, `2w` for the
/// two opposite vertices and `-w` for the four wing vertices.
pub const BUTTERFLY_TENSION: Real = 1.0 / 16.0;

const REGULAR_VALENCE: usize = 6;

#[derive(Default)]
struct EdgeInfo {
    opposite: ArrayVec<u32, 2>,
    non_manifold: bool,
}

impl EdgeInfo {
    fn is_interior(&self) -> bool {
        !self.non_manifold && self.opposite.len() == 2
    }
}

struct Topology {
    edges: HashMap<SortedPair<u32>, EdgeInfo>,
    rings: Vec<Option<Vec<u32>>>,
}

impl Topology {
    fn new(num_vertices: usize, indices: &[[u32; 3]]) -> Self {
        let mut edges: HashMap<SortedPair<u32>, EdgeInfo> = HashMap::default();
        let mut fans: Vec<SmallVec<[(u32, u32); 8]>> = vec![SmallVec::new(); num_vertices];

        for idx in indices {
            for k in 0..3 {
                let (a, b, c) = (idx[k], idx[(k + 1) % 3], idx[(k + 2) % 3]);
                let info = edges.entry(SortedPair::new(a, b)).or_default();

                if info.opposite.try_push(c).is_err() {
                    info.non_manifold = true;
                }

                fans[a as usize].push((b, c));
            }
        }

        let rings = fans.iter().map(|fan| one_ring(fan)).collect();
        Self { edges, rings }
    }

    // The vertex opposite to `exclude` across the edge `(a, b)`.
    fn wing(&self, a: u32, b: u32, exclude: u32) -> Option<u32> {
        let info = self.edges.get(&SortedPair::new(a, b))?;

        if !info.is_interior() {
            return None;
        }

        info.opposite.iter().copied().find(|v| *v != exclude)
    }

    // The ring of `v` rotated so that it starts with `first`.
    fn ring_from(&self, v: u32, first: u32) -> Option<Vec<u32>> {
        let ring = self.rings[v as usize].as_ref()?;
        let start = ring.iter().position(|n| *n == first)?;
        let mut rotated = ring[start..].to_vec();
        rotated.extend_from_slice(&ring[..start]);
        Some(rotated)
    }
}

// Orders the neighbors of a vertex by walking around its triangle fan.
//
// Returns `None` if the fan is not a single closed disk.
fn one_ring(fan: &[(u32, u32)]) -> Option<Vec<u32>> {
    if fan.len() < 3 {
        return None;
    }

    let mut next: HashMap<u32, u32> = HashMap::with_capacity(fan.len());
    for (a, b) in fan {
        if next.insert(*a, *b).is_some() {
            return None;
        }
    }

    let start = fan[0].0;
    let mut ring = Vec::with_capacity(fan.len());
    let mut curr = start;

    loop {
        ring.push(curr);
        curr = *next.get(&curr)?;

        if curr == start {
            break;
        }

        if ring.len() >= fan.len() {
            return None;
        }
    }

    if ring.len() == fan.len() {
        Some(ring)
    } else {
        None
    }
}

fn extraordinary_weights(valence: usize) -> Vec<Real> {
    match valence {
        3 => vec![5.0 / 12.0, -1.0 / 12.0, -1.0 / 12.0],
        4 => vec![3.0 / 8.0, 0.0, -1.0 / 8.0, 0.0],
        k => {
            let k_real = k as Real;
            (0..k)
                .map(|j| {
                    let angle = 2.0 * core::f64::consts::PI * j as Real / k_real;
                    (0.25 + angle.cos() + 0.5 * (2.0 * angle).cos()) / k_real
                })
                .collect()
        }
    }
}

fn extraordinary_point(vertices: &[Point], v: u32, ring: &[u32]) -> Vector {
    let weights = extraordinary_weights(ring.len());
    let mut result = vertices[v as usize].coords * 0.75;

    for (n, w) in ring.iter().zip(weights.iter()) {
        result += vertices[*n as usize].coords * *w;
    }

    result
}

fn edge_point(vertices: &[Point], topology: &Topology, a: u32, b: u32) -> Point {
    let midpoint = na::center(&vertices[a as usize], &vertices[b as usize]);

    let info = match topology.edges.get(&SortedPair::new(a, b)) {
        Some(info) if info.is_interior() => info,
        _ => return midpoint,
    };

    let (ring_a, ring_b) = match (topology.ring_from(a, b), topology.ring_from(b, a)) {
        (Some(ring_a), Some(ring_b)) => (ring_a, ring_b),
        _ => return midpoint,
    };

    match (
        ring_a.len() == REGULAR_VALENCE,
        ring_b.len() == REGULAR_VALENCE,
    ) {
        (true, true) => {
            let (c, d) = (info.opposite[0], info.opposite[1]);
            let wings = [
                topology.wing(a, c, b),
                topology.wing(c, b, a),
                topology.wing(b, d, a),
                topology.wing(d, a, b),
            ];

            let mut result = midpoint.coords
                + (vertices[c as usize].coords + vertices[d as usize].coords)
                    * (2.0 * BUTTERFLY_TENSION);

            for wing in wings {
                match wing {
                    Some(w) => result -= vertices[w as usize].coords * BUTTERFLY_TENSION,
                    None => return midpoint,
                }
            }

            Point::from(result)
        }
        (false, true) => Point::from(extraordinary_point(vertices, a, &ring_a)),
        (true, false) => Point::from(extraordinary_point(vertices, b, &ring_b)),
        (false, false) => Point::from(
            (extraordinary_point(vertices, a, &ring_a) + extraordinary_point(vertices, b, &ring_b))
                * 0.5,
        ),
    }
}

fn subdivide_once(vertices: &[Point], indices: &[[u32; 3]]) -> (Vec<Point>, Vec<[u32; 3]>) {
    let topology = Topology::new(vertices.len(), indices);
    let mut new_vertices = vertices.to_vec();
    let mut new_indices = Vec::with_capacity(indices.len() * 4);
    let mut midpoint_ids: HashMap<SortedPair<u32>, u32> = HashMap::default();

    let mut midpoint_id = |a: u32, b: u32, new_vertices: &mut Vec<Point>| -> u32 {
        *midpoint_ids.entry(SortedPair::new(a, b)).or_insert_with(|| {
            new_vertices.push(edge_point(vertices, &topology, a, b));
            new_vertices.len() as u32 - 1
        })
    };

    for [x, y, z] in indices.iter().copied() {
        let mxy = midpoint_id(x, y, &mut new_vertices);
        let myz = midpoint_id(y, z, &mut new_vertices);
        let mzx = midpoint_id(z, x, &mut new_vertices);

        new_indices.push([x, mxy, mzx]);
        new_indices.push([mxy, y, myz]);
        new_indices.push([mzx, myz, z]);
        new_indices.push([mxy, myz, mzx]);
    }

    (new_vertices, new_indices)
}

/// Refines a triangle mesh with `num_passes` passes of the modified butterfly scheme.
///
/// Each pass splits every triangle into four. Original vertices keep their
/// position and each edge gets a new vertex computed from its neighborhood, so
/// the refined mesh interpolates the input vertices. Edges on a boundary, shared
/// by more than two triangles, or touching a vertex whose neighborhood is not a
/// closed fan, are split at their midpoint.
pub fn butterfly_subdivision(
    vertices: &[Point],
    indices: &[[u32; 3]],
    num_passes: usize,
) -> (Vec<Point>, Vec<[u32; 3]>) {
    let mut result = (vertices.to_vec(), indices.to_vec());

    for _ in 0..num_passes {
        result = subdivide_once(&result.0, &result.1);
    }

    result
}
