use super::box_stencil::index_interval;
use super::{Span, Stencil, StencilRow};
use crate::math::{Affine, Point, Real};
use crate::shape::TriMesh;
use na::Point2;
use smallvec::SmallVec;

type Crossings = SmallVec<[Real; 4]>;

/// Rasterizes the interior of a closed triangle mesh over the index extent `dims`.
///
/// `local_to_index` maps the mesh vertices to voxel index space. Each row of
/// voxel centres `(j, k)` is a line parallel to the `i` axis: its crossings
/// with the mesh are sorted and paired, and the voxels between a pair of
/// crossings (inclusive) are inside.
///
/// A row passing exactly through an edge or a vertex shared by several
/// triangles is counted once, with the same tie-breaking rule as triangle
/// rasterizers. For a closed mesh, every row thus crosses it an even number
/// of times.
pub fn surface_stencil(mesh: &TriMesh, local_to_index: &Affine, dims: [usize; 3]) -> Stencil {
    let [nx, ny, nz] = dims;

    if nx == 0 || ny == 0 || nz == 0 {
        return Stencil::empty(dims);
    }

    let mut crossings: Vec<Crossings> = vec![Crossings::new(); ny * nz];

    let vertices: Vec<Point> = mesh
        .vertices()
        .iter()
        .map(|pt| local_to_index * pt)
        .collect();

    let mut num_skipped = 0;

    for idx in mesh.indices() {
        let mut tri = [
            vertices[idx[0] as usize],
            vertices[idx[1] as usize],
            vertices[idx[2] as usize],
        ];

        if tri.iter().any(|pt| pt.iter().any(|e| !e.is_finite())) {
            num_skipped += 1;
            continue;
        }

        let area2 = edge_function(&project(&tri[0]), &project(&tri[1]), &project(&tri[2]));

        if area2 == 0.0 {
            // The triangle is parallel to the rows.
            continue;
        }

        if area2 < 0.0 {
            tri.swap(1, 2);
        }

        rasterize_triangle(&tri, ny, nz, &mut crossings);
    }

    if num_skipped > 0 {
        log::debug!(
            "Skipped {} triangles with non-finite coordinates in index space.",
            num_skipped
        );
    }

    Stencil::from_row_fn(dims, |j, k| {
        let mut row = crossings[j + k * ny].clone();
        row.sort_unstable_by(|a, b| a.total_cmp(b));

        if row.len() % 2 == 1 {
            log::trace!(
                "Odd number of surface crossings ({}) on the row ({}, {}): the clipping surface is probably not closed.",
                row.len(),
                j,
                k
            );
            let _ = row.pop();
        }

        row.chunks_exact(2)
            .filter_map(|pair| index_interval(pair[0], pair[1], nx))
            .map(|(start, end)| Span::new(start, end))
            .collect::<StencilRow>()
    })
}

#[inline]
fn project(pt: &Point) -> Point2<Real> {
    Point2::new(pt.y, pt.z)
}

// Twice the signed area of `(a, b, p)` in the row plane.
#[inline]
fn edge_function(a: &Point2<Real>, b: &Point2<Real>, p: &Point2<Real>) -> Real {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

// Evaluates the edge function with the endpoints in a canonical order so that
// the two triangles sharing an edge get exactly opposite values.
#[inline]
fn canonical_edge_function(a: &Point2<Real>, b: &Point2<Real>, p: &Point2<Real>) -> Real {
    if (a.x, a.y) <= (b.x, b.y) {
        edge_function(a, b, p)
    } else {
        -edge_function(b, a, p)
    }
}

// Does a counter-clockwise triangle own the samples lying exactly on its edge `(a, b)`?
//
// Exactly one of `(a, b)` and `(b, a)` is an owner.
#[inline]
fn is_owner(a: &Point2<Real>, b: &Point2<Real>) -> bool {
    let d = b - a;
    d.y < 0.0 || (d.y == 0.0 && d.x > 0.0)
}

// Adds the crossings of a counter-clockwise (in the row plane) triangle
// with all the rows it covers.
fn rasterize_triangle(tri: &[Point; 3], ny: usize, nz: usize, crossings: &mut [Crossings]) {
    let p = [project(&tri[0]), project(&tri[1]), project(&tri[2])];
    let owners = [
        is_owner(&p[1], &p[2]),
        is_owner(&p[2], &p[0]),
        is_owner(&p[0], &p[1]),
    ];

    let (jmin, jmax) = match row_range(p[0].x, p[1].x, p[2].x, ny) {
        Some(range) => range,
        None => return,
    };
    let (kmin, kmax) = match row_range(p[0].y, p[1].y, p[2].y, nz) {
        Some(range) => range,
        None => return,
    };

    for k in kmin..=kmax {
        for j in jmin..=jmax {
            let sample = Point2::new(j as Real, k as Real);
            // The weight of each vertex is the edge function of the opposite edge.
            let w = [
                canonical_edge_function(&p[1], &p[2], &sample),
                canonical_edge_function(&p[2], &p[0], &sample),
                canonical_edge_function(&p[0], &p[1], &sample),
            ];

            let inside = (0..3).all(|e| w[e] > 0.0 || (w[e] == 0.0 && owners[e]));

            if inside {
                let sum = w[0] + w[1] + w[2];
                let x = (w[0] * tri[0].x + w[1] * tri[1].x + w[2] * tri[2].x) / sum;
                crossings[j + k * ny].push(x);
            }
        }
    }
}

// The rows in `[0, n)` covered by the interval spanned by three coordinates.
fn row_range(a: Real, b: Real, c: Real, n: usize) -> Option<(usize, usize)> {
    let min = a.min(b).min(c).ceil().max(0.0);
    let max = a.max(b).max(c).floor().min((n - 1) as Real);

    if min > max {
        None
    } else {
        Some((min as usize, max as usize))
    }
}
