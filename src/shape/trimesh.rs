use crate::bounding_volume::Aabb;
use crate::math::{affine_linear_part, Affine, Point, Real};
use crate::shape::Triangle;
use crate::utils::hashmap::HashMap;
use crate::utils::SortedPair;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A triangle mesh must contain at least one triangle.
    #[error("A triangle mesh must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index} which does not exist.")]
    IndexOutOfBounds {
        /// The faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
    },
}

/// A triangle mesh given as an indexed triangle soup.
///
/// Clipping surfaces are expected to be closed 2-manifolds so that their
/// interior is well defined. This is not enforced on construction: use
/// [`TriMesh::is_closed`] to check it when the mesh comes from an untrusted
/// source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriMesh {
    vertices: Vec<Point>,
    indices: Vec<[u32; 3]>,
    aabb: Aabb,
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(vertices: Vec<Point>, indices: Vec<[u32; 3]>) -> Result<Self, TriMeshBuilderError> {
        if indices.is_empty() {
            return Err(TriMeshBuilderError::EmptyIndices);
        }

        for (tri_id, tri) in indices.iter().enumerate() {
            if let Some(bad) = tri.iter().find(|id| **id as usize >= vertices.len()) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle: tri_id as u32,
                    index: *bad,
                });
            }
        }

        let aabb = Aabb::from_points(&vertices);

        Ok(Self {
            vertices,
            indices,
            aabb,
        })
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles forming this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Consumes the mesh, returning its vertex and index buffers.
    pub fn into_buffers(self) -> (Vec<Point>, Vec<[u32; 3]>) {
        (self.vertices, self.indices)
    }

    /// The AABB of this mesh, in its local frame.
    #[inline]
    pub fn local_aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Get the `i`-th triangle of this mesh.
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.indices.len() as u32).map(move |i| self.triangle(i))
    }

    /// Transforms in-place the vertices of this triangle mesh.
    ///
    /// If `transform` mirrors space, the triangles are re-oriented so that
    /// their orientation relative to the mesh interior is preserved.
    pub fn transform_vertices(&mut self, transform: &Affine) {
        self.vertices
            .iter_mut()
            .for_each(|pt| *pt = transform * *pt);
        self.aabb = Aabb::from_points(&self.vertices);

        if affine_linear_part(transform).determinant() < 0.0 {
            self.reverse();
        }
    }

    /// Returns a copy of this mesh with its vertices transformed by `transform`.
    pub fn transformed(&self, transform: &Affine) -> Self {
        let mut result = self.clone();
        result.transform_vertices(transform);
        result
    }

    /// Reverse the orientation of the triangle mesh.
    pub fn reverse(&mut self) {
        for idx in &mut self.indices {
            idx.swap(0, 1);
        }
    }

    /// The edges shared by a number of triangles other than two.
    ///
    /// Each edge is reported once, as a sorted pair of vertex indices. An edge
    /// used by a single triangle is a hole in the surface; an edge used by three
    /// or more triangles makes the surface non-manifold.
    pub fn boundary_edges(&self) -> Vec<(u32, u32)> {
        let mut edge_use: HashMap<SortedPair<u32>, usize> = HashMap::default();

        for idx in &self.indices {
            for k in 0..3 {
                *edge_use
                    .entry(SortedPair::new(idx[k], idx[(k + 1) % 3]))
                    .or_insert(0) += 1;
            }
        }

        let mut result: Vec<_> = edge_use
            .into_iter()
            .filter(|(_, count)| *count != 2)
            .map(|(edge, _)| edge.into_tuple())
            .collect();
        result.sort_unstable();
        result
    }

    /// Is every edge of this mesh shared by exactly two triangles?
    pub fn is_closed(&self) -> bool {
        self.boundary_edges().is_empty()
    }

    /// The signed volume enclosed by this mesh.
    ///
    /// Positive if the triangles are oriented counter-clockwise when seen from
    /// outside. Only meaningful for closed meshes.
    pub fn signed_volume(&self) -> Real {
        let origin = self.aabb.center();
        let sum: Real = self
            .triangles()
            .map(|tri| {
                (tri.a - origin)
                    .cross(&(tri.b - origin))
                    .dot(&(tri.c - origin))
            })
            .sum();

        sum / 6.0
    }
}
