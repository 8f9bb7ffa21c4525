//! Shapes used to describe clipping regions.

pub use self::triangle::Triangle;
pub use self::trimesh::{TriMesh, TriMeshBuilderError};

mod triangle;
mod trimesh;
