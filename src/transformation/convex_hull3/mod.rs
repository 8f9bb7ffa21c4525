pub use self::error::ConvexHullError;
use self::initial_mesh::{get_initial_mesh, InitialMesh};
use self::triangle_facet::TriangleFacet;
pub use convex_hull::try_convex_hull;
pub use validation::check_convex_hull;

mod convex_hull;
mod error;
mod initial_mesh;
mod triangle_facet;
mod validation;
