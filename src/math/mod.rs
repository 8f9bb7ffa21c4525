//! Linear algebra type aliases and affine-transform utilities.

use na::{Affine3, Matrix3, Matrix4, Point3, Vector3, U3};

/// The scalar type used throughout this crate.
#[cfg(feature = "f64")]
pub type Real = f64;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The dimension of the ambient space.
pub type Dim = U3;

/// The point type.
pub type Point = Point3<Real>;

/// The vector type.
pub type Vector = Vector3<Real>;

/// The matrix type.
pub type Matrix = Matrix3<Real>;

/// The homogeneous 4x4 matrix type.
pub type Matrix4x4 = Matrix4<Real>;

/// An affine transformation (rotation, scale, shear and translation).
///
/// Used for grid-to-world transforms of volumes and for the placement of
/// clipping regions.
pub type Affine = Affine3<Real>;

/// Builds an affine transformation from a homogeneous matrix.
///
/// Returns `None` if the last row of `matrix` is not `[0, 0, 0, 1]`.
pub fn affine_from_matrix(matrix: Matrix4x4) -> Option<Affine> {
    let last_row_ok = matrix[(3, 0)] == 0.0
        && matrix[(3, 1)] == 0.0
        && matrix[(3, 2)] == 0.0
        && matrix[(3, 3)] == 1.0;

    if last_row_ok {
        Some(Affine::from_matrix_unchecked(matrix))
    } else {
        None
    }
}

/// The affine transformation translating points by `translation`.
pub fn affine_translation(translation: &Vector) -> Affine {
    Affine::from_matrix_unchecked(Matrix4x4::new_translation(translation))
}

/// The affine transformation applying `linear` then translating by `translation`.
pub fn affine_from_parts(linear: &Matrix, translation: &Vector) -> Affine {
    let mut m = linear.to_homogeneous();
    m.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
    Affine::from_matrix_unchecked(m)
}

/// The linear (upper-left 3x3) part of an affine transformation.
pub fn affine_linear_part(affine: &Affine) -> Matrix {
    affine.matrix().fixed_view::<3, 3>(0, 0).into_owned()
}

/// Inverts an affine transformation.
///
/// Returns `None` if the transformation contains non-finite entries or if its
/// linear part is singular relative to its own scale.
pub fn try_inverse_affine(affine: &Affine) -> Option<Affine> {
    let m = affine.matrix();

    if m.iter().any(|e| !e.is_finite()) {
        return None;
    }

    let linear = affine_linear_part(affine);
    let scale = linear.amax();

    if scale == 0.0 {
        return None;
    }

    // The determinant scales with the cube of the matrix entries.
    let det = linear.determinant();
    if relative_eq!(det / (scale * scale * scale), 0.0, epsilon = 1.0e-12) {
        return None;
    }

    m.try_inverse().and_then(affine_from_matrix_lenient)
}

// Inverting an affine matrix can leave round-off in the last row.
fn affine_from_matrix_lenient(mut matrix: Matrix4x4) -> Option<Affine> {
    if matrix.iter().any(|e| !e.is_finite()) {
        return None;
    }

    matrix[(3, 0)] = 0.0;
    matrix[(3, 1)] = 0.0;
    matrix[(3, 2)] = 0.0;
    matrix[(3, 3)] = 1.0;
    Some(Affine::from_matrix_unchecked(matrix))
}
