use crate::math::{Matrix, Point, Real};

/// Computes the covariance matrix of a set of points.
pub fn cov(pts: &[Point]) -> Matrix {
    center_cov(pts).1
}

// The center and the covariance matrix of a set of points.
//
// The origin and a zero matrix if `pts` is empty.
fn center_cov(pts: &[Point]) -> (Point, Matrix) {
    if pts.is_empty() {
        return (Point::origin(), Matrix::zeros());
    }

    let normalizer = 1.0 / pts.len() as Real;
    let center = Point::from(
        pts.iter()
            .fold(na::zero::<crate::math::Vector>(), |acc, p| acc + p.coords)
            * normalizer,
    );
    let mut cov = Matrix::zeros();

    for p in pts.iter() {
        let cp = *p - center;
        // NOTE: this is more numerically stable than using cov.syger.
        cov += cp * (cp * normalizer).transpose();
    }

    (center, cov)
}
