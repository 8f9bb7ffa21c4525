/// Errors that can occur during convex hull computation.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConvexHullError {
    /// An internal error occurred during convex hull computation.
    ///
    /// This indicates that floating-point round-off broke the hull topology.
    #[error("Internal error: {0}")]
    InternalError(&'static str),

    /// Less than 3 points were given.
    #[error("Less than 3 points were given to the convex-hull algorithm.")]
    IncompleteInput,

    /// The point with the given index has a NaN or infinite coordinate.
    #[error("The input point {0} has a non-finite coordinate.")]
    InvalidPoint(usize),

    /// All the points are coincident or lie on a single line.
    #[error("Input points are almost collinear: they do not enclose any surface.")]
    Degenerate,
}
