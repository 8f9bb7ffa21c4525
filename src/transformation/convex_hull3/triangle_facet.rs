use crate::math::{Point, Real, Vector};
use crate::shape::Triangle;

/// Points closer than this to a facet plane (in normalized coordinates) do not see it.
pub const VISIBILITY_EPSILON: Real = 1.0e-10;

#[derive(Debug)]
pub struct TriangleFacet {
    pub valid: bool,
    pub affinely_dependent: bool,
    pub normal: Vector,
    pub pts: [usize; 3],
    pub visible_points: Vec<usize>,
    pub furthest_point: Option<usize>,
    pub furthest_distance: Real,
}

impl TriangleFacet {
    pub fn new(p1: usize, p2: usize, p3: usize, points: &[Point]) -> TriangleFacet {
        let triangle = Triangle::new(points[p1], points[p2], points[p3]);
        let affinely_dependent = triangle.is_affinely_dependent();
        let normal = triangle
            .normal()
            .map(|n| n.into_inner())
            .unwrap_or_else(Vector::zeros);

        TriangleFacet {
            valid: true,
            affinely_dependent,
            normal,
            pts: [p1, p2, p3],
            visible_points: Vec::new(),
            furthest_point: None,
            furthest_distance: 0.0,
        }
    }

    /// The three oriented edges of this facet.
    pub fn edges(&self) -> [(usize, usize); 3] {
        [
            (self.pts[0], self.pts[1]),
            (self.pts[1], self.pts[2]),
            (self.pts[2], self.pts[0]),
        ]
    }

    pub fn add_visible_point(&mut self, pid: usize, points: &[Point]) {
        let distance = self.distance_to_point(pid, points);

        if distance > self.furthest_distance {
            self.furthest_distance = distance;
            self.furthest_point = Some(pid);
        }

        self.visible_points.push(pid);
    }

    pub fn distance_to_point(&self, point: usize, points: &[Point]) -> Real {
        self.normal.dot(&(points[point] - points[self.pts[0]]))
    }

    pub fn can_see_point(&self, point: usize, points: &[Point]) -> bool {
        // An affinely-dependent triangle cannot see any point.
        !self.affinely_dependent && self.distance_to_point(point, points) > VISIBILITY_EPSILON
    }
    // Visibility test used while growing the region of facets removed by a
    // new point. Degenerate facets are always removed with their neighbors.
    pub fn is_removed_by_point(&self, point: usize, points: &[Point]) -> bool {
        self.affinely_dependent || self.distance_to_point(point, points) > VISIBILITY_EPSILON
    }
}
