use rand::{Rng, SeedableRng};
use volclip3d::math::{Affine, Point};
use volclip3d::shape::TriMesh;
use volclip3d::volume::{ImageData, Volume};

mod box_clip;
mod end_to_end;
mod reconstruct;
mod surface_clip;
mod transform_composition;

/// A closed box mesh with outward-facing triangles.
pub fn box_mesh(mins: Point, maxs: Point) -> TriMesh {
    let (a, b) = (mins, maxs);
    let vertices = vec![
        Point::new(a.x, a.y, a.z),
        Point::new(b.x, a.y, a.z),
        Point::new(b.x, b.y, a.z),
        Point::new(a.x, b.y, a.z),
        Point::new(a.x, a.y, b.z),
        Point::new(b.x, a.y, b.z),
        Point::new(b.x, b.y, b.z),
        Point::new(a.x, b.y, b.z),
    ];
    let indices = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [2, 3, 7],
        [2, 7, 6],
        [1, 2, 6],
        [1, 6, 5],
        [0, 4, 7],
        [0, 7, 3],
    ];
    TriMesh::new(vertices, indices).unwrap()
}

/// A volume filled with random values in `[1, 1000)`.
pub fn random_volume(dims: [usize; 3], grid_to_world: Affine, seed: u64) -> Volume<i16> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let image = ImageData::from_fn(dims, |_, _, _| rng.gen_range(1..1000));
    Volume::new(image, grid_to_world)
}
