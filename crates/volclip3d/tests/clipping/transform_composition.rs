use super::{box_mesh, random_volume};
use volclip3d::clip::{clip_volume, ClipParameters};
use volclip3d::math::{affine_from_parts, affine_translation, Affine, Matrix, Point, Vector};
use volclip3d::region::{BoxRegion, ClippingRegion, SurfaceRegion};
use volclip3d::volume::Volume;

fn grid_to_world() -> Affine {
    affine_from_parts(
        &Matrix::from_diagonal(&Vector::new(-1.0, -1.0, 2.0)),
        &Vector::new(8.0, 6.0, -4.0),
    )
}

// Clipping with a region placed by `t` is the same as clipping with the
// unplaced region a volume whose grid-to-world is pre-composed with `t⁻¹`.
fn check_composition(region: ClippingRegion, placed: ClippingRegion, translation: Vector) {
    let volume = random_volume([10, 8, 6], grid_to_world(), 20);
    let moved = Volume::new(
        volume.image().unwrap().clone(),
        affine_translation(&-translation) * grid_to_world(),
    );
    let params = ClipParameters::keep_inside(-2.0);

    let a = clip_volume(&volume, &placed, &params).unwrap();
    let b = clip_volume(&moved, &region, &params).unwrap();

    assert_eq!(a.image(), b.image());
    assert_eq!(a.grid_to_world(), volume.grid_to_world());
    assert!(a.image().unwrap().samples().iter().any(|s| *s != -2));
    assert!(a.image().unwrap().samples().iter().any(|s| *s == -2));
}

#[test]
fn box_translation_composition() {
    let translation = Vector::new(2.0, -1.0, 3.0);
    let region = BoxRegion::new(Point::new(3.0, 2.0, -1.0), Vector::new(2.5, 1.5, 3.5));

    check_composition(
        region.into(),
        region.with_transform(affine_translation(&translation)).into(),
        translation,
    );
}

#[test]
fn surface_translation_composition() {
    let translation = Vector::new(-1.0, 2.0, 4.0);
    let region = SurfaceRegion::new(box_mesh(
        Point::new(0.5, -1.5, -2.5),
        Point::new(5.5, 3.5, 4.5),
    ));

    check_composition(
        region.clone().into(),
        region.with_transform(affine_translation(&translation)).into(),
        translation,
    );
}
