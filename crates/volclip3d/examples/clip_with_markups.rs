use volclip3d::clip::{clip_volume, ClipParameters};
use volclip3d::math::{Matrix, Point, Vector};
use volclip3d::region::ClippingRegion;
use volclip3d::surface::{ClippingSurface, LabeledPoint, PointSet};
use volclip3d::volume::{ImageData, Volume, VolumeGeometry};

fn main() {
    /*
     * A synthetic head-sized volume: a bright ball in a dark background.
     */
    let geometry = VolumeGeometry {
        origin: Point::new(120.0, 120.0, -80.0),
        spacing: Vector::new(0.9375, 0.9375, 1.3),
        directions: Matrix::from_diagonal(&Vector::new(-1.0, -1.0, 1.0)),
    };
    let image = ImageData::from_fn([256, 256, 130], |i, j, k| {
        let p = Point::new(i as f64 - 128.0, j as f64 - 128.0, k as f64 - 65.0);
        if p.coords.norm() < 80.0 {
            300i16
        } else {
            10
        }
    });
    let volume = Volume::with_geometry(image, &geometry);

    /*
     * Build the clipping surface from a few markups.
     */
    let mut points = PointSet::new();
    points.push(LabeledPoint::new("F-1", Point::new(35.0, -10.0, -10.0)));
    points.push(LabeledPoint::new("F-2", Point::new(-15.0, 20.0, -10.0)));
    points.push(LabeledPoint::new("F-3", Point::new(-25.0, -25.0, -10.0)));
    points.push(LabeledPoint::new("F-4", Point::new(-5.0, -60.0, -15.0)));
    points.push(LabeledPoint::new("F-5", Point::new(-5.0, 5.0, 60.0)));
    points.push(LabeledPoint::new("F-6", Point::new(-5.0, -35.0, -30.0)));

    let mut surface = ClippingSurface::new();
    match surface.update_from_points(&points) {
        Ok(true) => {}
        Ok(false) => {
            println!("Not enough markups to build a clipping surface.");
            return;
        }
        Err(e) => {
            println!("Failed to build the clipping surface: {}", e);
            return;
        }
    }

    let Some(region) = surface.to_region() else {
        return;
    };
    let region = ClippingRegion::from(region);

    /*
     * Clip.
     */
    let params = ClipParameters::keep_inside(-5.0);
    match clip_volume(&volume, &region, &params) {
        Ok(clipped) => {
            let num_kept = clipped
                .image()
                .map(|image| image.samples().iter().filter(|s| **s != -5).count())
                .unwrap_or(0);
            println!(
                "Kept {} voxels inside the surface made of {} triangles.",
                num_kept,
                surface.mesh().map(|m| m.num_triangles()).unwrap_or(0)
            );
        }
        Err(e) => println!("Clipping failed: {}", e),
    }
}
