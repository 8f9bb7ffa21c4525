/*!
volclip3d
=========

**volclip3d** clips 3-dimensional voxel volumes with closed triangle meshes
and boxes, written with the rust programming language.

A clipping region is rasterized into an inside/outside [`stencil`] over the
whole index extent of the volume, then the voxels lying on the excluded side
of that stencil are overwritten with a fill value. Closed clipping surfaces
can also be reconstructed from a handful of scattered points.

```
use volclip3d::clip::{clip_volume, ClipParameters};
use volclip3d::math::{Affine, Point, Vector};
use volclip3d::region::{BoxRegion, ClippingRegion};
use volclip3d::volume::{ImageData, Volume};

let image = ImageData::filled([4, 4, 4], 100i16);
let volume = Volume::new(image, Affine::identity());
let region = ClippingRegion::Box(BoxRegion::new(
    Point::new(2.0, 2.0, 2.0),
    Vector::repeat(1.0),
));

let clipped = clip_volume(&volume, &region, &ClipParameters::default()).unwrap();
let image = clipped.image().unwrap();
assert_eq!(image.get(2, 2, 2), Some(100));
assert_eq!(image.get(0, 0, 0), Some(0));
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod clip;
pub mod math;
pub mod region;
pub mod sample;
pub mod shape;
pub mod stencil;
pub mod surface;
pub mod transformation;
pub mod utils;
pub mod volume;
