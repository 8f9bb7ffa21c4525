use crate::math::Point;

/// Given an index buffer, remove from `points` every point that is not indexed.
///
/// The relative order of the remaining points is preserved.
pub fn remove_unused_points(points: &mut Vec<Point>, idx: &mut [[u32; 3]]) {
    let mut used = vec![false; points.len()];

    for i in idx.iter() {
        used[i[0] as usize] = true;
        used[i[1] as usize] = true;
        used[i[2] as usize] = true;
    }

    let mut remap = vec![u32::MAX; points.len()];
    let mut num_kept = 0;

    for (i, is_used) in used.iter().enumerate() {
        if *is_used {
            remap[i] = num_kept as u32;
            points[num_kept] = points[i];
            num_kept += 1;
        }
    }

    points.truncate(num_kept);

    for id in idx.iter_mut() {
        id[0] = remap[id[0] as usize];
        id[1] = remap[id[1] as usize];
        id[2] = remap[id[2] as usize];
    }
}

#[cfg(test)]
mod test {
    use super::remove_unused_points;
    use crate::math::Point;

    #[test]
    fn unused_points_are_removed_in_order() {
        let mut points: Vec<_> = (0..5).map(|i| Point::new(i as f64, 0.0, 0.0)).collect();
        let mut idx = [[4u32, 1, 3]];
        remove_unused_points(&mut points, &mut idx);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].x, 1.0);
        assert_eq!(idx, [[2, 0, 1]]);
    }
}
