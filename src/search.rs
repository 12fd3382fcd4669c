use crate::map::{Grid, Point};

/// Finds the nearest point to the origin satisfying the predicate.
///
/// The search scans square blocks of half-width 1, 2, 3, … around the origin
/// (each block includes its own center) in row-major order: y outer, x inner,
/// both ascending. The first in-bounds match wins, so ring membership decides
/// "nearest" and scan order breaks ties within a ring. Out-of-bounds
/// candidates are skipped. Once the half-width exceeds the grid size the
/// origin itself is returned, so the search never fails.
pub fn find_nearest<F>(grid: &Grid, origin: Point, predicate: F) -> Point
where
    F: Fn(Point) -> bool,
{
    let mut radius = 1;

    loop {
        for y in (origin.y - radius)..=(origin.y + radius) {
            for x in (origin.x - radius)..=(origin.x + radius) {
                let candidate = Point::new(x, y);
                if grid.contains(candidate) && predicate(candidate) {
                    return candidate;
                }
            }
        }

        if radius > grid.size() as i32 {
            return origin;
        }
        radius += 1;
    }
}
