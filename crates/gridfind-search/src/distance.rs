use gridfind_core::Point;

/// Manhattan (L1) distance between two points.
///
/// This is the search heuristic: with 4-way movement at unit cost it is
/// both admissible (never overestimates) and consistent, which is what
/// guarantees A* optimality on the board.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
