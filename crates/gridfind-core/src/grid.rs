//! The square board: a grid of categorized cells with cached adjacency.

use crate::cell::Category;
use crate::geom::Point;

const EMPTY_NEIGHBORS: &[Point] = &[];

/// A square N×N board of [`Category`] cells.
///
/// The board tracks its `Start`/`End` markers so the at-most-one invariant
/// holds without cooperation from callers: placing a new marker demotes the
/// previous one to `Empty`, and an `Obstacle` is never written over a
/// marker cell.
///
/// Adjacency is cached, not live: [`Grid::neighbors`] reflects the obstacle
/// layout as of the last [`Grid::recompute_adjacency`] call, which a driver
/// is expected to make immediately before each search run.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    cells: Vec<Category>,
    /// Per-cell neighbor lists; empty until the first recompute.
    adjacency: Vec<Vec<Point>>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a new `rows`×`rows` board, all cells `Empty`.
    ///
    /// `rows` is clamped to a minimum of 1.
    pub fn new(rows: i32) -> Self {
        let rows = rows.max(1);
        Self {
            rows,
            cells: vec![Category::Empty; (rows * rows) as usize],
            adjacency: Vec::new(),
            start: None,
            end: None,
        }
    }

    /// Side length of the board.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Whether `p` is on the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.rows && p.y >= 0 && p.y < self.rows
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.rows + p.x) as usize)
    }

    /// The category at `p`, or `None` if out of bounds.
    #[inline]
    pub fn category(&self, p: Point) -> Option<Category> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// The current `Start` marker, if placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The current `End` marker, if placed.
    #[inline]
    pub fn end_pos(&self) -> Option<Point> {
        self.end
    }

    /// Set the category at `p`. Out-of-bounds writes are ignored.
    ///
    /// Marker bookkeeping: placing `Start` (or `End`) demotes any previous
    /// such marker to `Empty`; writing `Obstacle` over the current `Start`
    /// or `End` cell is ignored; overwriting a marker cell with anything
    /// else forgets the marker.
    pub fn set_category(&mut self, p: Point, cat: Category) {
        let Some(i) = self.idx(p) else {
            return;
        };
        if cat == Category::Obstacle && (self.start == Some(p) || self.end == Some(p)) {
            return;
        }
        match cat {
            Category::Start => {
                if let Some(prev) = self.start.replace(p) {
                    if prev != p {
                        if let Some(j) = self.idx(prev) {
                            self.cells[j] = Category::Empty;
                        }
                    }
                }
                if self.end == Some(p) {
                    self.end = None;
                }
            }
            Category::End => {
                if let Some(prev) = self.end.replace(p) {
                    if prev != p {
                        if let Some(j) = self.idx(prev) {
                            self.cells[j] = Category::Empty;
                        }
                    }
                }
                if self.start == Some(p) {
                    self.start = None;
                }
            }
            _ => {
                if self.start == Some(p) {
                    self.start = None;
                }
                if self.end == Some(p) {
                    self.end = None;
                }
            }
        }
        self.cells[i] = cat;
    }

    /// Reset every cell to `Empty`, forgetting markers and adjacency.
    pub fn clear(&mut self) {
        self.cells.fill(Category::Empty);
        self.adjacency.clear();
        self.start = None;
        self.end = None;
    }

    /// Demote search marks (`Frontier`/`Visited`/`Path`) back to `Empty`,
    /// keeping `Start`, `End` and `Obstacle` cells. The adjacency cache is
    /// unaffected since no obstacle changed.
    pub fn clear_search(&mut self) {
        for c in self.cells.iter_mut() {
            if c.is_search_mark() {
                *c = Category::Empty;
            }
        }
    }

    /// Rebuild the cached neighbor list of every cell.
    ///
    /// Neighbors are the in-bounds, non-`Obstacle` cardinal cells in fixed
    /// priority order: down, up, right, left. The order is what makes
    /// equal-cost expansions reproducible.
    pub fn recompute_adjacency(&mut self) {
        let len = self.cells.len();
        self.adjacency.resize_with(len, Vec::new);
        for i in 0..len {
            let p = Point::new(i as i32 % self.rows, i as i32 / self.rows);
            let mut list = std::mem::take(&mut self.adjacency[i]);
            list.clear();
            for n in p.cardinal_neighbors() {
                if let Some(j) = self.idx(n) {
                    if !self.cells[j].is_obstacle() {
                        list.push(n);
                    }
                }
            }
            self.adjacency[i] = list;
        }
    }

    /// The cached neighbors of `p`, in down/up/right/left order.
    ///
    /// Returns an empty slice before the first [`Grid::recompute_adjacency`]
    /// call, and for out-of-bounds points.
    pub fn neighbors(&self, p: Point) -> &[Point] {
        match self.idx(p) {
            Some(i) if i < self.adjacency.len() => &self.adjacency[i],
            _ => EMPTY_NEIGHBORS,
        }
    }

    /// Row-major iterator over every point on the board.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let rows = self.rows;
        (0..rows).flat_map(move |y| (0..rows).map(move |x| Point::new(x, y)))
    }
}
