//! The steppable A* search engine.

use std::fmt;

use gridfind_core::{Category, Grid, Point};

use crate::distance::manhattan;
use crate::frontier::Frontier;

/// Sentinel g-score meaning "no path discovered yet".
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

/// Outcome of a search step (or of a whole run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The frontier still holds candidates; the goal has not been reached.
    InProgress,
    /// The goal was reached; the path is available.
    Succeeded,
    /// The frontier emptied without reaching the goal: no path exists.
    Failed,
}

/// Why a search could not be started. No search state is created when
/// `begin` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginError {
    /// The board has no `Start` marker.
    MissingStart,
    /// The board has no `End` marker.
    MissingEnd,
    /// A given endpoint lies outside the board.
    OutOfBounds(Point),
}

impl fmt::Display for BeginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeginError::MissingStart => write!(f, "no start cell set"),
            BeginError::MissingEnd => write!(f, "no end cell set"),
            BeginError::OutOfBounds(p) => write!(f, "endpoint {p} is outside the board"),
        }
    }
}

impl std::error::Error for BeginError {}

/// One A* run over a board: the frontier, per-cell scores and predecessor
/// links, driven step by step.
///
/// The engine owns no rendering concern. A driver calls [`Search::step`]
/// (or [`Search::run`]) with the board it showed the user, then reads cell
/// categories back to display the expansion; between steps it is free to
/// stop calling, which is all the cancellation there is.
///
/// Cell categories move `Unseen → Frontier → Visited` over the run, plus a
/// final pass marking the reconstructed path `Path`. `Start` and `End`
/// cells keep their categories throughout.
#[derive(Debug)]
pub struct Search {
    start: Point,
    end: Point,
    rows: i32,
    /// Best known cost from start, `UNREACHABLE` when undiscovered.
    /// Monotonically non-increasing per cell once set.
    g: Vec<i32>,
    /// g plus the heuristic estimate to the goal.
    f: Vec<i32>,
    /// Predecessor index on the best known path, `NO_PARENT` for none.
    parent: Vec<usize>,
    /// Frontier membership, mirrored for O(1) checks; popped entries that
    /// are no longer members are stale duplicates and get skipped.
    open: Vec<bool>,
    frontier: Frontier,
    status: Status,
    steps: u32,
    path: Vec<Point>,
    nbuf: Vec<Point>,
}

impl Search {
    /// Start a run from `start` to `end` on `grid`.
    ///
    /// The caller is expected to have called [`Grid::recompute_adjacency`]
    /// since the last obstacle edit; `begin` does not do it, so a stale
    /// cache means a search over the old obstacle layout.
    pub fn begin(grid: &Grid, start: Point, end: Point) -> Result<Search, BeginError> {
        if !grid.contains(start) {
            return Err(BeginError::OutOfBounds(start));
        }
        if !grid.contains(end) {
            return Err(BeginError::OutOfBounds(end));
        }
        let rows = grid.rows();
        let len = (rows * rows) as usize;
        let mut search = Search {
            start,
            end,
            rows,
            g: vec![UNREACHABLE; len],
            f: vec![UNREACHABLE; len],
            parent: vec![NO_PARENT; len],
            open: vec![false; len],
            frontier: Frontier::new(),
            status: Status::InProgress,
            steps: 0,
            path: Vec::new(),
            nbuf: Vec::with_capacity(4),
        };
        let si = search.idx(start);
        search.g[si] = 0;
        search.f[si] = manhattan(start, end);
        search.frontier.push(search.f[si], start);
        search.open[si] = true;
        log::debug!("search begin: start={start} end={end} rows={rows}");
        Ok(search)
    }

    /// Start a run between the board's `Start` and `End` markers.
    pub fn begin_marked(grid: &Grid) -> Result<Search, BeginError> {
        let start = grid.start().ok_or(BeginError::MissingStart)?;
        let end = grid.end_pos().ok_or(BeginError::MissingEnd)?;
        Search::begin(grid, start, end)
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        (p.y * self.rows + p.x) as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new(idx as i32 % self.rows, idx as i32 / self.rows)
    }

    /// Perform one expansion: pop the best live frontier cell and relax its
    /// neighbors, updating cell categories on `grid` as it goes.
    ///
    /// Stale frontier duplicates are skipped without consuming the step.
    /// Terminal statuses are sticky: stepping a finished search does
    /// nothing and returns the same status.
    pub fn step(&mut self, grid: &mut Grid) -> Status {
        if self.status != Status::InProgress {
            return self.status;
        }
        loop {
            let Some(current) = self.frontier.pop_min() else {
                self.status = Status::Failed;
                log::debug!("search failed after {} steps: frontier exhausted", self.steps);
                return self.status;
            };
            let ci = self.idx(current);
            if !self.open[ci] {
                // Stale duplicate of an already-finalized cell.
                continue;
            }
            self.open[ci] = false;
            self.steps += 1;

            if current == self.end {
                self.reconstruct(grid);
                self.status = Status::Succeeded;
                log::debug!(
                    "search succeeded after {} steps, path length {}",
                    self.steps,
                    self.path.len()
                );
                return self.status;
            }

            let current_g = self.g[ci];
            let mut nbuf = std::mem::take(&mut self.nbuf);
            nbuf.clear();
            nbuf.extend_from_slice(grid.neighbors(current));
            for &np in nbuf.iter() {
                let ni = self.idx(np);
                let tentative_g = current_g + 1;
                if tentative_g >= self.g[ni] {
                    continue;
                }
                self.g[ni] = tentative_g;
                self.f[ni] = tentative_g + manhattan(np, self.end);
                self.parent[ni] = ci;
                if !self.open[ni] {
                    self.frontier.push(self.f[ni], np);
                    self.open[ni] = true;
                    if np != self.start && np != self.end {
                        grid.set_category(np, Category::Frontier);
                    }
                }
                // An already-open neighbor keeps its queued entry; the
                // improved scores take effect when it is popped.
            }
            self.nbuf = nbuf;

            if current != self.start {
                grid.set_category(current, Category::Visited);
            }
            if self.frontier.is_empty() {
                // Nothing left to expand: the loop would exit here.
                self.status = Status::Failed;
                log::debug!("search failed after {} steps: frontier exhausted", self.steps);
            }
            return self.status;
        }
    }

    /// Step until the run terminates, returning the terminal status.
    pub fn run(&mut self, grid: &mut Grid) -> Status {
        loop {
            let status = self.step(grid);
            if status != Status::InProgress {
                return status;
            }
        }
    }

    /// Current status of the run.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of live expansions performed so far.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// The reconstructed path, ordered from the cell after start up to and
    /// including end. `Some` only once the run has succeeded; empty when
    /// start equals end.
    pub fn path(&self) -> Option<&[Point]> {
        match self.status {
            Status::Succeeded => Some(&self.path),
            _ => None,
        }
    }

    /// Follow predecessor links back from the goal and mark the path on
    /// the board. The start cell is never re-marked; the end cell keeps
    /// (or regains) its `End` category.
    fn reconstruct(&mut self, grid: &mut Grid) {
        let mut trace = Vec::new();
        let mut ci = self.idx(self.end);
        while ci != NO_PARENT {
            trace.push(self.point(ci));
            ci = self.parent[ci];
        }
        trace.reverse();
        if trace.first() == Some(&self.start) {
            trace.remove(0);
        }
        for &p in &trace {
            if p != self.end {
                grid.set_category(p, Category::Path);
            }
        }
        if self.end != self.start {
            grid.set_category(self.end, Category::End);
        }
        self.path = trace;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn grid_with(rows: i32, obstacles: &[Point]) -> Grid {
        let mut g = Grid::new(rows);
        for &p in obstacles {
            g.set_category(p, Category::Obstacle);
        }
        g.recompute_adjacency();
        g
    }

    /// Reference shortest-path length by breadth-first search, using the
    /// same cached adjacency as the engine.
    fn bfs_distance(grid: &Grid, start: Point, end: Point) -> Option<i32> {
        let rows = grid.rows();
        let idx = |p: Point| (p.y * rows + p.x) as usize;
        let mut dist = vec![UNREACHABLE; (rows * rows) as usize];
        let mut queue = VecDeque::new();
        dist[idx(start)] = 0;
        queue.push_back(start);
        while let Some(p) = queue.pop_front() {
            if p == end {
                return Some(dist[idx(p)]);
            }
            for &n in grid.neighbors(p) {
                if dist[idx(n)] == UNREACHABLE {
                    dist[idx(n)] = dist[idx(p)] + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    #[test]
    fn begin_rejects_out_of_bounds() {
        let g = grid_with(4, &[]);
        let err = Search::begin(&g, Point::new(9, 0), Point::new(1, 1)).unwrap_err();
        assert_eq!(err, BeginError::OutOfBounds(Point::new(9, 0)));
        let err = Search::begin(&g, Point::new(0, 0), Point::new(0, -1)).unwrap_err();
        assert_eq!(err, BeginError::OutOfBounds(Point::new(0, -1)));
    }

    #[test]
    fn begin_marked_requires_markers() {
        let mut g = grid_with(4, &[]);
        assert_eq!(
            Search::begin_marked(&g).unwrap_err(),
            BeginError::MissingStart
        );
        g.set_category(Point::new(0, 0), Category::Start);
        assert_eq!(Search::begin_marked(&g).unwrap_err(), BeginError::MissingEnd);
        g.set_category(Point::new(3, 3), Category::End);
        assert!(Search::begin_marked(&g).is_ok());
    }

    #[test]
    fn trivial_start_equals_end() {
        let mut g = grid_with(4, &[]);
        let p = Point::new(2, 2);
        let mut search = Search::begin(&g, p, p).unwrap();
        assert_eq!(search.step(&mut g), Status::Succeeded);
        assert_eq!(search.steps(), 1);
        assert_eq!(search.path(), Some(&[][..]));
    }

    #[test]
    fn straight_line_path() {
        let mut g = grid_with(5, &[]);
        let start = Point::new(0, 0);
        let end = Point::new(4, 0);
        let mut search = Search::begin(&g, start, end).unwrap();
        assert_eq!(search.run(&mut g), Status::Succeeded);
        let path = search.path().unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&end));
        assert!(!path.contains(&start));
        // Consecutive path cells are adjacent.
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
        }
    }

    #[test]
    fn enclosed_start_fails_after_exactly_one_step() {
        let walls = [
            Point::new(1, 0),
            Point::new(0, 1),
            Point::new(1, 2),
            Point::new(2, 1),
        ];
        // Start at (1,1) boxed in on all four sides.
        let mut g = grid_with(4, &walls);
        let mut search = Search::begin(&g, Point::new(1, 1), Point::new(3, 3)).unwrap();
        assert_eq!(search.step(&mut g), Status::Failed);
        assert_eq!(search.steps(), 1);
        assert_eq!(search.path(), None);
    }

    #[test]
    fn wall_with_opening_scenario() {
        // 5×5 board, wall down column 2 except an opening at row 2.
        let walls = [
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 3),
            Point::new(2, 4),
        ];
        let mut g = grid_with(5, &walls);
        let start = Point::new(0, 0);
        let end = Point::new(4, 4);
        g.set_category(start, Category::Start);
        g.set_category(end, Category::End);
        g.recompute_adjacency();

        let mut search = Search::begin_marked(&g).unwrap();
        assert_eq!(search.run(&mut g), Status::Succeeded);
        let path = search.path().unwrap();
        // Manhattan-optimal despite the wall: the opening is on the way.
        assert_eq!(path.len(), 8);
        assert!(path.contains(&Point::new(2, 2)));
        assert_eq!(path.last(), Some(&end));
        assert!(!path.contains(&start));
    }

    #[test]
    fn start_and_end_categories_survive_the_run() {
        let mut g = grid_with(5, &[]);
        let start = Point::new(0, 0);
        let end = Point::new(4, 4);
        g.set_category(start, Category::Start);
        g.set_category(end, Category::End);
        g.recompute_adjacency();

        let mut search = Search::begin_marked(&g).unwrap();
        // Check at every intermediate state, not just at the end.
        loop {
            let status = search.step(&mut g);
            assert_eq!(g.category(start), Some(Category::Start));
            assert_eq!(g.category(end), Some(Category::End));
            if status != Status::InProgress {
                break;
            }
        }
        // Path cells were marked, and only between the endpoints.
        let path = search.path().unwrap().to_vec();
        for p in path.iter().filter(|&&p| p != end) {
            assert_eq!(g.category(*p), Some(Category::Path));
        }
    }

    #[test]
    fn no_path_when_fully_walled_off() {
        // Full wall, no opening.
        let walls: Vec<Point> = (0..5).map(|y| Point::new(2, y)).collect();
        let mut g = grid_with(5, &walls);
        let mut search = Search::begin(&g, Point::new(0, 2), Point::new(4, 2)).unwrap();
        assert_eq!(search.run(&mut g), Status::Failed);
        assert_eq!(search.path(), None);
    }

    #[test]
    fn terminal_status_is_sticky() {
        let mut g = grid_with(3, &[]);
        let mut search = Search::begin(&g, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(search.run(&mut g), Status::Succeeded);
        let steps = search.steps();
        assert_eq!(search.step(&mut g), Status::Succeeded);
        assert_eq!(search.steps(), steps);
    }

    #[test]
    fn gscore_is_monotonically_nonincreasing() {
        let walls = [Point::new(1, 1), Point::new(2, 1), Point::new(3, 2)];
        let mut g = grid_with(6, &walls);
        let mut search = Search::begin(&g, Point::new(0, 0), Point::new(5, 5)).unwrap();
        let mut best = search.g.clone();
        while search.step(&mut g) == Status::InProgress {
            for (i, &gv) in search.g.iter().enumerate() {
                assert!(gv <= best[i], "g-score increased at index {i}");
                best[i] = gv;
            }
        }
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let walls = [
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(3, 3),
            Point::new(3, 4),
            Point::new(4, 2),
        ];
        let trace = || {
            let mut g = grid_with(6, &walls);
            let mut search = Search::begin(&g, Point::new(0, 0), Point::new(5, 5)).unwrap();
            let mut statuses = Vec::new();
            loop {
                let s = search.step(&mut g);
                statuses.push(s);
                if s != Status::InProgress {
                    break;
                }
            }
            (statuses, search.path().map(<[Point]>::to_vec))
        };
        assert_eq!(trace(), trace());
    }

    #[test]
    fn path_length_matches_bfs_on_random_boards() {
        use rand::rngs::StdRng;
        use rand::{RngExt, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        for trial in 0..30 {
            let rows = 12;
            let start = Point::new(0, 0);
            let end = Point::new(rows - 1, rows - 1);
            let mut g = Grid::new(rows);
            for y in 0..rows {
                for x in 0..rows {
                    let p = Point::new(x, y);
                    if p != start && p != end && rng.random_range(0..10) < 3 {
                        g.set_category(p, Category::Obstacle);
                    }
                }
            }
            g.recompute_adjacency();

            let expected = bfs_distance(&g, start, end);
            let mut search = Search::begin(&g, start, end).unwrap();
            match search.run(&mut g) {
                Status::Succeeded => {
                    let got = search.path().unwrap().len() as i32;
                    assert_eq!(Some(got), expected, "trial {trial}");
                }
                Status::Failed => {
                    assert_eq!(expected, None, "trial {trial}");
                }
                Status::InProgress => unreachable!(),
            }
        }
    }
}
