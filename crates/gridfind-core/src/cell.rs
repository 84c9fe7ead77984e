//! Cell categories: the role a board cell currently plays.

use std::fmt;

/// The role of a single cell on the board.
///
/// User interaction assigns `Start`, `End` and `Obstacle`; a search run
/// assigns `Frontier`, `Visited` and `Path`. Rendering is a separate
/// concern: front ends map categories to colors however they like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Unexplored, unmarked cell.
    #[default]
    Empty,
    /// The search origin. At most one per board.
    Start,
    /// The search goal. At most one per board.
    End,
    /// A wall; excluded from adjacency.
    Obstacle,
    /// Discovered but not yet finalized by the search.
    Frontier,
    /// Finalized by the search.
    Visited,
    /// On the reconstructed shortest path.
    Path,
}

impl Category {
    /// Whether this cell blocks movement.
    #[inline]
    pub const fn is_obstacle(self) -> bool {
        matches!(self, Category::Obstacle)
    }

    /// Whether this cell is one of the two endpoint markers.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Category::Start | Category::End)
    }

    /// Whether this category was produced by a search run (as opposed to
    /// user edits).
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Category::Frontier | Category::Visited | Category::Path)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Empty => "empty",
            Category::Start => "start",
            Category::End => "end",
            Category::Obstacle => "obstacle",
            Category::Frontier => "frontier",
            Category::Visited => "visited",
            Category::Path => "path",
        };
        f.write_str(s)
    }
}
