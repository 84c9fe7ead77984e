//! **gridfind-core** — board model for interactive grid pathfinding.
//!
//! This crate provides the data the search and its front ends share: the
//! [`Point`] geometry primitive, the cell [`Category`] enum, and the square
//! [`Grid`] board with cached obstacle-aware adjacency.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::Category;
pub use geom::Point;
pub use grid::Grid;
