//! **gridfind-search** — steppable A* shortest-path search over a
//! [`gridfind_core::Grid`].
//!
//! The engine is built for interactive visualization: a [`Search`] handle
//! performs one frontier expansion per [`Search::step`] call, updating cell
//! categories on the board so a front end can render after every step, or
//! runs to completion via [`Search::run`].
//!
//! - [`manhattan`] — the admissible, consistent heuristic for 4-way unit
//!   movement.
//! - [`Frontier`] — push-only min-queue keyed by `(f, insertion order)`,
//!   giving deterministic tie-breaking between equal-cost cells.
//! - [`Search`] — per-run state: g/f scores, predecessor links, frontier
//!   membership, and path reconstruction.

mod distance;
mod engine;
mod frontier;

pub use distance::manhattan;
pub use engine::{BeginError, Search, Status, UNREACHABLE};
pub use frontier::Frontier;
