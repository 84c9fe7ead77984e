use std::collections::BinaryHeap;

use gridfind_core::Point;

/// Heap entry keyed by `(f, seq)`. `seq` is the insertion sequence number,
/// which breaks ties between equal-cost cells deterministically
/// (first-inserted-first-expanded). Keys are unique since `seq` is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    f: i32,
    seq: u64,
    pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (a max-heap) pops the smallest key first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of candidate cells, ordered by estimated total cost
/// with stable insertion-order tie-breaking.
///
/// Push-only: entries are never updated in place. A cell may be pushed
/// again with a different cost; stale entries are tolerated and it is the
/// caller's membership/score state that decides whether a popped cell is
/// still live.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` with estimated total cost `f`.
    pub fn push(&mut self, f: i32, pos: Point) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { f, seq, pos });
    }

    /// Remove and return the cell with the smallest `(f, seq)` key.
    pub fn pop_min(&mut self) -> Option<Point> {
        self.heap.pop().map(|e| e.pos)
    }

    /// Whether no entries are queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop all entries. The sequence counter keeps counting.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
