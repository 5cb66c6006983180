//! Partitioning primitives the chunked, graph-shaped and table-shaped root
//! sources build on.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Atomic cursor over a fixed-size chunked index space.
///
/// The pull protocol for sources consumed as "take the next chunk until none
/// remain": any worker may call [`ChunkCursor::next_chunk`] repeatedly, the
/// fetch-add advance guarantees no two callers ever receive overlapping
/// ranges, and calls after exhaustion are no-ops.
pub struct ChunkCursor {
    next: AtomicUsize,
    len: usize,
    chunk_size: usize,
}

impl ChunkCursor {
    pub fn new(len: usize, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        Self {
            next: AtomicUsize::new(0),
            len,
            chunk_size,
        }
    }

    /// Claim the next chunk, or `None` once the index space is exhausted.
    pub fn next_chunk(&self) -> Option<Range<usize>> {
        // The cursor only grows, so an overshooting fetch-add past `len`
        // stays past `len` and keeps returning None.
        let start = self.next.fetch_add(self.chunk_size, Ordering::SeqCst);
        if start >= self.len {
            return None;
        }
        Some(start..self.len.min(start + self.chunk_size))
    }

    /// Are there chunks left to claim? Advisory only: a concurrent caller may
    /// take the last chunk between this check and `next_chunk`.
    pub fn has_more(&self) -> bool {
        self.next.load(Ordering::SeqCst) < self.len
    }
}

/// One-way atomic claim bit, one per node of a graph-shaped root source.
///
/// Claim marks are reset exactly once per scan session, not per traversal,
/// which is what makes repeated concurrent traversal within a session safe:
/// a node already claimed is skipped by every later visitor.
#[derive(Default)]
pub struct ClaimFlag {
    claimed: AtomicBool,
}

impl ClaimFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt the Unclaimed -> Claimed transition. True for exactly one
    /// caller between resets.
    pub fn try_claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::SeqCst)
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }

    /// Back to Unclaimed. Only the session constructor does this.
    pub fn reset(&self) {
        self.claimed.store(false, Ordering::SeqCst);
    }
}

/// Deterministic, coordination-free slice of an index space of `len` entries
/// for one worker: the partitions of all `n_workers` workers are disjoint and
/// cover the space, with sizes differing by at most one.
pub fn partition_range(len: usize, worker_id: usize, n_workers: usize) -> Range<usize> {
    assert!(
        worker_id < n_workers,
        "worker {} out of range for {} workers",
        worker_id,
        n_workers
    );
    let base = len / n_workers;
    let extra = len % n_workers;
    // The first `extra` workers take one extra entry each.
    let start = worker_id * base + worker_id.min(extra);
    let size = base + usize::from(worker_id < extra);
    start..start + size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_covers_space_without_overlap() {
        let cursor = ChunkCursor::new(103, 10);
        let mut seen = vec![false; 103];
        while let Some(range) = cursor.next_chunk() {
            for i in range {
                assert!(!seen[i], "index {} claimed twice", i);
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn cursor_is_a_noop_after_exhaustion() {
        let cursor = ChunkCursor::new(4, 8);
        assert_eq!(cursor.next_chunk(), Some(0..4));
        assert_eq!(cursor.next_chunk(), None);
        assert_eq!(cursor.next_chunk(), None);
        assert!(!cursor.has_more());
    }

    #[test]
    fn cursor_over_empty_space() {
        let cursor = ChunkCursor::new(0, 16);
        assert_eq!(cursor.next_chunk(), None);
    }

    #[test]
    fn claim_flag_is_one_way_until_reset() {
        let flag = ClaimFlag::new();
        assert!(flag.try_claim());
        assert!(!flag.try_claim());
        assert!(flag.is_claimed());
        flag.reset();
        assert!(flag.try_claim());
    }

    #[test]
    fn partitions_are_disjoint_and_covering() {
        for len in [0, 1, 7, 64, 1001] {
            for n_workers in [1, 2, 3, 8] {
                let mut covered = vec![false; len];
                for worker_id in 0..n_workers {
                    for i in partition_range(len, worker_id, n_workers) {
                        assert!(!covered[i]);
                        covered[i] = true;
                    }
                }
                assert!(covered.iter().all(|&v| v), "len {} workers {}", len, n_workers);
            }
        }
    }

    #[test]
    fn partition_sizes_differ_by_at_most_one() {
        let sizes: Vec<usize> = (0..4).map(|w| partition_range(10, w, 4).len()).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 10);
        assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn partition_checks_worker_id() {
        partition_range(10, 4, 4);
    }
}
