//! Scoped bracketing of one phase's root scan.

use crate::heap::RegionedHeap;
use crate::root::claim_set::{ClaimSet, RootTask};
use crate::root::timing::{Phase, RootKind, TimingAggregator, WorkerTimer};
use crate::vm::roots::*;

/// References to every collaborator a root scan enumerates, bundled so the
/// phase driver hands processors a single value. Plain shared references: the
/// runtime owns all of these, the scan engine only borrows them for the
/// session's lifetime.
#[derive(Copy, Clone)]
pub struct RootContext<'a> {
    pub heap: &'a dyn RegionedHeap,
    pub class_loaders: &'a dyn ClassLoaderGraph,
    pub threads: &'a dyn ThreadSet,
    pub code_roots: &'a dyn CodeRootTable,
    pub native_handles: &'a dyn NativeHandleTable,
    pub globals: &'a dyn GlobalRoots,
    pub monitors: &'a dyn MonitorTable,
    pub interned: &'a dyn InternTable,
    pub dedup: &'a dyn DeduplicationTable,
    pub timing: &'a dyn TimingAggregator,
}

/// One phase's root scan: owns the worker count and the claim set sized for
/// the scan variant, ties construction to the safepoint precondition, and
/// records the phase's `[start, end)` timing interval.
///
/// Acquired before any worker begins scanning, dropped exactly once after the
/// last worker has signalled completion (or after the outer collector aborts
/// the cycle). Drop always records phase end, on every exit path.
pub struct RootScanSession<'a> {
    ctx: RootContext<'a>,
    phase: Phase,
    claims: ClaimSet,
}

impl<'a> RootScanSession<'a> {
    pub fn new(
        ctx: RootContext<'a>,
        n_workers: usize,
        phase: Phase,
        tasks: &[RootTask],
    ) -> Self {
        assert!(
            !phase.requires_safepoint() || ctx.heap.at_safepoint(),
            "root scan for {} outside a safepoint",
            phase.name()
        );
        debug!(
            "root scan session: phase {}, {} workers",
            phase.name(),
            n_workers
        );
        ctx.timing.record_workers_start(phase);
        // Claim marks are per session, never per traversal.
        ctx.class_loaders.reset_claims();
        if ctx.dedup.enabled() {
            ctx.dedup.clear_claims();
        }
        Self {
            ctx,
            phase,
            claims: ClaimSet::new(n_workers, tasks),
        }
    }

    pub fn ctx(&self) -> &RootContext<'a> {
        &self.ctx
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn n_workers(&self) -> usize {
        self.claims.n_workers()
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Scoped timer for `worker_id`'s time in `source`.
    pub fn timer(&self, source: RootKind, worker_id: usize) -> WorkerTimer<'a> {
        WorkerTimer::new(self.ctx.timing, self.phase, source, worker_id)
    }
}

impl<'a> Drop for RootScanSession<'a> {
    fn drop(&mut self) {
        if !self.claims.all_done() {
            // Legal only when the outer collector aborts the cycle.
            debug!(
                "root scan session for {} released before worker completion",
                self.phase.name()
            );
        }
        self.ctx.timing.record_workers_end(self.phase);
    }
}
