//! Root processing for the evacuation phase.

use crate::root::claim_set::{RootTask, EVACUATION_TASKS};
use crate::root::session::{RootContext, RootScanSession};
use crate::root::strong::GLOBAL_SINGLETONS;
use crate::root::timing::{Phase, RootKind};
use crate::vm::scanning::*;

/// Orchestrates the root scan of the evacuation phase. Differs from the
/// marking-phase processor in three ways: the pending-cleanup-lock pre-pass
/// runs before anything else, code roots are restricted to units referencing
/// the condemned region, and every weak source is visited as if live:
/// liveness was finalized by the preceding marking phase.
pub struct EvacuationRootProcessor<'a> {
    session: RootScanSession<'a>,
}

impl<'a> EvacuationRootProcessor<'a> {
    pub fn new(ctx: RootContext<'a>, n_workers: usize, phase: Phase) -> Self {
        Self {
            session: RootScanSession::new(ctx, n_workers, phase, EVACUATION_TASKS),
        }
    }

    pub fn session(&self) -> &RootScanSession<'a> {
        &self.session
    }

    /// One worker's share of the evacuation root scan.
    pub fn process_evacuate_roots(
        &self,
        refs: &mut dyn ReferenceVisitor,
        class_loaders: &mut dyn ClassLoaderVisitor,
        code: Option<&mut dyn CodeVisitor>,
        worker_id: usize,
    ) {
        let ctx = self.session.ctx();

        {
            let _t = self.session.timer(RootKind::PendingLockRoots, worker_id);
            self.evacuate_pending_lock(worker_id);
        }

        {
            let _t = self.session.timer(RootKind::ClassLoaderRoots, worker_id);
            ctx.class_loaders.traverse(class_loaders, true);
        }

        {
            let _t = self.session.timer(RootKind::ThreadRoots, worker_id);
            ctx.threads.parallel_traverse(refs, None, None, None);
        }

        if let Some(code) = code {
            // Only code referencing the condemned region needs its embedded
            // references updated; the full table would be pause-time waste.
            let _t = self.session.timer(RootKind::CodeRoots, worker_id);
            ctx.code_roots.condemned_only_traverse(code);
        }

        let claims = self.session.claims();
        for &(root, task, kind) in GLOBAL_SINGLETONS {
            if claims.try_claim(task) {
                let _t = self.session.timer(kind, worker_id);
                ctx.globals.traverse(root, refs);
            }
        }
        if claims.try_claim(RootTask::NativeHandles) {
            let _t = self.session.timer(RootKind::NativeHandleRoots, worker_id);
            ctx.native_handles.traverse_strong(refs);
        }
        if claims.try_claim(RootTask::WeakNativeHandles) {
            let _t = self.session.timer(RootKind::WeakNativeHandleRoots, worker_id);
            ctx.native_handles.traverse_weak(&AlwaysAlive, refs);
        }
        if ctx.dedup.enabled() {
            // Self-partitioning through the claim marks the session cleared.
            let _t = self.session.timer(RootKind::DedupRoots, worker_id);
            ctx.dedup.traverse(refs);
        }
        {
            let _t = self.session.timer(RootKind::MonitorRoots, worker_id);
            while ctx.monitors.next_chunk(refs) {}
        }
        {
            let _t = self.session.timer(RootKind::InternTableRoots, worker_id);
            ctx.interned
                .traverse_or_unlink(&AlwaysAlive, refs, worker_id, self.session.n_workers());
        }

        claims.mark_worker_done();
    }

    /// Evacuate the pending-cleanup-lock object before any other root, so
    /// the runtime's dedicated cleanup thread never has to: that thread
    /// executes a write barrier on this object while setting up collector
    /// operations, and an allocation failure during its own evacuation
    /// attempt there can deadlock the cycle.
    ///
    /// Every worker runs this check; the forwarding installation inside
    /// `try_evacuate` is a compare-and-set, so at most one physical copy is
    /// made. An allocation failure here is tolerated: the object stays
    /// unforwarded and the collector's deferred recovery path picks it up.
    fn evacuate_pending_lock(&self, worker_id: usize) {
        let heap = self.session.ctx().heap;
        debug_assert!(heap.evacuation_in_progress(), "only when evacuating");
        let Some(pll) = heap.pending_cleanup_lock() else {
            return;
        };
        if heap.in_condemned_region(pll) && heap.resolve_forwarded(pll) == pll {
            match heap.try_evacuate(pll) {
                Ok(fwd) => trace!("worker {}: pending lock {} -> {}", worker_id, pll, fwd),
                Err(oom) => warn!(
                    "worker {}: pending lock {} not evacuated ({}); deferring to collector recovery",
                    worker_id, pll, oom
                ),
            }
        }
    }
}
