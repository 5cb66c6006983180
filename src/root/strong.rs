//! Root processing for the marking phases.

use crate::root::claim_set::{RootTask, STRONG_SCAN_TASKS};
use crate::root::session::{RootContext, RootScanSession};
use crate::root::timing::{Phase, RootKind};
use crate::vm::roots::GlobalRoot;
use crate::vm::scanning::*;

/// The (provider, claim slot, timing label) triple of every claimable
/// singleton strong source, in visitation order.
pub(super) const GLOBAL_SINGLETONS: &[(GlobalRoot, RootTask, RootKind)] = &[
    (
        GlobalRoot::RuntimeObjects,
        RootTask::RuntimeObjects,
        RootKind::RuntimeObjectRoots,
    ),
    (
        GlobalRoot::ProfilerSamples,
        RootTask::ProfilerSamples,
        RootKind::ProfilerRoots,
    ),
    (
        GlobalRoot::ManagementAgent,
        RootTask::ManagementAgent,
        RootKind::ManagementRoots,
    ),
    (
        GlobalRoot::DebugAgent,
        RootTask::DebugAgent,
        RootKind::DebugAgentRoots,
    ),
    (
        GlobalRoot::Dictionary,
        RootTask::Dictionary,
        RootKind::DictionaryRoots,
    ),
];

/// Orchestrates the root scan of the marking phases. Created once per phase,
/// shared by reference among the phase's workers; each worker calls exactly
/// one of the `process_*` entry points with its worker id.
pub struct StrongRootProcessor<'a> {
    session: RootScanSession<'a>,
}

impl<'a> StrongRootProcessor<'a> {
    pub fn new(ctx: RootContext<'a>, n_workers: usize, phase: Phase) -> Self {
        Self {
            session: RootScanSession::new(ctx, n_workers, phase, STRONG_SCAN_TASKS),
        }
    }

    pub fn session(&self) -> &RootScanSession<'a> {
        &self.session
    }

    /// Strong roots only: class-loader graph, thread stacks, and the
    /// claimable strong singletons. Weak sources are skipped entirely.
    pub fn process_strong_roots(
        &self,
        refs: &mut dyn ReferenceVisitor,
        class_loaders: &mut dyn ClassLoaderVisitor,
        code: &mut dyn CodeVisitor,
        threads: Option<&mut dyn ThreadVisitor>,
        worker_id: usize,
    ) {
        self.process_java_roots(refs, class_loaders, false, code, threads, worker_id);
        self.process_vm_strong_roots(refs, worker_id);
        self.session.claims().mark_worker_done();
    }

    /// Strong and weak roots, with every weak reference treated as live.
    /// Returns this worker's intern-table `(processed, removed)` counts.
    pub fn process_all_roots(
        &self,
        refs: &mut dyn ReferenceVisitor,
        class_loaders: &mut dyn ClassLoaderVisitor,
        code: &mut dyn CodeVisitor,
        threads: Option<&mut dyn ThreadVisitor>,
        worker_id: usize,
    ) -> (usize, usize) {
        self.process_java_roots(refs, class_loaders, true, code, threads, worker_id);
        self.process_vm_strong_roots(refs, worker_id);
        let counts = self.process_vm_weak_roots(refs, &AlwaysAlive, worker_id);
        self.session.claims().mark_worker_done();
        counts
    }

    /// The class-loader metadata graph, then the thread stacks. The graph
    /// comes first so each thread's scan finds its pinned loaders claimed.
    pub fn process_java_roots(
        &self,
        refs: &mut dyn ReferenceVisitor,
        class_loaders: &mut dyn ClassLoaderVisitor,
        weak_class_loaders: bool,
        code: &mut dyn CodeVisitor,
        threads: Option<&mut dyn ThreadVisitor>,
        worker_id: usize,
    ) {
        let ctx = self.session.ctx();
        {
            let _t = self.session.timer(RootKind::ClassLoaderRoots, worker_id);
            ctx.class_loaders.traverse(class_loaders, weak_class_loaders);
        }
        {
            let _t = self.session.timer(RootKind::ThreadRoots, worker_id);
            ctx.threads
                .parallel_traverse(refs, Some(class_loaders), Some(code), threads);
        }
    }

    /// The claimable singleton sources, plus the weak, chunked and
    /// partitioned tables when a weak visitor is supplied.
    pub fn process_vm_roots(
        &self,
        strong: &mut dyn ReferenceVisitor,
        weak: Option<&mut dyn ReferenceVisitor>,
        is_alive: &dyn Liveness,
        worker_id: usize,
    ) -> (usize, usize) {
        self.process_vm_strong_roots(strong, worker_id);
        match weak {
            Some(weak) => self.process_vm_weak_roots(weak, is_alive, worker_id),
            None => (0, 0),
        }
    }

    /// Each singleton strong source, under its claim slot.
    pub fn process_vm_strong_roots(&self, refs: &mut dyn ReferenceVisitor, worker_id: usize) {
        let ctx = self.session.ctx();
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
    }

    /// The weak sources: claimable weak singletons, the self-coordinating
    /// monitor chunk loop, and this worker's intern-table partition with
    /// unlink-if-dead semantics. Returns `(processed, removed)` for the
    /// partition.
    pub fn process_vm_weak_roots(
        &self,
        weak: &mut dyn ReferenceVisitor,
        is_alive: &dyn Liveness,
        worker_id: usize,
    ) -> (usize, usize) {
        let ctx = self.session.ctx();
        let claims = self.session.claims();
        if claims.try_claim(RootTask::WeakNativeHandles) {
            let _t = self.session.timer(RootKind::WeakNativeHandleRoots, worker_id);
            ctx.native_handles.traverse_weak(is_alive, weak);
        }
        if ctx.dedup.enabled() && claims.try_claim(RootTask::Deduplication) {
            let _t = self.session.timer(RootKind::DedupRoots, worker_id);
            ctx.dedup.traverse(weak);
        }
        {
            // No claim slot: the table's cursor is self-coordinating, every
            // worker pulls chunks until none remain.
            let _t = self.session.timer(RootKind::MonitorRoots, worker_id);
            while ctx.monitors.next_chunk(weak) {}
        }
        let _t = self.session.timer(RootKind::InternTableRoots, worker_id);
        let (processed, removed) =
            ctx.interned
                .traverse_or_unlink(is_alive, weak, worker_id, self.session.n_workers());
        debug!(
            "worker {}: intern table partition processed {}, removed {}",
            worker_id, processed, removed
        );
        (processed, removed)
    }

    /// Fully serial fallback visiting every source, strong and weak, with
    /// weak references unconditionally treated as live and the code table
    /// unfiltered.
    ///
    /// Thread stacks are visited last, so a diagnostic consistency check
    /// attributes a dangling reference to the earliest non-thread source
    /// rather than to an incidental thread-local alias.
    pub fn process_all_roots_slow(
        &self,
        refs: &mut dyn ReferenceVisitor,
        class_loaders: &mut dyn ClassLoaderVisitor,
        code: &mut dyn CodeVisitor,
    ) {
        debug!("serial root scan for {}", self.session.phase().name());
        let ctx = self.session.ctx();

        ctx.code_roots.full_traverse(code);
        ctx.class_loaders.traverse(class_loaders, true);
        for &(root, _, _) in GLOBAL_SINGLETONS {
            ctx.globals.traverse(root, refs);
        }
        ctx.native_handles.traverse_strong(refs);
        ctx.native_handles.traverse_weak(&AlwaysAlive, refs);
        while ctx.monitors.next_chunk(refs) {}
        ctx.interned.traverse_or_unlink(&AlwaysAlive, refs, 0, 1);
        if ctx.dedup.enabled() {
            ctx.dedup.traverse(refs);
        }

        // Thread roots last. See the doc comment.
        ctx.threads
            .parallel_traverse(refs, Some(class_loaders), Some(code), None);

        self.session.claims().mark_worker_done();
    }
}
