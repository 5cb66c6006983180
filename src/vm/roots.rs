//! Enumeration contracts of the runtime's root sources.
//!
//! Each trait is the narrow surface of one root collection inside the
//! collaborating runtime. The implementations own the data and any internal
//! claiming; the contracts below state what concurrency the scan engine will
//! subject them to. All collaborators are shared by reference among the
//! session's workers, hence the `Sync` bounds.

use strum_macros::IntoStaticStr;

use crate::vm::scanning::*;

/// The class-loader metadata graph: possibly-cyclic nodes, each carrying an
/// atomic claim mark.
///
/// `reset_claims` is called exactly once per scan session, at session
/// construction, under the safepoint. After the reset, `traverse` may be
/// called concurrently by every worker; each reachable node must be visited
/// by exactly one of them.
pub trait ClassLoaderGraph: Sync {
    /// Reset every node's claim mark. Once per session, never per traversal.
    fn reset_claims(&self);
    /// Traverse the graph, dispatching each unclaimed node to `visitor`.
    /// Loaders held only weakly are skipped unless `include_weak` is set.
    fn traverse(&self, visitor: &mut dyn ClassLoaderVisitor, include_weak: bool);
}

/// The set of mutator threads, self-partitioning across concurrent callers:
/// each thread's stack is scanned by exactly one of the workers that call
/// `parallel_traverse`, surfacing that thread's references plus the
/// class-loaders and executable units its frames pin.
pub trait ThreadSet: Sync {
    fn parallel_traverse(
        &self,
        refs: &mut dyn ReferenceVisitor,
        class_loaders: Option<&mut dyn ClassLoaderVisitor>,
        code: Option<&mut dyn CodeVisitor>,
        threads: Option<&mut dyn ThreadVisitor>,
    );
}

/// The table of compiled executable units holding embedded references.
pub trait CodeRootTable: Sync {
    /// Visit every unit. Self-partitioning across concurrent callers.
    fn full_traverse(&self, code: &mut dyn CodeVisitor);
    /// Visit only units referencing the condemned region. Self-partitioning
    /// across concurrent callers.
    fn condemned_only_traverse(&self, code: &mut dyn CodeVisitor);
}

/// The runtime's native handle table: strong handles plus a weak block whose
/// dead entries may be unlinked.
pub trait NativeHandleTable: Sync {
    fn traverse_strong(&self, refs: &mut dyn ReferenceVisitor);
    /// Visit weak handles whose referent `is_alive`; the rest may be cleared.
    fn traverse_weak(&self, is_alive: &dyn Liveness, refs: &mut dyn ReferenceVisitor);
}

/// Names of the fixed singleton root providers. Each is one logical
/// enumeration guarded by one claim slot per session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, IntoStaticStr)]
pub enum GlobalRoot {
    /// Well-known runtime objects (primordial classes, canonical exceptions).
    RuntimeObjects,
    /// The profiler's sample tables.
    ProfilerSamples,
    /// The management agent's object table.
    ManagementAgent,
    /// The debug agent's export table.
    DebugAgent,
    /// The symbol and class dictionary.
    Dictionary,
}

/// The fixed small set of named singleton providers.
pub trait GlobalRoots: Sync {
    /// Visit every reference held by `root`. Called at most once per session
    /// per provider, by whichever worker claims it.
    fn traverse(&self, root: GlobalRoot, refs: &mut dyn ReferenceVisitor);
}

/// The monitor/synchronizer table, consumed in chunks through an internal
/// atomic cursor.
pub trait MonitorTable: Sync {
    /// Visit the next unprocessed chunk. Returns whether more chunks remain;
    /// callers loop until `false`. Safe to call concurrently and after
    /// exhaustion (a no-op returning `false`).
    fn next_chunk(&self, refs: &mut dyn ReferenceVisitor) -> bool;
}

/// The interned-string table: an index space partitioned deterministically by
/// `(worker_id, n_workers)`, so concurrent callers with distinct worker ids
/// never touch the same entry.
pub trait InternTable: Sync {
    /// Visit live entries of this worker's partition and unlink dead ones.
    /// Returns `(processed, removed)` for the partition.
    fn traverse_or_unlink(
        &self,
        is_alive: &dyn Liveness,
        refs: &mut dyn ReferenceVisitor,
        worker_id: usize,
        n_workers: usize,
    ) -> (usize, usize);
}

/// The optional string deduplication table. When the subsystem is disabled
/// the table is never touched.
pub trait DeduplicationTable: Sync {
    fn enabled(&self) -> bool;
    /// Reset the table's internal claim marks. Once per session.
    fn clear_claims(&self);
    /// Visit every entry. Self-partitioning across concurrent callers via the
    /// claim marks cleared by `clear_claims`.
    fn traverse(&self, refs: &mut dyn ReferenceVisitor);
}
