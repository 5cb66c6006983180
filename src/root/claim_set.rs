//! Exactly-once claiming of singleton root tasks.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use enum_map::{Enum, EnumMap};
use strum_macros::IntoStaticStr;

/// Names of the claimable singleton root tasks. Which of these are registered
/// depends on the scan variant: see [`STRONG_SCAN_TASKS`] and
/// [`EVACUATION_TASKS`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Enum, IntoStaticStr)]
pub enum RootTask {
    RuntimeObjects,
    NativeHandles,
    ProfilerSamples,
    ManagementAgent,
    DebugAgent,
    Dictionary,
    WeakNativeHandles,
    Deduplication,
}

/// Tasks claimable during a marking root scan.
pub static STRONG_SCAN_TASKS: &[RootTask] = &[
    RootTask::RuntimeObjects,
    RootTask::NativeHandles,
    RootTask::ProfilerSamples,
    RootTask::ManagementAgent,
    RootTask::DebugAgent,
    RootTask::Dictionary,
    RootTask::WeakNativeHandles,
    RootTask::Deduplication,
];

/// Tasks claimable during an evacuation root scan. The deduplication table is
/// absent: during evacuation it self-partitions through its own claim marks.
pub static EVACUATION_TASKS: &[RootTask] = &[
    RootTask::RuntimeObjects,
    RootTask::NativeHandles,
    RootTask::ProfilerSamples,
    RootTask::ManagementAgent,
    RootTask::DebugAgent,
    RootTask::Dictionary,
    RootTask::WeakNativeHandles,
];

/// A fixed set of singleton tasks, each atomically claimable at most once per
/// scan session, plus the session's worker completion barrier.
///
/// Claim state is a plain atomic bit per task: losing a claim costs one load
/// and one failed swap, cheap enough to attempt redundantly from every
/// worker. Workers never wait on the barrier; whoever tears the session down
/// observes [`ClaimSet::all_done`].
pub struct ClaimSet {
    claimed: EnumMap<RootTask, AtomicBool>,
    registered: EnumMap<RootTask, bool>,
    n_workers: usize,
    workers_done: AtomicUsize,
}

impl ClaimSet {
    /// A claim set for `n_workers` workers over the given registered tasks.
    pub fn new(n_workers: usize, tasks: &[RootTask]) -> Self {
        assert!(n_workers > 0, "claim set needs at least one worker");
        let mut registered = EnumMap::default();
        for task in tasks {
            registered[*task] = true;
        }
        Self {
            claimed: EnumMap::default(),
            registered,
            n_workers,
            workers_done: AtomicUsize::new(0),
        }
    }

    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    /// Attempt to claim `task`. Returns `true` to exactly one caller per
    /// session; everyone else gets `false` and skips the associated work.
    ///
    /// Claiming a task outside the registered set, or claiming after every
    /// worker signalled done, is a fatal programming error.
    pub fn try_claim(&self, task: RootTask) -> bool {
        assert!(
            self.registered[task],
            "claim of unregistered root task {:?}",
            task
        );
        assert!(
            !self.all_done(),
            "claim of {:?} after all workers signalled done",
            task
        );
        !self.claimed[task].swap(true, Ordering::SeqCst)
    }

    /// Signal that the calling worker has attempted every task assigned to
    /// it. Exactly one call per worker; a call beyond the configured worker
    /// count is a fatal programming error.
    pub fn mark_worker_done(&self) {
        let prev = self.workers_done.fetch_add(1, Ordering::SeqCst);
        assert!(
            prev < self.n_workers,
            "worker completion signalled {} times for {} workers",
            prev + 1,
            self.n_workers
        );
    }

    /// Have all configured workers signalled completion?
    pub fn all_done(&self) -> bool {
        self.workers_done.load(Ordering::SeqCst) == self.n_workers
    }
}
