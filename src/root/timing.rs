//! Per-source, per-worker phase timing.

use std::time::{Duration, Instant};

use enum_map::Enum;
use strum_macros::IntoStaticStr;

/// The collection phase a root scan serves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, IntoStaticStr)]
pub enum Phase {
    InitialMark,
    FinalMark,
    Evacuation,
    FullGc,
}

impl Phase {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Phases whose root scans require the runtime to be globally paused.
    pub fn requires_safepoint(self) -> bool {
        // All of them, today. Concurrent root scanning would relax this.
        true
    }
}

/// Timing label for one root source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Enum, IntoStaticStr)]
pub enum RootKind {
    PendingLockRoots,
    ClassLoaderRoots,
    ThreadRoots,
    CodeRoots,
    RuntimeObjectRoots,
    ProfilerRoots,
    ManagementRoots,
    DebugAgentRoots,
    DictionaryRoots,
    NativeHandleRoots,
    WeakNativeHandleRoots,
    DedupRoots,
    MonitorRoots,
    InternTableRoots,
}

impl RootKind {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Sink for scan timing, implemented by the collector's statistics machinery.
/// Shared by reference among all workers of a session, so implementations use
/// interior mutability.
pub trait TimingAggregator: Sync {
    /// A session for `phase` is about to hand work to its workers.
    fn record_workers_start(&self, phase: Phase);
    /// The session for `phase` has been torn down. Paired with exactly one
    /// `record_workers_start`.
    fn record_workers_end(&self, phase: Phase);
    /// One worker spent `duration` enumerating one source.
    fn record(&self, phase: Phase, source: RootKind, worker_id: usize, duration: Duration);
}

/// Scoped recorder for one worker's time in one root source. Records on drop,
/// so early returns and lost claims are still accounted.
pub struct WorkerTimer<'a> {
    timing: &'a dyn TimingAggregator,
    phase: Phase,
    source: RootKind,
    worker_id: usize,
    start: Instant,
}

impl<'a> WorkerTimer<'a> {
    pub fn new(
        timing: &'a dyn TimingAggregator,
        phase: Phase,
        source: RootKind,
        worker_id: usize,
    ) -> Self {
        trace!("worker {} scanning {}", worker_id, source.name());
        Self {
            timing,
            phase,
            source,
            worker_id,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for WorkerTimer<'a> {
    fn drop(&mut self) {
        self.timing
            .record(self.phase, self.source, self.worker_id, self.start.elapsed());
    }
}
