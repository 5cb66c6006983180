//! The root scan engine: claim coordination, scan sessions and the per-phase
//! root processors.

mod claim_set;
mod evacuate;
mod session;
mod source;
mod strong;
mod timing;

pub use claim_set::{ClaimSet, RootTask, EVACUATION_TASKS, STRONG_SCAN_TASKS};
pub use evacuate::EvacuationRootProcessor;
pub use session::{RootContext, RootScanSession};
pub use source::{partition_range, ChunkCursor, ClaimFlag};
pub use strong::StrongRootProcessor;
pub use timing::{Phase, RootKind, TimingAggregator, WorkerTimer};
