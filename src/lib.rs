//! Parallel root-set enumeration for a concurrent, region-based garbage
//! collector.
//!
//! This crate implements the root discovery engine a collector runs at the
//! start of marking and during evacuation: it coordinates a fixed pool of
//! worker threads over a heterogeneous set of root sources while guaranteeing
//! exactly-once visitation per scan session. The collector's phase driver
//! creates a [`root::StrongRootProcessor`] or [`root::EvacuationRootProcessor`]
//! once per phase and hands it to its workers; each worker invokes the
//! processor's entry point with its worker id. Object tracing, relocation and
//! heap-region bookkeeping stay on the caller's side of the narrow
//! collaborator traits in [`vm`] and [`heap`].
//!
//! This crate never creates threads and never blocks one worker on another:
//! cross-worker coordination is a handful of atomic claim bits and cursors,
//! because root scans run inside latency-sensitive pauses.

#[macro_use]
extern crate log;

pub mod heap;
pub mod root;
pub mod util;
pub mod vm;
