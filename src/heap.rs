//! The heap-side contract of a root scan.
//!
//! The scan engine needs very little from the heap: membership tests against
//! the condemned region, forwarding-pointer resolution, and a
//! forward-if-not-already-forwarded evacuation primitive for the
//! pending-cleanup-lock pre-pass. Everything else about regions, allocation
//! and copying stays inside the collector.

use std::error::Error;
use std::fmt;

use crate::util::ObjectReference;

/// Evacuation could not allocate space for the copy.
///
/// This is only ever tolerated in the pending-cleanup-lock pre-pass, where
/// the collector has a deferred recovery path; every other visitation this
/// crate performs is non-allocating.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EvacuationOom;

impl fmt::Display for EvacuationOom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "allocation failure during evacuation")
    }
}

impl Error for EvacuationOom {}

/// The region-based heap a scan session operates on.
pub trait RegionedHeap: Sync {
    /// Is the runtime globally paused right now?
    fn at_safepoint(&self) -> bool;

    /// Is an evacuation phase in progress?
    fn evacuation_in_progress(&self) -> bool;

    /// Does `object` reside in a region condemned this cycle?
    fn in_condemned_region(&self, object: ObjectReference) -> bool;

    /// Resolve `object` through its forwarding pointer. Returns `object`
    /// itself when it has not been forwarded.
    fn resolve_forwarded(&self, object: ObjectReference) -> ObjectReference;

    /// Evacuate `object` out of its condemned region unless another worker
    /// already has: the forwarding installation is a compare-and-set, so
    /// redundant concurrent calls are safe and at most one physical copy is
    /// made. Returns the forwardee, old or new.
    fn try_evacuate(&self, object: ObjectReference) -> Result<ObjectReference, EvacuationOom>;

    /// The well-known slot holding the runtime's pending-cleanup-lock object.
    fn pending_cleanup_lock(&self) -> Option<ObjectReference>;
}
