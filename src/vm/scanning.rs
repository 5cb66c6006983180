//! Visitor callbacks supplied by the caller of a root scan.

use crate::util::ObjectReference;
use crate::vm::{ClassLoaderId, CodeUnitId, ThreadId};

/// Callback trait of root-scanning functions that report object references.
pub trait ReferenceVisitor {
    /// Call this function for each discovered root reference.
    fn visit(&mut self, object: ObjectReference);
}

/// This lets us use closures as ReferenceVisitor.
impl<F: FnMut(ObjectReference)> ReferenceVisitor for F {
    fn visit(&mut self, object: ObjectReference) {
        self(object)
    }
}

/// Callback trait for class-loader nodes surfaced by the metadata graph and
/// by thread-stack scanning.
pub trait ClassLoaderVisitor {
    /// Call this function for each discovered class-loader node.
    fn visit_class_loader(&mut self, loader: ClassLoaderId);
}

/// This lets us use closures as ClassLoaderVisitor.
impl<F: FnMut(ClassLoaderId)> ClassLoaderVisitor for F {
    fn visit_class_loader(&mut self, loader: ClassLoaderId) {
        self(loader)
    }
}

/// Callback trait for executable units surfaced by the code table and by
/// thread-stack scanning.
pub trait CodeVisitor {
    /// Call this function for each discovered executable unit.
    fn visit_code(&mut self, unit: CodeUnitId);
}

/// This lets us use closures as CodeVisitor.
impl<F: FnMut(CodeUnitId)> CodeVisitor for F {
    fn visit_code(&mut self, unit: CodeUnitId) {
        self(unit)
    }
}

/// Callback trait for mutator threads.
pub trait ThreadVisitor {
    /// Call this function for each thread scanned.
    fn visit_thread(&mut self, thread: ThreadId);
}

/// This lets us use closures as ThreadVisitor.
impl<F: FnMut(ThreadId)> ThreadVisitor for F {
    fn visit_thread(&mut self, thread: ThreadId) {
        self(thread)
    }
}

/// Liveness predicate for weak root sources. A weak reference whose referent
/// is dead may be unlinked by the source that holds it.
pub trait Liveness {
    /// Does the predicate consider `object` reachable?
    fn is_alive(&self, object: ObjectReference) -> bool;
}

/// This lets us use closures as Liveness.
impl<F: Fn(ObjectReference) -> bool> Liveness for F {
    fn is_alive(&self, object: ObjectReference) -> bool {
        self(object)
    }
}

/// The predicate that keeps everything: used wherever liveness decisions were
/// finalized in an earlier phase, and in the serial diagnostic scan.
pub struct AlwaysAlive;

impl Liveness for AlwaysAlive {
    fn is_alive(&self, _object: ObjectReference) -> bool {
        true
    }
}
