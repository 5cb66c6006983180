//! Contracts between the root scan engine and the collaborating runtime.
//!
//! The runtime supplies two things: visitor callbacks ([`scanning`]) invoked
//! for every discovered root, and the root sources themselves ([`roots`]),
//! each behind a narrow enumeration trait. This crate only ever coordinates
//! which worker calls what, and when.

pub mod roots;
pub mod scanning;

pub use roots::*;
pub use scanning::*;

/// Opaque handle to a class-loader node in the runtime's metadata graph.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ClassLoaderId(pub usize);

/// Opaque handle to a compiled executable unit in the runtime's code table.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct CodeUnitId(pub usize);

/// Opaque handle to a mutator thread.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ThreadId(pub usize);
