//! Basic utilities shared across the crate.

mod address;

pub use address::Address;
pub use address::ObjectReference;
