use std::fmt;
use std::num::NonZeroUsize;

/// A raw memory address. The collaborating runtime hands these out for root
/// slots; this crate never dereferences one itself.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, Hash, PartialOrd, Ord, PartialEq)]
pub struct Address(usize);

impl Address {
    /// The zero address.
    pub const ZERO: Address = Address(0);

    /// Cast a usize to an address.
    ///
    /// # Safety
    /// The caller is responsible for the validity of the address for whatever
    /// it is subsequently used for.
    pub const unsafe fn from_usize(raw: usize) -> Address {
        Address(raw)
    }

    /// The address as a usize.
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Is this the zero address?
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A reference to an object managed by the collaborating runtime. Always
/// non-null: absent references are `Option<ObjectReference>`.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, Hash, PartialOrd, Ord, PartialEq)]
pub struct ObjectReference(NonZeroUsize);

impl ObjectReference {
    /// Cast the object reference to its raw address.
    pub fn to_raw_address(self) -> Address {
        Address(self.0.get())
    }

    /// Cast a raw address to an object reference. Returns `None` for the zero
    /// address. This is how the runtime binding creates `ObjectReference`
    /// instances from root slots.
    pub fn from_raw_address(addr: Address) -> Option<ObjectReference> {
        NonZeroUsize::new(addr.0).map(ObjectReference)
    }

    /// Like `from_raw_address`, but without the null check.
    ///
    /// # Safety
    /// `addr` must not be zero.
    pub unsafe fn from_raw_address_unchecked(addr: Address) -> ObjectReference {
        debug_assert!(!addr.is_zero());
        ObjectReference(unsafe { NonZeroUsize::new_unchecked(addr.0) })
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_reference_is_never_null() {
        assert!(ObjectReference::from_raw_address(Address::ZERO).is_none());
        let addr = unsafe { Address::from_usize(0x1000) };
        let obj = ObjectReference::from_raw_address(addr).unwrap();
        assert_eq!(obj.to_raw_address(), addr);
    }

    #[test]
    fn unchecked_conversion_matches_checked() {
        let addr = unsafe { Address::from_usize(0x2000) };
        let obj = unsafe { ObjectReference::from_raw_address_unchecked(addr) };
        assert_eq!(Some(obj), ObjectReference::from_raw_address(addr));
    }

    #[test]
    fn option_object_reference_is_pointer_sized() {
        use std::mem::size_of;
        assert_eq!(
            size_of::<Option<ObjectReference>>(),
            size_of::<ObjectReference>()
        );
    }
}
