//! The common header of a heap object and the derived reads shared between decoders.

use crate::heap::flags::{
    ArrayFlags, BasicFlags, BignumFlags, ARRAY_EMBED_LEN_MASK, BIGNUM_EMBED_LEN_MASK,
    EMBED_LEN_SHIFT, TYPE_MASK,
};
use crate::heap::types::RubyType;
use crate::target::Target;
use crate::Result;

/// A decoded object header: the address of a heap object plus its flags word.
///
/// Building a descriptor performs exactly one layout read (the header flags); everything
/// else is derived by masking. The descriptor is a read-then-discard snapshot - nothing is
/// cached across decode calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapObject {
    address: u64,
    flags: u64,
}

impl HeapObject {
    /// Reads the object header at `address`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Inaccessible`] if the flags field cannot be read; the caller
    /// aborts the decode of this value (there is nothing to render without a header).
    pub fn read<T: Target>(target: &T, address: u64) -> Result<Self> {
        let flags = target.read_field("RBasic", address, "flags")?;
        Ok(HeapObject { address, flags })
    }

    /// Builds a descriptor from an already-known flags word
    #[must_use]
    pub fn with_flags(address: u64, flags: u64) -> Self {
        HeapObject { address, flags }
    }

    /// The target address of the object
    #[must_use]
    pub fn address(&self) -> u64 {
        self.address
    }

    /// The raw header flags word
    #[must_use]
    pub fn flags(&self) -> u64 {
        self.flags
    }

    /// The raw type tag bits
    #[must_use]
    pub fn type_raw(&self) -> u64 {
        self.flags & TYPE_MASK
    }

    /// The decoded type tag, or `None` for a tag this crate does not recognize
    #[must_use]
    pub fn type_tag(&self) -> Option<RubyType> {
        RubyType::from_repr(self.type_raw())
    }

    /// Whether the object was promoted to an old GC generation
    #[must_use]
    pub fn promoted(&self) -> bool {
        BasicFlags::from_flags(self.flags).contains(BasicFlags::PROMOTED)
    }

    /// Whether the object is frozen
    #[must_use]
    pub fn frozen(&self) -> bool {
        BasicFlags::from_flags(self.flags).contains(BasicFlags::FREEZE)
    }

    /// The element count of an array object.
    ///
    /// Embedded arrays keep the length in a header sub-field; heap arrays keep it in the
    /// out-of-line half of the payload union. The same embedded-length reasoning backs
    /// [`HeapObject::bignum_digit_count`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Inaccessible`] if the out-of-line length cannot be read.
    pub fn array_len<T: Target>(&self, target: &T) -> Result<u64> {
        if ArrayFlags::from_flags(self.flags).contains(ArrayFlags::EMBED) {
            Ok((self.flags & ARRAY_EMBED_LEN_MASK) >> EMBED_LEN_SHIFT)
        } else {
            target.read_field("RArray", self.address, "as.heap.len")
        }
    }

    /// The element data pointer of an array object.
    ///
    /// For embedded storage this is the address of the inline element array; for heap
    /// storage it is the stored buffer pointer, which may legitimately be null.
    ///
    /// # Errors
    /// Returns [`crate::Error::Inaccessible`] if the field cannot be resolved.
    pub fn array_ptr<T: Target>(&self, target: &T) -> Result<u64> {
        if ArrayFlags::from_flags(self.flags).contains(ArrayFlags::EMBED) {
            target.field_address("RArray", self.address, "as.ary")
        } else {
            target.read_field("RArray", self.address, "as.heap.ptr")
        }
    }

    /// The digit count of a bignum object.
    ///
    /// # Errors
    /// Returns [`crate::Error::Inaccessible`] if the out-of-line length cannot be read.
    pub fn bignum_digit_count<T: Target>(&self, target: &T) -> Result<u64> {
        if BignumFlags::from_flags(self.flags).contains(BignumFlags::EMBED) {
            Ok((self.flags & BIGNUM_EMBED_LEN_MASK) >> EMBED_LEN_SHIFT)
        } else {
            target.read_field("RBignum", self.address, "as.heap.len")
        }
    }
}
