//! Flag words, masks and bit-packed sub-fields of the common object header.
//!
//! Every heap object starts with a `flags` word that packs the runtime type tag, GC and
//! freeze state, and per-type payload bits. The per-type flag sets reuse the same bit
//! positions across unrelated types (the array embed/shared pair sits exactly where the
//! bignum sign/embed pair sits); each set is modeled as its own type so no decoder ever
//! borrows another type's semantics.

use bitflags::bitflags;

/// Bitmask isolating the runtime type tag
pub const TYPE_MASK: u64 = 0x1f;
/// First bit position available to per-type payload flags
pub const USER_SHIFT: u32 = 12;
/// Bit position of the string encoding index sub-field
pub const ENCODING_SHIFT: u32 = USER_SHIFT + 10;
/// Bitmask isolating the string encoding index sub-field
pub const ENCODING_MASK: u64 = 0x7f << ENCODING_SHIFT;
/// Bit position of the node sub-tag
pub const NODE_TYPE_SHIFT: u32 = 8;
/// Bitmask isolating the node sub-tag
pub const NODE_TYPE_MASK: u64 = 0x7f << NODE_TYPE_SHIFT;
/// Width mask of the imemo sub-tag, applied after shifting out the user bits
pub const IMEMO_MASK: u64 = 0x0f;
/// Bit position of the embedded-length sub-field shared by containers
pub const EMBED_LEN_SHIFT: u32 = USER_SHIFT + 3;
/// Bitmask of the array embedded-length sub-field
pub const ARRAY_EMBED_LEN_MASK: u64 = 0x7f << EMBED_LEN_SHIFT;
/// Bitmask of the bignum embedded-digit-count sub-field
pub const BIGNUM_EMBED_LEN_MASK: u64 = 0x7 << EMBED_LEN_SHIFT;

bitflags! {
    /// Type-independent header bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BasicFlags: u64 {
        /// Object survived a young generation and was promoted
        const PROMOTED = 1 << 5;
        /// Object has a finalizer registered
        const FINALIZE = 1 << 7;
        /// Object is shareable between ractors
        const SHAREABLE = 1 << 8;
        /// Object is frozen
        const FREEZE = 1 << 11;
    }
}

impl BasicFlags {
    /// Extract the type-independent bits from a raw flags word
    #[must_use]
    pub fn from_flags(flags: u64) -> Self {
        Self::from_bits_truncate(flags)
    }
}

bitflags! {
    /// Array storage-mode bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ArrayFlags: u64 {
        /// Elements are stored inline in the object
        const EMBED = 1 << (USER_SHIFT + 1);
        /// Elements live in another array's backing buffer
        const SHARED = 1 << (USER_SHIFT + 2);
    }
}

impl ArrayFlags {
    /// Extract the array storage bits from a raw flags word
    #[must_use]
    pub fn from_flags(flags: u64) -> Self {
        Self::from_bits_truncate(flags)
    }
}

bitflags! {
    /// String storage-mode bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StringFlags: u64 {
        /// Bytes live in a heap buffer; when clear they are embedded in the object
        const NOEMBED = 1 << (USER_SHIFT + 1);
    }
}

impl StringFlags {
    /// Extract the string storage bits from a raw flags word
    #[must_use]
    pub fn from_flags(flags: u64) -> Self {
        Self::from_bits_truncate(flags)
    }
}

bitflags! {
    /// Bignum sign and storage bits
    ///
    /// Same positions as [`ArrayFlags`], different meaning; that coincidence is a property
    /// of the tag format, not of this crate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BignumFlags: u64 {
        /// The number is non-negative; when clear the sign is `-`
        const POSITIVE = 1 << (USER_SHIFT + 1);
        /// Digits are stored inline in the object
        const EMBED = 1 << (USER_SHIFT + 2);
    }
}

impl BignumFlags {
    /// Extract the bignum sign/storage bits from a raw flags word
    #[must_use]
    pub fn from_flags(flags: u64) -> Self {
        Self::from_bits_truncate(flags)
    }
}

/// Extracts the string encoding ordinal from a raw flags word
#[must_use]
pub fn encoding_index(flags: u64) -> u64 {
    (flags & ENCODING_MASK) >> ENCODING_SHIFT
}

/// Extracts the node sub-tag from a raw flags word
#[must_use]
pub fn node_subtype(flags: u64) -> u64 {
    (flags & NODE_TYPE_MASK) >> NODE_TYPE_SHIFT
}

/// Extracts the imemo sub-tag from a raw flags word
#[must_use]
pub fn imemo_subtype(flags: u64) -> u64 {
    (flags >> USER_SHIFT) & IMEMO_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_index() {
        let flags = 2u64 << ENCODING_SHIFT | 0x05;
        assert_eq!(encoding_index(flags), 2);
        assert_eq!(encoding_index(0x05), 0);
    }

    #[test]
    fn test_node_subtype() {
        let flags = (35u64 << NODE_TYPE_SHIFT) | 0x1b;
        assert_eq!(node_subtype(flags), 35);
    }

    #[test]
    fn test_imemo_subtype() {
        let flags = (7u64 << USER_SHIFT) | 0x1a;
        assert_eq!(imemo_subtype(flags), 7);
    }

    #[test]
    fn test_basic_flags() {
        let flags = (1u64 << 5) | (1 << 11) | 0x07;
        let basic = BasicFlags::from_flags(flags);
        assert!(basic.contains(BasicFlags::PROMOTED));
        assert!(basic.contains(BasicFlags::FREEZE));
        assert!(!basic.contains(BasicFlags::FINALIZE));
    }

    #[test]
    fn test_array_and_bignum_bits_coincide() {
        // The bit format reuses the positions; the types must stay independent anyway.
        assert_eq!(ArrayFlags::EMBED.bits(), BignumFlags::POSITIVE.bits());
        assert_eq!(ArrayFlags::SHARED.bits(), BignumFlags::EMBED.bits());
        assert_eq!(StringFlags::NOEMBED.bits(), ArrayFlags::EMBED.bits());
    }
}
