//! The closed enumeration of runtime type tags.

use std::fmt;

use strum::{EnumCount, EnumIter, FromRepr, IntoStaticStr};

/// A runtime type tag, extracted from the low bits of an object's flags word.
///
/// The set is closed for any given runtime build, but newer builds may introduce tags this
/// crate does not know; [`RubyType::from_repr`] returns `None` for those and the dispatcher
/// falls back to a generic raw rendering - an unrecognized tag is a decodable state, never
/// an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, FromRepr, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u64)]
pub enum RubyType {
    /// Unallocated slot
    None = 0x00,
    /// Plain object with instance variables
    Object = 0x01,
    /// Class
    Class = 0x02,
    /// Module
    Module = 0x03,
    /// Boxed float
    Float = 0x04,
    /// Byte string
    String = 0x05,
    /// Regular expression
    Regexp = 0x06,
    /// Array
    Array = 0x07,
    /// Hash table
    Hash = 0x08,
    /// Struct subclass instance
    Struct = 0x09,
    /// Arbitrary-precision integer
    Bignum = 0x0a,
    /// IO object
    File = 0x0b,
    /// Wrapped C data
    Data = 0x0c,
    /// Regexp match state
    Match = 0x0d,
    /// Complex number
    Complex = 0x0e,
    /// Rational number
    Rational = 0x0f,
    /// Heap tag mirroring the `nil` singleton
    Nil = 0x11,
    /// Heap tag mirroring the `true` singleton
    True = 0x12,
    /// Heap tag mirroring the `false` singleton
    False = 0x13,
    /// Interned symbol
    Symbol = 0x14,
    /// Heap tag mirroring the fixnum immediate
    Fixnum = 0x15,
    /// Heap tag mirroring the `undef` placeholder
    Undef = 0x16,
    /// Internal memo object
    Imemo = 0x1a,
    /// Parser AST node
    Node = 0x1b,
    /// Include-class proxy
    Iclass = 0x1c,
    /// Object awaiting finalization
    Zombie = 0x1d,
    /// Forwarding address left behind by compaction
    Moved = 0x1e,
}

impl RubyType {
    /// Returns the bare tag name, e.g. `STRING` or `ICLASS`
    #[must_use]
    pub fn tag_name(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for RubyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T_{}", self.tag_name())
    }
}
