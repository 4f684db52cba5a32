//! The injected capability surface through which the decoders reach the target process.
//!
//! `rbscope` never opens a process, maps memory or parses debug info itself. Everything it
//! needs from the outside world - field reads against known structure layouts, type sizes,
//! enum and symbol name resolution, literal memory dumps - is consumed through the
//! [`crate::target::Target`] trait. A debugging host (an LLDB or GDB front-end, an
//! out-of-process profiler) implements the trait once; the decoding core stays testable
//! against a synthetic in-memory fake implementing the same interface.
//!
//! # Key Components
//!
//! - [`crate::target::Target`] - the capability trait
//! - [`crate::target::DumpSpec`] - a typed description of a raw memory rendering request
//!
//! All methods are synchronous and are expected to be low-latency (local memory or a fast
//! out-of-process protocol). The target process is presumed paused while decoding runs, so
//! no method is ever retried.

use crate::Result;

/// A typed description of a raw memory rendering request.
///
/// The decoders defer to the host's expression evaluator whenever a literal byte/word dump
/// is cheaper than structured decoding (full structure dumps, array element dumps, bignum
/// digit dumps). Each variant carries the address plus whatever element count and width the
/// host needs to format the range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpSpec<'a> {
    /// Full structure dump: every field of `type_name` at `address`.
    Struct {
        /// Structure type to cast the address to
        type_name: &'a str,
        /// Target address of the structure
        address: u64,
    },
    /// A literal range of `len` bytes starting at `address`, rendered as character data.
    Bytes {
        /// Start of the byte range
        address: u64,
        /// Exact number of bytes to render
        len: u64,
    },
    /// `count` machine words starting at `address`, rendered as hex.
    Words {
        /// Start of the word range
        address: u64,
        /// Number of words to render
        count: u64,
    },
    /// `count` bignum digit words starting at `address`, rendered as hex.
    Digits {
        /// Start of the digit range
        address: u64,
        /// Number of digit words to render
        count: u64,
    },
    /// The fixed-size inline array field `field` of the object at `address`.
    ///
    /// Used when a container stores its elements inside the object itself rather than
    /// behind a pointer.
    InlineWords {
        /// Structure type owning the inline array
        type_name: &'a str,
        /// Target address of the structure
        address: u64,
        /// Field path of the inline array
        field: &'a str,
    },
    /// A NUL-terminated C string starting at `address`.
    CString {
        /// Start of the string
        address: u64,
    },
}

/// Read-only access to a paused target process, resolved through known structure layouts.
///
/// Implementations map each method onto whatever the debugging host provides: expression
/// paths, DWARF layouts, a remote protocol. All failures are reported as
/// [`crate::Error::Inaccessible`], [`crate::Error::UnknownLayout`] or [`crate::Error::Host`];
/// the decoders decide per call site whether a failure aborts the render or degrades to an
/// inline marker.
pub trait Target {
    /// Reads the value of `field` of a `type_name` structure at `address` as a machine word.
    ///
    /// `field` is a field path and may traverse nested members and pointers
    /// (e.g. `as.heap.ptr`, `type->wrap_struct_name`).
    ///
    /// # Errors
    /// Returns [`crate::Error::Inaccessible`] if the address, type or field cannot be
    /// resolved or read.
    fn read_field(&self, type_name: &str, address: u64, field: &str) -> Result<u64>;

    /// Resolves the address of `field` of a `type_name` structure at `address`.
    ///
    /// Used for inline storage, where the payload lives inside the object itself and the
    /// pointer is computed from the object's own address rather than read from a field.
    ///
    /// # Errors
    /// Returns [`crate::Error::Inaccessible`] if the address, type or field cannot be
    /// resolved.
    fn field_address(&self, type_name: &str, address: u64, field: &str) -> Result<u64>;

    /// Reads the value of `field` of a `type_name` structure at `address` as a float.
    ///
    /// # Errors
    /// Returns [`crate::Error::Inaccessible`] if the address, type or field cannot be
    /// resolved or read.
    fn read_field_f64(&self, type_name: &str, address: u64, field: &str) -> Result<f64>;

    /// Returns the byte size of the structure type `type_name`.
    ///
    /// Needed for offset arithmetic, e.g. locating an extension structure placed
    /// immediately past a primary structure.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownLayout`] if the host has no layout for the type.
    fn type_size(&self, type_name: &str) -> Result<u64>;

    /// Resolves the name of the member with value `ordinal` in the enum type `enum_name`.
    ///
    /// Returns `None` when the ordinal has no member in the host's view of the enum;
    /// callers render the raw ordinal instead.
    fn enum_name(&self, enum_name: &str, ordinal: u64) -> Option<String>;

    /// Resolves the name behind a static symbol id.
    ///
    /// Returns `None` when the id is unknown to the target's symbol table; callers render
    /// the raw id instead.
    fn symbol_name(&self, id: u64) -> Option<String>;

    /// Reinterprets the bits of a flonum word as the floating-point value it encodes.
    ///
    /// The flonum rotation scheme is a property of the target runtime, so the conversion
    /// is delegated rather than decoded here.
    ///
    /// # Errors
    /// Returns [`crate::Error::Host`] if the host cannot perform the conversion.
    fn flonum_value(&self, raw: u64) -> Result<f64>;

    /// Renders the memory range described by `spec` as text.
    ///
    /// # Errors
    /// Returns [`crate::Error::Host`] if the dump request is rejected.
    fn dump_raw(&self, spec: &DumpSpec<'_>) -> Result<String>;
}
