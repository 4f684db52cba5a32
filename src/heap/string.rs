//! Resolution of a string object's backing buffer.

use crate::heap::flags::StringFlags;
use crate::target::Target;
use crate::Result;

/// A resolved byte range in target memory: pointer plus byte length.
///
/// A zero length is valid and denotes the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringView {
    /// Address of the first byte
    pub ptr: u64,
    /// Byte length
    pub len: u64,
}

/// Resolves the backing buffer of the string object at `address`.
///
/// The no-embed bit in the header selects the representation: clear means the bytes sit in
/// an inline array inside the object itself (the pointer is the field's own address), set
/// means pointer and length both come from the out-of-line heap half of the payload union.
/// The bit is tested on every call - embedded vs heap is a per-object choice and two
/// logically distinct strings may differ even at the same recycled address.
///
/// # Errors
/// Returns [`crate::Error::Inaccessible`] if the header or the selected fields cannot be
/// read.
pub fn string_view<T: Target>(target: &T, address: u64) -> Result<StringView> {
    let flags = target.read_field("RBasic", address, "flags")?;

    if StringFlags::from_flags(flags).contains(StringFlags::NOEMBED) {
        let ptr = target.read_field("RString", address, "as.heap.ptr")?;
        let len = target.read_field("RString", address, "as.heap.len")?;
        Ok(StringView { ptr, len })
    } else {
        let ptr = target.field_address("RString", address, "as.embed.ary")?;
        let len = target.read_field("RString", address, "as.embed.len")?;
        Ok(StringView { ptr, len })
    }
}
