use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure ultimately originates in the debugging host: a memory read, a type-layout
/// lookup or a raw dump request was rejected. Unrecognized data (type tags, encoding ordinals,
/// sub-tags) is deliberately *not* an error condition - the decoders degrade to a raw rendering
/// so the tool stays useful against newer or unusual runtime builds.
///
/// # Error Categories
///
/// - [`Error::Inaccessible`] - A field read from target memory failed
/// - [`Error::UnknownLayout`] - A structure layout could not be resolved by the host
/// - [`Error::Host`] - The host rejected a raw dump or conversion request
///
/// # Examples
///
/// ```rust,ignore
/// use rbscope::{Error, Inspector};
///
/// match inspector.try_render(word) {
///     Ok(text) => println!("{}", text),
///     Err(Error::Inaccessible { type_name, field, address }) => {
///         eprintln!("cannot read {}.{} at {:#x}", type_name, field, address);
///     }
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A field read from target memory failed.
    ///
    /// The host could not resolve or read the requested field of a structure at the given
    /// address. A failure on the object header aborts the whole render; a failure on any
    /// other field only aborts that field's contribution.
    ///
    /// # Fields
    ///
    /// * `type_name` - The structure type the read was issued against
    /// * `field` - The field path that failed to resolve
    /// * `address` - The target address of the structure
    #[error("cannot read {type_name}.{field} at {address:#018x}")]
    Inaccessible {
        /// The structure type the read was issued against
        type_name: String,
        /// The field path that failed to resolve
        field: String,
        /// The target address of the structure
        address: u64,
    },

    /// A structure layout could not be resolved by the host.
    ///
    /// Occurs when the byte size of a named structure type is needed for offset arithmetic
    /// (the class-extension fallback) and the host has no layout for it.
    #[error("cannot resolve layout of {0}")]
    UnknownLayout(String),

    /// The host rejected a raw dump or conversion request.
    ///
    /// Wraps failures of the host's expression evaluator, used wherever a literal memory
    /// rendering is cheaper than structured decoding.
    #[error("{0}")]
    Host(String),
}
