//! # rbscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the rbscope library. Import this module to get quick access to the essential
//! types for decoding and rendering tagged values.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all rbscope operations
pub use crate::Error;

/// The result type used throughout rbscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Main entry point for rendering tagged words
pub use crate::inspect::Inspector;

/// The injected host-capability trait and the raw dump request type
pub use crate::target::{DumpSpec, Target};

// ================================================================================================
// Value Classification
// ================================================================================================

/// The tagged word and its classification
pub use crate::value::{SpecialConsts, Value, ValueKind};

// ================================================================================================
// Heap Object Model
// ================================================================================================

/// Header descriptor, type tags and string views
pub use crate::heap::{string_view, HeapObject, RubyType, StringView};

/// Flag bit sets and packed sub-field helpers
pub use crate::heap::flags::{ArrayFlags, BasicFlags, BignumFlags, StringFlags};
