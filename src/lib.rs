// Copyright 2025 The rbscope contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # rbscope
//!
//! A cross-platform library for decoding and inspecting tagged Ruby `VALUE` words in a
//! live target process. Built in pure Rust, `rbscope` turns the raw machine words a
//! debugging host hands it into structured, human-readable descriptions of the objects
//! they encode - without linking against the Ruby runtime or depending on any particular
//! debugger.
//!
//! ## Features
//!
//! - **Complete immediate decoding** - singletons, fixnums, flonums, static symbols and
//!   the remaining immediate patterns, classified without a single memory read
//! - **Heap object inspection** - header flags, type tags and one decoder per runtime
//!   type, from strings and arrays to rationals, typed data and internal memo objects
//! - **Host-agnostic** - every memory, layout, enum and symbol access goes through one
//!   injected capability trait; any LLDB/GDB front-end or remote protocol can implement it
//! - **Forward compatible** - unrecognized type tags, encoding ordinals and sub-tags
//!   degrade to raw renderings instead of failing the decode
//! - **Never panics past the API** - `render` always returns text; failures become inline
//!   diagnostics naming the address and field that could not be read
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rbscope::prelude::*;
//!
//! // `host` is your implementation of the `Target` capability trait.
//! let inspector = Inspector::new(&host);
//! println!("{}", inspector.render(raw_value_word));
//! ```
//!
//! ## Architecture
//!
//! `rbscope` is organized into a handful of small modules:
//!
//! - [`value`] - the tagged word, the immediate-encoding constant table and the pure
//!   classification into representation classes
//! - [`heap`] - the common object header: flag bit sets, the closed type-tag enumeration,
//!   derived predicates and string backing-buffer resolution
//! - [`inspect`] - the type dispatcher, the per-type decoders and the [`Inspector`] entry
//!   point
//! - [`target`] - the consumed host-capability surface ([`Target`], [`DumpSpec`])
//! - [`Error`] and [`Result`] - error handling
//!
//! Control flow is strictly top-down: classify the word; render immediates directly; for
//! heap references read the header, dispatch on the type tag, run the matching decoder,
//! recurse through the same pipeline for nested values (rational, complex, regexp source,
//! the string behind a symbol) and hand text fragments plus host dump output to the
//! caller.
//!
//! ## Error Handling
//!
//! All internal operations return [`Result<T, Error>`](Result). The public
//! [`Inspector::render`] catches everything: a failure on the top-level object header
//! collapses the render into one diagnostic line, any deeper field failure becomes an
//! inline `<unreadable: …>` marker while sibling fields still render.
//!
//! ## Testing
//!
//! The decoding core is exercised against a synthetic in-memory target implementing the
//! same capability trait the real hosts implement:
//!
//! ```bash
//! cargo test
//! ```

pub(crate) mod error;
pub(crate) mod report;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,ignore
/// use rbscope::prelude::*;
///
/// let inspector = Inspector::new(&host);
/// let text = inspector.render(word);
/// ```
pub mod prelude;

/// The type dispatcher, per-type decoders and the [`Inspector`] entry point.
pub mod inspect;

/// Heap object headers: flags, type tags, derived predicates and buffer resolution.
pub mod heap;

/// The injected capability surface through which the decoders reach the target process.
pub mod target;

/// Tagged `VALUE` words and their immediate-encoding classification.
pub mod value;

/// `rbscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`], used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `rbscope` Error type
///
/// The main error type for all operations in this crate: every variant names the host
/// capability that failed and where.
pub use error::Error;

/// Main entry point for rendering tagged words.
///
/// See [`inspect::Inspector`] for the produced interface and its failure policy.
pub use inspect::Inspector;

/// The consumed host-capability trait and the raw dump request type.
pub use target::{DumpSpec, Target};

/// The tagged word, its classification result and the immediate-encoding constants.
pub use value::{SpecialConsts, Value, ValueKind};

/// Header descriptor, type tags and string views for heap objects.
pub use heap::{HeapObject, RubyType, StringView};
