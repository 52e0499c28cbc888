//! Multi-version documents.
//!
//! An MVD stores every version of a text as one ordered list of [`Pair`]s.
//! Each pair belongs to a subset of the versions; concatenating, in order,
//! the pairs that contain version `v` yields the full text of `v`.

pub mod backbone;
pub mod document;
pub mod pair;

// Re-export commonly used types
pub use backbone::*;
pub use document::*;
pub use pair::*;
