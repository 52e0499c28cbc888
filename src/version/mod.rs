//! Version identifiers, version sets and the siglum registry.

pub mod registry;
pub mod set;

// Re-export commonly used types
pub use registry::*;
pub use set::*;
