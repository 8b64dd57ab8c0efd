//! Shared runtime services for skillcheck command families.

pub mod context;
pub mod error;
pub mod fs;
