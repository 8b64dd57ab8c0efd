//! Top-level command families behind the `skillcheck` CLI.

pub mod all;
pub mod changed;
pub mod install;
pub mod links;
pub mod mcps;
pub mod refs;
pub mod validate;
