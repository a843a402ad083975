// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Path utilities for relativizing call-site paths and locating project roots.
//!
//! Relativization is purely lexical: nothing here touches the filesystem
//! except [`find_project_root`], which reads `Cargo.toml` files while walking
//! up a directory tree.

pub mod path_utils;

// Re-export for convenience
pub use path_utils::*;
