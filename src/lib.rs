// SPDX-License-Identifier: CC0-1.0

//! # dt
//!
//! Zero-configuration debug prints. Sprinkle [`p!`] anywhere and each value
//! lands on stderr, tagged with where it was printed:
//!
//! ```text
//! [DT src/db.rs:42] users
//! [DT src/db.rs:42] [1, 2, 3]
//! ```
//!
//! The file is shown relative to the configured root path (see [`Config`]),
//! falling back to the compiler-reported path when it cannot be expressed
//! that way. Text prints verbatim; everything else prints as `Debug`.
//!
//! Nothing here ever returns an error or panics while printing.
//!
//! ## Layout
//! - [`Config`] — the root path setting, lazily defaulted
//! - [`Printer`] / [`CallSite`] — line shaping and stderr emission
//! - [`Instance`] — a configuration plus print operation; [`instance()`] is
//!   the shared one behind [`p!`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

mod config;
mod instance;
mod macros;
mod printer;

pub use config::{Config, ConfigError, ROOT_ENV_VAR};
pub use instance::{configure, instance, print, Instance};
pub use path::RelativizeError;
pub use printer::{CallSite, Printer};

/// Miscellaneous metadata about the dt crate.
pub mod dt_meta {
    /// Version string for the crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

#[doc(hidden)]
pub mod __private {
    pub use render::{Probe, RenderDebug, RenderText};
}
