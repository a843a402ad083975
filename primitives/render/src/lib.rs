// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `dt-render` — value formatting for debug lines
//!
//! A value printed by `dt` is rendered one of two ways:
//!
//! - **Textual** values (`str`, `String`, `Cow<str>`, boxed/shared `str`, and
//!   references to any of these) are written verbatim, without quotes.
//! - **Everything else** is written with its [`Debug`] representation, which
//!   shows type and structure (`[1, 2, 3]`, `Some(4)`, `Point { x: 1 }`).
//!
//! Stable Rust has no specialization, so the choice is made at the call site
//! through autoref method resolution on [`Probe`]:
//!
//! ```
//! use dt_render::{Probe, RenderDebug as _, RenderText as _};
//!
//! assert_eq!((&Probe(&"users")).render_value(), "users");
//! assert_eq!((&Probe(&vec![1, 2, 3])).render_value(), "[1, 2, 3]");
//! assert_eq!((&Probe(&None::<u8>)).render_value(), "None");
//! ```
//!
//! The `p!` macros in `dt` expand to exactly this, so callers never name
//! these types directly.

use std::borrow::Cow;
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;

/// Values that are plain text and print verbatim.
pub trait Textual {
    /// Borrow the text.
    fn as_text(&self) -> &str;
}

impl Textual for str {
    fn as_text(&self) -> &str {
        self
    }
}

impl Textual for String {
    fn as_text(&self) -> &str {
        self
    }
}

impl Textual for Cow<'_, str> {
    fn as_text(&self) -> &str {
        self
    }
}

impl Textual for Box<str> {
    fn as_text(&self) -> &str {
        self
    }
}

impl Textual for Rc<str> {
    fn as_text(&self) -> &str {
        self
    }
}

impl Textual for Arc<str> {
    fn as_text(&self) -> &str {
        self
    }
}

impl<T: Textual + ?Sized> Textual for &T {
    fn as_text(&self) -> &str {
        (**self).as_text()
    }
}

impl<T: Textual + ?Sized> Textual for &mut T {
    fn as_text(&self) -> &str {
        (**self).as_text()
    }
}

/// Render a textual value verbatim.
pub fn render_text<T: Textual + ?Sized>(value: &T) -> String {
    value.as_text().to_owned()
}

/// Render any value through its [`Debug`] representation.
pub fn render_debug<T: Debug + ?Sized>(value: &T) -> String {
    format!("{:?}", value)
}

/// Borrowed value awaiting rendering.
///
/// Call `(&Probe(&value)).render_value()` with both [`RenderText`] and
/// [`RenderDebug`] in scope: the textual impl is found first when it applies,
/// otherwise resolution autorefs once more and lands on the debug impl.
pub struct Probe<'a, T: ?Sized>(pub &'a T);

/// Verbatim rendering, selected for [`Textual`] values.
pub trait RenderText {
    /// Render the probed value.
    fn render_value(&self) -> String;
}

impl<T: Textual + ?Sized> RenderText for Probe<'_, T> {
    fn render_value(&self) -> String {
        render_text(self.0)
    }
}

/// Debug rendering, the fallback for every other value.
pub trait RenderDebug {
    /// Render the probed value.
    fn render_value(&self) -> String;
}

impl<T: Debug + ?Sized> RenderDebug for &Probe<'_, T> {
    fn render_value(&self) -> String {
        render_debug(self.0)
    }
}
