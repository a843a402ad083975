// SPDX-License-Identifier: CC0-1.0

//! Shaping and emitting `[DT file:line] value` lines.

use std::borrow::Cow;
use std::io::{self, Write};
use std::panic::Location;
use std::path::Path;

/// This module's own source file, the anchor for the default root path.
pub(crate) const MODULE_FILE: &str = file!();

/// Where a print was invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Source file as reported by the compiler.
    pub file: Cow<'static, str>,
    /// 1-based line number.
    pub line: u32,
}

impl CallSite {
    /// Create a call site from an explicit file and line.
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self { file: file.into(), line }
    }

    /// The call site of whoever called the current function.
    ///
    /// Propagates through every `#[track_caller]` frame, so wrappers marked
    /// that way report their own caller.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }
}

/// Formats and writes the lines for one print call against a root path.
#[derive(Debug, Clone, Copy)]
pub struct Printer<'a> {
    root_path: &'a Path,
}

impl<'a> Printer<'a> {
    /// Create a printer relativizing against `root_path`.
    pub fn new(root_path: &'a Path) -> Self {
        Self { root_path }
    }

    /// `file` relative to the root, or `file` verbatim when that is not possible.
    pub fn display_file<'f>(&self, file: &'f str) -> Cow<'f, str> {
        match path::relativize(file, self.root_path) {
            Ok(relative) => Cow::Owned(relative.display().to_string()),
            Err(error) => {
                tracing::trace!(target: "dt", file, %error, "using raw call-site path");
                Cow::Borrowed(file)
            }
        }
    }

    /// The `[DT <file>:<line>]` prefix shared by every line of one call.
    pub fn tag(&self, site: &CallSite) -> String {
        format!("[DT {}:{}]", self.display_file(&site.file), site.line)
    }

    /// Write one tagged line per value to `out`.
    pub fn write_lines<W: Write + ?Sized>(
        &self,
        out: &mut W,
        site: &CallSite,
        values: &[String],
    ) -> io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let tag = self.tag(site);
        for value in values {
            writeln!(out, "{} {}", tag, value)?;
        }
        Ok(())
    }

    /// Write the lines for one call to stderr.
    ///
    /// The stderr lock is held for the whole call so its lines stay together.
    /// Write failures are ignored.
    pub fn emit(&self, site: &CallSite, values: &[String]) {
        let mut stderr = io::stderr().lock();
        let _ = self.write_lines(&mut stderr, site, values);
    }
}
