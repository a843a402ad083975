// SPDX-License-Identifier: CC0-1.0

//! The configuration + printer pair behind `p!`, and its process-wide default.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError, RwLock, RwLockReadGuard};

use crate::config::Config;
use crate::printer::{CallSite, Printer};

/// A configuration together with the print operation that uses it.
///
/// Most code uses the shared [`instance()`] through [`p!`](crate::p). Code
/// that wants its own root path without touching global state constructs one
/// and prints through [`p_on!`](crate::p_on).
#[derive(Debug, Default)]
pub struct Instance {
    conf: RwLock<Config>,
    sink: Sink,
}

/// Where an instance writes its lines.
#[derive(Default)]
enum Sink {
    #[default]
    Stderr,
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stderr => f.write_str("Stderr"),
            Sink::Writer(_) => f.write_str("Writer"),
        }
    }
}

impl Instance {
    /// An instance with a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An instance using `conf`.
    pub fn with_config(conf: Config) -> Self {
        Self { conf: RwLock::new(conf), sink: Sink::Stderr }
    }

    /// An instance using `conf` that writes its lines to `out` instead of stderr.
    pub fn with_writer(conf: Config, out: impl Write + Send + 'static) -> Self {
        Self { conf: RwLock::new(conf), sink: Sink::Writer(Mutex::new(Box::new(out))) }
    }

    /// Read or adjust the configuration.
    ///
    /// Holds the write lock while `f` runs, so `f` must not print through
    /// this instance.
    ///
    /// ```
    /// let dt = dt::Instance::new();
    /// dt.configure(|conf| conf.set_root_path("/project"));
    /// assert_eq!(dt.root_path(), std::path::Path::new("/project"));
    /// ```
    pub fn configure<R>(&self, f: impl FnOnce(&mut Config) -> R) -> R {
        let mut conf = self.conf.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut conf)
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> Config {
        self.read().clone()
    }

    /// The root path call sites are shown relative to.
    pub fn root_path(&self) -> PathBuf {
        self.read().root_path().to_path_buf()
    }

    /// Print already-rendered values, tagged with `site`.
    ///
    /// Goes to stderr unless the instance was built with
    /// [`Instance::with_writer`]. Write failures are ignored.
    pub fn print(&self, site: &CallSite, values: &[String]) {
        let root = self.root_path();
        let printer = Printer::new(&root);
        match &self.sink {
            Sink::Stderr => printer.emit(site, values),
            Sink::Writer(out) => {
                let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = printer.write_lines(&mut **out, site, values);
            }
        }
    }

    /// Print already-rendered values, tagged with the caller's location.
    #[track_caller]
    pub fn print_here(&self, values: &[String]) {
        self.print(&CallSite::caller(), values);
    }

    /// Like [`Instance::print`], writing to `out` instead of stderr.
    pub fn print_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        site: &CallSite,
        values: &[String],
    ) -> io::Result<()> {
        let root = self.root_path();
        Printer::new(&root).write_lines(out, site, values)
    }

    fn read(&self) -> RwLockReadGuard<'_, Config> {
        self.conf.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The process-wide instance, created on first use.
pub fn instance() -> &'static Instance {
    static INSTANCE: OnceLock<Instance> = OnceLock::new();
    INSTANCE.get_or_init(Instance::new)
}

/// Read or adjust the process-wide configuration.
///
/// ```
/// dt::configure(|conf| conf.set_root_path(env!("CARGO_MANIFEST_DIR")));
/// dt::p!("configured");
/// ```
pub fn configure<R>(f: impl FnOnce(&mut Config) -> R) -> R {
    instance().configure(f)
}

/// Print already-rendered values through the process-wide instance,
/// tagged with the caller's location.
#[track_caller]
pub fn print(values: &[String]) {
    instance().print_here(values);
}
