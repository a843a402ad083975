// SPDX-License-Identifier: CC0-1.0

//! The `p!` and `p_on!` entry points.

/// Print values to stderr, tagged with the caller's file and line.
///
/// Text (`&str`, `String`, ...) prints verbatim; any other value prints its
/// `Debug` representation. Each value gets its own line:
///
/// ```
/// let users = vec![1, 2, 3];
/// dt::p!("users", users);
/// // [DT src/main.rs:3] users
/// // [DT src/main.rs:3] [1, 2, 3]
/// ```
///
/// Values are borrowed, never moved. Evaluates to `()`.
#[macro_export]
macro_rules! p {
    () => {
        $crate::p_on!($crate::instance())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::p_on!($crate::instance(), $($value),+)
    };
}

/// Like [`p!`], printing through an explicit [`Instance`](crate::Instance).
///
/// ```
/// let dt = dt::Instance::new();
/// dt.configure(|conf| conf.set_root_path("/project"));
/// dt::p_on!(&dt, "checkpoint", Some(4));
/// ```
#[macro_export]
macro_rules! p_on {
    ($instance:expr) => {
        $crate::p_on!($instance,)
    };
    ($instance:expr, $($value:expr),* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::__private::{RenderDebug as _, RenderText as _};
        let values: ::std::vec::Vec<::std::string::String> =
            ::std::vec![$((&$crate::__private::Probe(&$value)).render_value()),*];
        $instance.print(&$crate::CallSite::new(::std::file!(), ::std::line!()), &values);
    }};
}
