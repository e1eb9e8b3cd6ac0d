//! crates/logging/src/macros.rs
//! Call-site macros for the per-thread default service.
//!
//! Each macro accepts a comma-separated list of values convertible into
//! [`LogValue`](crate::LogValue) and records the location of the macro
//! invocation.

#[doc(hidden)]
#[macro_export]
macro_rules! __dbg_emit {
    ($channel:ident $(, $arg:expr)* $(,)?) => {
        $crate::thread_local::emit(
            $crate::Channel::$channel,
            $crate::CallerLocation::here(::core::file!(), ::core::line!(), ::core::column!()),
            ::std::vec![$($crate::LogValue::from($arg)),*],
        )
    };
}

/// Write an error line; never gated.
///
/// # Example
/// ```
/// logging::dbg_error!("request failed", 503);
/// ```
#[macro_export]
macro_rules! dbg_error {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Error $(, $arg)*)
    };
}

/// Write a warning line.
///
/// # Example
/// ```
/// logging::dbg_warn!("cache miss", "users");
/// ```
#[macro_export]
macro_rules! dbg_warn {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Warn $(, $arg)*)
    };
}

/// Write a multi-line informational block.
///
/// # Example
/// ```
/// logging::dbg_info!("configuration loaded");
/// ```
#[macro_export]
macro_rules! dbg_info {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Info $(, $arg)*)
    };
}

/// Write an application progress line.
///
/// # Example
/// ```
/// logging::dbg_log!("#boot", "started");
/// ```
#[macro_export]
macro_rules! dbg_log {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Log $(, $arg)*)
    };
}

/// Write a user or application action line.
///
/// # Example
/// ```
/// logging::dbg_log1!("clicked", "save");
/// ```
#[macro_export]
macro_rules! dbg_log1 {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Log1 $(, $arg)*)
    };
}

/// Write an application process detail line.
///
/// # Example
/// ```
/// logging::dbg_log2!("tick", 42);
/// ```
#[macro_export]
macro_rules! dbg_log2 {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Log2 $(, $arg)*)
    };
}

/// Write a routes-and-states line.
///
/// # Example
/// ```
/// logging::dbg_rs!("entering", "/settings");
/// ```
#[macro_export]
macro_rules! dbg_rs {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Rs $(, $arg)*)
    };
}

/// Write a directive line.
///
/// # Example
/// ```
/// logging::dbg_dlog!("linked", "date-picker");
/// ```
#[macro_export]
macro_rules! dbg_dlog {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Dlog $(, $arg)*)
    };
}

/// Write the attention banner.
///
/// # Example
/// ```
/// logging::dbg_yell!("look here");
/// ```
#[macro_export]
macro_rules! dbg_yell {
    ($($arg:expr),* $(,)?) => {
        $crate::__dbg_emit!(Yell $(, $arg)*)
    };
}
