//! Macros.

/// Logs something depending on the verbosity of a configuration.
///
/// - `log! { conf, @verb ... }` prints in verbose and debug mode ;
/// - `log! { conf, @debug ... }` prints in debug mode only ;
/// - `log! { conf, @warn ... }` always prints, prefixed with `Warning: ` ;
/// - `log! { conf, @verb_inline ... }` is `@verb` without the newline, for
///   progress messages completed by a later `@verb`.
#[macro_export]
macro_rules! log {
    ($conf:expr, @verb $($tt:tt)*) => {
        if $conf.verbose() {
            println!($($tt)*)
        }
    };
    ($conf:expr, @verb_inline $($tt:tt)*) => {
        if $conf.verbose() {
            use ::std::io::Write;
            print!($($tt)*);
            let _ = ::std::io::stdout().flush();
        }
    };
    ($conf:expr, @debug $($tt:tt)*) => {
        if $conf.debug() {
            println!($($tt)*)
        }
    };
    ($conf:expr, @warn $($tt:tt)*) => {
        println!(
            "{}: {}",
            $crate::common::ColorExt::sad($conf, "Warning"),
            format!($($tt)*)
        )
    };
}

/// Does something if in debug mode.
#[macro_export]
macro_rules! if_debug {
    ($conf:expr => $($blah:tt)*) => {
        if $conf.debug() {
            $($blah)*
        }
    };
}
