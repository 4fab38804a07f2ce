//! A text-formatting library whose format strings embed a small
//! scripting language.
//!
//! Replacement fields project into their arguments with the access
//! language (`{0.length}`, `{name[2:-1]}`) and scripted fields select
//! output conditionally (`{$ {0} > 1: 's'}`).
//!
//! ```
//! use scriptfmt::{fmt_args, vformat};
//!
//! let args = fmt_args![2];
//! let out = vformat("{0} warning{${0}>1:'s'}", &args).unwrap();
//! assert_eq!(out, "2 warnings");
//! ```
#![forbid(unsafe_code)]

pub mod access;
pub mod args;
pub mod error;
pub mod fmt;
pub mod interp;
pub mod locale;
pub mod script;
pub mod sink;
pub mod spec;
pub mod text;
pub mod unicode;
pub mod value;


pub use args::ArgStore;
pub use error::{FormatError, Result, ScriptErrorCode};
pub use interp::{FormatContext, ParseContext};
pub use locale::Locale;
pub use sink::Sink;
pub use text::{Slice, Text};
pub use value::{IndexKey, OwnedValue, ToValue, UserValue, Value};

fn do_format<'a>(
    out: &mut dyn Sink,
    locale: Option<&'a Locale>,
    fmt: &'a str,
    args: &'a ArgStore<'a>,
) -> Result<()> {
    let mut parse = ParseContext::new(fmt, args);
    let mut ctx = match locale {
        Some(loc) => FormatContext::with_locale(out, args, loc),
        None => FormatContext::new(out, args),
    };
    interp::run(&mut parse, &mut ctx)
}

/// Format into a new string.
pub fn vformat(fmt: &str, args: &ArgStore<'_>) -> Result<String> {
    let mut out = String::new();
    do_format(&mut out, None, fmt, args)?;
    Ok(out)
}

/// Format into a new string using a locale handle.
pub fn vformat_with_locale(
    fmt: &str,
    locale: &Locale,
    args: &ArgStore<'_>,
) -> Result<String> {
    let mut out = String::new();
    do_format(&mut out, Some(locale), fmt, args)?;
    Ok(out)
}

/// Format onto an existing sink. The sink converts to its native code
/// unit width, so `String`, `Vec<u16>` and `Vec<u32>` all work.
pub fn vformat_to(out: &mut dyn Sink, fmt: &str, args: &ArgStore<'_>) -> Result<()> {
    do_format(out, None, fmt, args)
}

/// Format onto an existing sink using a locale handle.
pub fn vformat_to_with_locale(
    out: &mut dyn Sink,
    fmt: &str,
    locale: &Locale,
    args: &ArgStore<'_>,
) -> Result<()> {
    do_format(out, Some(locale), fmt, args)
}

/// Format at most `n` code units onto the sink. Returns the total
/// units the output would need; units past `n` are dropped but still
/// counted.
pub fn format_to_n(
    out: &mut dyn Sink,
    n: usize,
    fmt: &str,
    args: &ArgStore<'_>,
) -> Result<usize> {
    let mut limited = sink::LimitedSink::new(out, n);
    do_format(&mut limited, None, fmt, args)?;
    Ok(limited.written())
}

/// [`format_to_n`] with a locale handle.
pub fn format_to_n_with_locale(
    out: &mut dyn Sink,
    n: usize,
    fmt: &str,
    locale: &Locale,
    args: &ArgStore<'_>,
) -> Result<usize> {
    let mut limited = sink::LimitedSink::new(out, n);
    do_format(&mut limited, Some(locale), fmt, args)?;
    Ok(limited.written())
}

/// Count the code units the formatted output occupies, without
/// producing it.
pub fn formatted_size(fmt: &str, args: &ArgStore<'_>) -> Result<usize> {
    let mut counter = sink::CountingSink::new();
    do_format(&mut counter, None, fmt, args)?;
    Ok(counter.units())
}

/// [`formatted_size`] with a locale handle.
pub fn formatted_size_with_locale(
    fmt: &str,
    locale: &Locale,
    args: &ArgStore<'_>,
) -> Result<usize> {
    let mut counter = sink::CountingSink::new();
    do_format(&mut counter, Some(locale), fmt, args)?;
    Ok(counter.units())
}
