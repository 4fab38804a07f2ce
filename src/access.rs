//! Accessor implementations for built-in Rust types, reachable through
//! [`Value::Handle`](crate::value::Value).

pub mod ranges;
pub mod tuple;
pub mod vocabulary;

#[cfg(feature = "chrono")]
pub mod chrono;

use crate::error::Result;
use crate::fmt::float::FloatFormatter;
use crate::fmt::int::IntFormatter;
use crate::interp::{FormatContext, ParseContext};
use crate::sink::{append_escaped_char, append_escaped_str};
use crate::spec::StdFormatSpec;
use crate::value::Value;

/// First character of the identifier grammar shared by attribute and
/// field names.
pub(crate) fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

/// Continuation character of the identifier grammar.
pub(crate) fn is_identifier_ch(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

/// Validate a name against the attribute identifier grammar.
pub fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_ch)
}

/// Render a value with its default presentation, as if formatted by
/// an empty replacement field.
pub(crate) fn render_plain(
    v: &Value<'_>,
    ctx: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let mut empty = ParseContext::new("", ctx.args());
    crate::fmt::format_value(v, &mut empty, ctx)
}

/// Render a container element with its default presentation; strings
/// and codepoints use the debug form.
pub(crate) fn render_element(
    v: &Value<'_>,
    ctx: &mut FormatContext<'_, '_>,
) -> Result<()> {
    match v {
        Value::None => Ok(()),
        Value::Bool(b) => {
            ctx.out().push_str(if *b { "true" } else { "false" });
            Ok(())
        }
        Value::Char(c) => {
            let out = ctx.out();
            out.push_char('\'');
            append_escaped_char(out, *c);
            out.push_char('\'');
            Ok(())
        }
        Value::Str(t) => {
            let out = ctx.out();
            out.push_char('"');
            append_escaped_str(out, t.as_str());
            out.push_char('"');
            Ok(())
        }
        Value::I32(i) => IntFormatter::new(StdFormatSpec::default()).format(*i, ctx),
        Value::U32(u) => IntFormatter::new(StdFormatSpec::default()).format(*u, ctx),
        Value::I64(i) => IntFormatter::new(StdFormatSpec::default()).format(*i, ctx),
        Value::U64(u) => IntFormatter::new(StdFormatSpec::default()).format(*u, ctx),
        Value::F32(f) => FloatFormatter::new(StdFormatSpec::default()).format(*f, ctx),
        Value::F64(f) => FloatFormatter::new(StdFormatSpec::default()).format(*f, ctx),
        Value::Ptr(p) => {
            let spec = StdFormatSpec {
                ty: 'x',
                alternate_form: true,
                ..StdFormatSpec::default()
            };
            IntFormatter::new(spec).format(*p, ctx)
        }
        Value::Handle(h) => {
            let mut empty = ParseContext::new("", ctx.args());
            h.get().format(&mut empty, ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_name_grammar() {
        assert!(is_valid_attribute_name("value"));
        assert!(is_valid_attribute_name("_private"));
        assert!(is_valid_attribute_name("has_value2"));
        assert!(is_valid_attribute_name("längé"));
        assert!(!is_valid_attribute_name(""));
        assert!(!is_valid_attribute_name("2nd"));
        assert!(!is_valid_attribute_name("a-b"));
        assert!(!is_valid_attribute_name("a b"));
    }
}
