//! The formatter layer: per-type formatters driven by the interpreter.

pub mod float;
pub mod int;
pub mod misc;
pub mod string;

use crate::error::{FormatError, Result};
use crate::interp::{FormatContext, ParseContext};
use crate::spec::{parse_std_spec, Align};
use crate::value::Value;

use float::FloatFormatter;
use int::{FormatInt, IntFormatter};
use misc::{format_codepoint_value, BoolFormatter, PointerFormatter};
use string::StringFormatter;

/// Left and right padding for `used` display columns in `width`.
pub(crate) fn fill_size(width: usize, used: usize, align: Align) -> (usize, usize) {
    if width <= used {
        return (0, 0);
    }
    let remain = width - used;
    match align {
        Align::Right => (remain, 0),
        Align::Left | Align::Default => (0, remain),
        Align::Middle => (remain / 2, remain / 2 + remain % 2),
    }
}

/// Parse the spec at the cursor and format `v` onto the context. This
/// is the dispatch point between the interpreter and the per-type
/// formatters.
pub(crate) fn format_value(
    v: &Value<'_>,
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    match v {
        Value::None => Err(FormatError::invalid_format("unformattable value")),
        Value::Bool(b) => {
            let data = parse_std_spec(parse, "sXxBbod")?;
            BoolFormatter::new(data).format(*b, out)
        }
        Value::Char(c) => {
            let data = parse_std_spec(parse, "XxBbodc?")?;
            if data.contains_type("c?") {
                format_codepoint_value(*c, data, out)
            } else {
                IntFormatter::new(data).format(*c as u32, out)
            }
        }
        Value::I32(i) => format_int_value(*i, parse, out),
        Value::U32(u) => format_int_value(*u, parse, out),
        Value::I64(i) => format_int_value(*i, parse, out),
        Value::U64(u) => format_int_value(*u, parse, out),
        Value::F32(f) => {
            let data = parse_std_spec(parse, "fFgGeEaA")?;
            FloatFormatter::new(data).format(*f, out)
        }
        Value::F64(f) => {
            let data = parse_std_spec(parse, "fFgGeEaA")?;
            FloatFormatter::new(data).format(*f, out)
        }
        Value::Str(t) => {
            let data = parse_std_spec(parse, "s?")?;
            StringFormatter::new(data).format(t.as_str(), out)
        }
        Value::Ptr(p) => {
            let data = parse_std_spec(parse, "pP")?;
            PointerFormatter::new(data)?.format(*p, out)
        }
        Value::Handle(h) => {
            let user = h.get();
            if !user.is_formattable() {
                return Err(FormatError::invalid_format("unformattable type"));
            }
            user.format(parse, out)
        }
    }
}

fn format_int_value<T: FormatInt>(
    val: T,
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let data = parse_std_spec(parse, "XxBbodc")?;
    if data.ty == 'c' {
        let (neg, mag) = val.sign_magnitude();
        if neg || mag > u128::from(u32::MAX) {
            return Err(FormatError::invalid_format(
                "integer value out of range for a codepoint",
            ));
        }
        let Some(cp) = char::from_u32(mag as u32) else {
            return Err(FormatError::invalid_format(
                "integer value is not a Unicode scalar",
            ));
        };
        format_codepoint_value(cp, data, out)
    } else {
        IntFormatter::new(data).format(val, out)
    }
}
