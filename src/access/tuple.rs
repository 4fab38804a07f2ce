//! Accessors and formatting for tuple-like values.

use crate::access::render_element;
use crate::error::{FormatError, Result};
use crate::fmt::fill_size;
use crate::fmt::string::StringFormatter;
use crate::interp::{FormatContext, ParseContext};
use crate::spec::{parse_simple_spec, SimpleFormatSpec};
use crate::unicode::CodepointExt;
use crate::value::{IndexKey, OwnedValue, ToValue, UserValue, Value};

/// A detached pair, also used for map entries.
#[derive(Debug, Clone)]
pub struct Pair(pub OwnedValue, pub OwnedValue);

impl UserValue for Pair {
    fn index(&self, key: &IndexKey<'_>) -> Result<OwnedValue> {
        tuple_index(&[self.0.clone(), self.1.clone()], key)
    }

    fn attribute(&self, name: &str) -> Result<OwnedValue> {
        match name {
            "first" => Ok(self.0.clone()),
            "second" => Ok(self.1.clone()),
            "size" => Ok(Value::U64(2)),
            _ => Err(FormatError::InvalidAttribute(name.to_owned())),
        }
    }

    fn format(
        &self,
        parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> Result<()> {
        format_tuple(&[self.0.clone(), self.1.clone()], parse, out)
    }
}

impl ToValue for Pair {
    fn to_value(&self) -> OwnedValue {
        Value::independent(self.clone())
    }
}

fn tuple_index(elements: &[OwnedValue], key: &IndexKey<'_>) -> Result<OwnedValue> {
    match key {
        IndexKey::Index(i) => {
            let len = elements.len() as isize;
            let idx = if *i < 0 { i + len } else { *i };
            if (0..len).contains(&idx) {
                Ok(elements[idx as usize].clone())
            } else {
                Ok(Value::None)
            }
        }
        _ => Err(FormatError::IndexUnavailable),
    }
}

pub(crate) fn emit_padded(
    body: &str,
    spec: SimpleFormatSpec,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let std_spec = spec.to_std();
    StringFormatter::new(std_spec).format(body, out)
}

/// Render elements joined by `sep` between `opening` and `closing`,
/// honouring the leading simple spec.
pub(crate) fn render_sequence(
    elements: &[OwnedValue],
    opening: &str,
    closing: &str,
    sep: &str,
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let spec = parse_simple_spec(parse)?;
    let mut body = String::new();
    {
        let args = crate::args::ArgStore::new();
        let mut inner = FormatContext::new(&mut body, &args);
        inner.out().push_str(opening);
        for (i, element) in elements.iter().enumerate() {
            if i != 0 {
                inner.out().push_str(sep);
            }
            render_element(element, &mut inner)?;
        }
        inner.out().push_str(closing);
    }
    emit_padded(&body, spec, out)
}

/// Tuple presentation: default `(a, b)`, `n` strips the brackets, `m`
/// renders a pair as `k: v`.
pub(crate) fn format_tuple(
    elements: &[OwnedValue],
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let spec = parse_simple_spec(parse)?;

    let mut opening = "(";
    let mut closing = ")";
    let mut sep = ", ";
    match parse.peek() {
        Some('m') if elements.len() == 2 => {
            sep = ": ";
            opening = "";
            closing = "";
            parse.bump();
        }
        Some('n') => {
            opening = "";
            closing = "";
            parse.bump();
        }
        _ => {}
    }

    let mut body = String::new();
    {
        let args = crate::args::ArgStore::new();
        let mut inner = FormatContext::new(&mut body, &args);
        inner.out().push_str(opening);
        for (i, element) in elements.iter().enumerate() {
            if i != 0 {
                inner.out().push_str(sep);
            }
            render_element(element, &mut inner)?;
        }
        inner.out().push_str(closing);
    }

    // width counts display columns like the string formatter
    let used: usize = body.chars().map(CodepointExt::estimate_width).sum();
    let (left, right) = fill_size(spec.width, used, spec.align);
    let sink = out.out();
    sink.push_char_n(spec.fill_or(' '), left);
    sink.push_str(&body);
    sink.push_char_n(spec.fill_or(' '), right);
    Ok(())
}

macro_rules! tuple_user_value {
    ($(($($idx:tt $name:ident),+))*) => {
        $(
            impl<$($name: ToValue + Clone + 'static),+> UserValue for ($($name,)+) {
                fn index(&self, key: &IndexKey<'_>) -> Result<OwnedValue> {
                    tuple_index(&[$(self.$idx.to_value()),+], key)
                }

                fn attribute(&self, name: &str) -> Result<OwnedValue> {
                    let elements = [$(self.$idx.to_value()),+];
                    if elements.len() == 2 {
                        match name {
                            "first" => return Ok(elements[0].clone()),
                            "second" => return Ok(elements.get(1).unwrap().clone()),
                            _ => {}
                        }
                    }
                    match name {
                        "size" => Ok(Value::U64(elements.len() as u64)),
                        _ => Err(FormatError::InvalidAttribute(name.to_owned())),
                    }
                }

                fn format(
                    &self,
                    parse: &mut ParseContext<'_>,
                    out: &mut FormatContext<'_, '_>,
                ) -> Result<()> {
                    format_tuple(&[$(self.$idx.to_value()),+], parse, out)
                }
            }

            impl<$($name: ToValue + Clone + 'static),+> ToValue for ($($name,)+) {
                fn to_value(&self) -> OwnedValue {
                    Value::independent(self.clone())
                }
            }
        )*
    };
}

tuple_user_value! {
    (0 A)
    (0 A, 1 B)
    (0 A, 1 B, 2 C)
    (0 A, 1 B, 2 C, 3 D)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_projection() {
        let pair = (1i32, "two");
        assert!(matches!(
            pair.index(&IndexKey::Index(0)).unwrap(),
            Value::I32(1)
        ));
        assert!(matches!(
            pair.index(&IndexKey::Index(-1)).unwrap(),
            Value::Str(_)
        ));
        assert!(matches!(
            pair.index(&IndexKey::Index(2)).unwrap(),
            Value::None
        ));
        assert!(matches!(pair.attribute("first").unwrap(), Value::I32(1)));
        assert!(matches!(pair.attribute("second").unwrap(), Value::Str(_)));
        assert!(matches!(pair.attribute("size").unwrap(), Value::U64(2)));
    }

    #[test]
    fn triple_has_no_pair_attributes() {
        let t = (1i32, 2i32, 3i32);
        assert!(t.attribute("first").is_err());
        assert!(matches!(t.attribute("size").unwrap(), Value::U64(3)));
    }
}
