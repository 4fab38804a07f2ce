//! Codepoint, boolean and pointer formatting.

use crate::error::{FormatError, Result};
use crate::fmt::fill_size;
use crate::fmt::int::IntFormatter;
use crate::fmt::string::StringFormatter;
use crate::interp::FormatContext;
use crate::sink::append_escaped_char;
use crate::spec::{Align, StdFormatSpec};
use crate::unicode::CodepointExt;

/// Format a codepoint with the `c`/`?` presentation.
pub fn format_codepoint_value(
    cp: char,
    spec: StdFormatSpec,
    ctx: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let mut data = spec;
    data.ty = spec.type_or('c');
    data.fill = spec.fill_or(' ');
    if data.align == Align::Default {
        data.align = Align::Left;
    }

    if data.ty == '?' {
        append_escaped_char(ctx.out(), cp);
        return Ok(());
    }

    let (left, right) = fill_size(data.width, cp.estimate_width(), data.align);
    let out = ctx.out();
    out.push_char_n(data.fill, left);
    out.push_char(cp);
    out.push_char_n(data.fill, right);
    Ok(())
}

/// Boolean formatting: word form for `s`, integer form otherwise. The
/// word form honours the locale names when the `L` flag is set.
pub struct BoolFormatter {
    data: StdFormatSpec,
}

impl BoolFormatter {
    pub fn new(data: StdFormatSpec) -> Self {
        Self { data }
    }

    pub fn format(&self, val: bool, ctx: &mut FormatContext<'_, '_>) -> Result<()> {
        if !self.data.contains_type("s") {
            return IntFormatter::new(self.data).format(u8::from(val), ctx);
        }

        let word = match (self.data.use_locale, ctx.locale()) {
            (true, Some(locale)) => {
                if val {
                    locale.true_name.clone()
                } else {
                    locale.false_name.clone()
                }
            }
            _ => (if val { "true" } else { "false" }).to_owned(),
        };

        let mut spec = self.data;
        spec.ty = '\0';
        StringFormatter::new(spec).format(&word, ctx)
    }
}

/// Pointer formatting: hex address with the alternate form forced.
pub struct PointerFormatter {
    data: StdFormatSpec,
}

impl PointerFormatter {
    pub fn new(spec: StdFormatSpec) -> Result<Self> {
        if spec.use_locale {
            return Err(FormatError::invalid_format("locale flag on a pointer"));
        }
        let mut data = spec;
        data.ty = match spec.ty {
            '\0' | 'p' => 'x',
            _ => 'X',
        };
        data.alternate_form = true;
        Ok(Self { data })
    }

    pub fn format(&self, addr: usize, ctx: &mut FormatContext<'_, '_>) -> Result<()> {
        IntFormatter::new(self.data).format(addr, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgStore;
    use crate::locale::Locale;

    #[test]
    fn codepoint_padding() {
        let args = ArgStore::new();
        let mut out = String::new();
        let mut ctx = FormatContext::new(&mut out, &args);
        let spec = StdFormatSpec { width: 5, align: Align::Middle, ..Default::default() };
        format_codepoint_value('a', spec, &mut ctx).unwrap();
        assert_eq!(out, "  a  ");
    }

    #[test]
    fn bool_word_and_integer_forms() {
        let args = ArgStore::new();
        let mut out = String::new();
        let mut ctx = FormatContext::new(&mut out, &args);
        BoolFormatter::new(StdFormatSpec::default())
            .format(true, &mut ctx)
            .unwrap();
        assert_eq!(out, "true");

        let mut out = String::new();
        let mut ctx = FormatContext::new(&mut out, &args);
        let spec = StdFormatSpec { ty: 'd', ..Default::default() };
        BoolFormatter::new(spec).format(false, &mut ctx).unwrap();
        assert_eq!(out, "0");
    }

    #[test]
    fn bool_locale_names() {
        let args = ArgStore::new();
        let locale = Locale::new('.', ',', "ja", "nein");
        let mut out = String::new();
        let mut ctx = FormatContext::with_locale(&mut out, &args, &locale);
        let spec = StdFormatSpec { use_locale: true, ..Default::default() };
        BoolFormatter::new(spec).format(true, &mut ctx).unwrap();
        assert_eq!(out, "ja");
    }

    #[test]
    fn pointer_forces_alternate_hex() {
        let args = ArgStore::new();
        let mut out = String::new();
        let mut ctx = FormatContext::new(&mut out, &args);
        PointerFormatter::new(StdFormatSpec::default())
            .unwrap()
            .format(0xdead, &mut ctx)
            .unwrap();
        assert_eq!(out, "0xdead");

        let mut out = String::new();
        let mut ctx = FormatContext::new(&mut out, &args);
        let spec = StdFormatSpec { ty: 'P', ..Default::default() };
        PointerFormatter::new(spec).unwrap().format(0xdead, &mut ctx).unwrap();
        assert_eq!(out, "0XDEAD");

        let spec = StdFormatSpec { use_locale: true, ..Default::default() };
        assert!(PointerFormatter::new(spec).is_err());
    }
}
