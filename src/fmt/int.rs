//! Integer formatting, `b B o d x X` type characters.

use crate::error::{FormatError, Result};
use crate::fmt::fill_size;
use crate::interp::FormatContext;
use crate::spec::{Align, SignMode, StdFormatSpec};

/// Integers the formatter accepts, decomposed into sign and magnitude.
pub trait FormatInt: num_traits::PrimInt {
    fn sign_magnitude(self) -> (bool, u128) {
        if self < Self::zero() {
            // every primitive magnitude fits i128 except i128::MIN,
            // which the value set of this crate never produces
            let wide = self.to_i128().unwrap_or(i128::MIN);
            (true, wide.unsigned_abs())
        } else {
            (false, self.to_u128().unwrap_or(0))
        }
    }
}

impl<T: num_traits::PrimInt> FormatInt for T {}

const DIGITS_LOWER: &[u8; 16] = b"0123456789abcdef";
const DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

pub struct IntFormatter {
    data: StdFormatSpec,
}

impl IntFormatter {
    pub fn new(spec: StdFormatSpec) -> Self {
        let mut data = spec;
        data.fill = spec.fill_or(' ');
        data.ty = spec.type_or('d');
        if data.align != Align::Default {
            data.fill_zero = false;
        } else {
            data.align = Align::Right;
        }
        Self { data }
    }

    pub fn format<T: FormatInt>(
        &self,
        val: T,
        ctx: &mut FormatContext<'_, '_>,
    ) -> Result<()> {
        let (neg, mag) = val.sign_magnitude();
        self.format_parts(neg, mag, ctx)
    }

    pub(crate) fn format_parts(
        &self,
        neg: bool,
        mut mag: u128,
        ctx: &mut FormatContext<'_, '_>,
    ) -> Result<()> {
        let (base, uppercase) = parse_type_ch(self.data.ty)?;
        let digits = if uppercase { DIGITS_UPPER } else { DIGITS_LOWER };

        // decimal grouping, three digits per group
        let group_sep = if self.data.use_locale && base == 10 {
            ctx.locale().map(|locale| locale.thousands_sep)
        } else {
            None
        };

        // digits land in the buffer least significant first
        let mut buf = [0u8; 128];
        let mut len = 0;
        loop {
            buf[len] = digits[(mag % u128::from(base)) as usize];
            len += 1;
            mag /= u128::from(base);
            if mag == 0 {
                break;
            }
        }

        let mut used = len;
        if group_sep.is_some() {
            used += (len - 1) / 3;
        }
        if self.data.alternate_form {
            used += alt_prefix_width(base);
        }
        let writes_sign = match self.data.sign {
            SignMode::Default | SignMode::Negative => neg,
            SignMode::Positive | SignMode::Space => true,
        };
        if writes_sign {
            used += 1;
        }

        let (left, right) = if self.data.fill_zero {
            (0, 0)
        } else {
            fill_size(self.data.width, used, self.data.align)
        };

        let out = ctx.out();
        out.push_char_n(self.data.fill, left);

        match self.data.sign {
            SignMode::Default | SignMode::Negative => {
                if neg {
                    out.push_char('-');
                }
            }
            SignMode::Positive => out.push_char(if neg { '-' } else { '+' }),
            SignMode::Space => out.push_char(if neg { '-' } else { ' ' }),
        }

        if self.data.alternate_form && base != 10 {
            out.push_char('0');
            match base {
                16 => out.push_char(if uppercase { 'X' } else { 'x' }),
                2 => out.push_char(if uppercase { 'B' } else { 'b' }),
                _ => {}
            }
        }

        if self.data.fill_zero && used < self.data.width {
            out.push_char_n('0', self.data.width - used);
        }

        for i in (0..len).rev() {
            out.push_char(buf[i] as char);
            if let Some(sep) = group_sep {
                if i != 0 && i % 3 == 0 {
                    out.push_char(sep);
                }
            }
        }

        out.push_char_n(self.data.fill, right);
        Ok(())
    }
}

fn parse_type_ch(ch: char) -> Result<(u32, bool)> {
    match ch {
        'X' => Ok((16, true)),
        'x' => Ok((16, false)),
        'B' => Ok((2, true)),
        'b' => Ok((2, false)),
        'o' => Ok((8, false)),
        'd' => Ok((10, false)),
        _ => Err(FormatError::invalid_format("invalid integer type")),
    }
}

// the octal prefix is the single leading zero
fn alt_prefix_width(base: u32) -> usize {
    match base {
        2 | 16 => 2,
        8 => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgStore;
    use crate::spec::StdFormatSpec;

    fn render(spec: StdFormatSpec, neg: bool, mag: u128) -> String {
        let args = ArgStore::new();
        let mut out = String::new();
        let mut ctx = FormatContext::new(&mut out, &args);
        IntFormatter::new(spec).format_parts(neg, mag, &mut ctx).unwrap();
        out
    }

    #[test]
    fn bases_and_prefixes() {
        let mut spec = StdFormatSpec { ty: 'x', ..Default::default() };
        assert_eq!(render(spec, false, 255), "ff");
        spec.alternate_form = true;
        assert_eq!(render(spec, false, 255), "0xff");
        spec.ty = 'X';
        assert_eq!(render(spec, false, 255), "0XFF");
        spec.ty = 'b';
        assert_eq!(render(spec, false, 5), "0b101");
        spec.ty = 'o';
        assert_eq!(render(spec, false, 8), "010");
        spec.ty = 'd';
        assert_eq!(render(spec, false, 8), "8");
    }

    #[test]
    fn zero_fill_counts_sign_and_prefix() {
        let spec = StdFormatSpec {
            ty: 'd',
            width: 6,
            fill_zero: true,
            sign: crate::spec::SignMode::Positive,
            ..Default::default()
        };
        assert_eq!(render(spec, false, 42), "+00042");

        let spec = StdFormatSpec {
            ty: 'x',
            width: 6,
            fill_zero: true,
            alternate_form: true,
            ..Default::default()
        };
        assert_eq!(render(spec, false, 0xa), "0x000a");
    }

    #[test]
    fn explicit_align_disables_zero_fill() {
        let spec = StdFormatSpec {
            width: 6,
            fill_zero: true,
            align: Align::Left,
            ..Default::default()
        };
        assert_eq!(render(spec, true, 42), "-42   ");
    }

    #[test]
    fn locale_grouping() {
        let args = ArgStore::new();
        let locale = crate::locale::Locale::new('.', ',', "true", "false");

        let render = |spec: StdFormatSpec, mag: u128| {
            let mut out = String::new();
            let mut ctx = FormatContext::with_locale(&mut out, &args, &locale);
            IntFormatter::new(spec).format_parts(false, mag, &mut ctx).unwrap();
            out
        };

        let spec = StdFormatSpec { ty: 'd', use_locale: true, ..Default::default() };
        assert_eq!(render(spec, 1_234_567), "1,234,567");
        assert_eq!(render(spec, 123), "123");
        assert_eq!(render(spec, 1_000), "1,000");

        // the separators count against the width
        let spec = StdFormatSpec {
            ty: 'd',
            width: 11,
            use_locale: true,
            ..Default::default()
        };
        assert_eq!(render(spec, 1_234_567), "  1,234,567");

        // only the decimal form groups
        let spec = StdFormatSpec { ty: 'x', use_locale: true, ..Default::default() };
        assert_eq!(render(spec, 0x12D687), "12d687");

        // no locale handle, no grouping
        let spec = StdFormatSpec { ty: 'd', use_locale: true, ..Default::default() };
        let mut out = String::new();
        let mut ctx = FormatContext::new(&mut out, &args);
        IntFormatter::new(spec).format_parts(false, 1_234_567, &mut ctx).unwrap();
        assert_eq!(out, "1234567");
    }

    #[test]
    fn sign_modes() {
        let base = StdFormatSpec::default();
        assert_eq!(render(base, false, 1), "1");
        let plus = StdFormatSpec { sign: SignMode::Positive, ..base };
        assert_eq!(render(plus, false, 1), "+1");
        assert_eq!(render(plus, true, 1), "-1");
        let space = StdFormatSpec { sign: SignMode::Space, ..base };
        assert_eq!(render(space, false, 1), " 1");
    }
}
