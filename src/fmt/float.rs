//! Floating point formatting, `a A e E f F g G` type characters.

use crate::error::Result;
use crate::fmt::fill_size;
use crate::interp::FormatContext;
use crate::spec::{Align, SignMode, StdFormatSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FloatKind {
    Fixed,
    Scientific,
    General,
    Hex,
}

pub struct FloatFormatter {
    data: StdFormatSpec,
}

impl FloatFormatter {
    pub fn new(spec: StdFormatSpec) -> Self {
        let mut data = spec;
        data.fill = spec.fill_or(' ');
        if data.align == Align::Default {
            data.align = Align::Right;
        }
        Self { data }
    }

    pub fn format<T>(&self, val: T, ctx: &mut FormatContext<'_, '_>) -> Result<()>
    where
        T: num_traits::Float
            + Into<f64>
            + std::fmt::Display
            + std::fmt::LowerExp,
    {
        let neg = val.is_sign_negative();
        let magnitude = val.abs();

        let mut body = if magnitude.is_infinite() {
            "inf".to_owned()
        } else if magnitude.is_nan() {
            "nan".to_owned()
        } else {
            self.convert(magnitude)
        };

        let (_, uppercase) = self.kind();
        if uppercase {
            body.make_ascii_uppercase();
        }
        if self.data.use_locale {
            if let Some(locale) = ctx.locale() {
                if locale.decimal_point != '.' {
                    body = body.replace('.', &locale.decimal_point.to_string());
                }
            }
        }

        let mut used = body.chars().count();
        let writes_sign = match self.data.sign {
            SignMode::Default | SignMode::Negative => neg,
            SignMode::Positive | SignMode::Space => true,
        };
        if writes_sign {
            used += 1;
        }

        let (left, right) = fill_size(self.data.width, used, self.data.align);

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
        out.push_str(&body);
        out.push_char_n(self.data.fill, right);
        Ok(())
    }

    fn kind(&self) -> (FloatKind, bool) {
        match self.data.ty {
            'F' => (FloatKind::Fixed, true),
            'f' => (FloatKind::Fixed, false),
            'E' => (FloatKind::Scientific, true),
            'e' => (FloatKind::Scientific, false),
            'A' => (FloatKind::Hex, true),
            'a' => (FloatKind::Hex, false),
            'G' => (FloatKind::General, true),
            _ => (FloatKind::General, false),
        }
    }

    // precision zero means "not specified" for the explicit notations
    fn precision_or(&self, default: usize) -> usize {
        if self.data.precision == 0 {
            default
        } else {
            self.data.precision
        }
    }

    // the string is produced at the value's own type so the shortest
    // representation of an f32 stays short
    fn convert<T>(&self, val: T) -> String
    where
        T: num_traits::Float
            + Into<f64>
            + std::fmt::Display
            + std::fmt::LowerExp,
    {
        let (kind, _) = self.kind();
        match kind {
            FloatKind::Fixed => format!("{:.*}", self.precision_or(6), val),
            FloatKind::Scientific => scientific(val, self.precision_or(6)),
            FloatKind::Hex => hexfloat(val.into()),
            FloatKind::General => {
                if self.data.ty == '\0' && self.data.precision == 0 {
                    // shortest round-trip representation
                    format!("{val}")
                } else {
                    general(val, self.precision_or(6))
                }
            }
        }
    }
}

fn split_exp(s: &str) -> (String, i32) {
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            (mantissa.to_owned(), exp.parse().unwrap_or(0))
        }
        None => (s.to_owned(), 0),
    }
}

fn format_exp(exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("e{}{:02}", sign, exp.abs())
}

fn scientific<T: std::fmt::LowerExp>(val: T, precision: usize) -> String {
    let (mantissa, exp) = split_exp(&format!("{:.*e}", precision, val));
    format!("{}{}", mantissa, format_exp(exp))
}

fn trim_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_owned()
}

fn general<T>(val: T, precision: usize) -> String
where
    T: std::fmt::Display + std::fmt::LowerExp,
{
    let p = precision.max(1);
    let (mantissa, exp) = split_exp(&format!("{:.*e}", p - 1, val));
    if exp >= -4 && i64::from(exp) < p as i64 {
        let fixed_precision = (p as i64 - 1 - i64::from(exp)).max(0) as usize;
        trim_zeros(format!("{:.*}", fixed_precision, val))
    } else {
        format!("{}{}", trim_zeros(mantissa), format_exp(exp))
    }
}

// Shortest hexadecimal significand, `1.xxxp±e` (`0.xxxp-1022` for
// subnormals).
fn hexfloat(val: f64) -> String {
    let bits = val.to_bits();
    let mantissa = bits & ((1u64 << 52) - 1);
    let biased = ((bits >> 52) & 0x7FF) as i64;

    if biased == 0 && mantissa == 0 {
        return "0p+0".to_owned();
    }

    let (lead, exp) = if biased == 0 {
        ('0', -1022)
    } else {
        ('1', biased - 1023)
    };

    let frac = format!("{mantissa:013x}");
    let frac = frac.trim_end_matches('0');
    let exp_sign = if exp < 0 { '-' } else { '+' };
    if frac.is_empty() {
        format!("{lead}p{exp_sign}{}", exp.abs())
    } else {
        format!("{lead}.{frac}p{exp_sign}{}", exp.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgStore;

    fn render(spec: StdFormatSpec, val: f64) -> String {
        let args = ArgStore::new();
        let mut out = String::new();
        let mut ctx = FormatContext::new(&mut out, &args);
        FloatFormatter::new(spec).format(val, &mut ctx).unwrap();
        out
    }

    #[test]
    fn shortest_representation() {
        assert_eq!(render(StdFormatSpec::default(), 3.14), "3.14");
        assert_eq!(render(StdFormatSpec::default(), 1.0), "1");
        assert_eq!(render(StdFormatSpec::default(), 0.5), "0.5");
    }

    #[test]
    fn fixed_notation() {
        let spec = StdFormatSpec { ty: 'f', ..Default::default() };
        assert_eq!(render(spec, 3.14), "3.140000");
        let spec = StdFormatSpec { ty: 'f', precision: 2, ..Default::default() };
        assert_eq!(render(spec, 3.14159), "3.14");
    }

    #[test]
    fn scientific_notation() {
        let spec = StdFormatSpec { ty: 'e', precision: 2, ..Default::default() };
        assert_eq!(render(spec, 314.0), "3.14e+02");
        let spec = StdFormatSpec { ty: 'E', precision: 2, ..Default::default() };
        assert_eq!(render(spec, 0.0314), "3.14E-02");
    }

    #[test]
    fn general_notation() {
        let spec = StdFormatSpec { ty: 'g', ..Default::default() };
        assert_eq!(render(spec, 3.14), "3.14");
        assert_eq!(render(spec, 123456789.0), "1.23457e+08");
        assert_eq!(render(spec, 0.00001), "1e-05");
    }

    #[test]
    fn hexfloat_notation() {
        let spec = StdFormatSpec { ty: 'a', ..Default::default() };
        assert_eq!(render(spec, 1.0), "1p+0");
        assert_eq!(render(spec, 3.0), "1.8p+1");
        assert_eq!(render(spec, 0.0), "0p+0");
        let spec = StdFormatSpec { ty: 'A', ..Default::default() };
        assert_eq!(render(spec, 3.0), "1.8P+1");
    }

    #[test]
    fn specials_and_sign() {
        let plus = StdFormatSpec { sign: SignMode::Positive, ..Default::default() };
        assert_eq!(render(plus, f64::INFINITY), "+inf");
        assert_eq!(render(plus, f64::NEG_INFINITY), "-inf");
        assert_eq!(render(StdFormatSpec::default(), f64::NAN), "nan");
        let space = StdFormatSpec { sign: SignMode::Space, ..Default::default() };
        assert_eq!(render(space, 1.5), " 1.5");
    }

    #[test]
    fn width_and_align() {
        let spec = StdFormatSpec { ty: 'f', precision: 5, width: 10, ..Default::default() };
        assert_eq!(render(spec, 3.14), "   3.14000");
        let spec = StdFormatSpec {
            ty: 'f',
            precision: 1,
            width: 6,
            align: Align::Left,
            ..Default::default()
        };
        assert_eq!(render(spec, 2.5), "2.5   ");
    }
}
