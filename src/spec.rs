//! Parsed format specifications and their parsers.

use serde::Serialize;

use crate::error::{FormatError, Result};
use crate::interp::{self, ParseContext};
use crate::script::ScriptVar;

/// Filling alignment. The filling character occupies the remaining
/// space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Align {
    /// Actual alignment depends on the formatted type.
    #[default]
    Default,
    /// `<`
    Left,
    /// `^`
    Middle,
    /// `>`
    Right,
}

/// Sign handling for numeric values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SignMode {
    /// Actual meaning depends on the formatted type.
    #[default]
    Default,
    /// `+`: always write the sign.
    Positive,
    /// `-`: only write the sign of negative values.
    Negative,
    /// `(space)`: space prefix for non-negative values.
    Space,
}

/// Data parsed from a standard format specification,
/// `[[fill]align][sign][#][0][width][.precision][L][type]`.
/// `'\0'` in `fill` and `ty` means "unset".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StdFormatSpec {
    pub width: usize,
    pub precision: usize,
    pub fill: char,
    pub ty: char,
    pub align: Align,
    pub sign: SignMode,
    pub fill_zero: bool,
    pub alternate_form: bool,
    pub use_locale: bool,
}

impl Default for StdFormatSpec {
    fn default() -> Self {
        Self {
            width: 0,
            precision: 0,
            fill: '\0',
            ty: '\0',
            align: Align::Default,
            sign: SignMode::Default,
            fill_zero: false,
            alternate_form: false,
            use_locale: false,
        }
    }
}

impl StdFormatSpec {
    pub fn contains_type(&self, types: &str) -> bool {
        self.ty == '\0' || types.contains(self.ty)
    }

    pub fn check_type(&self, types: &str) -> Result<()> {
        if self.contains_type(types) {
            Ok(())
        } else {
            Err(FormatError::invalid_format("invalid format type"))
        }
    }

    pub fn type_or(&self, default: char) -> char {
        if self.ty == '\0' {
            default
        } else {
            self.ty
        }
    }

    pub fn fill_or(&self, default: char) -> char {
        if self.fill == '\0' {
            default
        } else {
            self.fill
        }
    }
}

/// Data parsed from a simple format specification,
/// `[[fill]align][width][L]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimpleFormatSpec {
    pub width: usize,
    pub fill: char,
    pub align: Align,
    pub use_locale: bool,
}

impl Default for SimpleFormatSpec {
    fn default() -> Self {
        Self {
            width: 0,
            fill: '\0',
            align: Align::Default,
            use_locale: false,
        }
    }
}

impl SimpleFormatSpec {
    pub fn fill_or(&self, default: char) -> char {
        if self.fill == '\0' {
            default
        } else {
            self.fill
        }
    }

    pub fn to_std(self) -> StdFormatSpec {
        StdFormatSpec {
            width: self.width,
            fill: self.fill,
            align: self.align,
            use_locale: self.use_locale,
            ..StdFormatSpec::default()
        }
    }
}

fn is_align_ch(ch: char) -> bool {
    matches!(ch, '<' | '>' | '^')
}

fn get_align(ch: char) -> Align {
    match ch {
        '<' => Align::Left,
        '>' => Align::Right,
        _ => Align::Middle,
    }
}

fn is_sign_ch(ch: char) -> bool {
    matches!(ch, '+' | '-' | ' ')
}

fn get_sign(ch: char) -> SignMode {
    match ch {
        '+' => SignMode::Positive,
        '-' => SignMode::Negative,
        _ => SignMode::Space,
    }
}

fn check_stop(ctx: &ParseContext<'_>) -> bool {
    matches!(ctx.peek(), None | Some('}'))
}

/// Parse a literal or `{…}` width/precision. A width must be positive,
/// a precision non-negative; the `{…}` form re-enters the access
/// language and the result must be an integer.
fn parse_count(ctx: &mut ParseContext<'_>, is_precision: bool) -> Result<usize> {
    match ctx.peek() {
        Some('{') => {
            ctx.bump();
            let arg = interp::access(ctx)?;
            if ctx.peek() != Some('}') {
                return Err(FormatError::invalid_format("unterminated dynamic count"));
            }
            ctx.bump();

            let var = ScriptVar::from_value(&arg)?;
            if !var.holds_int() {
                return Err(FormatError::invalid_format(
                    "dynamic width/precision must be an integer",
                ));
            }
            let val = var.as_int()?;
            if val < 0 || (!is_precision && val == 0) {
                return Err(FormatError::invalid_format("count out of range"));
            }
            Ok(val as usize)
        }
        Some(ch) if ch.is_ascii_digit() => {
            if !is_precision && ch == '0' {
                return Err(FormatError::invalid_format("leading zero in width"));
            }
            let mut val = 0usize;
            while let Some(ch) = ctx.peek() {
                let Some(digit) = ch.to_digit(10) else { break };
                val = val
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit as usize))
                    .ok_or_else(|| FormatError::invalid_format("count overflow"))?;
                ctx.bump();
            }
            Ok(val)
        }
        _ => Err(FormatError::invalid_format("invalid count")),
    }
}

/// Parse a standard format specification, stopping at `}` or the end.
/// `types` is the set of type characters the caller accepts.
pub fn parse_std_spec(ctx: &mut ParseContext<'_>, types: &str) -> Result<StdFormatSpec> {
    let mut result = StdFormatSpec::default();

    if check_stop(ctx) {
        return Ok(result);
    }

    // fill is present iff the next character is an alignment
    if let (Some(fill), Some(second)) = (ctx.peek(), ctx.peek_second()) {
        if is_align_ch(second) && !matches!(fill, '{' | '}') {
            result.fill = fill;
            result.align = get_align(second);
            ctx.bump();
            ctx.bump();
        }
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if let Some(ch) = ctx.peek() {
        if is_align_ch(ch) && result.align == Align::Default {
            result.align = get_align(ch);
            ctx.bump();
        }
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if let Some(ch) = ctx.peek() {
        if is_sign_ch(ch) {
            result.sign = get_sign(ch);
            ctx.bump();
        }
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if ctx.peek() == Some('#') {
        result.alternate_form = true;
        ctx.bump();
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if ctx.peek() == Some('0') {
        result.fill_zero = true;
        ctx.bump();
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if let Some(ch) = ctx.peek() {
        if ch.is_ascii_digit() || ch == '{' {
            result.width = parse_count(ctx, false)?;
        }
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if ctx.peek() == Some('.') {
        ctx.bump();
        if ctx.peek().is_none() {
            return Err(FormatError::invalid_format("invalid precision"));
        }
        result.precision = parse_count(ctx, true)?;
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if ctx.peek() == Some('L') {
        result.use_locale = true;
        ctx.bump();
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    match ctx.peek() {
        Some(ch) if types.contains(ch) => {
            result.ty = ch;
            ctx.bump();
        }
        _ => return Err(FormatError::invalid_format("invalid format type")),
    }

    Ok(result)
}

/// Parse a simple format specification, `[[fill]align][width][L]`.
pub fn parse_simple_spec(ctx: &mut ParseContext<'_>) -> Result<SimpleFormatSpec> {
    let mut result = SimpleFormatSpec::default();

    if check_stop(ctx) {
        return Ok(result);
    }

    if let (Some(fill), Some(second)) = (ctx.peek(), ctx.peek_second()) {
        if is_align_ch(second) && !matches!(fill, '{' | '}') {
            result.fill = fill;
            result.align = get_align(second);
            ctx.bump();
            ctx.bump();
        }
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if let Some(ch) = ctx.peek() {
        if is_align_ch(ch) && result.align == Align::Default {
            result.align = get_align(ch);
            ctx.bump();
        }
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if let Some(ch) = ctx.peek() {
        if ch.is_ascii_digit() || ch == '{' {
            result.width = parse_count(ctx, false)?;
        }
    }

    if check_stop(ctx) {
        return Ok(result);
    }
    if ctx.peek() == Some('L') {
        result.use_locale = true;
        ctx.bump();
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgStore;
    use crate::fmt_args;

    fn parse(spec: &str, types: &str) -> Result<StdFormatSpec> {
        let args = ArgStore::new();
        let mut ctx = ParseContext::new(spec, &args);
        parse_std_spec(&mut ctx, types)
    }

    #[test]
    fn full_standard_spec() {
        let spec = parse("*>+#06.3Lx", "bBxXod").unwrap();
        insta::assert_debug_snapshot!(spec, @r###"
        StdFormatSpec {
            width: 6,
            precision: 3,
            fill: '*',
            ty: 'x',
            align: Right,
            sign: Positive,
            fill_zero: true,
            alternate_form: true,
            use_locale: true,
        }
        "###);
    }

    #[test]
    fn empty_spec_is_all_defaults() {
        let spec = parse("", "d").unwrap();
        assert_eq!(spec, StdFormatSpec::default());
        let spec = parse("}", "d").unwrap();
        assert_eq!(spec, StdFormatSpec::default());
    }

    #[test]
    fn zero_fill_is_not_a_width() {
        let spec = parse("06d", "d").unwrap();
        assert!(spec.fill_zero);
        assert_eq!(spec.width, 6);
        // a literal width must not start with zero
        assert!(parse("007", "d").is_err());
    }

    #[test]
    fn unknown_type_char_rejected() {
        assert!(parse("q", "d").is_err());
        assert!(parse("x", "d").is_err());
    }

    #[test]
    fn dynamic_width_from_argument() {
        let args = fmt_args![8];
        let mut ctx = ParseContext::new("{}d", &args);
        let spec = parse_std_spec(&mut ctx, "d").unwrap();
        assert_eq!(spec.width, 8);
        assert_eq!(spec.ty, 'd');
    }

    #[test]
    fn dynamic_width_rejects_non_integer() {
        let args = fmt_args!["wide"];
        let mut ctx = ParseContext::new("{}d", &args);
        assert!(parse_std_spec(&mut ctx, "d").is_err());
    }

    #[test]
    fn simple_spec() {
        let args = ArgStore::new();
        let mut ctx = ParseContext::new("-^10", &args);
        let spec = parse_simple_spec(&mut ctx).unwrap();
        assert_eq!(spec.fill, '-');
        assert_eq!(spec.align, Align::Middle);
        assert_eq!(spec.width, 10);
    }
}
