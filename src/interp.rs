//! The streaming format-string interpreter and its per-call contexts.

use std::cmp::Ordering;

use crate::access::{is_identifier_ch, is_identifier_start};
use crate::args::ArgStore;
use crate::error::{FormatError, Result, ScriptErrorCode};
use crate::fmt::format_value;
use crate::locale::Locale;
use crate::script::ScriptVar;
use crate::sink::Sink;
use crate::text::{Slice, Text, NPOS};
use crate::value::{IndexKey, Value};

/// Cursor state threaded through one format call: the format string,
/// the argument store, and the auto-indexing latch.
pub struct ParseContext<'a> {
    fmt: &'a str,
    pos: usize,
    args: &'a ArgStore<'a>,
    next_auto: usize,
    auto_used: bool,
    manual_used: bool,
}

impl<'a> ParseContext<'a> {
    pub fn new(fmt: &'a str, args: &'a ArgStore<'a>) -> Self {
        Self {
            fmt,
            pos: 0,
            args,
            next_auto: 0,
            auto_used: false,
            manual_used: false,
        }
    }

    pub fn args(&self) -> &'a ArgStore<'a> {
        self.args
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.fmt.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.fmt[self.pos..].chars().next()
    }

    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.fmt[self.pos..].chars();
        chars.next();
        chars.next()
    }

    pub fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn slice_from(&self, start: usize) -> &'a str {
        &self.fmt[start..self.pos]
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    pub(crate) fn error(&self, code: ScriptErrorCode) -> FormatError {
        FormatError::script(code, self.pos)
    }

    /// Claim the next automatic argument index. Raises once manual
    /// indexing has been used anywhere in the format string.
    fn auto_index(&mut self) -> Result<usize> {
        if self.manual_used {
            return Err(FormatError::invalid_format(
                "no default argument after an explicit argument",
            ));
        }
        self.auto_used = true;
        let idx = self.next_auto;
        self.next_auto += 1;
        Ok(idx)
    }

    /// Latch manual indexing. Raises once automatic indexing has been
    /// used anywhere in the format string.
    fn mark_manual(&mut self) -> Result<()> {
        if self.auto_used {
            return Err(FormatError::invalid_format(
                "explicit argument after a default argument",
            ));
        }
        self.manual_used = true;
        Ok(())
    }

    pub fn manual_indexing(&self) -> bool {
        self.manual_used
    }

    /// Skip an unparsed format specification, tracking balanced braces
    /// until an unbalanced `}`.
    pub fn skip_spec(&mut self) {
        let mut depth = 0usize;
        while let Some(ch) = self.peek() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }
}

/// Output side of one format call: the sink, the argument store and an
/// optional locale handle the core does not interpret.
pub struct FormatContext<'a, 's> {
    out: &'s mut dyn Sink,
    args: &'a ArgStore<'a>,
    locale: Option<&'a Locale>,
}

impl<'a, 's> FormatContext<'a, 's> {
    pub fn new(out: &'s mut dyn Sink, args: &'a ArgStore<'a>) -> Self {
        Self {
            out,
            args,
            locale: None,
        }
    }

    pub fn with_locale(
        out: &'s mut dyn Sink,
        args: &'a ArgStore<'a>,
        locale: &'a Locale,
    ) -> Self {
        Self {
            out,
            args,
            locale: Some(locale),
        }
    }

    pub fn out(&mut self) -> &mut dyn Sink {
        self.out
    }

    pub fn args(&self) -> &'a ArgStore<'a> {
        self.args
    }

    pub fn locale(&self) -> Option<&'a Locale> {
        self.locale
    }

    /// Re-enter the interpreter on the current sink.
    pub fn format_to(&mut self, fmt: &str, args: &ArgStore<'_>) -> Result<()> {
        let mut parse = ParseContext::new(fmt, args);
        let mut inner = FormatContext {
            out: &mut *self.out,
            args,
            locale: self.locale,
        };
        run(&mut parse, &mut inner)
    }
}

/// Interpret a whole format string.
pub(crate) fn run(
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    while let Some(ch) = parse.peek() {
        match ch {
            '}' => {
                parse.bump();
                match parse.peek() {
                    None => return Err(parse.error(ScriptErrorCode::EndOfString)),
                    Some('}') => {
                        out.out().push_char('}');
                        parse.bump();
                    }
                    Some(_) => {
                        return Err(parse.error(ScriptErrorCode::UnenclosedBrace))
                    }
                }
            }
            '{' => {
                parse.bump();
                match parse.peek() {
                    None => return Err(parse.error(ScriptErrorCode::EndOfString)),
                    Some('{') => {
                        out.out().push_char('{');
                        parse.bump();
                    }
                    Some('$') => {
                        parse.bump();
                        exec_script(parse, out)?;
                        expect_close(parse)?;
                    }
                    Some(_) => {
                        exec_repl(parse, out)?;
                        expect_close(parse)?;
                    }
                }
            }
            _ => {
                out.out().push_char(ch);
                parse.bump();
            }
        }
    }
    Ok(())
}

fn expect_close(parse: &mut ParseContext<'_>) -> Result<()> {
    match parse.peek() {
        None => Err(parse.error(ScriptErrorCode::EndOfString)),
        Some('}') => {
            parse.bump();
            Ok(())
        }
        Some(_) => Err(parse.error(ScriptErrorCode::UnenclosedBrace)),
    }
}

/// Resolve the access chain at the cursor to an argument value.
pub(crate) fn access<'a>(parse: &mut ParseContext<'a>) -> Result<Value<'a>> {
    if parse.at_end() {
        return Err(parse.error(ScriptErrorCode::EndOfString));
    }
    let base = parse_field_id(parse)?;
    parse_chained_access(parse, base)
}

fn exec_repl(
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let arg = access(parse)?;
    if parse.at_end() {
        return Err(parse.error(ScriptErrorCode::EndOfString));
    }
    if parse.peek() == Some(':') {
        parse.bump();
    }
    format_value(&arg, parse, out)
}

fn skip_repl(parse: &mut ParseContext<'_>) -> Result<()> {
    let arg = access(parse)?;
    if parse.at_end() {
        return Err(parse.error(ScriptErrorCode::EndOfString));
    }
    if parse.peek() == Some(':') {
        parse.bump();
    }
    arg.skip_spec(parse)
}

fn exec_branch(
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    match parse.peek() {
        Some('\'') => {
            parse.bump();
            let body = parse_string(parse)?;
            out.out().push_str(body.as_str());
            Ok(())
        }
        Some('{') => {
            parse.bump();
            exec_repl(parse, out)?;
            expect_close(parse)
        }
        _ => Err(parse.error(ScriptErrorCode::InvalidString)),
    }
}

fn skip_branch(parse: &mut ParseContext<'_>) -> Result<()> {
    match parse.peek() {
        Some('\'') => {
            parse.bump();
            skip_string(parse);
            Ok(())
        }
        Some('{') => {
            parse.bump();
            skip_repl(parse)?;
            expect_close(parse)
        }
        _ => Err(parse.error(ScriptErrorCode::InvalidString)),
    }
}

fn exec_branch_if(
    cond: bool,
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    parse.skip_ws();
    if parse.at_end() {
        return Err(parse.error(ScriptErrorCode::EndOfString));
    }
    if cond {
        exec_branch(parse, out)?;
    } else {
        skip_branch(parse)?;
    }
    parse.skip_ws();
    Ok(())
}

/// Execute a scripted field. Branches evaluate left to right and
/// exactly one body is emitted; later branches are still parsed so the
/// cursor ends up past the whole script.
fn exec_script(
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let mut executed = false;

    let cond = parse_condition(parse)?;
    exec_branch_if(cond, parse, out)?;
    executed |= cond;

    while parse.peek() == Some(':') {
        parse.bump();
        parse.skip_ws();
        if parse.peek() == Some('$') {
            parse.bump();
            parse.skip_ws();
            let cond = parse_condition(parse)?;
            let exec_this = !executed && cond;
            exec_branch_if(exec_this, parse, out)?;
            executed |= exec_this;
        } else {
            let exec_this = !executed;
            exec_branch_if(exec_this, parse, out)?;
            executed |= exec_this;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpId {
    Equal,
    NotEqual,
    GreaterEqual,
    LessEqual,
    Greater,
    Less,
}

fn is_op_ch(ch: char) -> bool {
    matches!(ch, '=' | '!' | '>' | '<')
}

fn is_var_start(ch: char) -> bool {
    ch == '{' || ch == '\'' || ch == '-' || ch == '.' || ch.is_ascii_digit()
}

fn parse_op(parse: &mut ParseContext<'_>) -> Result<OpId> {
    match parse.peek() {
        None => Err(parse.error(ScriptErrorCode::EndOfString)),
        Some('=') => {
            parse.bump();
            // accepts both `=` and `==`
            if !parse.at_end() {
                if parse.peek() != Some('=') {
                    return Err(parse.error(ScriptErrorCode::InvalidOperator));
                }
                parse.bump();
            }
            Ok(OpId::Equal)
        }
        Some('!') => {
            parse.bump();
            match parse.peek() {
                None => Err(parse.error(ScriptErrorCode::EndOfString)),
                Some('=') => {
                    parse.bump();
                    Ok(OpId::NotEqual)
                }
                Some(_) => Err(parse.error(ScriptErrorCode::InvalidOperator)),
            }
        }
        Some(first @ ('>' | '<')) => {
            parse.bump();
            let with_eq = parse.peek() == Some('=');
            if with_eq {
                parse.bump();
            }
            Ok(match (first, with_eq) {
                ('>', true) => OpId::GreaterEqual,
                ('>', false) => OpId::Greater,
                ('<', true) => OpId::LessEqual,
                _ => OpId::Less,
            })
        }
        Some(_) => Err(parse.error(ScriptErrorCode::InvalidOperator)),
    }
}

fn execute_op(op: OpId, lhs: &ScriptVar<'_>, rhs: &ScriptVar<'_>) -> bool {
    match op {
        OpId::Equal => lhs.equal(rhs),
        OpId::NotEqual => !lhs.equal(rhs),
        OpId::GreaterEqual => {
            matches!(lhs.compare(rhs), Some(Ordering::Greater | Ordering::Equal))
        }
        OpId::LessEqual => {
            matches!(lhs.compare(rhs), Some(Ordering::Less | Ordering::Equal))
        }
        OpId::Greater => matches!(lhs.compare(rhs), Some(Ordering::Greater)),
        OpId::Less => matches!(lhs.compare(rhs), Some(Ordering::Less)),
    }
}

fn parse_condition(parse: &mut ParseContext<'_>) -> Result<bool> {
    parse.skip_ws();
    match parse.peek() {
        None => Err(parse.error(ScriptErrorCode::EndOfString)),
        Some('!') => {
            parse.bump();
            parse.skip_ws();
            let var = parse_variable(parse)?;
            parse.skip_ws();
            expect_condition_end(parse)?;
            Ok(!var.as_bool())
        }
        Some(ch) if is_var_start(ch) => {
            let var = parse_variable(parse)?;
            parse.skip_ws();
            match parse.peek() {
                None => Err(parse.error(ScriptErrorCode::EndOfString)),
                Some(':') => {
                    parse.bump();
                    Ok(var.as_bool())
                }
                Some(ch) if is_op_ch(ch) => {
                    let op = parse_op(parse)?;
                    parse.skip_ws();
                    let rhs = parse_variable(parse)?;
                    parse.skip_ws();
                    expect_condition_end(parse)?;
                    Ok(execute_op(op, &var, &rhs))
                }
                Some(_) => Err(parse.error(ScriptErrorCode::InvalidCondition)),
            }
        }
        Some(_) => Err(parse.error(ScriptErrorCode::InvalidCondition)),
    }
}

fn expect_condition_end(parse: &mut ParseContext<'_>) -> Result<()> {
    match parse.peek() {
        None => Err(parse.error(ScriptErrorCode::EndOfString)),
        Some(':') => {
            parse.bump();
            Ok(())
        }
        Some(_) => Err(parse.error(ScriptErrorCode::InvalidCondition)),
    }
}

fn parse_variable<'a>(parse: &mut ParseContext<'a>) -> Result<ScriptVar<'a>> {
    match parse.peek() {
        None => Err(parse.error(ScriptErrorCode::EndOfString)),
        Some('{') => {
            parse.bump();
            let arg = access(parse)?;
            match parse.peek() {
                None => Err(parse.error(ScriptErrorCode::EndOfString)),
                Some('}') => {
                    parse.bump();
                    ScriptVar::from_value(&arg)
                }
                Some(_) => Err(parse.error(ScriptErrorCode::UnenclosedBrace)),
            }
        }
        Some('\'') => {
            parse.bump();
            let s = parse_string(parse)?;
            Ok(ScriptVar::Str(s))
        }
        Some(ch) if ch == '-' || ch == '.' || ch.is_ascii_digit() => {
            parse_number(parse)
        }
        Some(_) => Err(parse.error(ScriptErrorCode::InvalidCondition)),
    }
}

fn parse_number<'a>(parse: &mut ParseContext<'a>) -> Result<ScriptVar<'a>> {
    let start = parse.pos();
    if parse.peek() == Some('-') {
        parse.bump();
    }
    while let Some(ch) = parse.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        parse.bump();
    }
    if parse.peek() == Some('.') {
        parse.bump();
        while let Some(ch) = parse.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            parse.bump();
        }
        let text = parse.slice_from(start);
        let val: f64 = text
            .parse()
            .map_err(|_| parse.error(ScriptErrorCode::InvalidCondition))?;
        Ok(ScriptVar::Float(val))
    } else {
        let text = parse.slice_from(start);
        let val: i64 = text
            .parse()
            .map_err(|_| parse.error(ScriptErrorCode::InvalidCondition))?;
        Ok(ScriptVar::Int(val))
    }
}

fn is_field_id_end(ch: char) -> bool {
    matches!(ch, '}' | ':' | '.' | '[')
}

fn parse_field_id<'a>(parse: &mut ParseContext<'a>) -> Result<Value<'a>> {
    match parse.peek() {
        None => Err(parse.error(ScriptErrorCode::EndOfString)),
        Some(ch) if ch.is_ascii_digit() => {
            let idx = parse_index(parse)?;
            parse.mark_manual()?;
            if idx < 0 {
                return Err(parse.error(ScriptErrorCode::InvalidFieldName));
            }
            Ok(parse.args().get(idx as usize)?.clone())
        }
        Some(ch) if is_identifier_start(ch) => {
            let start = parse.pos();
            parse.bump();
            while let Some(c) = parse.peek() {
                if !is_identifier_ch(c) {
                    break;
                }
                parse.bump();
            }
            let name = parse.slice_from(start);
            parse.mark_manual()?;
            Ok(parse.args().get_named(name)?.clone())
        }
        Some(ch) if is_field_id_end(ch) => {
            let idx = parse.auto_index()?;
            Ok(parse.args().get(idx)?.clone())
        }
        Some(_) => Err(parse.error(ScriptErrorCode::InvalidFieldName)),
    }
}

fn parse_chained_access<'a>(
    parse: &mut ParseContext<'a>,
    base: Value<'a>,
) -> Result<Value<'a>> {
    let mut current = base;
    loop {
        match parse.peek() {
            Some('.') => {
                parse.bump();
                let start = parse.pos();
                if let Some(first) = parse.peek() {
                    if is_identifier_start(first) {
                        parse.bump();
                        while let Some(c) = parse.peek() {
                            if !is_identifier_ch(c) {
                                break;
                            }
                            parse.bump();
                        }
                    }
                }
                let name = parse.slice_from(start);
                if name.is_empty() {
                    return Err(parse.error(ScriptErrorCode::InvalidAttribute));
                }
                current = current.attribute(name)?;
            }
            Some('[') => {
                parse.bump();
                let key = parse_indexing_value(parse)?;
                match parse.peek() {
                    None => return Err(parse.error(ScriptErrorCode::EndOfString)),
                    Some(']') => parse.bump(),
                    Some(_) => {
                        return Err(parse.error(ScriptErrorCode::InvalidIndex))
                    }
                }
                current = current.index(&key)?;
            }
            _ => break,
        }
    }
    Ok(current)
}

fn parse_indexing_value<'a>(parse: &mut ParseContext<'a>) -> Result<IndexKey<'a>> {
    match parse.peek() {
        None => Err(parse.error(ScriptErrorCode::EndOfString)),
        Some('\'') => {
            parse.bump();
            let key = parse_string(parse)?;
            Ok(IndexKey::Key(key))
        }
        Some(ch) if ch == '-' || ch.is_ascii_digit() => {
            let idx = parse_index(parse)?;
            if parse.peek() == Some(':') {
                parse.bump();
                match parse.peek() {
                    None => Err(parse.error(ScriptErrorCode::EndOfString)),
                    Some(ch) if ch == '-' || ch.is_ascii_digit() => {
                        let stop = parse_index(parse)?;
                        Ok(IndexKey::Slice(Slice::new(idx, stop)))
                    }
                    Some(_) => Ok(IndexKey::Slice(Slice::new(idx, NPOS))),
                }
            } else {
                Ok(IndexKey::Index(idx))
            }
        }
        Some(':') => {
            parse.bump();
            match parse.peek() {
                None => Err(parse.error(ScriptErrorCode::EndOfString)),
                Some(ch) if ch == '-' || ch.is_ascii_digit() => {
                    let stop = parse_index(parse)?;
                    Ok(IndexKey::Slice(Slice::new(0, stop)))
                }
                Some(_) => Ok(IndexKey::Slice(Slice::full())),
            }
        }
        Some(_) => Err(parse.error(ScriptErrorCode::InvalidIndex)),
    }
}

fn parse_index(parse: &mut ParseContext<'_>) -> Result<isize> {
    let negative = parse.peek() == Some('-');
    if negative {
        parse.bump();
    }
    let mut value: isize = 0;
    let mut any = false;
    while let Some(ch) = parse.peek() {
        let Some(digit) = ch.to_digit(10) else { break };
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as isize))
            .ok_or_else(|| parse.error(ScriptErrorCode::InvalidIndex))?;
        any = true;
        parse.bump();
    }
    if !any {
        return Err(parse.error(ScriptErrorCode::InvalidIndex));
    }
    Ok(if negative { -value } else { value })
}

fn esc_ch(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        other => other,
    }
}

/// Parse a single-quoted string body starting after the opening quote.
/// Borrows from the format string unless escapes force a copy.
fn parse_string<'a>(parse: &mut ParseContext<'a>) -> Result<Text<'a>> {
    let start = parse.pos();
    loop {
        match parse.peek() {
            None => return Err(parse.error(ScriptErrorCode::InvalidString)),
            Some('\'') => {
                let content = parse.slice_from(start);
                parse.bump();
                return Ok(Text::borrowed(content));
            }
            Some('\\') => {
                let mut result = parse.slice_from(start).to_owned();
                parse.bump();
                match parse.peek() {
                    None => {
                        return Err(parse.error(ScriptErrorCode::InvalidString))
                    }
                    Some(ch) => {
                        result.push(esc_ch(ch));
                        parse.bump();
                    }
                }
                loop {
                    match parse.peek() {
                        None => {
                            return Err(
                                parse.error(ScriptErrorCode::InvalidString)
                            )
                        }
                        Some('\'') => {
                            parse.bump();
                            return Ok(Text::owned(result));
                        }
                        Some('\\') => {
                            parse.bump();
                            match parse.peek() {
                                None => {
                                    return Err(parse
                                        .error(ScriptErrorCode::InvalidString))
                                }
                                Some(ch) => {
                                    result.push(esc_ch(ch));
                                    parse.bump();
                                }
                            }
                        }
                        Some(ch) => {
                            result.push(ch);
                            parse.bump();
                        }
                    }
                }
            }
            Some(_) => parse.bump(),
        }
    }
}

/// Advance past a single-quoted string without building it.
fn skip_string(parse: &mut ParseContext<'_>) {
    let mut escaped = false;
    while let Some(ch) = parse.peek() {
        parse.bump();
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\'' {
            break;
        }
        if ch == '\\' {
            escaped = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt_args;

    fn resolve<'a>(fmt: &'a str, args: &'a ArgStore<'a>) -> Result<Value<'a>> {
        let mut ctx = ParseContext::new(fmt, args);
        access(&mut ctx)
    }

    #[test]
    fn field_id_forms() {
        let args = fmt_args![10, 20, name = "n"];
        assert!(matches!(resolve("0}", &args).unwrap(), Value::I32(10)));
        assert!(matches!(resolve("1}", &args).unwrap(), Value::I32(20)));
        assert!(matches!(resolve("name}", &args).unwrap(), Value::Str(_)));
        assert!(matches!(resolve("}", &args).unwrap(), Value::I32(10)));
        assert!(matches!(
            resolve("missing}", &args),
            Err(FormatError::InvalidNamedArgument(_))
        ));
        assert!(matches!(
            resolve("7}", &args),
            Err(FormatError::IndexOutOfRange(7))
        ));
    }

    #[test]
    fn chained_access() {
        let args = fmt_args!["hello"];
        let v = resolve("0[1]}", &args).unwrap();
        assert!(matches!(v, Value::Char('e')));

        let v = resolve("0[1:3]}", &args).unwrap();
        match v {
            Value::Str(t) => assert_eq!(t.as_str(), "el"),
            other => panic!("unexpected {other:?}"),
        }

        let v = resolve("0.length}", &args).unwrap();
        assert!(matches!(v, Value::U64(5)));

        let v = resolve("0[-2]}", &args).unwrap();
        assert!(matches!(v, Value::Char('l')));

        let v = resolve("0[1:].length}", &args).unwrap();
        assert!(matches!(v, Value::U64(4)));
    }

    #[test]
    fn string_key_index_unavailable_on_text() {
        let args = fmt_args!["abc"];
        assert!(matches!(
            resolve("0['k']}", &args),
            Err(FormatError::IndexUnavailable)
        ));
    }

    #[test]
    fn attribute_name_must_not_start_with_digit() {
        let args = fmt_args!["abc"];
        let err = resolve("0.1bad}", &args).unwrap_err();
        assert_eq!(err.script_code(), Some(ScriptErrorCode::InvalidAttribute));
    }

    #[test]
    fn mixing_auto_and_manual_raises() {
        let args = fmt_args![1, 2];
        let mut ctx = ParseContext::new("}", &args);
        access(&mut ctx).unwrap();
        // cursor is shared state, reuse the context as the interpreter would
        let mut ctx2 = ParseContext::new("0}", &args);
        access(&mut ctx2).unwrap();

        let mut mixed = ParseContext::new("}", &args);
        mixed.mark_manual().unwrap();
        assert!(access(&mut mixed).is_err());
    }

    #[test]
    fn string_literal_escapes() {
        let args = ArgStore::new();
        let mut ctx = ParseContext::new("a\\'b\\n'", &args);
        let s = parse_string(&mut ctx).unwrap();
        assert_eq!(s.as_str(), "a'b\n");
        assert!(ctx.at_end());

        let mut ctx = ParseContext::new("plain'", &args);
        let s = parse_string(&mut ctx).unwrap();
        assert_eq!(s.as_str(), "plain");
        assert!(!s.has_ownership());
    }

    #[test]
    fn skip_spec_tracks_balanced_braces() {
        let args = ArgStore::new();
        let mut ctx = ParseContext::new("a{b{c}d}e}tail", &args);
        ctx.skip_spec();
        assert_eq!(ctx.peek(), Some('}'));
        assert_eq!(&ctx.fmt[ctx.pos()..], "}tail");
    }
}
