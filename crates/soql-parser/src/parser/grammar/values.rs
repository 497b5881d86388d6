//! Literal values: strings, numbers, booleans, dates and bind variables.

use std::iter::Peekable;
use std::str::Chars;

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::ast::{
    Count, CountValue, DateFunction, DateLiteral, DateTimeLiteral, TimeLiteral, Value, ValueKind,
};
use crate::diagnostics::{ErrorKind, SyntaxError};
use crate::parser::Parser;
use crate::parser::core::PResult;
use crate::parser::lexer::Token;
use crate::parser::token::{TokenKind, date_function};

impl Parser<'_> {
    pub(super) fn parse_value(&mut self, what: &str) -> PResult<Value> {
        let token = self.current_token();
        let text = self.text(token);

        let kind = match token.kind {
            TokenKind::Str => ValueKind::String(self.decode_string(token)?),
            TokenKind::Number => ValueKind::Number(text.to_string()),
            TokenKind::KwTrue => ValueKind::Boolean(true),
            TokenKind::KwFalse => ValueKind::Boolean(false),
            TokenKind::KwNull => ValueKind::Null,
            TokenKind::Date => {
                let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map_err(|_| self.invalid_literal(token, "a valid calendar date"))?;
                ValueKind::Date(DateLiteral(date))
            }
            TokenKind::DateTime => {
                let datetime = DateTime::parse_from_rfc3339(text).map_err(|_| {
                    self.invalid_literal(token, "a valid date-time with `Z` or `+HH:MM` offset")
                })?;
                ValueKind::DateTime(DateTimeLiteral(datetime))
            }
            TokenKind::Time => {
                let (clock, utc) = match text.strip_suffix('Z') {
                    Some(clock) => (clock, true),
                    None => (text, false),
                };
                let time = NaiveTime::parse_from_str(clock, "%H:%M:%S%.f")
                    .map_err(|_| self.invalid_literal(token, "a valid time of day"))?;
                ValueKind::Time(TimeLiteral { time, utc })
            }
            TokenKind::MalformedDate => {
                return Err(self.invalid_literal(
                    token,
                    "`YYYY-MM-DD` or `YYYY-MM-DDThh:mm:ss` with a zone",
                ));
            }
            TokenKind::DateFunction => return self.parse_date_function(),
            TokenKind::BindVar => ValueKind::Bind(text[1..].to_string()),
            _ => return Err(self.unexpected(what)),
        };

        self.bump();
        Ok(Value {
            kind,
            span: token.span.into(),
        })
    }

    /// `TODAY` | `LAST_N_DAYS:30`. The `:N` suffix is written without spaces.
    fn parse_date_function(&mut self) -> PResult<Value> {
        let token = self.bump();
        let text = self.text(token);
        let Some((name, takes_n)) = date_function(text) else {
            return Err(self.invalid_literal(token, "a relative date literal"));
        };

        let colon = self.current_token();
        let attached = colon.kind == TokenKind::Colon && colon.span.start() == token.span.end();

        let n = match (attached, takes_n) {
            (false, false) => None,
            (false, true) => {
                return Err(self.invalid_literal(token, format!("`{name}:N`")));
            }
            (true, false) => {
                return Err(self.error_at(
                    ErrorKind::InvalidLiteralShape,
                    colon,
                    format!("no argument after `{name}`"),
                ));
            }
            (true, true) => {
                self.bump();
                let arg = self.current_token();
                let n = (arg.kind == TokenKind::Number && arg.span.start() == colon.span.end())
                    .then(|| self.text(arg).parse::<u32>().ok())
                    .flatten();
                let Some(n) = n else {
                    return Err(self.error_at(
                        ErrorKind::InvalidLiteralShape,
                        arg,
                        format!("non-negative integer after `{name}:`"),
                    ));
                };
                self.bump();
                Some(n)
            }
        };

        Ok(Value {
            kind: ValueKind::DateFunction(DateFunction {
                name: name.to_string(),
                n,
            }),
            span: self.span_from(token.span.start()),
        })
    }

    /// Strips the quotes and resolves escapes. `\_` and `\%` stay escaped so
    /// `LIKE` patterns keep their literal wildcards.
    ///
    /// Control escapes (`\n`, `\t`, ...) take either case. Code points are
    /// written `\uHHHH`, `\u{H..}` (one to six digits), `\xHH` or `\ooo` (octal).
    fn decode_string(&self, token: Token) -> PResult<String> {
        let text = self.text(token);
        let inner = &text[1..text.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            let Some(escape) = chars.next() else {
                return Err(self.invalid_literal(token, "a valid escape sequence"));
            };
            let decoded = match escape {
                '\\' | '\'' | '"' | '`' => escape,
                'n' | 'N' => '\n',
                'r' | 'R' => '\r',
                't' | 'T' => '\t',
                'v' | 'V' => '\u{b}',
                'b' | 'B' => '\u{8}',
                'f' | 'F' => '\u{c}',
                '_' | '%' => {
                    out.push('\\');
                    escape
                }
                'u' if chars.peek() == Some(&'{') => {
                    chars.next();
                    let digits = take_while_max(&mut chars, 6, |c| c.is_ascii_hexdigit());
                    let closed = chars.next() == Some('}');
                    code_point(&digits, 16)
                        .filter(|_| closed && !digits.is_empty())
                        .ok_or_else(|| {
                            self.invalid_literal(token, "`\\u{` followed by one to six hex digits and `}`")
                        })?
                }
                'u' => {
                    let digits = take_while_max(&mut chars, 4, |c| c.is_ascii_hexdigit());
                    code_point(&digits, 16)
                        .filter(|_| digits.len() == 4)
                        .ok_or_else(|| self.invalid_literal(token, "`\\u` followed by four hex digits"))?
                }
                'x' => {
                    let digits = take_while_max(&mut chars, 2, |c| c.is_ascii_hexdigit());
                    code_point(&digits, 16)
                        .filter(|_| digits.len() == 2)
                        .ok_or_else(|| self.invalid_literal(token, "`\\x` followed by two hex digits"))?
                }
                '0'..='7' => {
                    let mut digits = String::from(escape);
                    digits.push_str(&take_while_max(&mut chars, 2, |c| matches!(c, '0'..='7')));
                    code_point(&digits, 8)
                        .filter(|_| digits.len() == 3)
                        .ok_or_else(|| self.invalid_literal(token, "three octal digits after `\\`"))?
                }
                _ => return Err(self.invalid_literal(token, "a valid escape sequence")),
            };
            out.push(decoded);
        }

        Ok(out)
    }

    /// Argument of `LIMIT` / `OFFSET`: a non-negative integer or a bind variable.
    pub(super) fn parse_count(&mut self, clause: &str) -> PResult<Count> {
        let token = self.current_token();
        let value = match token.kind {
            TokenKind::Number => {
                let text = self.text(token);
                match text.parse::<u64>() {
                    Ok(n) => CountValue::Literal(n),
                    _ => {
                        return Err(self.error_at(
                            ErrorKind::InvalidLimitOffset,
                            token,
                            "non-negative integer",
                        ));
                    }
                }
            }
            TokenKind::BindVar => CountValue::Bind(self.text(token)[1..].to_string()),
            TokenKind::Str
            | TokenKind::Date
            | TokenKind::DateTime
            | TokenKind::Time
            | TokenKind::MalformedDate
            | TokenKind::DateFunction
            | TokenKind::KwTrue
            | TokenKind::KwFalse
            | TokenKind::KwNull => {
                return Err(self.error_at(
                    ErrorKind::InvalidLimitOffset,
                    token,
                    "non-negative integer",
                ));
            }
            _ => {
                return Err(self.unexpected(&format!("non-negative integer after `{clause}`")));
            }
        };

        self.bump();
        Ok(Count {
            value,
            span: token.span.into(),
        })
    }

    fn invalid_literal(&self, token: Token, expected: impl Into<String>) -> SyntaxError {
        self.error_at(ErrorKind::InvalidLiteralShape, token, expected)
    }
}

fn take_while_max(
    chars: &mut Peekable<Chars<'_>>,
    max: usize,
    accept: impl Fn(char) -> bool,
) -> String {
    let mut taken = String::new();
    while taken.len() < max {
        match chars.next_if(|&c| accept(c)) {
            Some(c) => taken.push(c),
            None => break,
        }
    }
    taken
}

fn code_point(digits: &str, radix: u32) -> Option<char> {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}
