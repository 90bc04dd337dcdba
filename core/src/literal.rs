//! Safe parser for literal data expressions.
//!
//! Backs [`ValueKind::Literal`](crate::ValueKind::Literal). Accepts numbers,
//! quoted strings, booleans, `None`/`null`, lists, tuples and maps. Nothing
//! is evaluated: names other than the boolean and null keywords are errors.
//!
//! # Examples
//!
//! ```
//! use argspec_core::{Value, parse_literal};
//!
//! let value = parse_literal("{'name': 'Alex', 'age': 18, 'married': False}").unwrap();
//! assert_eq!(value.get("name"), Some(&Value::Str("Alex".into())));
//! assert_eq!(value.get("age"), Some(&Value::Int(18)));
//! assert_eq!(value.get("married"), Some(&Value::Bool(false)));
//!
//! assert!(parse_literal("__import__('os')").is_err());
//! ```

use thiserror::Error;

use crate::Value;

const MAX_DEPTH: usize = 64;

/// Failure to parse a literal expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct LiteralError {
    /// Byte offset into the input where parsing failed.
    pub offset: usize,
    /// What went wrong.
    pub message: String,
}

/// Parses `input` as a single literal value.
///
/// Leading and trailing whitespace is ignored; anything else after the value
/// is an error.
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let mut parser = LiteralParser { src: input, pos: 0 };
    let value = parser.parse_value(0)?;
    parser.skip_ws();
    if parser.pos < parser.src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
}

impl LiteralParser<'_> {
    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{expected}', found '{ch}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, LiteralError> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("expected a value, found end of input")),
            Some('{') => self.parse_map(depth),
            Some('[') => {
                self.pos += 1;
                let (items, _) = self.parse_items(']', depth)?;
                Ok(Value::List(items))
            }
            Some('(') => {
                self.pos += 1;
                let (mut items, trailing_comma) = self.parse_items(')', depth)?;
                // `(x)` is a parenthesized value, `(x,)` a one-element tuple.
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Value::List(items))
                }
            }
            Some(quote @ ('\'' | '"')) => self.parse_string(quote).map(Value::Str),
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.') => {
                self.parse_number()
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.parse_keyword(),
            Some(ch) => Err(self.error(format!("unexpected character '{ch}'"))),
        }
    }

    /// Parses comma-separated values up to `close`. Returns the items and
    /// whether the last one was followed by a comma.
    fn parse_items(
        &mut self,
        close: char,
        depth: usize,
    ) -> Result<(Vec<Value>, bool), LiteralError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok((items, trailing_comma));
            }
            items.push(self.parse_value(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    trailing_comma = true;
                }
                Some(ch) if ch == close => {
                    self.pos += 1;
                    return Ok((items, false));
                }
                Some(ch) => return Err(self.error(format!("expected ',' or '{close}', found '{ch}'"))),
                None => return Err(self.error(format!("expected '{close}', found end of input"))),
            }
        }
    }

    fn parse_map(&mut self, depth: usize) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut entries: Vec<(String, Value)> = Vec::new();
        // Keys as written, parallel to `entries`.
        let mut written: Vec<Value> = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Value::Map(entries));
            }

            let key_offset = self.pos;
            let raw_key = self.parse_value(depth + 1)?;
            let key = match &raw_key {
                Value::Str(s) => s.clone(),
                Value::Int(i) => i.to_string(),
                Value::Float(f) => f.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(LiteralError {
                        offset: key_offset,
                        message: "map keys must be strings, numbers or booleans".to_string(),
                    });
                }
            };

            self.skip_ws();
            self.expect(':')?;
            let value = self.parse_value(depth + 1)?;

            // A repeated key keeps its first position and takes the last value.
            match entries.iter().position(|(k, _)| *k == key) {
                Some(slot) if written[slot] == raw_key => entries[slot].1 = value,
                Some(_) => {
                    return Err(LiteralError {
                        offset: key_offset,
                        message: format!("map key {key} collides with an earlier key"),
                    });
                }
                None => {
                    entries.push((key, value));
                    written.push(raw_key);
                }
            }

            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    return Ok(Value::Map(entries));
                }
                Some(ch) => return Err(self.error(format!("expected ',' or '}}', found '{ch}'"))),
                None => return Err(self.error("expected '}', found end of input")),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String, LiteralError> {
        let start = self.pos;
        self.pos += quote.len_utf8();
        let mut out = String::new();
        loop {
            let Some(ch) = self.bump() else {
                return Err(LiteralError {
                    offset: start,
                    message: "unterminated string".to_string(),
                });
            };
            match ch {
                c if c == quote => return Ok(out),
                '\\' => {
                    let Some(next) = self.bump() else {
                        return Err(self.error("unterminated escape sequence"));
                    };
                    match next {
                        '\\' => out.push('\\'),
                        '\'' => out.push('\''),
                        '"' => out.push('"'),
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        'u' => out.push(self.parse_unicode_escape()?),
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                other => out.push(other),
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, LiteralError> {
        let hex = self
            .src
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| self.error("truncated \\u escape"))?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.error("invalid \\u escape"));
        }
        let code = u32::from_str_radix(hex, 16).map_err(|_| self.error("invalid \\u escape"))?;
        let ch = char::from_u32(code).ok_or_else(|| self.error("invalid unicode code point"))?;
        self.pos += 4;
        Ok(ch)
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.pos += 1;
        }

        let mut is_float = false;
        let mut digits = self.eat_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            digits += self.eat_digits();
        }
        if digits == 0 {
            return Err(LiteralError {
                offset: start,
                message: "invalid number".to_string(),
            });
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                return Err(self.error("invalid exponent"));
            }
        }
        if let Some(ch) = self.peek()
            && (ch.is_alphanumeric() || ch == '_')
        {
            return Err(self.error(format!("unexpected character '{ch}' in number")));
        }

        let text = &self.src[start..self.pos];
        let invalid = || LiteralError {
            offset: start,
            message: format!("invalid number '{text}'"),
        };
        if is_float {
            text.parse::<f64>().map(Value::Float).map_err(|_| invalid())
        } else {
            text.parse::<i64>().map(Value::Int).map_err(|_| invalid())
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn parse_keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_alphanumeric() || ch == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::None),
            name => Err(LiteralError {
                offset: start,
                message: format!("unsupported name '{name}'"),
            }),
        }
    }
}
