use crate::error::{ParseError, Result};
use crate::literal;

#[derive(Debug, Clone, PartialEq)]
struct Token {
    text: String,
    line: usize,
    column: usize,
}

impl Token {
    fn empty_at(line: usize, column: usize) -> Self {
        Self {
            text: String::new(),
            line,
            column,
        }
    }
}

pub struct Tokenizer {
    lines: Vec<Vec<char>>,
    line: usize,
    column: usize,
    current: Token,
    previous_line: usize,
    previous_column: usize,
}

impl Tokenizer {
    pub fn new(text: &str) -> Self {
        let mut lines: Vec<Vec<char>> = text.split('\n').map(|l| l.chars().collect()).collect();
        if lines.is_empty() {
            lines.push(Vec::new());
        }

        let mut t = Self {
            lines,
            line: 0,
            column: 0,
            current: Token::empty_at(0, 0),
            previous_line: 0,
            previous_column: 0,
        };
        t.current = t.scan_next();
        t
    }

    pub fn at_end(&self) -> bool {
        self.current.text.is_empty()
    }

    pub fn looking_at(&self, s: &str) -> bool {
        self.current.text == s
    }

    /// True when the current token looks like it starts a numeric literal
    /// (used to distinguish a numeric enum value from a symbolic one, which
    /// the grammar allows to appear in the same position).
    pub fn looking_at_number(&self) -> bool {
        matches!(self.current.text.chars().next(), Some(c) if c.is_ascii_digit() || c == '-' || c == '+')
    }

    pub fn try_consume(&mut self, s: &str) -> bool {
        if self.looking_at(s) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn consume(&mut self, s: &str) -> Result<()> {
        if self.try_consume(s) {
            Ok(())
        } else {
            Err(self.parse_error(&format!("Expected \"{}\".", s)))
        }
    }

    pub fn consume_identifier(&mut self) -> Result<String> {
        let token = self.current.text.clone();
        if !is_strict_identifier(&token) {
            return Err(self.parse_error("Expected identifier."));
        }
        self.advance();
        Ok(token)
    }

    pub fn consume_identifier_or_number(&mut self) -> Result<String> {
        let token = self.current.text.clone();
        if token.is_empty() || !token.chars().all(is_word_char) {
            return Err(self.parse_error("Expected identifier."));
        }
        self.advance();
        Ok(token)
    }

    pub fn consume_int32(&mut self) -> Result<i32> {
        let token = self.current.text.clone();
        self.advance();
        literal::parse_int32(&token)
            .ok_or_else(|| self.parse_error_previous_token(&format!("Couldn't parse integer: {}", token)))
    }

    pub fn consume_uint32(&mut self) -> Result<u32> {
        let token = self.current.text.clone();
        self.advance();
        literal::parse_uint32(&token)
            .ok_or_else(|| self.parse_error_previous_token(&format!("Couldn't parse integer: {}", token)))
    }

    pub fn consume_int64(&mut self) -> Result<i64> {
        let token = self.current.text.clone();
        self.advance();
        literal::parse_int64(&token)
            .ok_or_else(|| self.parse_error_previous_token(&format!("Couldn't parse integer: {}", token)))
    }

    pub fn consume_uint64(&mut self) -> Result<u64> {
        let token = self.current.text.clone();
        self.advance();
        literal::parse_uint64(&token)
            .ok_or_else(|| self.parse_error_previous_token(&format!("Couldn't parse integer: {}", token)))
    }

    pub fn consume_float(&mut self) -> Result<f64> {
        let token = self.current.text.clone();
        self.advance();
        literal::parse_float(&token)
            .ok_or_else(|| self.parse_error_previous_token(&format!("Couldn't parse number: {}", token)))
    }

    pub fn consume_bool(&mut self) -> Result<bool> {
        let token = self.current.text.clone();
        self.advance();
        literal::parse_bool(&token).ok_or_else(|| {
            self.parse_error_previous_token(&format!(
                "Expected \"true\" or \"false\". Found: \"{}\".",
                token
            ))
        })
    }

    /// Returns a string assembled from one or more adjacent quoted literals,
    /// with escapes expanded per §4.2, taken verbatim as text.
    pub fn consume_string(&mut self) -> Result<String> {
        let codepoints = self.consume_quoted_literal_run()?;
        Ok(codepoints.into_iter().filter_map(char::from_u32).collect())
    }

    /// Like `consume_string`, but each decoded code point is truncated
    /// modulo 256 into a byte rather than kept as text.
    pub fn consume_byte_string(&mut self) -> Result<Vec<u8>> {
        let codepoints = self.consume_quoted_literal_run()?;
        Ok(codepoints.into_iter().map(|cp| (cp % 256) as u8).collect())
    }

    /// On a scalar-looking current token (string/number/identifier),
    /// advances and returns true; used only while skipping an unknown
    /// field's value, where the exact scalar type doesn't matter.
    pub fn try_consume_any_scalar(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        let is_punctuation = matches!(
            self.current.text.as_str(),
            "{" | "}" | "<" | ">" | "[" | "]" | "," | ";" | ":"
        );
        if is_punctuation {
            return false;
        }
        self.advance();
        true
    }

    pub fn parse_error(&self, msg: &str) -> ParseError {
        ParseError::at(msg.to_string(), self.current.line + 1, self.current.column + 1)
    }

    pub fn parse_error_previous_token(&self, msg: &str) -> ParseError {
        ParseError::at(
            msg.to_string(),
            self.previous_line + 1,
            self.previous_column + 1,
        )
    }

    fn looking_at_quoted_literal(&self) -> bool {
        matches!(self.current.text.chars().next(), Some('"') | Some('\''))
    }

    fn consume_quoted_literal_run(&mut self) -> Result<Vec<u32>> {
        if !self.looking_at_quoted_literal() {
            return Err(self.parse_error("Expected string."));
        }

        let mut all = Vec::new();
        while self.looking_at_quoted_literal() {
            let mut codepoints = self.consume_one_quoted_literal()?;
            all.append(&mut codepoints);
        }
        Ok(all)
    }

    fn consume_one_quoted_literal(&mut self) -> Result<Vec<u32>> {
        let token = self.current.text.clone();
        let chars: Vec<char> = token.chars().collect();
        let quote = chars[0];

        if chars.len() < 2 || *chars.last().unwrap() != quote {
            return Err(self.parse_error(&format!("String missing ending quote: {}", token)));
        }

        let payload = &chars[1..chars.len() - 1];
        let codepoints = literal::decode_escaped_payload(payload);
        self.advance();
        Ok(codepoints)
    }

    fn advance(&mut self) {
        self.previous_line = self.current.line;
        self.previous_column = self.current.column;
        self.current = self.scan_next();
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            if self.line >= self.lines.len() {
                return;
            }

            let line_len = self.lines[self.line].len();
            if self.column >= line_len {
                self.line += 1;
                self.column = 0;
                continue;
            }

            let c = self.lines[self.line][self.column];
            if c == '#' {
                self.column = line_len;
                continue;
            }
            if c.is_whitespace() {
                self.column += 1;
                continue;
            }

            break;
        }
    }

    fn scan_next(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        if self.line >= self.lines.len() {
            let last = self.lines.len().saturating_sub(1);
            let column = self.lines.get(last).map(|l| l.len()).unwrap_or(0);
            return Token::empty_at(last, column);
        }

        let start_line = self.line;
        let start_column = self.column;
        let len = token_length(&self.lines[self.line][self.column..]);
        let text: String = self.lines[self.line][self.column..self.column + len]
            .iter()
            .collect();
        self.column += len;

        Token {
            text,
            line: start_line,
            column: start_column,
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '+' || c == '-'
}

fn is_number_start(rest: &[char]) -> bool {
    match rest.first() {
        Some(c) if c.is_ascii_digit() || *c == '+' || *c == '-' => true,
        Some('.') => matches!(rest.get(1), Some(c2) if c2.is_ascii_digit()),
        _ => false,
    }
}

fn is_number_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '+' || c == '-'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_strict_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Classifies and measures the token (in chars) starting at the head of
/// `rest`, per the precedence order in §4.1: identifier, number, quoted
/// string (either quote style), else a single character.
fn token_length(rest: &[char]) -> usize {
    if rest.is_empty() {
        return 0;
    }

    let c0 = rest[0];

    if is_ident_start(c0) {
        let mut n = 1;
        while n < rest.len() && is_ident_cont(rest[n]) {
            n += 1;
        }
        return n;
    }

    if is_number_start(rest) {
        let mut n = 1;
        while n < rest.len() && is_number_cont(rest[n]) {
            n += 1;
        }
        return n;
    }

    if c0 == '"' || c0 == '\'' {
        let quote = c0;
        let mut n = 1;
        while n < rest.len() {
            let c = rest[n];
            if c == quote {
                n += 1;
                return n;
            }
            if c == '\\' {
                n += 1;
                if n < rest.len() {
                    n += 1;
                }
                continue;
            }
            n += 1;
        }
        return n;
    }

    1
}
