use std::fmt;
use std::str::FromStr;

const DIGITS: &str = "0123456789";

#[derive(Clone, PartialEq, Debug)]
pub(crate) enum MathToken {
    Unknown(String),
    BadNumber(String),
    Number(f64),
    Variable(String),
    Function(String),
    UOp(char),
    BOp(char),
    OParen,
    CParen,
    Comma,
}

impl fmt::Display for MathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathToken::Unknown(s) | MathToken::BadNumber(s) => write!(f, "{s}"),
            MathToken::Number(n) => write!(f, "{n}"),
            MathToken::Variable(id) | MathToken::Function(id) => write!(f, "{id}"),
            MathToken::UOp(op) | MathToken::BOp(op) => write!(f, "{op}"),
            MathToken::OParen => write!(f, "("),
            MathToken::CParen => write!(f, ")"),
            MathToken::Comma => write!(f, ","),
        }
    }
}

/// Splits expression text into [`MathToken`]s tagged with their byte offset.
///
/// `**` is read as `^`. Whether `-`/`+` is unary depends on the previous token.
pub(crate) struct MathTokenizer<'a> {
    src: &'a str,
    pos: usize,
    prev: Option<MathToken>,
}

impl<'a> MathTokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        MathTokenizer { src, pos: 0, prev: None }
    }

    // a sign is unary unless it follows something that ends an operand
    fn makes_unary(prev: &Option<MathToken>) -> bool {
        !matches!(
            prev,
            Some(MathToken::Number(_)) | Some(MathToken::Variable(_)) | Some(MathToken::CParen)
        )
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn accept_any_char(&mut self, set: &str) -> Option<char> {
        match self.peek() {
            Some(c) if set.contains(c) => self.bump(),
            _ => None,
        }
    }

    fn skip_all_chars(&mut self, set: &str) -> bool {
        let start = self.pos;
        while self.accept_any_char(set).is_some() {}
        self.pos > start
    }

    fn ignore_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    // [0-9]*(\.[0-9]*)?([eE][+-]?[0-9]+)? with at least one mantissa digit
    fn scan_number(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let int_part = self.skip_all_chars(DIGITS);
        let frac_part = self.accept_any_char(".").is_some() && self.skip_all_chars(DIGITS);
        if !int_part && !frac_part {
            self.pos = start;
            return None;
        }
        let backtrack = self.pos;
        if self.accept_any_char("eE").is_some() {
            self.accept_any_char("+-");
            if !self.skip_all_chars(DIGITS) {
                self.pos = backtrack;
            }
        }
        Some(&self.src[start..self.pos])
    }

    fn scan_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn get_token(&mut self) -> Option<MathToken> {
        self.ignore_ws();
        let c = self.peek()?;
        let token = match c {
            '(' | ')' | ',' | '/' | '^' => {
                self.bump();
                match c {
                    '(' => MathToken::OParen,
                    ')' => MathToken::CParen,
                    ',' => MathToken::Comma,
                    _ => MathToken::BOp(c),
                }
            }
            '*' => {
                self.bump();
                if self.accept_any_char("*").is_some() {
                    MathToken::BOp('^')
                } else {
                    MathToken::BOp('*')
                }
            }
            '+' | '-' => {
                self.bump();
                if Self::makes_unary(&self.prev) {
                    MathToken::UOp(c)
                } else {
                    MathToken::BOp(c)
                }
            }
            c if c.is_ascii_digit() || c == '.' => match self.scan_number() {
                Some(literal) => match f64::from_str(literal) {
                    Ok(n) => MathToken::Number(n),
                    Err(_) => MathToken::BadNumber(literal.to_string()),
                },
                None => {
                    self.bump();
                    MathToken::Unknown(c.to_string())
                }
            },
            c if c.is_alphabetic() || c == '_' => {
                let id = self.scan_identifier().to_string();
                if self.src[self.pos..].trim_start().starts_with('(') {
                    MathToken::Function(id)
                } else {
                    MathToken::Variable(id)
                }
            }
            _ => {
                self.bump();
                MathToken::Unknown(c.to_string())
            }
        };
        Some(token)
    }
}

impl Iterator for MathTokenizer<'_> {
    type Item = (usize, MathToken);

    fn next(&mut self) -> Option<Self::Item> {
        self.ignore_ws();
        let start = self.pos;
        let token = self.get_token()?;
        self.prev = Some(token.clone());
        Some((start, token))
    }
}
