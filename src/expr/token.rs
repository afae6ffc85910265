use super::EvalError;

/// Lexical token of the expression language.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Num(f64),
    /// Identifier, possibly dotted (`x`, `pi`, `Math.sin`).
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// Power operator, spelled `^` or `**`.
    Pow,
    LParen,
    RParen,
    Comma,
    End,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Num(value) => format!("number `{value}`"),
            Self::Ident(name) => format!("identifier `{name}`"),
            Self::Plus => "`+`".to_owned(),
            Self::Minus => "`-`".to_owned(),
            Self::Star => "`*`".to_owned(),
            Self::Slash => "`/`".to_owned(),
            Self::Percent => "`%`".to_owned(),
            Self::Pow => "power operator".to_owned(),
            Self::LParen => "`(`".to_owned(),
            Self::RParen => "`)`".to_owned(),
            Self::Comma => "`,`".to_owned(),
            Self::End => "end of expression".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token start in the source text.
    pub offset: usize,
}

/// Splits expression source into tokens, always terminated by `TokenKind::End`.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, EvalError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];
        let start = pos;
        let kind = match ch {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
                continue;
            }
            b'0'..=b'9' | b'.' => {
                pos = scan_number(bytes, pos);
                let text = &source[start..pos];
                let value = text.parse::<f64>().map_err(|_| EvalError::InvalidNumber {
                    text: text.to_owned(),
                    offset: start,
                })?;
                TokenKind::Num(value)
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                pos = scan_identifier(bytes, pos);
                TokenKind::Ident(source[start..pos].to_owned())
            }
            b'+' => {
                pos += 1;
                TokenKind::Plus
            }
            b'-' => {
                pos += 1;
                TokenKind::Minus
            }
            b'*' => {
                if bytes.get(pos + 1) == Some(&b'*') {
                    pos += 2;
                    TokenKind::Pow
                } else {
                    pos += 1;
                    TokenKind::Star
                }
            }
            b'/' => {
                pos += 1;
                TokenKind::Slash
            }
            b'%' => {
                pos += 1;
                TokenKind::Percent
            }
            b'^' => {
                pos += 1;
                TokenKind::Pow
            }
            b'(' => {
                pos += 1;
                TokenKind::LParen
            }
            b')' => {
                pos += 1;
                TokenKind::RParen
            }
            b',' => {
                pos += 1;
                TokenKind::Comma
            }
            _ => {
                let ch = source[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(EvalError::UnexpectedChar { ch, offset: start });
            }
        };
        tokens.push(Token {
            kind,
            offset: start,
        });
    }

    tokens.push(Token {
        kind: TokenKind::End,
        offset: bytes.len(),
    });
    Ok(tokens)
}

fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    // Exponent only when followed by digits, so `2e` stays `2` then `e`.
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            pos = exp;
        }
    }
    pos
}

fn scan_identifier(bytes: &[u8], mut pos: usize) -> usize {
    loop {
        while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
            pos += 1;
        }
        let continues_dotted = pos + 1 < bytes.len()
            && bytes[pos] == b'.'
            && (bytes[pos + 1].is_ascii_alphabetic() || bytes[pos + 1] == b'_');
        if !continues_dotted {
            return pos;
        }
        pos += 1;
    }
}
