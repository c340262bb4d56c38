//! Lexer (tokenizer) for C expression source text
//!
//! Converts raw source text into a flat [`Token`] stream pulled by the
//! parser. The token set covers the expression grammar only: literals,
//! identifiers, operators, and punctuation. Type and statement keywords are
//! lexed as ordinary identifiers; deciding whether an identifier names a
//! type is the type layer's business. Preprocessor lines are silently
//! skipped, matching the no-preprocessor policy of this front-end.

use crate::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can
/// report an accurate line and column without a separate token→location
/// table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64, SourceLocation),
    CharLiteral(i8, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Identifiers (including names the type layer may recognize as types)
    Ident(String, SourceLocation),

    // Arithmetic
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Logical
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    // Bitwise
    Amp(SourceLocation),   // &
    Pipe(SourceLocation),  // |
    Caret(SourceLocation), // ^
    Tilde(SourceLocation), // ~
    LtLt(SourceLocation),  // <<
    GtGt(SourceLocation),  // >>

    // Assignment
    Eq(SourceLocation),        // =
    PlusEq(SourceLocation),    // +=
    MinusEq(SourceLocation),   // -=
    StarEq(SourceLocation),    // *=
    SlashEq(SourceLocation),   // /=
    PercentEq(SourceLocation), // %=
    LtLtEq(SourceLocation),    // <<=
    GtGtEq(SourceLocation),    // >>=
    AmpEq(SourceLocation),     // &=
    PipeEq(SourceLocation),    // |=
    CaretEq(SourceLocation),   // ^=

    // Increment/Decrement
    PlusPlus(SourceLocation),   // ++
    MinusMinus(SourceLocation), // --

    // Member access
    Dot(SourceLocation),   // .
    Arrow(SourceLocation), // ->

    // Ternary
    Question(SourceLocation), // ?
    Colon(SourceLocation),    // :

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    LBracket(SourceLocation),  // [
    RBracket(SourceLocation),  // ]
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::CharLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Amp(loc)
            | Token::Pipe(loc)
            | Token::Caret(loc)
            | Token::Tilde(loc)
            | Token::LtLt(loc)
            | Token::GtGt(loc)
            | Token::Eq(loc)
            | Token::PlusEq(loc)
            | Token::MinusEq(loc)
            | Token::StarEq(loc)
            | Token::SlashEq(loc)
            | Token::PercentEq(loc)
            | Token::LtLtEq(loc)
            | Token::GtGtEq(loc)
            | Token::AmpEq(loc)
            | Token::PipeEq(loc)
            | Token::CaretEq(loc)
            | Token::PlusPlus(loc)
            | Token::MinusMinus(loc)
            | Token::Dot(loc)
            | Token::Arrow(loc)
            | Token::Question(loc)
            | Token::Colon(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// Assignment operator family, simple and compound.
    pub fn is_assignment_op(&self) -> bool {
        matches!(
            self,
            Token::Eq(_)
                | Token::PlusEq(_)
                | Token::MinusEq(_)
                | Token::StarEq(_)
                | Token::SlashEq(_)
                | Token::PercentEq(_)
                | Token::LtLtEq(_)
                | Token::GtGtEq(_)
                | Token::AmpEq(_)
                | Token::PipeEq(_)
                | Token::CaretEq(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::CharLiteral(c, _) => {
                let byte = *c as u8;
                if byte.is_ascii_graphic() || byte == b' ' {
                    write!(f, "char literal '{}'", byte as char)
                } else {
                    write!(f, "char literal '\\x{:02x}'", byte)
                }
            }
            Token::StringLiteral(s, _) => write!(f, "string literal \"{}\"", s),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Amp(_) => write!(f, "'&'"),
            Token::Pipe(_) => write!(f, "'|'"),
            Token::Caret(_) => write!(f, "'^'"),
            Token::Tilde(_) => write!(f, "'~'"),
            Token::LtLt(_) => write!(f, "'<<'"),
            Token::GtGt(_) => write!(f, "'>>'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::PlusEq(_) => write!(f, "'+='"),
            Token::MinusEq(_) => write!(f, "'-='"),
            Token::StarEq(_) => write!(f, "'*='"),
            Token::SlashEq(_) => write!(f, "'/='"),
            Token::PercentEq(_) => write!(f, "'%='"),
            Token::LtLtEq(_) => write!(f, "'<<='"),
            Token::GtGtEq(_) => write!(f, "'>>='"),
            Token::AmpEq(_) => write!(f, "'&='"),
            Token::PipeEq(_) => write!(f, "'|='"),
            Token::CaretEq(_) => write!(f, "'^='"),
            Token::PlusPlus(_) => write!(f, "'++'"),
            Token::MinusMinus(_) => write!(f, "'--'"),
            Token::Dot(_) => write!(f, "'.'"),
            Token::Arrow(_) => write!(f, "'->'"),
            Token::Question(_) => write!(f, "'?'"),
            Token::Colon(_) => write!(f, "':'"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, Error)]
#[error("lexical error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for C expression source text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            // Preprocessing is a separate phase; directive lines are skipped.
            if self.peek() == Some('#') {
                self.skip_preprocessor_directive();
                continue;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            // String literals
            '"' => self.string_literal(),

            // Character literals
            '\'' => self.char_literal(),

            // Numeric literals
            '0'..='9' => self.number_literal(ch),

            // Identifiers
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier(ch)),

            // Operators and punctuation
            '+' => {
                if self.peek() == Some('+') {
                    self.advance();
                    Ok(Token::PlusPlus(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::PlusEq(loc))
                } else {
                    Ok(Token::Plus(loc))
                }
            }
            '-' => {
                if self.peek() == Some('-') {
                    self.advance();
                    Ok(Token::MinusMinus(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::MinusEq(loc))
                } else if self.peek() == Some('>') {
                    self.advance();
                    Ok(Token::Arrow(loc))
                } else {
                    Ok(Token::Minus(loc))
                }
            }
            '*' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::StarEq(loc))
                } else {
                    Ok(Token::Star(loc))
                }
            }
            '/' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::SlashEq(loc))
                } else {
                    Ok(Token::Slash(loc))
                }
            }
            '%' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::PercentEq(loc))
                } else {
                    Ok(Token::Percent(loc))
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::EqEq(loc))
                } else {
                    Ok(Token::Eq(loc))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::NotEq(loc))
                } else {
                    Ok(Token::Bang(loc))
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Le(loc))
                } else if self.peek() == Some('<') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Ok(Token::LtLtEq(loc))
                    } else {
                        Ok(Token::LtLt(loc))
                    }
                } else {
                    Ok(Token::Lt(loc))
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Ge(loc))
                } else if self.peek() == Some('>') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Ok(Token::GtGtEq(loc))
                    } else {
                        Ok(Token::GtGt(loc))
                    }
                } else {
                    Ok(Token::Gt(loc))
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    Ok(Token::AndAnd(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::AmpEq(loc))
                } else {
                    Ok(Token::Amp(loc))
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    Ok(Token::OrOr(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::PipeEq(loc))
                } else {
                    Ok(Token::Pipe(loc))
                }
            }
            '^' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::CaretEq(loc))
                } else {
                    Ok(Token::Caret(loc))
                }
            }
            '~' => Ok(Token::Tilde(loc)),
            '.' => Ok(Token::Dot(loc)),
            '?' => Ok(Token::Question(loc)),
            ':' => Ok(Token::Colon(loc)),
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse string literal
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column - 1);
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.advance(); // consume closing quote
                return Ok(Token::StringLiteral(string, loc));
            }

            if ch == '\\' {
                self.advance();
                let escaped = self.advance().ok_or_else(|| LexError {
                    message: "Unexpected end of file in string literal"
                        .to_string(),
                    location: self.current_location(),
                })?;

                let unescaped = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '"' => '"',
                    '0' => '\0',
                    _ => {
                        return Err(LexError {
                            message: format!(
                                "Unknown escape sequence: \\{}",
                                escaped
                            ),
                            location: self.current_location(),
                        });
                    }
                };
                string.push(unescaped);
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse character literal
    fn char_literal(&mut self) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column - 1);

        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file in character literal".to_string(),
            location: self.current_location(),
        })?;

        let value = if ch == '\\' {
            let escaped = self.advance().ok_or_else(|| LexError {
                message: "Unexpected end of file in character literal"
                    .to_string(),
                location: self.current_location(),
            })?;

            match escaped {
                'n' => '\n' as i8,
                't' => '\t' as i8,
                'r' => '\r' as i8,
                '\\' => '\\' as i8,
                '\'' => '\'' as i8,
                '0' => 0,
                'x' => {
                    // Hex escape: \xHH
                    let hex1 = self.advance().ok_or_else(|| LexError {
                        message: "Incomplete hex escape sequence".to_string(),
                        location: self.current_location(),
                    })?;
                    let hex2 = self.advance().ok_or_else(|| LexError {
                        message: "Incomplete hex escape sequence".to_string(),
                        location: self.current_location(),
                    })?;

                    let hex_str = format!("{}{}", hex1, hex2);
                    u8::from_str_radix(&hex_str, 16).map(|v| v as i8).map_err(
                        |_| LexError {
                            message: format!(
                                "Invalid hex escape sequence: \\x{}",
                                hex_str
                            ),
                            location: self.current_location(),
                        },
                    )?
                }
                _ => {
                    return Err(LexError {
                        message: format!(
                            "Unknown escape sequence: \\{}",
                            escaped
                        ),
                        location: self.current_location(),
                    });
                }
            }
        } else {
            ch as i8
        };

        // Expect closing quote
        if self.advance() != Some('\'') {
            return Err(LexError {
                message: "Expected closing quote in character literal"
                    .to_string(),
                location: self.current_location(),
            });
        }

        Ok(Token::CharLiteral(value, loc))
    }

    /// Parse numeric literal: decimal, hex (`0x`), or octal (leading `0`)
    fn number_literal(&mut self, first_digit: char) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column - 1);

        if first_digit == '0' && matches!(self.peek(), Some('x') | Some('X')) {
            self.advance(); // consume 'x'
            let mut hex_str = String::new();
            while let Some(ch) = self.peek() {
                if ch.is_ascii_hexdigit() {
                    hex_str.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }

            let value =
                i64::from_str_radix(&hex_str, 16).map_err(|_| LexError {
                    message: format!("Invalid hex literal: 0x{}", hex_str),
                    location: loc,
                })?;
            return Ok(Token::IntLiteral(value, loc));
        }

        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Leading zero means octal, as in C
        let (radix, digits) = if first_digit == '0' && num_str.len() > 1 {
            (8, &num_str[1..])
        } else {
            (10, num_str.as_str())
        };

        let value = i64::from_str_radix(digits, radix).map_err(|_| LexError {
            message: format!("Invalid integer literal: {}", num_str),
            location: loc,
        })?;

        Ok(Token::IntLiteral(value, loc))
    }

    /// Parse identifier
    fn identifier(&mut self, first_char: char) -> Token {
        let loc = SourceLocation::new(self.line, self.column - 1);
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Ident(ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Skip preprocessor directive line (#include, #define, ...)
    fn skip_preprocessor_directive(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        if self.position < self.input.len() {
            Some(self.input[self.position])
        } else {
            None
        }
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        let pos = self.position + n;
        if pos < self.input.len() {
            Some(self.input[pos])
        } else {
            None
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if self.position >= self.input.len() {
            return None;
        }

        let ch = self.input[self.position];
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("a[0].b(1, 2)");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "a"));
        assert!(matches!(tokens[1], Token::LBracket(_)));
        assert!(matches!(tokens[2], Token::IntLiteral(0, _)));
        assert!(matches!(tokens[3], Token::RBracket(_)));
        assert!(matches!(tokens[4], Token::Dot(_)));
        assert!(matches!(tokens[5], Token::Ident(ref s, _) if s == "b"));
        assert!(matches!(tokens[6], Token::LParen(_)));
        assert!(matches!(tokens[7], Token::IntLiteral(1, _)));
        assert!(matches!(tokens[8], Token::Comma(_)));
        assert!(matches!(tokens[9], Token::IntLiteral(2, _)));
        assert!(matches!(tokens[10], Token::RParen(_)));
        assert!(matches!(tokens[11], Token::Eof(_)));
    }

    #[test]
    fn test_operators() {
        let mut lexer = Lexer::new("++ -- += -= == != && || -> <<= >>= &= |= ^=");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::PlusPlus(_)));
        assert!(matches!(tokens[1], Token::MinusMinus(_)));
        assert!(matches!(tokens[2], Token::PlusEq(_)));
        assert!(matches!(tokens[3], Token::MinusEq(_)));
        assert!(matches!(tokens[4], Token::EqEq(_)));
        assert!(matches!(tokens[5], Token::NotEq(_)));
        assert!(matches!(tokens[6], Token::AndAnd(_)));
        assert!(matches!(tokens[7], Token::OrOr(_)));
        assert!(matches!(tokens[8], Token::Arrow(_)));
        assert!(matches!(tokens[9], Token::LtLtEq(_)));
        assert!(matches!(tokens[10], Token::GtGtEq(_)));
        assert!(matches!(tokens[11], Token::AmpEq(_)));
        assert!(matches!(tokens[12], Token::PipeEq(_)));
        assert!(matches!(tokens[13], Token::CaretEq(_)));
    }

    #[test]
    fn test_shift_vs_shift_assign() {
        let mut lexer = Lexer::new("a << b <<= c");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[1], Token::LtLt(_)));
        assert!(matches!(tokens[3], Token::LtLtEq(_)));
    }

    #[test]
    fn test_number_literals() {
        let mut lexer = Lexer::new("42 0x2A 052 0");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::IntLiteral(42, _)));
        assert!(matches!(tokens[1], Token::IntLiteral(42, _)));
        assert!(matches!(tokens[2], Token::IntLiteral(42, _)));
        assert!(matches!(tokens[3], Token::IntLiteral(0, _)));
    }

    #[test]
    fn test_bad_octal_literal() {
        let mut lexer = Lexer::new("09");
        assert!(lexer.tokenize().is_err());
    }

    #[test]
    fn test_comments() {
        let mut lexer =
            Lexer::new("x // comment\ny /* block\ncomment */ z");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "y"));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "z"));
        assert!(matches!(tokens[3], Token::Eof(_)));
    }

    #[test]
    fn test_string_literal() {
        let mut lexer = Lexer::new(r#""hello\nworld""#);
        let tokens = lexer.tokenize().unwrap();

        match &tokens[0] {
            Token::StringLiteral(s, _) => {
                assert_eq!(s, "hello\nworld");
            }
            _ => panic!("Expected string literal"),
        }
    }

    #[test]
    fn test_char_literal_escapes() {
        let mut lexer = Lexer::new(r"'a' '\n' '\x41'");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::CharLiteral(97, _)));
        assert!(matches!(tokens[1], Token::CharLiteral(10, _)));
        assert!(matches!(tokens[2], Token::CharLiteral(65, _)));
    }

    #[test]
    fn test_keywords_are_identifiers() {
        // Type names are plain identifiers to the lexer; the type layer
        // decides what they mean.
        let mut lexer = Lexer::new("int x");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "int"));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "x"));
    }

    #[test]
    fn test_preprocessor_skip() {
        let mut lexer = Lexer::new("#include <stdio.h>\nx");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "x"));
    }

    #[test]
    fn test_location_tracking() {
        let mut lexer = Lexer::new("a +\nb");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location(), SourceLocation::new(1, 3));
        assert_eq!(tokens[2].location(), SourceLocation::new(2, 1));
    }
}
