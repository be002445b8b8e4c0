//! The tokenizer: converts raw JSON bytes into a stream of typed tokens.
//!
//! The lexer is a plain byte cursor over the input slice. Number and string
//! tokens carry their extracted text; number text is the raw matched
//! substring, stored verbatim so that serialization can reproduce the
//! original literal byte for byte.

use crate::coords::{Coords, Span};
use crate::decoders::{hex4, Utf8Filter};
use crate::errors::{Details, ParseResult};
use crate::lexer_error;

/// Enumeration of valid JSON tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    ObjOpen,
    ObjClose,
    ArrOpen,
    ArrClose,
    Colon,
    Comma,
    Null,
    True,
    False,
    /// A number token carrying the raw matched literal text
    Num(String),
    /// A string token carrying the unescaped, decoded text
    Str(String),
    /// End of input
    End,
}

impl Token {
    /// Whether this token opens a value (a scalar, `{` or `[`)
    pub fn opens_value(&self) -> bool {
        matches!(
            self,
            Token::ObjOpen
                | Token::ArrOpen
                | Token::Null
                | Token::True
                | Token::False
                | Token::Num(_)
                | Token::Str(_)
        )
    }
}

/// A packed token consists of a [Token] and the [Span] it was matched from
pub type PackedToken = (Token, Span);

/// JSON whitespace: space, tab, LF, CR
fn is_json_space(byte: u8) -> bool {
    matches!(byte, 0x20 | 0x09 | 0x0a | 0x0d)
}

fn is_digit(byte: Option<u8>) -> bool {
    matches!(byte, Some(b'0'..=b'9'))
}

/// The lexer over a length-delimited byte buffer
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Lexer { input, pos: 0 }
    }

    /// The current byte offset of the cursor
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Build full error coordinates for a byte offset
    pub fn coords(&self, offset: usize) -> Coords {
        Coords::locate(self.input, offset)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Lossless for the ASCII-only slices this lexer extracts
    fn ascii_text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    /// Consume the next token from the input, advancing the cursor past it.
    /// JSON whitespace before the token is skipped. Returns [Token::End] at
    /// the end of the buffer.
    pub fn consume(&mut self) -> ParseResult<PackedToken> {
        while matches!(self.peek(), Some(b) if is_json_space(b)) {
            self.pos += 1;
        }
        let start = self.pos;
        let byte = match self.peek() {
            None => {
                return Ok((
                    Token::End,
                    Span {
                        start,
                        end: start,
                    },
                ))
            }
            Some(b) => b,
        };
        match byte {
            b'{' => self.single(Token::ObjOpen, start),
            b'}' => self.single(Token::ObjClose, start),
            b'[' => self.single(Token::ArrOpen, start),
            b']' => self.single(Token::ArrClose, start),
            b':' => self.single(Token::Colon, start),
            b',' => self.single(Token::Comma, start),
            b'n' => self.match_keyword(b"null", Token::Null, start),
            b't' => self.match_keyword(b"true", Token::True, start),
            b'f' => self.match_keyword(b"false", Token::False, start),
            b'-' | b'0'..=b'9' => self.match_number(start),
            b'"' => self.match_string(start),
            other => lexer_error!(Details::InvalidCharacter(other), self.coords(start)),
        }
    }

    fn single(&mut self, token: Token, start: usize) -> ParseResult<PackedToken> {
        self.pos += 1;
        Ok((
            token,
            Span {
                start,
                end: self.pos,
            },
        ))
    }

    /// Keywords must match their literal spelling exactly
    fn match_keyword(
        &mut self,
        literal: &[u8],
        token: Token,
        start: usize,
    ) -> ParseResult<PackedToken> {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok((
                token,
                Span {
                    start,
                    end: self.pos,
                },
            ))
        } else {
            lexer_error!(Details::InvalidKeyword, self.coords(start))
        }
    }

    /// Strict RFC 8259 number grammar: optional `-`; a single `0` or a
    /// non-zero digit followed by digits; optional `.` with at least one
    /// digit; optional `e`/`E` with optional sign and at least one digit.
    fn match_number(&mut self, start: usize) -> ParseResult<PackedToken> {
        let first_is_minus = self.peek() == Some(b'-');
        let first_digit = usize::from(first_is_minus);

        // No leading zeros on multi-digit integer parts
        if self.peek_at(first_digit) == Some(b'0') && is_digit(self.peek_at(first_digit + 1)) {
            return lexer_error!(Details::InvalidNumber, self.coords(start));
        }

        self.pos += 1; // consume first char

        if first_is_minus && !is_digit(self.peek()) {
            // reject a bare '-' or '-' followed by a non-digit
            return lexer_error!(Details::InvalidNumber, self.coords(start));
        }

        while is_digit(self.peek()) {
            self.pos += 1;
        }

        // frac
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !is_digit(self.peek()) {
                return lexer_error!(Details::InvalidNumber, self.coords(self.pos));
            }
            while is_digit(self.peek()) {
                self.pos += 1;
            }
        }

        // exp
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if !is_digit(self.peek()) {
                return lexer_error!(Details::InvalidNumber, self.coords(self.pos));
            }
            while is_digit(self.peek()) {
                self.pos += 1;
            }
        }

        Ok((
            Token::Num(self.ascii_text(start, self.pos)),
            Span {
                start,
                end: self.pos,
            },
        ))
    }

    /// Strings take a fast path first: scan forward while bytes are plain
    /// printable ASCII. If the closing quote is reached that way the
    /// substring is the token text directly. Escapes or non-ASCII bytes fall
    /// back to the byte-at-a-time [Utf8Filter] slow path, seeded with the
    /// prefix the fast path already accepted.
    fn match_string(&mut self, start: usize) -> ParseResult<PackedToken> {
        self.pos += 1; // skip opening "
        let body_start = self.pos;

        loop {
            match self.peek() {
                None => {
                    return lexer_error!(Details::UnterminatedString, self.coords(self.pos));
                }
                Some(b'"') => {
                    let text = self.ascii_text(body_start, self.pos);
                    self.pos += 1; // consume closing "
                    return Ok((
                        Token::Str(text),
                        Span {
                            start,
                            end: self.pos,
                        },
                    ));
                }
                Some(b'\\') => break,
                Some(b) if b >= 0x80 => break,
                Some(b) if b < 0x20 => {
                    return lexer_error!(
                        Details::ControlCharacterInString,
                        self.coords(self.pos)
                    );
                }
                Some(_) => self.pos += 1,
            }
        }

        let mut filter = Utf8Filter::new(self.ascii_text(body_start, self.pos));
        loop {
            let byte = match self.peek() {
                None => {
                    return lexer_error!(Details::UnterminatedString, self.coords(self.pos));
                }
                Some(b) => b,
            };
            if byte < 0x20 {
                return lexer_error!(Details::ControlCharacterInString, self.coords(self.pos));
            } else if byte == b'\\' {
                let escape_start = self.pos;
                self.pos += 1;
                match self.peek() {
                    Some(b'"') => filter.push(b'"'),
                    Some(b'\\') => filter.push(b'\\'),
                    Some(b'/') => filter.push(b'/'),
                    Some(b'b') => filter.push(0x08),
                    Some(b'f') => filter.push(0x0c),
                    Some(b'n') => filter.push(b'\n'),
                    Some(b'r') => filter.push(b'\r'),
                    Some(b't') => filter.push(b'\t'),
                    Some(b'u') => {
                        self.pos += 1;
                        match hex4(self.input, self.pos) {
                            Some(codepoint) => {
                                filter.push_codepoint(codepoint);
                                self.pos += 4;
                            }
                            None => {
                                return lexer_error!(
                                    Details::InvalidUnicodeEscapeSequence,
                                    self.coords(escape_start)
                                );
                            }
                        }
                        continue;
                    }
                    _ => {
                        return lexer_error!(
                            Details::InvalidEscapeSequence,
                            self.coords(escape_start)
                        );
                    }
                }
                self.pos += 1;
            } else if byte == b'"' {
                self.pos += 1; // skip closing "
                break;
            } else {
                filter.push(byte);
                self.pos += 1;
            }
        }

        match filter.finalize() {
            Some(text) => Ok((
                Token::Str(text),
                Span {
                    start,
                    end: self.pos,
                },
            )),
            None => lexer_error!(Details::InvalidStringEncoding, self.coords(self.pos)),
        }
    }
}
