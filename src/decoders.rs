//! Incremental UTF-8 decoding used by the slow string lexing path.
//!
//! The [Utf8Filter] consumes the bytes of a JSON string one at a time,
//! validating multi-byte UTF-8 sequences, and additionally collates UTF-16
//! surrogate pairs arriving via `\uXXXX` escapes (RFC 4627: a codepoint
//! outside the Basic Multilingual Plane is escaped as two consecutive
//! `\u` sequences encoding the surrogate pair). Completed codepoints are
//! appended to the output string.
//!
//! Invalid input latches the filter into an invalid state; bytes keep being
//! accepted and discarded, and only the final verdict of [Utf8Filter::finalize]
//! matters. This lets the lexer scan to the closing quote before reporting.

/// Filter that validates UTF-8 and collates UTF-16 surrogate pairs while
/// accumulating the decoded string.
pub struct Utf8Filter {
    out: String,
    valid: bool,
    /// Codepoint bits assembled so far for an in-progress UTF-8 sequence
    codepoint: u32,
    /// Number of codepoint bits still owed by continuation bytes, or 0
    state: u32,
    /// First half of an open UTF-16 surrogate pair, or 0
    surrogate_half: u32,
}

impl Utf8Filter {
    /// Create a filter that appends onto `prefix` (the portion of the string
    /// already accepted by the lexer's fast path).
    pub fn new(prefix: String) -> Self {
        Utf8Filter {
            out: prefix,
            valid: true,
            codepoint: 0,
            state: 0,
            surrogate_half: 0,
        }
    }

    /// Write a single byte, which may be part of a multi-byte UTF-8 sequence.
    pub fn push(&mut self, byte: u8) {
        if self.state == 0 {
            if byte < 0x80 {
                // 7-bit ASCII, direct pass-through
                self.out.push(byte as char);
            } else if byte < 0xc0 {
                // Continuation byte with no sequence open
                self.valid = false;
            } else if byte < 0xe0 {
                self.codepoint = u32::from(byte & 0x1f) << 6;
                self.state = 6;
            } else if byte < 0xf0 {
                self.codepoint = u32::from(byte & 0x0f) << 12;
                self.state = 12;
            } else if byte < 0xf8 {
                self.codepoint = u32::from(byte & 0x07) << 18;
                self.state = 18;
            } else {
                // Reserved lead byte
                self.valid = false;
            }
        } else {
            if byte & 0xc0 != 0x80 {
                // Not a continuation byte
                self.valid = false;
            }
            self.state -= 6;
            self.codepoint |= u32::from(byte & 0x3f) << self.state;
            if self.state == 0 {
                self.push_codepoint(self.codepoint);
            }
        }
    }

    /// Write a codepoint directly (from a `\uXXXX` escape), collating
    /// surrogate pairs.
    pub fn push_codepoint(&mut self, codepoint: u32) {
        if self.state != 0 {
            // Only whole codepoints are accepted while a sequence is open
            self.valid = false;
        }
        if (0xd800..0xdc00).contains(&codepoint) {
            // First half of a surrogate pair
            if self.surrogate_half != 0 {
                self.valid = false;
            } else {
                self.surrogate_half = codepoint;
            }
        } else if (0xdc00..0xe000).contains(&codepoint) {
            // Second half; must complete an open pair
            if self.surrogate_half != 0 {
                // addition, not OR: the high half contributes bits 10..=19
                // of the offset, which can carry into bit 16
                let combined =
                    0x10000 + ((self.surrogate_half - 0xd800) << 10) + (codepoint - 0xdc00);
                self.append(combined);
                self.surrogate_half = 0;
            } else {
                self.valid = false;
            }
        } else {
            if self.surrogate_half != 0 {
                // First half not followed by a second half
                self.valid = false;
            } else {
                self.append(codepoint);
            }
        }
    }

    /// Check that the string can end here: no open sequence, no open
    /// surrogate pair. Returns the decoded string if everything was valid.
    pub fn finalize(mut self) -> Option<String> {
        if self.state != 0 || self.surrogate_half != 0 {
            self.valid = false;
        }
        if self.valid {
            Some(self.out)
        } else {
            None
        }
    }

    fn append(&mut self, codepoint: u32) {
        // Rejects codepoints beyond U+10FFFF, which the 4-byte encoding can
        // express but which cannot appear in a Rust string.
        match char::from_u32(codepoint) {
            Some(c) => self.out.push(c),
            None => self.valid = false,
        }
    }
}

/// Scan exactly 4 hex digits from `input` starting at `pos`, returning the
/// decoded codepoint. Fails on any non-hex character or premature end of
/// input. Used for the `XXXX` of a `\uXXXX` escape.
pub fn hex4(input: &[u8], pos: usize) -> Option<u32> {
    let digits = input.get(pos..pos + 4)?;
    let mut value = 0u32;
    for &byte in digits {
        value *= 16;
        value += match byte {
            b'0'..=b'9' => u32::from(byte - b'0'),
            b'a'..=b'f' => u32::from(byte - b'a' + 10),
            b'A'..=b'F' => u32::from(byte - b'A' + 10),
            _ => return None,
        };
    }
    Some(value)
}
