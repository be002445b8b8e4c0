//! JSON serialization.
//!
//! Writing is the inverse of parsing up to whitespace: numbers emit their
//! stored literal verbatim and object entries keep insertion order, so a
//! parse of compact JSON text followed by a compact write reproduces the
//! input byte for byte.

use crate::value::{Array, Object, Value};

/// Render `value` as JSON text.
///
/// `pretty_indent` is the number of spaces added per nesting level; 0
/// selects the compact form, which contains no whitespace at all. Pretty
/// output puts every container entry on its own line and separates keys
/// from values with `": "`.
pub fn stringify<T: Stringify + ?Sized>(value: &T, pretty_indent: u32) -> String {
    stringify_reserve(value, pretty_indent, 1024)
}

/// As [stringify], with an explicit initial capacity for the output buffer
pub fn stringify_reserve<T: Stringify + ?Sized>(
    value: &T,
    pretty_indent: u32,
    capacity: usize,
) -> String {
    let mut out = String::with_capacity(capacity);
    value.write_json(&mut out, pretty_indent as usize, 1);
    out
}

/// Anything that can be rendered as a JSON fragment
pub trait Stringify {
    /// Append the JSON rendering of `self` to `out`. `indent_level` is the
    /// nesting level applied to the entries of this fragment.
    fn write_json(&self, out: &mut String, pretty_indent: usize, indent_level: usize);
}

fn start_new_line(out: &mut String, pretty_indent: usize, indent_level: usize) {
    if pretty_indent > 0 {
        out.push('\n');
        for _ in 0..indent_level * pretty_indent {
            out.push(' ');
        }
    }
}

/// The escape for a byte inside a JSON string, if it needs one. Control
/// characters without a short form, and DEL, take the `\u00XX` form.
fn escape(byte: u8) -> Option<&'static str> {
    match byte {
        0x00 => Some("\\u0000"),
        0x01 => Some("\\u0001"),
        0x02 => Some("\\u0002"),
        0x03 => Some("\\u0003"),
        0x04 => Some("\\u0004"),
        0x05 => Some("\\u0005"),
        0x06 => Some("\\u0006"),
        0x07 => Some("\\u0007"),
        0x08 => Some("\\b"),
        0x09 => Some("\\t"),
        0x0a => Some("\\n"),
        0x0b => Some("\\u000b"),
        0x0c => Some("\\f"),
        0x0d => Some("\\r"),
        0x0e => Some("\\u000e"),
        0x0f => Some("\\u000f"),
        0x10 => Some("\\u0010"),
        0x11 => Some("\\u0011"),
        0x12 => Some("\\u0012"),
        0x13 => Some("\\u0013"),
        0x14 => Some("\\u0014"),
        0x15 => Some("\\u0015"),
        0x16 => Some("\\u0016"),
        0x17 => Some("\\u0017"),
        0x18 => Some("\\u0018"),
        0x19 => Some("\\u0019"),
        0x1a => Some("\\u001a"),
        0x1b => Some("\\u001b"),
        0x1c => Some("\\u001c"),
        0x1d => Some("\\u001d"),
        0x1e => Some("\\u001e"),
        0x1f => Some("\\u001f"),
        b'"' => Some("\\\""),
        b'\\' => Some("\\\\"),
        0x7f => Some("\\u007f"),
        _ => None,
    }
}

impl Stringify for str {
    /// Append as a quoted, escaped JSON string. Multi-byte UTF-8 is written
    /// through raw; only the bytes in the escape table are replaced, and
    /// those are all ASCII, so run boundaries always fall on char
    /// boundaries.
    fn write_json(&self, out: &mut String, _pretty_indent: usize, _indent_level: usize) {
        out.push('"');
        let mut run_start = 0;
        for (index, &byte) in self.as_bytes().iter().enumerate() {
            if let Some(escaped) = escape(byte) {
                out.push_str(&self[run_start..index]);
                out.push_str(escaped);
                run_start = index + 1;
            }
        }
        out.push_str(&self[run_start..]);
        out.push('"');
    }
}

impl Stringify for Value {
    fn write_json(&self, out: &mut String, pretty_indent: usize, indent_level: usize) {
        match self {
            Value::Null => out.push_str("null"),
            Value::False => out.push_str("false"),
            Value::True => out.push_str("true"),
            Value::Num(literal) => out.push_str(literal),
            Value::Str(text) => text.as_str().write_json(out, pretty_indent, indent_level),
            Value::Obj(object) => object.write_json(out, pretty_indent, indent_level),
            Value::Arr(array) => array.write_json(out, pretty_indent, indent_level),
        }
    }
}

impl Stringify for Object {
    fn write_json(&self, out: &mut String, pretty_indent: usize, indent_level: usize) {
        out.push('{');
        let last = self.len().saturating_sub(1);
        for (index, (key, value)) in self.iter().enumerate() {
            start_new_line(out, pretty_indent, indent_level);
            key.as_str().write_json(out, pretty_indent, indent_level);
            out.push(':');
            if pretty_indent > 0 {
                out.push(' ');
            }
            value.write_json(out, pretty_indent, indent_level + 1);
            if index != last {
                out.push(',');
            }
        }
        if !self.is_empty() {
            start_new_line(out, pretty_indent, indent_level.saturating_sub(1));
        }
        out.push('}');
    }
}

impl Stringify for Array {
    fn write_json(&self, out: &mut String, pretty_indent: usize, indent_level: usize) {
        out.push('[');
        let last = self.len().saturating_sub(1);
        for (index, value) in self.iter().enumerate() {
            start_new_line(out, pretty_indent, indent_level);
            value.write_json(out, pretty_indent, indent_level + 1);
            if index != last {
                out.push(',');
            }
        }
        if !self.is_empty() {
            start_new_line(out, pretty_indent, indent_level.saturating_sub(1));
        }
        out.push(']');
    }
}

#[cfg(test)]
mod tests {
    use crate::value::{Object, Value};

    #[test]
    fn should_write_scalars() {
        assert_eq!(Value::Null.stringify(0), "null");
        assert_eq!(Value::True.stringify(0), "true");
        assert_eq!(Value::False.stringify(0), "false");
        assert_eq!(Value::from("x").stringify(0), r#""x""#);
        assert_eq!(Value::from(-690).stringify(0), "-690");
    }

    #[test]
    fn should_write_compact_containers() {
        let mut object = Object::new();
        object.push("age", Value::from(100));
        object.push("first", Value::from("John"));
        assert_eq!(
            Value::Obj(object).stringify(0),
            r#"{"age":100,"first":"John"}"#
        );
        assert_eq!(Value::parse("[1,null,[]]").unwrap().stringify(0), "[1,null,[]]");
    }

    #[test]
    fn should_write_number_literals_verbatim() {
        let value = Value::parse("[1.10000000,-0,5e-10]").unwrap();
        assert_eq!(value.stringify(0), "[1.10000000,-0,5e-10]");
    }

    #[test]
    fn should_round_trip_compact_documents() {
        for compact in [
            r#"{"first":"John","colors":["red","green"],"age":100,"ok":true,"sub":{}}"#,
            "[[[[]]]]",
            r#"{"k":1,"k":2}"#,
            "1.0e100",
        ] {
            assert_eq!(Value::parse(compact).unwrap().stringify(0), compact);
        }
    }

    #[test]
    fn should_escape_strings() {
        let value = Value::from("a\"b\\c\u{8}\u{c}\n\r\t");
        assert_eq!(value.stringify(0), r#""a\"b\\c\b\f\n\r\t""#);
        let value = Value::from("\u{0}\u{1f}\u{7f}");
        assert_eq!(value.stringify(0), "\"\\u0000\\u001f\\u007f\"");
    }

    #[test]
    fn should_write_multibyte_text_unescaped() {
        let value = Value::from("héllo 𝄞");
        assert_eq!(value.stringify(0), "\"héllo 𝄞\"");
    }

    #[test]
    fn should_not_escape_solidus_on_output() {
        let value = Value::parse(r#""a\/b""#).unwrap();
        assert_eq!(value.stringify(0), r#""a/b""#);
    }

    #[test]
    fn should_pretty_print_with_indent_width() {
        let value = Value::parse(r#"{"a":1,"b":[true,null],"c":{}}"#).unwrap();
        let expected = "{\n    \"a\": 1,\n    \"b\": [\n        true,\n        null\n    ],\n    \"c\": {}\n}";
        assert_eq!(value.stringify(4), expected);
        let expected = "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ],\n  \"c\": {}\n}";
        assert_eq!(value.stringify(2), expected);
    }

    #[test]
    fn should_pretty_print_empty_containers_inline() {
        assert_eq!(Value::parse("{}").unwrap().stringify(4), "{}");
        assert_eq!(Value::parse("[]").unwrap().stringify(4), "[]");
    }

    #[test]
    fn should_display_compactly() {
        let value = Value::parse(r#"{ "a" : [ 1 , 2 ] }"#).unwrap();
        assert_eq!(value.to_string(), r#"{"a":[1,2]}"#);
    }
}
