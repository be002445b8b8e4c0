//! The document builder: drives the lexer and assembles a [Value] tree.
//!
//! Grammar positions are tracked with a small expectation bitmask rather
//! than a grammar table, and container nesting with an explicit frame stack
//! rather than recursion, so input depth can never exhaust the call stack.
//! The depth ceiling is the compile-time constant [MAX_DEPTH].

use crate::errors::{Details, ParseResult};
use crate::lexer::{Lexer, Token};
use crate::parser_error;
use crate::value::{Array, Kind, Object, Value};

/// The maximum container nesting depth accepted by the parser
pub const MAX_DEPTH: usize = 512;

const EXP_OBJ_NAME: u32 = 1 << 0;
const EXP_COLON: u32 = 1 << 1;
const EXP_ARR_VALUE: u32 = 1 << 2;
const EXP_VALUE: u32 = 1 << 3;
const EXP_NOT_VALUE: u32 = 1 << 4;

/// An open container on the build stack. Object frames keep the pending key
/// as a placeholder entry whose value is overwritten when the value arrives.
enum Frame {
    Obj(Object),
    Arr(Array),
}

impl Frame {
    fn kind(&self) -> Kind {
        match self {
            Frame::Obj(_) => Kind::Obj,
            Frame::Arr(_) => Kind::Arr,
        }
    }

    fn attach(&mut self, value: Value) {
        match self {
            Frame::Obj(object) => {
                if let Some(slot) = object.last_value_mut() {
                    *slot = value;
                }
            }
            Frame::Arr(array) => array.push(value),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Obj(object) => Value::Obj(object),
            Frame::Arr(array) => Value::Arr(array),
        }
    }
}

/// Parse `raw` as exactly one JSON document into `root`.
///
/// The previous contents of `root` are discarded up front. Exactly one
/// top-level value is accepted; anything but JSON whitespace after it fails
/// with [Details::TrailingContent].
pub(crate) fn read_document(root: &mut Value, raw: &[u8]) -> ParseResult<()> {
    root.set_null();

    let mut lexer = Lexer::new(raw);
    let mut stack: Vec<Frame> = Vec::new();
    let mut document: Option<Value> = None;
    let mut expect: u32 = 0;
    let mut last_comma = false;
    let mut last_arr_open = false;

    loop {
        let (token, span) = lexer.consume()?;
        if token == Token::End {
            return parser_error!(Details::UnexpectedEndOfInput, lexer.coords(span.start));
        }
        let opens_value = token.opens_value();

        // Positional checks first: each grammar position admits only a
        // specific subset of tokens.
        if expect & EXP_VALUE != 0 {
            if !opens_value {
                return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
            }
            expect &= !EXP_VALUE;
        } else if expect & EXP_ARR_VALUE != 0 {
            if !(opens_value || token == Token::ArrClose) {
                return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
            }
            expect &= !EXP_ARR_VALUE;
        } else if expect & EXP_OBJ_NAME != 0 {
            if !matches!(token, Token::ObjClose | Token::Str(_)) {
                return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
            }
            // cleared below, where the key or close is consumed
        } else if expect & EXP_COLON != 0 {
            if token != Token::Colon {
                return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
            }
            expect &= !EXP_COLON;
        } else if token == Token::Colon {
            return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
        }

        if expect & EXP_NOT_VALUE != 0 {
            if opens_value {
                return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
            }
            expect &= !EXP_NOT_VALUE;
        }

        let mut this_comma = false;
        let mut this_arr_open = false;

        match token {
            Token::ObjOpen | Token::ArrOpen => {
                let is_object = token == Token::ObjOpen;
                stack.push(if is_object {
                    Frame::Obj(Object::new())
                } else {
                    Frame::Arr(Array::new())
                });
                if stack.len() > MAX_DEPTH {
                    return parser_error!(Details::NestingTooDeep, lexer.coords(span.start));
                }
                if is_object {
                    expect |= EXP_OBJ_NAME;
                } else {
                    expect |= EXP_ARR_VALUE;
                    this_arr_open = true;
                }
            }
            Token::ObjClose | Token::ArrClose => {
                if last_comma {
                    return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
                }
                let closes = if token == Token::ObjClose {
                    Kind::Obj
                } else {
                    Kind::Arr
                };
                let frame = match stack.pop() {
                    Some(frame) if frame.kind() == closes => frame,
                    _ => {
                        return parser_error!(
                            Details::MismatchedDelimiter,
                            lexer.coords(span.start)
                        );
                    }
                };
                let finished = frame.into_value();
                match stack.last_mut() {
                    Some(top) => top.attach(finished),
                    None => document = Some(finished),
                }
                expect &= !EXP_OBJ_NAME;
                expect |= EXP_NOT_VALUE;
            }
            Token::Colon => {
                // the grammar checks above admit a colon only when expected,
                // and EXP_COLON is only ever set inside an object frame
                if !matches!(stack.last(), Some(Frame::Obj(_))) {
                    return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
                }
                expect |= EXP_VALUE;
            }
            Token::Comma => {
                if stack.is_empty() || last_comma || last_arr_open {
                    return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
                }
                expect |= match stack.last() {
                    Some(Frame::Obj(_)) => EXP_OBJ_NAME,
                    _ => EXP_ARR_VALUE,
                };
                this_comma = true;
            }
            Token::Str(text) if expect & EXP_OBJ_NAME != 0 => {
                match stack.last_mut() {
                    Some(Frame::Obj(object)) => object.push(text, Value::Null),
                    _ => {
                        return parser_error!(Details::UnexpectedToken, lexer.coords(span.start));
                    }
                }
                expect &= !EXP_OBJ_NAME;
                expect |= EXP_COLON;
            }
            Token::Null | Token::True | Token::False | Token::Num(_) | Token::Str(_) => {
                let value = match token {
                    Token::Null => Value::Null,
                    Token::True => Value::True,
                    Token::False => Value::False,
                    Token::Num(text) => Value::Num(text),
                    Token::Str(text) => Value::Str(text),
                    _ => unreachable!(),
                };
                match stack.last_mut() {
                    Some(top) => top.attach(value),
                    None => document = Some(value),
                }
                expect |= EXP_NOT_VALUE;
            }
            Token::End => unreachable!(),
        }

        last_comma = this_comma;
        last_arr_open = this_arr_open;

        if stack.is_empty() && document.is_some() {
            break;
        }
    }

    // exactly one document per input
    let (token, span) = lexer.consume()?;
    if token != Token::End {
        return parser_error!(Details::TrailingContent, lexer.coords(span.start));
    }

    if let Some(value) = document {
        *root = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::MAX_DEPTH;
    use crate::errors::Details;
    use crate::value::Value;

    fn parse_error(input: &str) -> Details {
        match Value::parse(input) {
            Ok(value) => panic!("parsed {:?} from {:?}", value, input),
            Err(err) => err.details,
        }
    }

    #[test]
    fn should_parse_scalar_documents() {
        assert_eq!(Value::parse("true").unwrap(), Value::True);
        assert_eq!(Value::parse("false").unwrap(), Value::False);
        assert_eq!(Value::parse("null").unwrap(), Value::Null);
        assert_eq!(Value::parse(" 42 ").unwrap(), Value::Num("42".into()));
        assert_eq!(Value::parse(r#""x""#).unwrap(), Value::Str("x".into()));
    }

    #[test]
    fn should_parse_empty_containers() {
        assert_eq!(Value::parse("{}").unwrap().len(), 0);
        assert!(Value::parse("  {}\n  ").unwrap().is_object());
        assert!(Value::parse("[]").unwrap().is_array());
    }

    #[test]
    fn should_parse_nested_documents() {
        let value = Value::parse(
            r#"{"first": "John", "colors": ["red", "green"], "age": 100, "ok": true, "sub": {"x": null}}"#,
        )
        .unwrap();
        assert_eq!(value.len(), 5);
        assert_eq!(value["first"].get_str().unwrap(), "John");
        assert_eq!(value["colors"][1].get_str().unwrap(), "green");
        assert_eq!(value["age"].get_int().unwrap(), 100);
        assert!(value["ok"].get_bool().unwrap());
        assert!(value["sub"]["x"].is_null());
    }

    #[test]
    fn should_keep_duplicate_keys_in_order() {
        let value = Value::parse(r#"{"k":1,"k":2}"#).unwrap();
        assert_eq!(value.len(), 2);
        assert_eq!(value["k"].get_int().unwrap(), 1);
        assert_eq!(value.at_index(1).unwrap().get_int().unwrap(), 2);
    }

    #[test]
    fn should_replace_previous_contents_on_read() {
        let mut value = Value::parse(r#"{"a":1}"#).unwrap();
        value.read("[7]").unwrap();
        assert_eq!(value[0].get_int().unwrap(), 7);
        // a failed read leaves no stale document behind
        assert!(value.read("[7,").is_err());
        assert!(value.is_null());
    }

    #[test]
    fn should_reject_empty_and_truncated_input() {
        assert_eq!(parse_error(""), Details::UnexpectedEndOfInput);
        assert_eq!(parse_error("   \n\t "), Details::UnexpectedEndOfInput);
        assert_eq!(parse_error("{\"a\":1"), Details::UnexpectedEndOfInput);
        assert_eq!(parse_error("[1,2"), Details::UnexpectedEndOfInput);
        assert_eq!(parse_error("[1,"), Details::UnexpectedEndOfInput);
    }

    #[test]
    fn should_reject_trailing_content() {
        assert_eq!(parse_error("{} 42"), Details::TrailingContent);
        assert_eq!(parse_error("[]{}"), Details::TrailingContent);
        assert_eq!(parse_error("1 2"), Details::TrailingContent);
        assert_eq!(parse_error("null null"), Details::TrailingContent);
        assert!(Value::parse("{} \n\t ").is_ok());
    }

    #[test]
    fn should_reject_misplaced_commas() {
        assert_eq!(parse_error("[1,2,]"), Details::UnexpectedToken);
        assert_eq!(parse_error("[,1]"), Details::UnexpectedToken);
        assert_eq!(parse_error("[1,,2]"), Details::UnexpectedToken);
        assert_eq!(parse_error(r#"{"a":1,}"#), Details::UnexpectedToken);
        assert_eq!(parse_error(r#"{,"a":1}"#), Details::UnexpectedToken);
        assert_eq!(parse_error(","), Details::UnexpectedToken);
    }

    #[test]
    fn should_reject_structural_mistakes() {
        assert_eq!(parse_error("[1 2]"), Details::UnexpectedToken);
        assert_eq!(parse_error(r#"{"a" 1}"#), Details::UnexpectedToken);
        assert_eq!(parse_error(r#"{"a": }"#), Details::UnexpectedToken);
        assert_eq!(parse_error(r#"{1:2}"#), Details::UnexpectedToken);
        assert_eq!(parse_error(":"), Details::UnexpectedToken);
        assert_eq!(parse_error("]"), Details::MismatchedDelimiter);
        assert_eq!(parse_error("}"), Details::MismatchedDelimiter);
        assert_eq!(parse_error(r#"{"a":[1}"#), Details::MismatchedDelimiter);
        assert_eq!(parse_error(r#"["a":1]"#), Details::UnexpectedToken);
    }

    #[test]
    fn should_enforce_the_depth_ceiling() {
        let mut at_limit = String::new();
        at_limit.push_str(&"[".repeat(MAX_DEPTH));
        at_limit.push_str(&"]".repeat(MAX_DEPTH));
        assert!(Value::parse(&at_limit).is_ok());

        let mut over = String::new();
        over.push_str(&"[".repeat(MAX_DEPTH + 1));
        over.push_str(&"]".repeat(MAX_DEPTH + 1));
        assert_eq!(
            Value::parse(&over).unwrap_err().details,
            Details::NestingTooDeep
        );
    }

    #[test]
    fn should_reject_embedded_nul_bytes() {
        let mut value = Value::Null;
        assert!(value.read_bytes(b"[\"a\0b\"]").is_err());
        assert!(value.read_bytes(b"[1]\0").is_err());
    }

    #[test]
    fn should_report_failure_offsets() {
        let err = Value::parse("[1, 2, x]").unwrap_err();
        assert_eq!(err.offset(), 7);
        let err = Value::parse("{\n  \"a\": ]\n}").unwrap_err();
        assert_eq!(err.coords.line, 2);
    }
}
