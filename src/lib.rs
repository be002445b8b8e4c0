//! A JSON value model with a strict RFC 8259 parser and serializer.
//!
//! The central type is [Value], a tagged union over the seven JSON value
//! kinds. Two properties set it apart from DOM types that eagerly convert
//! to native machine types:
//!
//! - numbers are stored as their validated literal text and only coerced
//!   by the strict getters, so `1.10000000` survives a parse/write cycle
//!   byte for byte and never picks up binary rounding artifacts;
//! - objects are ordered sequences of key/value pairs, not maps. Insertion
//!   order is preserved, duplicate keys are permitted, and equality is
//!   order sensitive.
//!
//! Parsing is strict: one document per input, no trailing content, no
//! comments, no leading zeros, validated UTF-8 with correct UTF-16
//! surrogate pair handling in `\u` escapes, and a hard container nesting
//! ceiling of [MAX_DEPTH] enforced without recursion.
//!
//! # Parsing and lookups
//!
//! ```
//! use verbatim_json::Value;
//!
//! let doc = Value::parse(r#"{"name":"ferris","scores":[1.50,2]}"#).unwrap();
//! assert_eq!(doc["name"].get_str().unwrap(), "ferris");
//! assert_eq!(doc["scores"][0].get_val_str(), "1.50");
//! assert!(doc["missing"]["deeper"].is_null());
//! assert_eq!(doc.stringify(0), r#"{"name":"ferris","scores":[1.50,2]}"#);
//! ```
//!
//! # Building documents
//!
//! ```
//! use verbatim_json::Value;
//!
//! let mut doc = Value::Null;
//! let object = doc.set_object();
//! object.push("enabled", Value::True);
//! object.push("retries", Value::from(3));
//! assert_eq!(doc.stringify(0), r#"{"enabled":true,"retries":3}"#);
//! ```

pub mod coords;
pub mod decoders;
pub mod errors;
pub mod lexer;
pub mod numeric;
pub mod parser;
pub mod value;
pub mod writer;

pub use errors::{AccessError, AccessResult, ParseError, ParseResult};
pub use parser::MAX_DEPTH;
pub use value::{kind_mask_name, Array, Kind, Object, Value, BOOL_MASK};
pub use writer::{stringify, stringify_reserve, Stringify};

/// The crate version as a (major, minor, patch) triple
pub fn version() -> (u32, u32, u32) {
    fn component(text: &str) -> u32 {
        text.parse().unwrap_or(0)
    }
    (
        component(env!("CARGO_PKG_VERSION_MAJOR")),
        component(env!("CARGO_PKG_VERSION_MINOR")),
        component(env!("CARGO_PKG_VERSION_PATCH")),
    )
}

#[cfg(test)]
mod tests {
    #[test]
    fn should_report_a_version() {
        assert_eq!(super::version(), (0, 1, 0));
    }
}
