//! A two-pass, memory-budgeted JSON tree parser.
//!
//! The parser scans its input twice with the same scanner: the first pass
//! sizes every container and string, the second fills buffers reserved at
//! exactly those sizes, with every request metered against an optional
//! caller-supplied memory budget. The result is a [`JsonValue`] tree plus
//! a small algebra over it: structural and schema equality, duplication
//! via `Clone`, field lookup, and checked narrowing readers.
//!
//! ```
//! use jsontally::{JsonType, parse};
//!
//! let root = parse(br#"{"name": "tally", "sizes": [1, 2, 3]}"#).unwrap();
//! assert_eq!(root["name"].json_type(), JsonType::String);
//! assert!(root["sizes"].is_array_of(JsonType::Integer));
//! assert_eq!(root["sizes"][2].read_u8(), Some(3));
//! ```
//!
//! String payloads are byte strings: `\uXXXX` escapes are decoded
//! independently (surrogate pairs are not joined), so parsed strings can
//! contain bytes outside valid UTF-8.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod compare;
mod parser;
mod readers;
mod value;

#[cfg(test)]
mod tests;

pub use parser::{ParseError, ParserSettings, SyntaxError, parse, parse_with};
pub use value::{Elements, JsonType, JsonValue, Members};
