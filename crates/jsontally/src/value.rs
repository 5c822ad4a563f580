//! The parsed value tree.
//!
//! This module defines [`JsonValue`], the tagged variant every parse
//! produces, together with its tag enum [`JsonType`], constructors,
//! discriminators, member lookup, and the compact diagnostic renderer.
//!
//! Children are owned exclusively by their parent container; the root is
//! owned by whoever called the parser. Traversals that must not recurse
//! (destruction) carry an explicit stack instead of parent pointers.

use alloc::vec::Vec;
use core::{fmt, ops};

use bstr::{BString, ByteSlice};

/// Ordered object members. Insertion order is preserved and duplicate
/// names are kept; lookup returns the first match.
pub type Members = Vec<(BString, JsonValue)>;

/// Ordered array elements.
pub type Elements = Vec<JsonValue>;

/// The tag carried by a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    /// The "absent" sentinel; never produced by the parser.
    None,
    /// An object of name/value members.
    Object,
    /// An array of elements.
    Array,
    /// A signed 64-bit integer.
    Integer,
    /// An IEEE-754 binary64 number.
    Double,
    /// A byte string.
    String,
    /// `true` or `false`.
    Boolean,
    /// The `null` literal.
    Null,
}

impl JsonType {
    /// Short identifier for the tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontally::JsonType;
    ///
    /// assert_eq!(JsonType::Integer.as_str(), "integer");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            JsonType::None => "none",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Integer => "integer",
            JsonType::Double => "double",
            JsonType::String => "string",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a parsed JSON document.
///
/// String payloads are byte strings rather than `str`: the parser decodes
/// each `\uXXXX` escape independently, so a document can legally produce
/// bytes that are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use jsontally::{JsonType, parse};
///
/// let root = parse(br#"{"name": "tally", "sizes": [1, 2, 3]}"#).unwrap();
/// assert_eq!(root["name"].json_type(), JsonType::String);
/// assert_eq!(root["sizes"][0].read_i64(), Some(1));
/// assert!(root["missing"].is_none());
/// ```
#[derive(Debug, Clone)]
pub enum JsonValue {
    /// Sentinel for "absent"; returned by the indexing accessors on any
    /// miss and never produced by the parser.
    None,
    /// Object members in insertion order.
    Object(Members),
    /// Array elements in input order.
    Array(Elements),
    /// Integer payload.
    Integer(i64),
    /// Floating payload.
    Double(f64),
    /// Byte-string payload.
    String(BString),
    /// Boolean payload.
    Boolean(bool),
    /// The `null` literal.
    Null,
}

/// Shared sentinel handed out by the indexing accessors. Immutable by
/// construction; statics are never dropped.
static NONE: JsonValue = JsonValue::None;

/// First member of `members` named `name`, in insertion order.
pub(crate) fn first_match<'a>(members: &'a Members, name: &[u8]) -> Option<&'a JsonValue> {
    members
        .iter()
        .find(|(member, _)| member.as_slice() == name)
        .map(|(_, value)| value)
}

impl JsonValue {
    /// The tag of this value.
    #[must_use]
    pub const fn json_type(&self) -> JsonType {
        match self {
            JsonValue::None => JsonType::None,
            JsonValue::Object(_) => JsonType::Object,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Integer(_) => JsonType::Integer,
            JsonValue::Double(_) => JsonType::Double,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Boolean(_) => JsonType::Boolean,
            JsonValue::Null => JsonType::Null,
        }
    }

    /// Returns `true` if the value is the absent sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, JsonValue::None)
    }

    /// Returns `true` if the value is `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontally::JsonValue;
    ///
    /// assert!(JsonValue::Null.is_null());
    /// assert!(!JsonValue::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    /// Returns `true` if the value is an integer or a double.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontally::JsonValue;
    ///
    /// assert!(JsonValue::Integer(3).is_number());
    /// assert!(JsonValue::Double(0.5).is_number());
    /// assert!(!JsonValue::Null.is_number());
    /// ```
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, JsonValue::Integer(_) | JsonValue::Double(_))
    }

    /// Returns `true` if the value is a string.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns `true` if the value is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Looks up an object member by name; the first match wins.
    ///
    /// Returns `None` when the value is not an object or no member
    /// carries the name.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontally::parse;
    ///
    /// let root = parse(br#"{"a": 1, "a": 2}"#).unwrap();
    /// assert_eq!(root.field("a").and_then(|v| v.read_i64()), Some(1));
    /// assert!(root.field("b").is_none());
    /// ```
    pub fn field(&self, name: impl AsRef<[u8]>) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(members) => first_match(members, name.as_ref()),
            _ => None,
        }
    }

    /// Returns `true` iff the value is an array and every element carries
    /// the given tag. An empty array satisfies any tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontally::{JsonType, parse};
    ///
    /// assert!(parse(b"[1, 2, 3]").unwrap().is_array_of(JsonType::Integer));
    /// assert!(!parse(b"[1, true]").unwrap().is_array_of(JsonType::Integer));
    /// assert!(!parse(b"1").unwrap().is_array_of(JsonType::Integer));
    /// ```
    #[must_use]
    pub fn is_array_of(&self, ty: JsonType) -> bool {
        match self {
            JsonValue::Array(items) => items.iter().all(|item| item.json_type() == ty),
            _ => false,
        }
    }
}

impl Default for JsonValue {
    fn default() -> Self {
        JsonValue::Null
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Integer(value)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Double(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(BString::from(value))
    }
}

impl From<&[u8]> for JsonValue {
    fn from(value: &[u8]) -> Self {
        JsonValue::String(BString::from(value))
    }
}

impl From<BString> for JsonValue {
    fn from(value: BString) -> Self {
        JsonValue::String(value)
    }
}

impl From<Elements> for JsonValue {
    fn from(value: Elements) -> Self {
        JsonValue::Array(value)
    }
}

impl From<Members> for JsonValue {
    fn from(value: Members) -> Self {
        JsonValue::Object(value)
    }
}

impl ops::Index<usize> for JsonValue {
    type Output = JsonValue;

    /// Array element at `index`; the `none` sentinel when the value is
    /// not an array or the index is out of range.
    fn index(&self, index: usize) -> &JsonValue {
        match self {
            JsonValue::Array(items) => items.get(index).unwrap_or(&NONE),
            _ => &NONE,
        }
    }
}

impl ops::Index<&str> for JsonValue {
    type Output = JsonValue;

    /// First object member named `name`; the `none` sentinel on any miss.
    fn index(&self, name: &str) -> &JsonValue {
        self.field(name).unwrap_or(&NONE)
    }
}

/// Moves the direct children of `value` onto `out`, leaving `value` a
/// childless shell.
fn detach_children(value: &mut JsonValue, out: &mut Vec<JsonValue>) {
    match value {
        JsonValue::Array(items) => out.append(items),
        JsonValue::Object(members) => out.extend(members.drain(..).map(|(_, child)| child)),
        _ => {}
    }
}

impl Drop for JsonValue {
    // Destruction must cope with trees nested as deeply as the input was;
    // children are detached onto an explicit stack so the call stack stays
    // at a fixed depth.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_children(self, &mut stack);
        while let Some(mut value) = stack.pop() {
            detach_children(&mut value, &mut stack);
        }
    }
}

impl fmt::Display for JsonValue {
    /// Compact diagnostic rendering.
    ///
    /// Strings are written raw, without re-escaping, so the output is not
    /// guaranteed to parse back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::None => f.write_str("none"),
            JsonValue::Null => f.write_str("null"),
            JsonValue::Boolean(value) => f.write_str(if *value { "true" } else { "false" }),
            JsonValue::Integer(value) => write!(f, "{value}"),
            JsonValue::Double(value) => write!(f, "{value}"),
            JsonValue::String(bytes) => write!(f, "\"{}\"", bytes.as_bstr()),
            JsonValue::Array(items) => {
                f.write_str("[")?;
                let mut first = true;
                for item in items {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            JsonValue::Object(members) => {
                f.write_str("{")?;
                let mut first = true;
                for (name, value) in members {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "\"{}\":{}", name.as_bstr(), value)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;
    use crate::parse;

    #[test]
    fn index_sugar_returns_sentinel_on_miss() {
        let root = parse(br#"{"a": [10, 20]}"#).unwrap();
        assert_eq!(root["a"][1].read_i64(), Some(20));
        assert!(root["a"][2].is_none());
        assert!(root["b"].is_none());
        assert!(root["a"]["b"].is_none());
        assert!(root[0].is_none());
    }

    #[test]
    fn field_returns_first_match_for_duplicates() {
        let root = parse(br#"{"k": 1, "k": 2, "other": 3}"#).unwrap();
        assert_eq!(root.field("k").and_then(JsonValue::read_i64), Some(1));
        assert_eq!(root.field("other").and_then(JsonValue::read_i64), Some(3));
    }

    #[test]
    fn type_names_are_short_identifiers() {
        assert_eq!(JsonType::None.as_str(), "none");
        assert_eq!(JsonType::Object.as_str(), "object");
        assert_eq!(JsonType::Array.as_str(), "array");
        assert_eq!(JsonType::Integer.as_str(), "integer");
        assert_eq!(JsonType::Double.as_str(), "double");
        assert_eq!(JsonType::String.as_str(), "string");
        assert_eq!(JsonType::Boolean.as_str(), "boolean");
        assert_eq!(JsonType::Null.as_str(), "null");
    }

    #[test]
    fn homogeneous_array_predicate() {
        assert!(parse(b"[]").unwrap().is_array_of(JsonType::Double));
        assert!(parse(br#"["a", "b"]"#).unwrap().is_array_of(JsonType::String));
        assert!(!parse(br#"["a", 1]"#).unwrap().is_array_of(JsonType::String));
        assert!(!JsonValue::Null.is_array_of(JsonType::Null));
    }

    #[test]
    fn display_renders_compactly() {
        let root = parse(br#"{ "a" : [ 1 , true , null ] , "b" : "x" }"#).unwrap();
        assert_eq!(root.to_string(), r#"{"a":[1,true,null],"b":"x"}"#);
        assert_eq!(JsonValue::None.to_string(), "none");
        assert_eq!(JsonValue::Double(1.5).to_string(), "1.5");
    }

    #[test]
    fn dropping_a_deep_tree_does_not_recurse() {
        let mut value = JsonValue::Null;
        for _ in 0..100_000 {
            value = JsonValue::Array(vec![value]);
        }
        drop(value);
    }

    #[test]
    fn constructors_carry_owned_payloads() {
        let text = "borrowed";
        let value = JsonValue::from(text);
        assert!(value.is_string());
        assert_eq!(value.read_string(&mut [0u8; 16]), Some(8));

        assert!(JsonValue::from(true).is_bool());
        assert!(JsonValue::from(3i64).is_number());
        assert!(JsonValue::from(0.25).is_number());
        assert!(JsonValue::from(vec![JsonValue::Null]).is_array());
    }
}
