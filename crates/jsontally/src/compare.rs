//! Structural comparison over value trees.
//!
//! Two relations are provided: [`JsonValue::structural_eq`] compares
//! payloads, [`JsonValue::schema_eq`] compares only shapes. Both treat
//! object members as order-insensitive (lookup is by first match, so
//! duplicate names compare against the first occurrence), and neither
//! promises anything for `Double` payloads or the `none` sentinel.

use core::ptr;

use crate::value::{JsonValue, first_match};

impl JsonValue {
    /// Structural equality.
    ///
    /// Holds when both references are the same value, or when tags match
    /// and payloads agree: integers, booleans, and byte strings compare
    /// by payload, `null` is always equal to `null`, arrays compare
    /// element-wise in order, and objects compare as unordered name/value
    /// collections of equal size. Doubles and the `none` sentinel never
    /// compare equal, by contract.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontally::parse;
    ///
    /// let a = parse(br#"{"a": 1, "b": 2}"#).unwrap();
    /// let b = parse(br#"{"b": 2, "a": 1}"#).unwrap();
    /// assert!(a.structural_eq(&b));
    ///
    /// // Doubles carry no usable equality.
    /// assert!(!parse(b"1.42").unwrap().structural_eq(&parse(b"1.42").unwrap()));
    /// ```
    #[must_use]
    pub fn structural_eq(&self, other: &JsonValue) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        match (self, other) {
            (JsonValue::Integer(lhs), JsonValue::Integer(rhs)) => lhs == rhs,
            (JsonValue::Boolean(lhs), JsonValue::Boolean(rhs)) => lhs == rhs,
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::String(lhs), JsonValue::String(rhs)) => lhs == rhs,
            (JsonValue::Array(lhs), JsonValue::Array(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| a.structural_eq(b))
            }
            (JsonValue::Object(lhs), JsonValue::Object(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|(name, value)| {
                        first_match(rhs, name.as_slice())
                            .is_some_and(|found| value.structural_eq(found))
                    })
            }
            // mismatched tags, doubles, and the sentinel: never equal
            _ => false,
        }
    }

    /// Structural type (schema) equality.
    ///
    /// Like [`structural_eq`](Self::structural_eq) with every scalar
    /// payload comparison replaced by "tags match": two doubles are
    /// schema-equal, two strings are schema-equal, and so on. Objects
    /// must carry the same names (order-insensitive) with schema-equal
    /// values; arrays compare element-wise. The `none` sentinel is never
    /// schema-equal to anything but itself by reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontally::parse;
    ///
    /// let a = parse(b"[1, 2, 3]").unwrap();
    /// let b = parse(b"[3, 2, 1]").unwrap();
    /// assert!(!a.structural_eq(&b));
    /// assert!(a.schema_eq(&b));
    /// ```
    #[must_use]
    pub fn schema_eq(&self, other: &JsonValue) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        match (self, other) {
            (JsonValue::Integer(_), JsonValue::Integer(_))
            | (JsonValue::Double(_), JsonValue::Double(_))
            | (JsonValue::String(_), JsonValue::String(_))
            | (JsonValue::Boolean(_), JsonValue::Boolean(_))
            | (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Array(lhs), JsonValue::Array(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| a.schema_eq(b))
            }
            (JsonValue::Object(lhs), JsonValue::Object(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|(name, value)| {
                        first_match(rhs, name.as_slice()).is_some_and(|found| value.schema_eq(found))
                    })
            }
            // mismatched tags and the sentinel
            _ => false,
        }
    }
}
