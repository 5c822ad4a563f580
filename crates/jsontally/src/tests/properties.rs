use alloc::{string::ToString, vec::Vec};

use quickcheck::{QuickCheck, TestResult};

use crate::{JsonValue, parse};

fn has_double(value: &JsonValue) -> bool {
    match value {
        JsonValue::Double(_) => true,
        JsonValue::Array(items) => items.iter().any(has_double),
        JsonValue::Object(members) => members.iter().any(|(_, child)| has_double(child)),
        _ => false,
    }
}

/// Renders `value` as parseable text. Only `"` and `\` need escaping:
/// the parser passes every other byte of a string through untouched.
fn render(value: &JsonValue, out: &mut Vec<u8>) {
    fn render_bytes(bytes: &[u8], out: &mut Vec<u8>) {
        out.push(b'"');
        for &byte in bytes {
            if byte == b'"' || byte == b'\\' {
                out.push(b'\\');
            }
            out.push(byte);
        }
        out.push(b'"');
    }

    match value {
        JsonValue::None => unreachable!("the generator never emits the sentinel"),
        JsonValue::Null => out.extend_from_slice(b"null"),
        JsonValue::Boolean(true) => out.extend_from_slice(b"true"),
        JsonValue::Boolean(false) => out.extend_from_slice(b"false"),
        JsonValue::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
        // Debug formatting keeps a decimal point, so the reparse stays a double
        JsonValue::Double(d) => out.extend_from_slice(alloc::format!("{d:?}").as_bytes()),
        JsonValue::String(bytes) => render_bytes(bytes, out),
        JsonValue::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                render(item, out);
            }
            out.push(b']');
        }
        JsonValue::Object(members) => {
            out.push(b'{');
            for (i, (name, child)) in members.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                render_bytes(name, out);
                out.push(b':');
                render(child, out);
            }
            out.push(b'}');
        }
    }
}

#[test]
fn render_then_parse_preserves_structure() {
    fn prop(value: JsonValue) -> TestResult {
        if has_double(&value) {
            return TestResult::discard();
        }
        let mut text = Vec::new();
        render(&value, &mut text);
        let Ok(parsed) = parse(&text) else {
            return TestResult::failed();
        };
        TestResult::from_bool(parsed.structural_eq(&value) && value.structural_eq(&parsed))
    }
    QuickCheck::new().quickcheck(prop as fn(JsonValue) -> TestResult);
}

#[test]
fn render_then_parse_preserves_schema() {
    fn prop(value: JsonValue) -> bool {
        let mut text = Vec::new();
        render(&value, &mut text);
        parse(&text).is_ok_and(|parsed| parsed.schema_eq(&value))
    }
    QuickCheck::new().quickcheck(prop as fn(JsonValue) -> bool);
}

#[test]
fn clone_is_isomorphic() {
    fn prop(value: JsonValue) -> bool {
        let copy = value.clone();
        copy.schema_eq(&value) && (has_double(&value) || copy.structural_eq(&value))
    }
    QuickCheck::new().quickcheck(prop as fn(JsonValue) -> bool);
}

#[test]
fn object_member_order_is_ignored_by_equality() {
    fn prop(value: JsonValue) -> TestResult {
        let JsonValue::Object(members) = &value else {
            return TestResult::discard();
        };
        if has_double(&value) {
            return TestResult::discard();
        }
        let mut reversed = members.clone();
        reversed.reverse();
        let reversed = JsonValue::Object(reversed);
        TestResult::from_bool(
            value.structural_eq(&reversed)
                && reversed.structural_eq(&value)
                && value.schema_eq(&reversed),
        )
    }
    QuickCheck::new().quickcheck(prop as fn(JsonValue) -> TestResult);
}
