//! Checked narrowing readers.
//!
//! Each reader succeeds only when the value carries the required tag and
//! the payload fits the target type; on failure the caller's state is
//! untouched. None of them allocate.

use crate::value::JsonValue;

macro_rules! integer_readers {
    ($($name:ident => $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Reads the integer payload if it fits in `", stringify!($ty), "`.")]
        #[must_use]
        pub fn $name(&self) -> Option<$ty> {
            match *self {
                JsonValue::Integer(value) => <$ty>::try_from(value).ok(),
                _ => None,
            }
        }
    )*};
}

impl JsonValue {
    integer_readers! {
        read_i8 => i8,
        read_i16 => i16,
        read_i32 => i32,
        read_i64 => i64,
        read_u8 => u8,
        read_u16 => u16,
        read_u32 => u32,
        read_u64 => u64,
        read_isize => isize,
        read_usize => usize,
    }

    /// Reads the double payload if its magnitude fits in `f32`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn read_f32(&self) -> Option<f32> {
        match *self {
            JsonValue::Double(value)
                if value >= -f64::from(f32::MAX) && value <= f64::from(f32::MAX) =>
            {
                Some(value as f32)
            }
            _ => None,
        }
    }

    /// Reads the double payload.
    #[must_use]
    pub fn read_f64(&self) -> Option<f64> {
        match *self {
            JsonValue::Double(value) => Some(value),
            _ => None,
        }
    }

    /// Reads the boolean payload.
    #[must_use]
    pub fn read_bool(&self) -> Option<bool> {
        match *self {
            JsonValue::Boolean(value) => Some(value),
            _ => None,
        }
    }

    /// Copies the string payload into `out`, truncating to `out.len()`
    /// bytes, and returns the number of bytes copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontally::parse;
    ///
    /// let value = parse(br#""tally""#).unwrap();
    /// let mut buf = [0u8; 256];
    /// let copied = value.read_string(&mut buf).unwrap();
    /// assert_eq!(&buf[..copied], b"tally");
    /// ```
    #[must_use]
    pub fn read_string(&self, out: &mut [u8]) -> Option<usize> {
        match self {
            JsonValue::String(bytes) => {
                let n = bytes.len().min(out.len());
                out[..n].copy_from_slice(&bytes[..n]);
                Some(n)
            }
            _ => None,
        }
    }
}
