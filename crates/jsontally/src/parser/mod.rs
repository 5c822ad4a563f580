//! Two-pass parser: size on the first scan, fill on the second.
//!
//! The same [`Scanner`] runs twice over the input. The first pass appends
//! one [`Shape`] record per value, in scan order, totalling child counts,
//! decoded string lengths, and per-object name bytes. The second pass
//! replays the scanner, consumes the records in the same order, and
//! reserves every bulk buffer exactly once at its final size. No
//! container or string buffer ever reallocates while filling.
//!
//! Every byte requested by either pass is metered through a
//! [`MemoryBudget`]; on failure, whatever was built is released before
//! the error is returned.

mod budget;
mod error;
mod options;
mod scanner;


pub use error::{ParseError, SyntaxError};
pub use options::ParserSettings;

use alloc::vec::Vec;
use core::mem::size_of;

use bstr::BString;

use crate::value::{JsonValue, Members};
use budget::MemoryBudget;
use scanner::{Scanner, TreeSink};

/// Parses one JSON document with default settings.
///
/// # Examples
///
/// ```
/// use jsontally::parse;
///
/// let root = parse(b"[1, 2, 3]").unwrap();
/// assert_eq!(root[2].read_i64(), Some(3));
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found; nothing
/// of the partial tree survives.
pub fn parse(text: impl AsRef<[u8]>) -> Result<JsonValue, ParseError> {
    parse_with(ParserSettings::default(), text)
}

/// Parses one JSON document under explicit [`ParserSettings`].
///
/// # Examples
///
/// ```
/// use jsontally::{ParserSettings, parse_with};
///
/// let settings = ParserSettings {
///     relaxed_commas: true,
///     ..ParserSettings::default()
/// };
/// assert!(parse_with(settings, b"[1, 2,]").is_ok());
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found, including
/// [`ParseError::OutOfMemory`] when a positive `max_memory` would be
/// crossed.
pub fn parse_with(
    settings: ParserSettings,
    text: impl AsRef<[u8]>,
) -> Result<JsonValue, ParseError> {
    let input = text.as_ref();
    let mut budget = MemoryBudget::new(settings.max_memory);

    let mut sizing = SizingPass::new(&mut budget);
    Scanner::new(input, settings.relaxed_commas).run(&mut sizing)?;
    let shapes = sizing.finish();

    let mut filling = FillingPass::new(&mut budget, shapes);
    Scanner::new(input, settings.relaxed_commas).run(&mut filling)?;
    let Some(root) = filling.finish() else {
        unreachable!("scan completed without a root value")
    };
    Ok(root)
}

/// Pass-1 record for one value, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Scalar,
    Array { len: u32 },
    Object { len: u32, name_bytes: usize },
    String { len: u32 },
}

/// A container still open during the sizing scan.
struct OpenContainer {
    /// Index of the container's placeholder in the shape list.
    shape: usize,
    /// Children (or members) seen so far.
    len: u32,
    /// Objects only: total decoded bytes of all member names.
    name_bytes: usize,
}

/// First pass: tallies sizes without building anything.
struct SizingPass<'b> {
    budget: &'b mut MemoryBudget,
    shapes: Vec<Shape>,
    open: Vec<OpenContainer>,
    /// Decoded length of the string being scanned, with its shape index.
    string: Option<(usize, u32)>,
}

impl<'b> SizingPass<'b> {
    fn new(budget: &'b mut MemoryBudget) -> Self {
        SizingPass {
            budget,
            shapes: Vec::new(),
            open: Vec::new(),
            string: None,
        }
    }

    fn finish(self) -> Vec<Shape> {
        self.shapes
    }

    fn record(&mut self, shape: Shape) -> Result<usize, ParseError> {
        self.budget.charge(size_of::<Shape>())?;
        let index = self.shapes.len();
        self.shapes.push(shape);
        Ok(index)
    }

    /// The container on top of the stack gained a child.
    fn bump_parent(&mut self) -> Result<(), ParseError> {
        if let Some(frame) = self.open.last_mut() {
            frame.len = frame.len.checked_add(1).ok_or(ParseError::TooLong)?;
        }
        Ok(())
    }

    fn scalar(&mut self) -> Result<(), ParseError> {
        self.record(Shape::Scalar)?;
        self.bump_parent()
    }
}

impl TreeSink for SizingPass<'_> {
    fn begin_object(&mut self) -> Result<(), ParseError> {
        let shape = self.record(Shape::Object {
            len: 0,
            name_bytes: 0,
        })?;
        self.open.push(OpenContainer {
            shape,
            len: 0,
            name_bytes: 0,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), ParseError> {
        let Some(frame) = self.open.pop() else {
            unreachable!("unbalanced object close")
        };
        self.shapes[frame.shape] = Shape::Object {
            len: frame.len,
            name_bytes: frame.name_bytes,
        };
        self.bump_parent()
    }

    fn begin_array(&mut self) -> Result<(), ParseError> {
        let shape = self.record(Shape::Array { len: 0 })?;
        self.open.push(OpenContainer {
            shape,
            len: 0,
            name_bytes: 0,
        });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), ParseError> {
        let Some(frame) = self.open.pop() else {
            unreachable!("unbalanced array close")
        };
        self.shapes[frame.shape] = Shape::Array { len: frame.len };
        self.bump_parent()
    }

    fn begin_string(&mut self, _is_name: bool) -> Result<(), ParseError> {
        let shape = self.record(Shape::String { len: 0 })?;
        self.string = Some((shape, 0));
        Ok(())
    }

    fn string_bytes(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        let Some((_, len)) = self.string.as_mut() else {
            unreachable!("string bytes outside a string")
        };
        let step = u32::try_from(bytes.len()).map_err(|_| ParseError::TooLong)?;
        *len = len.checked_add(step).ok_or(ParseError::TooLong)?;
        Ok(())
    }

    fn end_string(&mut self, is_name: bool) -> Result<(), ParseError> {
        let Some((shape, len)) = self.string.take() else {
            unreachable!("string close outside a string")
        };
        self.shapes[shape] = Shape::String { len };
        if is_name {
            let Some(frame) = self.open.last_mut() else {
                unreachable!("member name outside an object")
            };
            frame.name_bytes = frame
                .name_bytes
                .checked_add(len as usize)
                .ok_or(ParseError::TooLong)?;
            Ok(())
        } else {
            self.bump_parent()
        }
    }

    fn integer(&mut self, _value: i64) -> Result<(), ParseError> {
        self.scalar()
    }

    fn double(&mut self, _value: f64) -> Result<(), ParseError> {
        self.scalar()
    }

    fn boolean(&mut self, _value: bool) -> Result<(), ParseError> {
        self.scalar()
    }

    fn null(&mut self) -> Result<(), ParseError> {
        self.scalar()
    }
}

/// A container under construction during the filling scan.
enum Building {
    Array(Vec<JsonValue>),
    Object {
        members: Members,
        /// Name of the member whose value is being built.
        name: Option<BString>,
    },
}

/// Second pass: replays the shape stream and builds the tree.
struct FillingPass<'b> {
    budget: &'b mut MemoryBudget,
    shapes: alloc::vec::IntoIter<Shape>,
    stack: Vec<Building>,
    string: Option<BString>,
    root: Option<JsonValue>,
}

impl<'b> FillingPass<'b> {
    fn new(budget: &'b mut MemoryBudget, shapes: Vec<Shape>) -> Self {
        FillingPass {
            budget,
            shapes: shapes.into_iter(),
            stack: Vec::new(),
            string: None,
            root: None,
        }
    }

    fn finish(mut self) -> Option<JsonValue> {
        self.root.take()
    }

    /// Hands a completed value to its parent, or installs the root.
    fn attach(&mut self, value: JsonValue) {
        match self.stack.last_mut() {
            Some(Building::Array(items)) => items.push(value),
            Some(Building::Object { members, name }) => {
                let Some(name) = name.take() else {
                    unreachable!("member value without a name")
                };
                members.push((name, value));
            }
            None => self.root = Some(value),
        }
    }
}

impl TreeSink for FillingPass<'_> {
    fn begin_object(&mut self) -> Result<(), ParseError> {
        let Some(Shape::Object { len, name_bytes }) = self.shapes.next() else {
            unreachable!("pass desync at object")
        };
        // the member table and all name bytes are charged as one block
        let table = (len as usize)
            .checked_mul(size_of::<(BString, JsonValue)>())
            .ok_or(ParseError::OutOfMemory)?;
        let block = table.checked_add(name_bytes).ok_or(ParseError::OutOfMemory)?;
        self.budget.charge(block)?;
        self.stack.push(Building::Object {
            members: Vec::with_capacity(len as usize),
            name: None,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), ParseError> {
        let Some(Building::Object { members, .. }) = self.stack.pop() else {
            unreachable!("unbalanced object close")
        };
        self.attach(JsonValue::Object(members));
        Ok(())
    }

    fn begin_array(&mut self) -> Result<(), ParseError> {
        let Some(Shape::Array { len }) = self.shapes.next() else {
            unreachable!("pass desync at array")
        };
        let block = (len as usize)
            .checked_mul(size_of::<JsonValue>())
            .ok_or(ParseError::OutOfMemory)?;
        self.budget.charge(block)?;
        self.stack.push(Building::Array(Vec::with_capacity(len as usize)));
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), ParseError> {
        let Some(Building::Array(items)) = self.stack.pop() else {
            unreachable!("unbalanced array close")
        };
        self.attach(JsonValue::Array(items));
        Ok(())
    }

    fn begin_string(&mut self, is_name: bool) -> Result<(), ParseError> {
        let Some(Shape::String { len }) = self.shapes.next() else {
            unreachable!("pass desync at string")
        };
        // member names were charged with their object's block
        if !is_name {
            self.budget.charge(len as usize)?;
        }
        self.string = Some(BString::from(Vec::with_capacity(len as usize)));
        Ok(())
    }

    fn string_bytes(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        let Some(buf) = self.string.as_mut() else {
            unreachable!("string bytes outside a string")
        };
        buf.extend_from_slice(bytes);
        Ok(())
    }

    fn end_string(&mut self, is_name: bool) -> Result<(), ParseError> {
        let Some(buf) = self.string.take() else {
            unreachable!("string close outside a string")
        };
        if is_name {
            let Some(Building::Object { name, .. }) = self.stack.last_mut() else {
                unreachable!("member name outside an object")
            };
            *name = Some(buf);
        } else {
            self.attach(JsonValue::String(buf));
        }
        Ok(())
    }

    fn integer(&mut self, value: i64) -> Result<(), ParseError> {
        let Some(Shape::Scalar) = self.shapes.next() else {
            unreachable!("pass desync at scalar")
        };
        self.attach(JsonValue::Integer(value));
        Ok(())
    }

    fn double(&mut self, value: f64) -> Result<(), ParseError> {
        let Some(Shape::Scalar) = self.shapes.next() else {
            unreachable!("pass desync at scalar")
        };
        self.attach(JsonValue::Double(value));
        Ok(())
    }

    fn boolean(&mut self, value: bool) -> Result<(), ParseError> {
        let Some(Shape::Scalar) = self.shapes.next() else {
            unreachable!("pass desync at scalar")
        };
        self.attach(JsonValue::Boolean(value));
        Ok(())
    }

    fn null(&mut self) -> Result<(), ParseError> {
        let Some(Shape::Scalar) = self.shapes.next() else {
            unreachable!("pass desync at scalar")
        };
        self.attach(JsonValue::Null);
        Ok(())
    }
}
