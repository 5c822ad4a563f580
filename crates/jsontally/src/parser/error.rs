use thiserror::Error;

/// Failure returned by [`parse`](crate::parse) and
/// [`parse_with`](crate::parse_with).
///
/// Positioned kinds render as `line:column: description`; the resource
/// kinds carry no position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The document violates the grammar.
    #[error("{line}:{column}: {kind}")]
    Syntax {
        /// 1-based line of the offending byte.
        line: u32,
        /// 1-based byte column from the start of the line.
        column: u32,
        /// What the scanner tripped over.
        kind: SyntaxError,
    },
    /// A number literal is outside the representable range.
    #[error("{line}:{column}: number out of range")]
    Overflow {
        /// 1-based line of the literal.
        line: u32,
        /// 1-based byte column of the literal's first byte.
        column: u32,
    },
    /// The configured memory budget would be crossed.
    #[error("memory allocation failure")]
    OutOfMemory,
    /// A container or string outgrew the supported size.
    #[error("too many elements in value")]
    TooLong,
}

/// Grammar-level failure detail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A byte that cannot begin a value.
    #[error("unexpected `{0}` when seeking value")]
    UnexpectedCharacter(char),
    /// A byte with no meaning between object members.
    #[error("unexpected `{0}` in object")]
    UnexpectedInObject(char),
    /// A separator was required before the next element or member.
    #[error("expected `,` before `{0}`")]
    ExpectedComma(char),
    /// A member name was not followed by `:`.
    #[error("expected `:` before `{0}`")]
    ExpectedColon(char),
    /// `]` closed something that was not an array, or followed a comma in
    /// strict mode.
    #[error("unexpected `]`")]
    UnexpectedArrayClose,
    /// A literal other than `true`, `false`, or `null`.
    #[error("unknown literal")]
    UnknownLiteral,
    /// A number lexeme the converter rejected.
    #[error("malformed number")]
    MalformedNumber,
    /// `\u` was not followed by four hex digits.
    #[error("invalid `\\u` escape")]
    InvalidUnicodeEscape,
    /// Input ended inside a string.
    #[error("unexpected end of input in string")]
    UnterminatedString,
    /// Input ended before the document did.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A byte other than whitespace after the root value.
    #[error("trailing garbage `{0}`")]
    TrailingGarbage(char),
}
