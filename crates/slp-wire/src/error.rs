/// Errors raised while laying out or reading SLP wire fields.
///
/// Encoding never "fixes" a field: a value that does not fit its declared
/// width is reported, not truncated. Reading reports where the input ran
/// short so a hex dump can be lined up against the failure.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a fixed-width field could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A value is wider than the field it is written into.
    #[error("{field} value {value:#X} does not fit in {width} byte(s)")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        width: usize,
    },

    /// Content is too long for a 16-bit length prefix.
    #[error("{field} content is {len} bytes, a 16-bit length prefix holds at most 65535")]
    FieldTooLong { field: &'static str, len: usize },

    /// A declared length points past the end of the input.
    #[error(
        "{field} declares {declared} bytes at offset {offset} but only {available} remain"
    )]
    DeclaredLengthExceedsInput {
        field: &'static str,
        offset: usize,
        declared: usize,
        available: usize,
    },
}
