use bytes::{BufMut, Bytes};

use crate::error::WireError;

/// Size of the big-endian length prefix in front of every SLP string field.
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// A `2-byte BE length | content` field whose two halves are independent.
///
/// SLP carries every variable-length string (language tag, PR-list, scope
/// list, service type, predicate, SPI) as a 16-bit length followed by that
/// many bytes. `LengthPrefixed` stores the declared length and the actual
/// content separately, so the two can be made to disagree on purpose:
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────┐
/// │ declared (u16, BE)   │ content [content.len() bytes]│
/// └──────────────────────┴──────────────────────────────┘
///   written verbatim        written verbatim
/// ```
///
/// Nothing in this type recomputes `declared` from `content`. Use
/// [`exact`](Self::exact) when a matching length is wanted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LengthPrefixed {
    declared: u16,
    content: Bytes,
}

impl LengthPrefixed {
    /// Build a field with an explicit declared length and arbitrary content.
    pub fn new(declared: u16, content: impl Into<Bytes>) -> Self {
        Self {
            declared,
            content: content.into(),
        }
    }

    /// Build a field whose declared length matches its content.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::FieldTooLong`] if `content` is longer than
    /// `u16::MAX` bytes.
    pub fn exact(field: &'static str, content: impl Into<Bytes>) -> Result<Self, WireError> {
        let content = content.into();
        let declared = u16::try_from(content.len()).map_err(|_| WireError::FieldTooLong {
            field,
            len: content.len(),
        })?;
        Ok(Self { declared, content })
    }

    /// A zero-length field with no content (`00 00`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The length value written into the prefix.
    pub fn declared(&self) -> u16 {
        self.declared
    }

    /// The bytes appended after the prefix.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// `true` when the declared length equals the content length.
    pub fn is_consistent(&self) -> bool {
        usize::from(self.declared) == self.content.len()
    }

    /// Number of bytes this field occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.content.len()
    }

    /// Append the prefix and content to `buf`.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u16(self.declared);
        buf.put_slice(&self.content);
    }

    /// Read a length-prefixed field starting at `offset`.
    ///
    /// The declared length is trusted only after it has been checked
    /// against the bytes that remain.
    ///
    /// # Returns
    ///
    /// `(field, bytes_consumed)` on success.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if the prefix itself is truncated.
    /// - [`WireError::DeclaredLengthExceedsInput`] if the declared length
    ///   runs past the end of `buf`.
    pub fn read_from(
        field: &'static str,
        buf: &[u8],
        offset: usize,
    ) -> Result<(Self, usize), WireError> {
        let declared = read_u16_be(buf, offset)?;
        let start = offset + LENGTH_PREFIX_SIZE;
        let available = buf.len() - start;
        let len = usize::from(declared);
        if len > available {
            return Err(WireError::DeclaredLengthExceedsInput {
                field,
                offset,
                declared: len,
                available,
            });
        }
        let content = Bytes::copy_from_slice(&buf[start..start + len]);
        Ok((Self { declared, content }, LENGTH_PREFIX_SIZE + len))
    }
}

/// Read a big-endian `u16` at `offset`.
///
/// # Errors
///
/// Returns [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
pub fn read_u16_be(buf: &[u8], offset: usize) -> Result<u16, WireError> {
    match buf.get(offset..offset + 2) {
        Some(b) => Ok(u16::from_be_bytes([b[0], b[1]])),
        None => Err(WireError::UnexpectedEof { offset: buf.len() }),
    }
}

/// Read a big-endian unsigned integer of `width` bytes (1–4) at `offset`.
///
/// # Errors
///
/// Returns [`WireError::UnexpectedEof`] if fewer than `width` bytes remain.
pub fn read_uint_be(buf: &[u8], offset: usize, width: usize) -> Result<u32, WireError> {
    debug_assert!((1..=4).contains(&width));
    let bytes = buf
        .get(offset..offset + width)
        .ok_or(WireError::UnexpectedEof { offset: buf.len() })?;
    Ok(bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b)))
}

/// Append `value` as a big-endian integer of exactly `width` bytes.
///
/// # Errors
///
/// Returns [`WireError::FieldOverflow`] if `value` needs more than `width`
/// bytes. The buffer is left untouched in that case.
pub fn write_uint_be<B: BufMut>(
    buf: &mut B,
    field: &'static str,
    value: u32,
    width: usize,
) -> Result<(), WireError> {
    check_width(field, value, width)?;
    buf.put_uint(u64::from(value), width);
    Ok(())
}

/// Check that `value` fits in `width` bytes without writing anything.
///
/// # Errors
///
/// Returns [`WireError::FieldOverflow`] if it does not.
pub fn check_width(field: &'static str, value: u32, width: usize) -> Result<(), WireError> {
    let fits = width >= 4 || u64::from(value) < (1u64 << (8 * width));
    if fits {
        Ok(())
    } else {
        Err(WireError::FieldOverflow {
            field,
            value: u64::from(value),
            width,
        })
    }
}
