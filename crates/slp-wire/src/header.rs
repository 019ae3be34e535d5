use bytes::BufMut;

use crate::error::WireError;
use crate::field::{LengthPrefixed, check_width, read_u16_be, read_uint_be, write_uint_be};
use crate::function::FunctionId;

/// SLP protocol version carried by every message the harness builds.
pub const SLP_VERSION: u8 = 2;

/// Fixed part of the header, up to and including the language tag length.
pub const HEADER_FIXED_SIZE: usize = 14;

/// Bytes reserved for the overall-length field on the wire.
pub const LENGTH_REGION_SIZE: usize = 3;

/// Byte offsets of the fixed header fields.
pub mod offset {
    pub const VERSION: usize = 0;
    pub const FUNCTION: usize = 1;
    pub const LENGTH: usize = 2;
    pub const FLAGS: usize = 5;
    pub const EXT: usize = 7;
    pub const XID: usize = 10;
    pub const LANG_TAG_LEN: usize = 12;
    pub const LANG_TAG: usize = 14;
}

const SIZE_EXT: usize = 3;

/// How many low-order bytes of the 3-byte length region carry the
/// declared overall length.
///
/// The remaining high-order bytes are written as zero filler. With
/// [`LengthWidth::One`] the layout is `00 00 LL`, i.e. two ignored bytes
/// followed by a single length byte. [`LengthWidth::Three`] is the full
/// RFC 2608 24-bit length. Any value that fits in one byte encodes to the
/// same three bytes under every width; the width decides which values are
/// accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LengthWidth {
    #[default]
    One,
    Two,
    Three,
}

impl LengthWidth {
    /// Width in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Header flags bitfield (16 bits, network order).
///
/// Bit layout of the first flags byte:
///   bit 7 = OVERFLOW (message did not fit in a datagram)
///   bit 6 = FRESH (new registration)
///   bit 5 = REQUEST MCAST (request was multicast)
///   remaining 13 bits = reserved (MUST be 0)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderFlags(u16);

impl HeaderFlags {
    pub const NONE: Self = Self(0);
    pub const OVERFLOW: Self = Self(0x8000);
    pub const FRESH: Self = Self(0x4000);
    pub const REQUEST_MCAST: Self = Self(0x2000);

    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn is_overflow(self) -> bool {
        self.0 & Self::OVERFLOW.0 != 0
    }

    pub fn is_fresh(self) -> bool {
        self.0 & Self::FRESH.0 != 0
    }

    pub fn is_request_mcast(self) -> bool {
        self.0 & Self::REQUEST_MCAST.0 != 0
    }
}

/// SLP message header.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────────────┐
/// │ Offset │ Size    │ Description                              │
/// ├────────┼─────────┼──────────────────────────────────────────┤
/// │ 0x00   │ 1 byte  │ Version                                  │
/// │ 0x01   │ 1 byte  │ Function-ID                              │
/// │ 0x02   │ 3 bytes │ Length (zero filler + `length_width`)    │
/// │ 0x05   │ 2 bytes │ Flags                                    │
/// │ 0x07   │ 3 bytes │ Next extension offset                    │
/// │ 0x0A   │ 2 bytes │ XID                                      │
/// │ 0x0C   │ 2 bytes │ Language tag length                      │
/// │ 0x0E   │ N bytes │ Language tag                             │
/// └────────┴─────────┴──────────────────────────────────────────┘
/// ```
///
/// `length` and the language tag's declared length are written exactly as
/// given. Neither is derived from the bytes that follow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlpHeader {
    pub version: u8,
    pub function: FunctionId,
    pub length: u32,
    pub length_width: LengthWidth,
    pub flags: HeaderFlags,
    pub ext_offset: u32,
    pub xid: u16,
    pub lang_tag: LengthPrefixed,
}

impl SlpHeader {
    /// Create a version 2 header for `function` with every other field zero
    /// and an empty language tag.
    pub fn new(function: FunctionId) -> Self {
        Self {
            version: SLP_VERSION,
            function,
            length: 0,
            length_width: LengthWidth::default(),
            flags: HeaderFlags::NONE,
            ext_offset: 0,
            xid: 0,
            lang_tag: LengthPrefixed::empty(),
        }
    }

    /// Number of bytes [`write_to`](Self::write_to) appends.
    pub fn encoded_len(&self) -> usize {
        HEADER_FIXED_SIZE - 2 + self.lang_tag.encoded_len()
    }

    /// Check that every multi-byte field fits its wire width.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::FieldOverflow`] for the first field that does
    /// not fit.
    pub fn validate(&self) -> Result<(), WireError> {
        check_width("length", self.length, self.length_width.bytes())?;
        check_width("next extension offset", self.ext_offset, SIZE_EXT)
    }

    /// Append the header, language tag included, to `buf`.
    ///
    /// All widths are checked before the first byte is written, so a
    /// failed call leaves `buf` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::FieldOverflow`] if `length` does not fit in
    /// `length_width` bytes or `ext_offset` does not fit in 3 bytes.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) -> Result<(), WireError> {
        self.validate()?;

        let width = self.length_width.bytes();
        buf.put_u8(self.version);
        buf.put_u8(self.function.wire_id());
        buf.put_bytes(0x00, LENGTH_REGION_SIZE - width);
        write_uint_be(buf, "length", self.length, width)?;
        buf.put_u16(self.flags.raw());
        write_uint_be(buf, "next extension offset", self.ext_offset, SIZE_EXT)?;
        buf.put_u16(self.xid);
        self.lang_tag.write_to(buf);

        Ok(())
    }

    /// Parse a header from the start of `buf`.
    ///
    /// The length region is read as a full 24-bit value and reported with
    /// [`LengthWidth::Three`], so re-encoding the result reproduces the
    /// input bytes.
    ///
    /// # Returns
    ///
    /// `(header, bytes_consumed)` on success.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if `buf` is shorter than 14 bytes.
    /// - [`WireError::DeclaredLengthExceedsInput`] if the language tag
    ///   length runs past the end of `buf`.
    pub fn read_from(buf: &[u8]) -> Result<(Self, usize), WireError> {
        if buf.len() < HEADER_FIXED_SIZE {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        let length = read_uint_be(buf, offset::LENGTH, LENGTH_REGION_SIZE)?;
        let flags = HeaderFlags::from_raw(read_u16_be(buf, offset::FLAGS)?);
        let ext_offset = read_uint_be(buf, offset::EXT, SIZE_EXT)?;
        let xid = read_u16_be(buf, offset::XID)?;
        let (lang_tag, tag_size) =
            LengthPrefixed::read_from("language tag", buf, offset::LANG_TAG_LEN)?;

        let header = Self {
            version: buf[offset::VERSION],
            function: FunctionId::from_wire_id(buf[offset::FUNCTION]),
            length,
            length_width: LengthWidth::Three,
            flags,
            ext_offset,
            xid,
            lang_tag,
        };
        Ok((header, offset::LANG_TAG_LEN + tag_size))
    }
}

/// Read only the declared language tag length, ignoring what follows it.
///
/// # Errors
///
/// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than the fixed
/// header.
pub fn declared_lang_tag_len(buf: &[u8]) -> Result<u16, WireError> {
    if buf.len() < HEADER_FIXED_SIZE {
        return Err(WireError::UnexpectedEof { offset: buf.len() });
    }
    read_u16_be(buf, offset::LANG_TAG_LEN)
}

/// Read only the 3-byte overall length region.
///
/// # Errors
///
/// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than the fixed
/// header.
pub fn declared_length(buf: &[u8]) -> Result<u32, WireError> {
    if buf.len() < HEADER_FIXED_SIZE {
        return Err(WireError::UnexpectedEof { offset: buf.len() });
    }
    read_uint_be(buf, offset::LENGTH, LENGTH_REGION_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(header: &SlpHeader) -> Vec<u8> {
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn default_header_layout() {
        let header = SlpHeader::new(FunctionId::SrvTypeRqst);
        assert_eq!(
            encode(&header),
            [0x02, 0x09, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(header.encoded_len(), HEADER_FIXED_SIZE);
    }

    #[test]
    fn one_byte_length_sits_after_two_zero_bytes() {
        let mut header = SlpHeader::new(FunctionId::SrvTypeRqst);
        header.length = 0x1D;
        header.xid = 0x74E2;
        header.lang_tag = LengthPrefixed::new(2, &b"en"[..]);
        let buf = encode(&header);
        assert_eq!(&buf[2..5], &[0x00, 0x00, 0x1D]);
        assert_eq!(&buf[offset::XID..offset::XID + 2], &[0x74, 0xE2]);
        assert_eq!(&buf[offset::LANG_TAG_LEN..], &[0x00, 0x02, b'e', b'n']);
    }

    #[test]
    fn one_byte_length_rejects_wider_value() {
        let mut header = SlpHeader::new(FunctionId::SrvRqst);
        header.length = 0x100;
        let mut buf = Vec::new();
        let result = header.write_to(&mut buf);
        assert!(matches!(
            result,
            Err(WireError::FieldOverflow {
                field: "length",
                value: 0x100,
                width: 1
            })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn three_byte_length_uses_whole_region() {
        let mut header = SlpHeader::new(FunctionId::SrvRqst);
        header.length = 0x01_FE_0E;
        header.length_width = LengthWidth::Three;
        assert_eq!(&encode(&header)[2..5], &[0x01, 0xFE, 0x0E]);
    }

    #[test]
    fn two_byte_length_uses_low_two_bytes() {
        let mut header = SlpHeader::new(FunctionId::SrvRqst);
        header.length = 0x01FF;
        header.length_width = LengthWidth::Two;
        assert_eq!(&encode(&header)[2..5], &[0x00, 0x01, 0xFF]);

        header.length_width = LengthWidth::One;
        assert!(matches!(
            header.validate(),
            Err(WireError::FieldOverflow {
                field: "length",
                value: 0x01FF,
                width: 1
            })
        ));

        header.length = 0x01_0000;
        header.length_width = LengthWidth::Two;
        assert!(matches!(
            header.validate(),
            Err(WireError::FieldOverflow { width: 2, .. })
        ));
    }

    #[test]
    fn widths_agree_on_small_values() {
        let mut narrow = SlpHeader::new(FunctionId::SrvRqst);
        narrow.length = 0x35;
        let mut wide = narrow.clone();
        wide.length_width = LengthWidth::Three;
        assert_eq!(encode(&narrow), encode(&wide));
    }

    #[test]
    fn ext_offset_over_24_bits_rejected() {
        let mut header = SlpHeader::new(FunctionId::SrvRqst);
        header.ext_offset = 0x0100_0000;
        assert!(matches!(
            header.validate(),
            Err(WireError::FieldOverflow { width: 3, .. })
        ));
    }

    #[test]
    fn flags_bits() {
        let flags = HeaderFlags::from_raw(HeaderFlags::OVERFLOW.raw() | HeaderFlags::FRESH.raw());
        assert!(flags.is_overflow());
        assert!(flags.is_fresh());
        assert!(!flags.is_request_mcast());

        let mut header = SlpHeader::new(FunctionId::SrvRqst);
        header.flags = HeaderFlags::REQUEST_MCAST;
        assert_eq!(&encode(&header)[offset::FLAGS..offset::FLAGS + 2], &[0x20, 0x00]);
    }

    #[test]
    fn read_back_written_header() {
        let mut header = SlpHeader::new(FunctionId::SrvTypeRqst);
        header.length = 0x1D;
        header.length_width = LengthWidth::Three;
        header.xid = 0x74E2;
        header.lang_tag = LengthPrefixed::new(2, &b"en"[..]);
        let buf = encode(&header);
        let (parsed, consumed) = SlpHeader::read_from(&buf).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn reject_buffer_too_short() {
        let result = SlpHeader::read_from(&[0x02, 0x09, 0x00]);
        assert!(matches!(result, Err(WireError::UnexpectedEof { offset: 3 })));
    }

    #[test]
    fn reject_overlong_lang_tag() {
        let buf = [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0];
        let result = SlpHeader::read_from(&buf);
        assert!(matches!(
            result,
            Err(WireError::DeclaredLengthExceedsInput {
                declared: 5,
                available: 4,
                ..
            })
        ));
    }

    #[test]
    fn declared_fields_read_without_trusting_them() {
        let mut header = SlpHeader::new(FunctionId::SrvTypeRqst);
        header.length = 0xFF;
        header.lang_tag = LengthPrefixed::new(0xFFFF, vec![b'A'; 200]);
        let buf = encode(&header);
        assert_eq!(declared_lang_tag_len(&buf).unwrap(), 0xFFFF);
        assert_eq!(declared_length(&buf).unwrap(), 0xFF);
        assert!(SlpHeader::read_from(&buf).is_err());
    }
}
