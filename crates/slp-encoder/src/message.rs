use bytes::{Bytes, BytesMut};
use slp_wire::{Body, FunctionId, HeaderFlags, LengthPrefixed, LengthWidth, SlpHeader};

use crate::error::EncodeError;

/// Largest UDP payload an IPv4 datagram can carry
/// (65535 - 20 byte IP header - 8 byte UDP header).
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// A complete SLP message description: header fields plus body.
///
/// `SlpMessage` is the harness-facing encoder. Every field is set
/// explicitly through chainable `with_*` methods and written to the wire
/// exactly as given. In particular:
///
/// - the overall length is never computed from the encoded size;
/// - the language tag length and every body length prefix are taken from
///   the [`LengthPrefixed`] values as supplied, so a declared length may
///   exceed, equal or undercut the content that follows it.
///
/// # Usage
///
/// ```rust
/// use slp_encoder::SlpMessage;
/// use slp_wire::{FunctionId, LengthPrefixed};
///
/// // Tag length claims 32 bytes, only 10 follow.
/// let datagram = SlpMessage::new(FunctionId::SrvTypeRqst)
///     .with_length(0xFF)
///     .with_lang_tag(LengthPrefixed::new(0x0020, vec![b'A'; 10]))
///     .encode()
///     .unwrap();
/// assert_eq!(&datagram[12..14], &[0x00, 0x20]);
/// assert_eq!(datagram.len(), 14 + 10);
/// ```
///
/// # Output layout
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────┐
/// │ [14 bytes]   │ Fixed header (version .. language tag length) │
/// │ [N bytes]    │ Language tag content                          │
/// │ [M bytes]    │ Body (function-specific length-prefixed data) │
/// └──────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlpMessage {
    pub header: SlpHeader,
    pub body: Body,
}

impl SlpMessage {
    /// Start a version 2 message for `function` with a zeroed header, an
    /// empty language tag and no body.
    #[must_use]
    pub fn new(function: FunctionId) -> Self {
        Self {
            header: SlpHeader::new(function),
            body: Body::Empty,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: u8) -> Self {
        self.header.version = version;
        self
    }

    /// Set the declared overall length. Checked against the length width
    /// only when the message is encoded.
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.header.length = length;
        self
    }

    #[must_use]
    pub fn with_length_width(mut self, width: LengthWidth) -> Self {
        self.header.length_width = width;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: HeaderFlags) -> Self {
        self.header.flags = flags;
        self
    }

    #[must_use]
    pub fn with_ext_offset(mut self, ext_offset: u32) -> Self {
        self.header.ext_offset = ext_offset;
        self
    }

    #[must_use]
    pub fn with_xid(mut self, xid: u16) -> Self {
        self.header.xid = xid;
        self
    }

    #[must_use]
    pub fn with_lang_tag(mut self, lang_tag: LengthPrefixed) -> Self {
        self.header.lang_tag = lang_tag;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Exact number of bytes [`encode`](Self::encode) produces.
    pub fn encoded_len(&self) -> usize {
        self.header.encoded_len() + self.body.encoded_len()
    }

    /// Serialize the message into a single datagram.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::DatagramTooLarge`] if the message exceeds
    ///   [`MAX_DATAGRAM_SIZE`].
    /// - [`EncodeError::Wire`] wrapping `WireError::FieldOverflow` if the
    ///   overall length does not fit its configured width or the extension
    ///   offset does not fit in 3 bytes.
    pub fn encode(&self) -> Result<Bytes, EncodeError> {
        let size = self.encoded_len();
        if size > MAX_DATAGRAM_SIZE {
            return Err(EncodeError::DatagramTooLarge {
                size,
                limit: MAX_DATAGRAM_SIZE,
            });
        }
        let mut buf = BytesMut::with_capacity(size);
        self.header.write_to(&mut buf)?;
        self.body.write_to(&mut buf);
        Ok(buf.freeze())
    }
}
