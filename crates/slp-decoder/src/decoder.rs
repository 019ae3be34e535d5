use bytes::Bytes;
use slp_wire::body::NAMING_AUTHORITY_ALL;
use slp_wire::field::{LENGTH_PREFIX_SIZE, read_u16_be};
use slp_wire::header::{HEADER_FIXED_SIZE, SLP_VERSION};
use slp_wire::{Body, FunctionId, LengthPrefixed, SlpHeader, SrvRqst, SrvTypeRqst};

use crate::error::DecodeError;

/// Smallest datagram accepted as a service type request.
pub const MIN_SRV_TYPE_RQST_SIZE: usize = 22;

/// Smallest datagram accepted as a service request: fixed header plus
/// five empty length prefixes.
pub const MIN_SRV_RQST_SIZE: usize = HEADER_FIXED_SIZE + 5 * LENGTH_PREFIX_SIZE;

/// A request accepted by the reference parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Header as read from the wire. The length region is reported as a
    /// full 24-bit value.
    pub header: SlpHeader,

    /// `Body::SrvRqst` or `Body::SrvTypeRqst`.
    pub body: Body,
}

/// Strict reference parser for SLPv2 requests.
///
/// This is the parser a careful responder runs before trusting any length
/// field: each declared length is checked against the bytes that remain
/// before anything is copied. The harness uses it to confirm that control
/// cases are well formed and to classify what a conforming responder should
/// do with each adversarial case. It never sees replies.
///
/// Decoding proceeds in three steps:
///
///   1. **Version**: the first byte must be 2.
///   2. **Header**: at least 14 bytes; the language tag must fit; the
///      function id must be one of the eleven RFC 2608 functions.
///   3. **Body**: dispatch on the function id. `SrvTypeRqst` and
///      `SrvRqst` are parsed field by field; every other function is
///      reported as unsupported.
///
/// The overall length field is read but not compared to the datagram
/// size.
pub struct SlpDecoder;

impl SlpDecoder {
    /// Decode a complete request datagram.
    ///
    /// # Errors
    ///
    /// See [`DecodeError`] for the rejection classes and the SLP error code
    /// each maps to.
    pub fn decode(buf: &[u8]) -> Result<DecodedMessage, DecodeError> {
        if let Some(&version) = buf.first() {
            if version != SLP_VERSION {
                return Err(DecodeError::UnsupportedVersion { version });
            }
        }

        let (header, header_size) = Self::decode_header(buf)?;
        let body = match header.function {
            FunctionId::SrvTypeRqst => Self::decode_srv_type_rqst(buf, header_size)?,
            FunctionId::SrvRqst => Self::decode_srv_rqst(buf, header_size)?,
            function => return Err(DecodeError::UnsupportedFunction { function }),
        };

        Ok(DecodedMessage { header, body })
    }

    /// Validate and parse the header, language tag included.
    ///
    /// # Returns
    ///
    /// `(header, bytes_consumed)` on success.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidHeader`] if the buffer is too short or the
    ///   language tag length exceeds the remaining bytes.
    /// - [`DecodeError::InvalidFunction`] if the function id is not in
    ///   `1..=11`.
    pub fn decode_header(buf: &[u8]) -> Result<(SlpHeader, usize), DecodeError> {
        let (header, consumed) = SlpHeader::read_from(buf).map_err(DecodeError::InvalidHeader)?;

        if let FunctionId::Unknown(id) = header.function {
            return Err(DecodeError::InvalidFunction { id });
        }

        Ok((header, consumed))
    }

    fn decode_srv_type_rqst(buf: &[u8], mut pos: usize) -> Result<Body, DecodeError> {
        check_min_size(buf, FunctionId::SrvTypeRqst, MIN_SRV_TYPE_RQST_SIZE)?;

        let pr_list = read_field("PRList", buf, &mut pos)?;

        // 0xFFFF selects every naming authority and carries no content.
        let naming_authority = if read_u16_be(buf, pos).map_err(DecodeError::InvalidField)?
            == NAMING_AUTHORITY_ALL
        {
            pos += LENGTH_PREFIX_SIZE;
            LengthPrefixed::new(NAMING_AUTHORITY_ALL, Bytes::new())
        } else {
            read_field("naming authority", buf, &mut pos)?
        };

        let scope_list = read_field("scope list", buf, &mut pos)?;

        Ok(Body::SrvTypeRqst(SrvTypeRqst {
            pr_list,
            naming_authority,
            scope_list,
        }))
    }

    fn decode_srv_rqst(buf: &[u8], mut pos: usize) -> Result<Body, DecodeError> {
        check_min_size(buf, FunctionId::SrvRqst, MIN_SRV_RQST_SIZE)?;

        Ok(Body::SrvRqst(SrvRqst {
            pr_list: read_field("PRList", buf, &mut pos)?,
            service_type: read_field("service type", buf, &mut pos)?,
            scope_list: read_field("scope list", buf, &mut pos)?,
            predicate: read_field("predicate", buf, &mut pos)?,
            spi: read_field("SLP SPI", buf, &mut pos)?,
        }))
    }
}

fn check_min_size(buf: &[u8], function: FunctionId, min: usize) -> Result<(), DecodeError> {
    if buf.len() < min {
        return Err(DecodeError::BodyTooShort {
            function,
            len: buf.len(),
            min,
        });
    }
    Ok(())
}

fn read_field(
    field: &'static str,
    buf: &[u8],
    pos: &mut usize,
) -> Result<LengthPrefixed, DecodeError> {
    let (value, consumed) =
        LengthPrefixed::read_from(field, buf, *pos).map_err(DecodeError::InvalidField)?;
    *pos += consumed;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use slp_wire::WireError;

    use super::*;
    use crate::error::{MSG_NOT_SUPPORTED, PARSE_ERROR, VER_NOT_SUPPORTED};

    // What `slptool -u <server> findsrvtypes` sends.
    const FINDSRVTYPES: [u8; 29] = [
        0x02, 0x09, 0x00, 0x00, 0x1D, 0x00, 0x00, 0x00, 0x00, 0x00, 0x74, 0xE2, 0x00, 0x02, b'e',
        b'n', 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x07, b'D', b'E', b'F', b'A', b'U', b'L', b'T',
    ];

    #[test]
    fn minimal_header_accepted() {
        let buf = [0x02, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let (header, consumed) = SlpDecoder::decode_header(&buf).unwrap();
        assert_eq!(header.function, FunctionId::SrvRqst);
        assert_eq!(consumed, 14);
    }

    #[test]
    fn header_one_byte_short() {
        let buf = [0x02, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let err = SlpDecoder::decode_header(&buf).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidHeader(WireError::UnexpectedEof { .. })));
        assert_eq!(err.error_code(), PARSE_ERROR);
    }

    #[test]
    fn lang_tag_length_that_fits() {
        let buf = [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0];
        assert!(SlpDecoder::decode_header(&buf).is_ok());
    }

    #[test]
    fn lang_tag_length_one_past_end() {
        let buf = [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0];
        let err = SlpDecoder::decode_header(&buf).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidHeader(WireError::DeclaredLengthExceedsInput { declared: 5, .. })
        ));
    }

    #[test]
    fn function_out_of_range() {
        let mut buf = [0u8; 14];
        buf[0] = 2;
        buf[1] = 0x0C;
        let err = SlpDecoder::decode_header(&buf).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidFunction { id: 0x0C }));

        buf[1] = 0x00;
        assert!(SlpDecoder::decode_header(&buf).is_err());
    }

    #[test]
    fn wrong_version_rejected_first() {
        let buf = [0x03, 0x99, 0x99];
        let err = SlpDecoder::decode(&buf).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedVersion { version: 3 }));
        assert_eq!(err.error_code(), VER_NOT_SUPPORTED);
    }

    #[test]
    fn reply_functions_not_supported() {
        let mut buf = [0u8; 22];
        buf[0] = 2;
        buf[1] = 0x02;
        let err = SlpDecoder::decode(&buf).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedFunction {
                function: FunctionId::SrvRply
            }
        ));
        assert_eq!(err.error_code(), MSG_NOT_SUPPORTED);
    }

    #[test]
    fn srv_type_rqst_all_zero_lengths() {
        let mut buf = [0u8; 22];
        buf[0] = 2;
        buf[1] = 0x09;
        let decoded = SlpDecoder::decode(&buf).unwrap();
        assert_eq!(decoded.body, Body::SrvTypeRqst(SrvTypeRqst::default()));
    }

    #[test]
    fn srv_type_rqst_with_data() {
        let buf: Vec<u8> = [
            &[0x02, 0x09, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x00, 0x04][..],
            b"LANG",
            &[0x00, 0x04],
            b"PRLT",
            &[0x00, 0x08],
            b"NAMEAUTH",
            &[0x00, 0x05],
            b"SCOPE",
        ]
        .concat();
        let decoded = SlpDecoder::decode(&buf).unwrap();
        assert_eq!(decoded.header.lang_tag.content(), b"LANG");
        let Body::SrvTypeRqst(body) = decoded.body else {
            panic!("expected SrvTypeRqst body");
        };
        assert_eq!(body.pr_list.content(), b"PRLT");
        assert_eq!(body.naming_authority.content(), b"NAMEAUTH");
        assert_eq!(body.scope_list.content(), b"SCOPE");
    }

    #[test]
    fn slptool_findsrvtypes() {
        let decoded = SlpDecoder::decode(&FINDSRVTYPES).unwrap();
        assert_eq!(decoded.header.lang_tag.declared(), 2);
        assert_eq!(decoded.header.lang_tag.content(), b"en");
        assert_eq!(decoded.header.xid, 0x74E2);
        assert_eq!(decoded.header.length, 0x1D);
        let Body::SrvTypeRqst(body) = decoded.body else {
            panic!("expected SrvTypeRqst body");
        };
        assert_eq!(body.naming_authority.declared(), NAMING_AUTHORITY_ALL);
        assert!(body.naming_authority.content().is_empty());
        assert_eq!(body.scope_list.content(), b"DEFAULT");
    }

    #[test]
    fn each_overlong_srv_type_field_rejected() {
        let good: Vec<u8> = [
            &[0x00, 0x09, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x00, 0x04][..],
            b"LANG",
            &[0x00, 0x04],
            b"PRLT",
            &[0x00, 0x08],
            b"NAMEAUTH",
            &[0x00, 0x05],
            b"SCOPE",
        ]
        .concat();
        for (index, value) in [(19, 0x7F), (25, 0x7F), (35, 0x0A)] {
            let mut buf = good.clone();
            buf[0] = 2;
            buf[index] = value;
            let err = SlpDecoder::decode(&buf).unwrap_err();
            assert!(
                matches!(err, DecodeError::InvalidField(_)),
                "byte {index}: {err}"
            );
        }
    }

    #[test]
    fn srv_rqst_too_short() {
        let mut buf = [0u8; 23];
        buf[0] = 2;
        buf[1] = 0x01;
        let err = SlpDecoder::decode(&buf).unwrap_err();
        assert!(matches!(err, DecodeError::BodyTooShort { min: 24, .. }));
    }

    #[test]
    fn srv_rqst_all_fields() {
        let buf: Vec<u8> = [
            &[0x02, 0x01, 0, 0, 0x35, 0, 0, 0, 0, 0, 0xE5, 0xC2, 0x00, 0x02][..],
            b"en",
            &[0x00, 0x00, 0x00, 0x14],
            b"service:obmc_console",
            &[0x00, 0x07],
            b"DEFAULT",
            &[0x00, 0x00, 0x00, 0x00],
        ]
        .concat();
        let decoded = SlpDecoder::decode(&buf).unwrap();
        let Body::SrvRqst(body) = decoded.body else {
            panic!("expected SrvRqst body");
        };
        assert_eq!(body.service_type.declared(), 20);
        assert_eq!(body.service_type.content(), b"service:obmc_console");
        assert_eq!(body.scope_list.content(), b"DEFAULT");
        assert_eq!(body.predicate, LengthPrefixed::empty());
        assert_eq!(body.spi, LengthPrefixed::empty());
    }

    #[test]
    fn srv_rqst_missing_spi_prefix() {
        let buf: Vec<u8> = [
            &[0x02, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x00, 0x00][..],
            &[0x00, 0x00, 0x00, 0x04],
            b"svc:",
            &[0x00, 0x00, 0x00, 0x00],
        ]
        .concat();
        let err = SlpDecoder::decode(&buf).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidField(WireError::UnexpectedEof { .. })
        ));
    }
}
