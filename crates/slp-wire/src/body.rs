use bytes::{BufMut, Bytes};

use crate::field::LengthPrefixed;

/// Naming authority length meaning "every naming authority" (RFC 2608 §11.1).
/// No content follows it.
pub const NAMING_AUTHORITY_ALL: u16 = 0xFFFF;

/// Service type request body (function 9).
///
/// ```text
/// ┌─────────────────────────┬──────────────────────────┐
/// │ length of PRList (u16)  │ <PRList> string          │
/// │ length of naming auth   │ <naming authority>       │
/// │ length of scope-list    │ <scope-list> string      │
/// └─────────────────────────┴──────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SrvTypeRqst {
    pub pr_list: LengthPrefixed,
    pub naming_authority: LengthPrefixed,
    pub scope_list: LengthPrefixed,
}

/// Service request body (function 1).
///
/// ```text
/// ┌─────────────────────────┬──────────────────────────┐
/// │ length of PRList (u16)  │ <PRList> string          │
/// │ length of service-type  │ <service-type> string    │
/// │ length of scope-list    │ <scope-list> string      │
/// │ length of predicate     │ <predicate> string       │
/// │ length of SLP SPI       │ <SLP SPI> string         │
/// └─────────────────────────┴──────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SrvRqst {
    pub pr_list: LengthPrefixed,
    pub service_type: LengthPrefixed,
    pub scope_list: LengthPrefixed,
    pub predicate: LengthPrefixed,
    pub spi: LengthPrefixed,
}

/// Everything that follows the language tag.
///
/// The body kind is independent of the header's function id: a probe may
/// pair any body with any function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Body {
    /// Nothing after the language tag.
    #[default]
    Empty,
    /// Opaque trailer appended verbatim.
    Raw(Bytes),
    SrvTypeRqst(SrvTypeRqst),
    SrvRqst(SrvRqst),
}

impl Body {
    /// Append the body to `buf` field by field, declared lengths untouched.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        match self {
            Self::Empty => {}
            Self::Raw(bytes) => buf.put_slice(bytes),
            Self::SrvTypeRqst(body) => {
                body.pr_list.write_to(buf);
                body.naming_authority.write_to(buf);
                body.scope_list.write_to(buf);
            }
            Self::SrvRqst(body) => {
                body.pr_list.write_to(buf);
                body.service_type.write_to(buf);
                body.scope_list.write_to(buf);
                body.predicate.write_to(buf);
                body.spi.write_to(buf);
            }
        }
    }

    /// Number of bytes [`write_to`](Self::write_to) appends.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Raw(bytes) => bytes.len(),
            Self::SrvTypeRqst(body) => {
                body.pr_list.encoded_len()
                    + body.naming_authority.encoded_len()
                    + body.scope_list.encoded_len()
            }
            Self::SrvRqst(body) => {
                body.pr_list.encoded_len()
                    + body.service_type.encoded_len()
                    + body.scope_list.encoded_len()
                    + body.predicate.encoded_len()
                    + body.spi.encoded_len()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srv_type_rqst_field_order() {
        let body = Body::SrvTypeRqst(SrvTypeRqst {
            pr_list: LengthPrefixed::empty(),
            naming_authority: LengthPrefixed::new(NAMING_AUTHORITY_ALL, Bytes::new()),
            scope_list: LengthPrefixed::new(7, &b"DEFAULT"[..]),
        });
        let mut buf = Vec::new();
        body.write_to(&mut buf);
        assert_eq!(
            buf,
            [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x07, b'D', b'E', b'F', b'A', b'U', b'L', b'T']
        );
        assert_eq!(body.encoded_len(), buf.len());
    }

    #[test]
    fn srv_rqst_field_order() {
        let body = Body::SrvRqst(SrvRqst {
            service_type: LengthPrefixed::new(1, &b"s"[..]),
            scope_list: LengthPrefixed::new(2, &b"sc"[..]),
            predicate: LengthPrefixed::new(3, Bytes::new()),
            ..SrvRqst::default()
        });
        let mut buf = Vec::new();
        body.write_to(&mut buf);
        assert_eq!(
            buf,
            [0, 0, 0, 1, b's', 0, 2, b's', b'c', 0, 3, 0, 0]
        );
        assert_eq!(body.encoded_len(), 13);
    }

    #[test]
    fn raw_and_empty() {
        let mut buf = Vec::new();
        Body::Empty.write_to(&mut buf);
        assert!(buf.is_empty());
        Body::Raw(Bytes::from_static(b"\x01\x02")).write_to(&mut buf);
        assert_eq!(buf, [1, 2]);
    }
}
