use std::time::Duration;

use bytes::Bytes;
use slp_encoder::SlpMessage;
use slp_wire::body::NAMING_AUTHORITY_ALL;
use slp_wire::{Body, FunctionId, LengthPrefixed, SrvRqst, SrvTypeRqst};

use crate::error::HarnessError;

/// Magnitudes used by the language tag length probes.
///
/// ```text
/// ┌──────────────────┬────────┬──────────────────────────────────────┐
/// │ Constant         │ Value  │ Role                                 │
/// ├──────────────────┼────────┼──────────────────────────────────────┤
/// │ TAG_LEN_EXTREME  │ 0xFFFF │ largest declarable length            │
/// │ TAG_LEN_LARGE    │ 0xFDE8 │ 65000, equals PAYLOAD_LARGE          │
/// │ TAG_LEN_OVERFLOW │ 0x0020 │ 32, modestly past PAYLOAD_OVERFLOW   │
/// │ PAYLOAD_LARGE    │ 65000  │ near the UDP datagram ceiling        │
/// │ PAYLOAD_SMALL    │ 200    │ far below either large declaration   │
/// │ PAYLOAD_OVERFLOW │ 10     │ short tag for the moderate over-read │
/// └──────────────────┴────────┴──────────────────────────────────────┘
/// ```
pub mod boundary {
    pub const TAG_LEN_EXTREME: u16 = 0xFFFF;
    pub const TAG_LEN_LARGE: u16 = 0xFDE8;
    pub const TAG_LEN_OVERFLOW: u16 = 0x0020;

    pub const PAYLOAD_LARGE: usize = 65_000;
    pub const PAYLOAD_SMALL: usize = 200;
    pub const PAYLOAD_OVERFLOW: usize = 10;

    /// Overall length byte carried by every malformed case. It does not
    /// describe the datagram.
    pub const MALFORMED_LENGTH: u32 = 0xFF;

    /// Byte the oversized language tags are filled with.
    pub const FILL_BYTE: u8 = b'A';
}

/// Literal field values of the two well-formed control requests, as
/// `slptool` sends them.
pub mod baseline {
    pub const LANG_TAG: &str = "en";
    pub const LANG_TAG_LEN: u16 = 2;
    pub const SCOPE: &str = "DEFAULT";
    pub const SCOPE_LEN: u16 = 7;

    pub const FINDSRVTYPES_LENGTH: u32 = 0x1D;
    pub const FINDSRVTYPES_XID: u16 = 0x74E2;

    pub const SERVICE_TYPE: &str = "service:obmc_console";
    pub const SERVICE_TYPE_LEN: u16 = 0x0014;
    pub const FINDSRVS_LENGTH: u32 = 0x35;
    pub const FINDSRVS_XID: u16 = 0xE5C2;
}

/// Observation windows between cases.
pub mod pacing {
    use std::time::Duration;

    /// After a malformed case, long enough to notice a crash or a stall.
    pub const MALFORMED: Duration = Duration::from_secs(3);

    /// After the first control case, before the second message type.
    pub const CONTROL: Duration = Duration::from_secs(5);

    /// After the last case.
    pub const FINAL: Duration = Duration::ZERO;
}

/// One named probe: the message to send and how long to watch the target
/// afterwards.
#[derive(Clone, Debug)]
pub struct TestCase {
    pub name: String,
    pub message: SlpMessage,
    pub delay: Duration,
}

impl TestCase {
    pub fn new(name: impl Into<String>, message: SlpMessage, delay: Duration) -> Self {
        Self {
            name: name.into(),
            message,
            delay,
        }
    }
}

/// A case after encoding. The datagram is produced once and sent as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedCase {
    pub name: String,
    pub function: FunctionId,
    pub datagram: Bytes,
    pub delay: Duration,
}

/// Ordered, immutable list of encoded cases.
///
/// Every case is encoded when the catalog is built, so a case that
/// describes an impossible field fails here, before any socket exists.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cases: Vec<EncodedCase>,
}

impl Catalog {
    /// Encode `cases` in order.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Catalog`] naming the first case whose
    /// message cannot be encoded.
    pub fn build(cases: impl IntoIterator<Item = TestCase>) -> Result<Self, HarnessError> {
        let cases = cases
            .into_iter()
            .map(|case| {
                let datagram =
                    case.message
                        .encode()
                        .map_err(|source| HarnessError::Catalog {
                            case: case.name.clone(),
                            source,
                        })?;
                Ok(EncodedCase {
                    name: case.name,
                    function: case.message.header.function,
                    datagram,
                    delay: case.delay,
                })
            })
            .collect::<Result<Vec<_>, HarnessError>>()?;
        tracing::debug!(
            cases = cases.len(),
            bytes = cases.iter().map(|c| c.datagram.len()).sum::<usize>(),
            "catalog encoded"
        );
        Ok(Self { cases })
    }

    /// The built-in probe sequence, see [`standard_cases`].
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Catalog`] if a built-in case is malformed.
    pub fn standard() -> Result<Self, HarnessError> {
        Self::build(standard_cases())
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EncodedCase> {
        self.cases.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EncodedCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a EncodedCase;
    type IntoIter = std::slice::Iter<'a, EncodedCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

/// The built-in probe sequence, in send order.
///
/// ```text
/// ┌───┬────────────────────────────────────────┬──────────┬────────┬─────────┐
/// │ # │ Case                                   │ Function │ Tag len│ Tag     │
/// ├───┼────────────────────────────────────────┼──────────┼────────┼─────────┤
/// │ 1 │ Invalid Lang Tag Length, large payload │ 0x09     │ 0xFFFF │ 65000 A │
/// │ 2 │ Large Lang Tag Length, large payload   │ 0x09     │ 0xFDE8 │ 65000 A │
/// │ 3 │ Invalid Lang Tag Length, small payload │ 0x09     │ 0xFFFF │ 200 A   │
/// │ 4 │ Large Lang Tag Length, small payload   │ 0x09     │ 0xFDE8 │ 200 A   │
/// │ 5 │ Invalid Lang Tag Length (overflow)     │ 0x09     │ 0x0020 │ 10 A    │
/// │ 6 │ slptool findsrvtypes                   │ 0x09     │ 2      │ en      │
/// │ 7 │ slptool findsrvs service:obmc_console  │ 0x01     │ 2      │ en      │
/// └───┴────────────────────────────────────────┴──────────┴────────┴─────────┘
/// ```
///
/// Cases 1–5 carry nothing after the language tag. Cases 6 and 7 are the
/// requests `slptool` sends and should get a normal reply from a healthy
/// target, one per function id the malformed cases share a header with.
pub fn standard_cases() -> Vec<TestCase> {
    use boundary::{
        PAYLOAD_LARGE, PAYLOAD_OVERFLOW, PAYLOAD_SMALL, TAG_LEN_EXTREME, TAG_LEN_LARGE,
        TAG_LEN_OVERFLOW,
    };

    vec![
        lang_tag_probe(
            "Invalid Lang Tag Length, large payload",
            TAG_LEN_EXTREME,
            PAYLOAD_LARGE,
        ),
        lang_tag_probe(
            "Large Lang Tag Length, large payload",
            TAG_LEN_LARGE,
            PAYLOAD_LARGE,
        ),
        lang_tag_probe(
            "Invalid Lang Tag Length, small payload",
            TAG_LEN_EXTREME,
            PAYLOAD_SMALL,
        ),
        lang_tag_probe(
            "Large Lang Tag Length, small payload",
            TAG_LEN_LARGE,
            PAYLOAD_SMALL,
        ),
        lang_tag_probe(
            "Invalid Lang Tag Length (overflow)",
            TAG_LEN_OVERFLOW,
            PAYLOAD_OVERFLOW,
        ),
        findsrvtypes(),
        findsrvs(),
    ]
}

/// A service type request whose language tag declares `declared` bytes
/// and carries `actual` fill bytes.
pub fn lang_tag_probe(name: &str, declared: u16, actual: usize) -> TestCase {
    let message = SlpMessage::new(FunctionId::SrvTypeRqst)
        .with_length(boundary::MALFORMED_LENGTH)
        .with_lang_tag(LengthPrefixed::new(
            declared,
            vec![boundary::FILL_BYTE; actual],
        ));
    TestCase::new(name, message, pacing::MALFORMED)
}

fn findsrvtypes() -> TestCase {
    use baseline::{FINDSRVTYPES_LENGTH, FINDSRVTYPES_XID, LANG_TAG, LANG_TAG_LEN, SCOPE, SCOPE_LEN};

    let message = SlpMessage::new(FunctionId::SrvTypeRqst)
        .with_length(FINDSRVTYPES_LENGTH)
        .with_xid(FINDSRVTYPES_XID)
        .with_lang_tag(LengthPrefixed::new(LANG_TAG_LEN, LANG_TAG))
        .with_body(Body::SrvTypeRqst(SrvTypeRqst {
            pr_list: LengthPrefixed::empty(),
            naming_authority: LengthPrefixed::new(NAMING_AUTHORITY_ALL, Bytes::new()),
            scope_list: LengthPrefixed::new(SCOPE_LEN, SCOPE),
        }));
    TestCase::new("slptool findsrvtypes", message, pacing::CONTROL)
}

fn findsrvs() -> TestCase {
    use baseline::{
        FINDSRVS_LENGTH, FINDSRVS_XID, LANG_TAG, LANG_TAG_LEN, SCOPE, SCOPE_LEN, SERVICE_TYPE,
        SERVICE_TYPE_LEN,
    };

    let message = SlpMessage::new(FunctionId::SrvRqst)
        .with_length(FINDSRVS_LENGTH)
        .with_xid(FINDSRVS_XID)
        .with_lang_tag(LengthPrefixed::new(LANG_TAG_LEN, LANG_TAG))
        .with_body(Body::SrvRqst(SrvRqst {
            pr_list: LengthPrefixed::empty(),
            service_type: LengthPrefixed::new(SERVICE_TYPE_LEN, SERVICE_TYPE),
            scope_list: LengthPrefixed::new(SCOPE_LEN, SCOPE),
            predicate: LengthPrefixed::empty(),
            spi: LengthPrefixed::empty(),
        }));
    TestCase::new(
        "slptool findsrvs service:obmc_console",
        message,
        pacing::FINAL,
    )
}
