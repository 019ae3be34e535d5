#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use slp_decoder::SlpDecoder;
use slp_encoder::SlpMessage;
use slp_wire::{Body, FunctionId, LengthPrefixed, SrvRqst, SrvTypeRqst};

#[derive(Debug, Arbitrary)]
enum FuzzBody {
    SrvTypeRqst {
        pr_list: Vec<u8>,
        naming_authority: Option<Vec<u8>>,
        scope_list: Vec<u8>,
    },
    SrvRqst {
        pr_list: Vec<u8>,
        service_type: Vec<u8>,
        scope_list: Vec<u8>,
        predicate: Vec<u8>,
        spi: Vec<u8>,
    },
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    xid: u16,
    flags: u16,
    lang_tag: Vec<u8>,
    body: FuzzBody,
}

fn field(content: Vec<u8>) -> Option<LengthPrefixed> {
    LengthPrefixed::exact("field", content).ok()
}

// Fuzz target: well-formed requests must be accepted and decode to what
// was encoded.
fuzz_target!(|input: FuzzInput| {
    let Some(lang_tag) = field(input.lang_tag) else { return };

    let (function, body) = match input.body {
        FuzzBody::SrvTypeRqst { pr_list, naming_authority, scope_list } => {
            let naming_authority = match naming_authority {
                // 0xFFFF is reserved for "all authorities".
                Some(na) if na.len() < 0xFFFF => LengthPrefixed::new(na.len() as u16, na),
                Some(_) => return,
                None => LengthPrefixed::new(0xFFFF, Vec::new()),
            };
            let (Some(pr_list), Some(scope_list)) = (field(pr_list), field(scope_list)) else {
                return;
            };
            let body = SrvTypeRqst { pr_list, naming_authority, scope_list };
            (FunctionId::SrvTypeRqst, Body::SrvTypeRqst(body))
        }
        FuzzBody::SrvRqst { pr_list, service_type, scope_list, predicate, spi } => {
            let (Some(pr_list), Some(service_type), Some(scope_list), Some(predicate), Some(spi)) = (
                field(pr_list),
                field(service_type),
                field(scope_list),
                field(predicate),
                field(spi),
            ) else {
                return;
            };
            let body = SrvRqst { pr_list, service_type, scope_list, predicate, spi };
            (FunctionId::SrvRqst, Body::SrvRqst(body))
        }
    };

    let message = SlpMessage::new(function)
        .with_xid(input.xid)
        .with_flags(slp_wire::HeaderFlags::from_raw(input.flags))
        .with_lang_tag(lang_tag)
        .with_body(body.clone());

    let Ok(bytes) = message.encode() else { return };
    // Short requests fall under the minimum size check.
    let Ok(decoded) = SlpDecoder::decode(&bytes) else {
        assert!(bytes.len() < 24, "well-formed request rejected");
        return;
    };
    assert_eq!(decoded.header.xid, input.xid);
    assert_eq!(decoded.body, body);
});
