#![no_main]

use libfuzzer_sys::fuzz_target;
use slp_wire::header::{declared_lang_tag_len, declared_length, SlpHeader};

// Fuzz target: header readers with arbitrary bytes.
//
// A header that parses must re-encode to exactly the bytes it consumed.
fuzz_target!(|data: &[u8]| {
    let _ = declared_length(data);
    let _ = declared_lang_tag_len(data);

    if let Ok((header, consumed)) = SlpHeader::read_from(data) {
        let mut out = Vec::new();
        header.write_to(&mut out).expect("parsed header must re-encode");
        assert_eq!(out, &data[..consumed]);
    }
});
