#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: SlpDecoder::decode with arbitrary datagrams.
//
// Catches bugs in:
// - Language tag length checks against the remaining input
// - Naming authority 0xFFFF handling
// - Minimum request size checks
// - Length prefix reads at the very end of the buffer
fuzz_target!(|data: &[u8]| {
    if let Err(e) = slp_decoder::SlpDecoder::decode(data) {
        let _ = e.error_code();
    }
});
