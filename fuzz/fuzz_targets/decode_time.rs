#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = zeitpack::decode_time(data) {
        assert!(consumed <= data.len());
        let _ = value.validate();
        let _ = value.encode_vec();
    }
});
