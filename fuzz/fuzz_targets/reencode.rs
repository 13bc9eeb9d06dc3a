#![no_main]
use libfuzzer_sys::fuzz_target;

// Decode → encode → decode must be a fixed point: whatever a decoder
// accepts, its canonical re-encoding decodes to the same value.
fuzz_target!(|data: &[u8]| {
    if let Ok((value, _)) = zeitpack::decode_timestamp(data) {
        if value.validate().is_ok() {
            let bytes = value.encode_vec();
            let (again, consumed) = zeitpack::decode_timestamp(&bytes).expect("re-decode");
            assert_eq!(consumed, bytes.len());
            assert_eq!(again, value);
        }
    }
});
