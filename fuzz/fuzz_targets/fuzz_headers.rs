#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header parsing must never panic, whatever the input
    let _ = zenbmpedit::parse_headers(data);
});
