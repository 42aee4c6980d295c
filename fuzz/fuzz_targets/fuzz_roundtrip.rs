#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpedit::*;

fuzz_target!(|data: &[u8]| {
    // Headers that parse must re-serialize to the exact same bytes
    let Ok((file, info)) = parse_headers(data) else {
        return;
    };

    let mut out = bmp::MAGIC.to_vec();
    file.write_to(&mut out);
    info.write_to(&mut out);

    assert_eq!(&out[..], &data[..bmp::HEADERS_LEN], "header roundtrip mismatch");
    let (file2, info2) = parse_headers(&out).expect("re-serialized headers failed to parse");
    assert_eq!(file, file2);
    assert_eq!(info, info2);
});
