#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn v5_bmp(width: i32, height: i32, header_size: u32, fill: [u8; 4]) -> Vec<u8> {
    let pixels = (width.unsigned_abs() * height.unsigned_abs()) as usize;
    let file_size = 138 + pixels * 4;
    let mut bmp = vec![0u8; file_size];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(file_size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&138u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&header_size.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&height.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&32u16.to_le_bytes()); // bpp
    bmp[30..34].copy_from_slice(&3u32.to_le_bytes()); // BI_BITFIELDS
    for px in bmp[138..].chunks_exact_mut(4) {
        px.copy_from_slice(&fill);
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_headers";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/v5_2x2_clear.bmp"), v5_bmp(2, 2, 124, [0, 0, 0, 0])).unwrap();
    fs::write(format!("{dir}/v5_3x1_red.bmp"), v5_bmp(3, 1, 124, [0, 0, 255, 255])).unwrap();
    fs::write(format!("{dir}/v5_topdown.bmp"), v5_bmp(2, -2, 124, [1, 2, 3, 4])).unwrap();
    fs::write(format!("{dir}/v3_header.bmp"), v5_bmp(1, 1, 40, [0; 4])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/v5_cut.bin"), &v5_bmp(1, 1, 124, [0; 4])[..80]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
