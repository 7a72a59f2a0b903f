//! LZW integration tests, checked against an independent decoder.

use oxigif_lzw::{LzwConfig, LzwEncoder, LzwError, compress, compress_gif};
use weezl::{BitOrder, decode::Decoder};

/// Decode with weezl using GIF conventions.
fn decode(data: &[u8], min_code_size: u8) -> Vec<u8> {
    Decoder::new(BitOrder::Lsb, min_code_size)
        .decode(data)
        .expect("weezl rejected the code stream")
}

/// Reproducible pseudo-random bytes, masked to the symbol range.
fn noise(len: usize, mask: u8, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as u8) & mask
        })
        .collect()
}

#[test]
fn test_lzw_roundtrip_simple() {
    let original = b"TOBEORNOTTOBEORTOBEORNOT";
    let compressed = compress_gif(original).expect("compression failed");
    assert_eq!(decode(&compressed, 8), original);
}

#[test]
fn test_lzw_empty_input() {
    let compressed = compress_gif(&[]).expect("compression failed");
    assert!(decode(&compressed, 8).is_empty());
}

#[test]
fn test_lzw_single_byte() {
    let compressed = compress_gif(&[200]).expect("compression failed");
    assert_eq!(decode(&compressed, 8), vec![200]);
}

#[test]
fn test_lzw_all_zeros() {
    let original = vec![0u8; 100_000];
    let compressed = compress_gif(&original).expect("compression failed");

    assert!(
        compressed.len() < original.len() / 50,
        "solid data should compress to under 2%"
    );
    assert_eq!(decode(&compressed, 8), original);
}

#[test]
fn test_lzw_all_byte_values() {
    let original: Vec<u8> = (0..=255).cycle().take(256 * 40).collect();
    let compressed = compress_gif(&original).expect("compression failed");
    assert_eq!(decode(&compressed, 8), original);
}

#[test]
fn test_lzw_every_short_length() {
    // Crosses the 9->10 and 10->11 bit boundaries at every possible offset,
    // including inputs whose final code lands right on a width change.
    let source = noise(1500, 0xFF, 7);
    let mut encoder = LzwEncoder::new(LzwConfig::GIF).unwrap();
    for len in 0..source.len() {
        let compressed = encoder.encode(&source[..len]).unwrap();
        assert_eq!(decode(&compressed, 8), &source[..len], "length {len}");
    }
}

#[test]
fn test_lzw_table_resets() {
    // Random bytes fill the 4096-entry table many times over
    let original = noise(300_000, 0xFF, 42);
    let compressed = compress_gif(&original).expect("compression failed");
    assert_eq!(decode(&compressed, 8), original);
}

#[test]
fn test_lzw_low_entropy_table_resets() {
    // Few distinct symbols: long strings, slow table growth
    let original = noise(500_000, 0x03, 99);
    let compressed = compress_gif(&original).expect("compression failed");
    assert_eq!(decode(&compressed, 8), original);
}

#[test]
fn test_lzw_small_palettes() {
    for min_code_size in 2..=7u8 {
        let mask = ((1u16 << min_code_size) - 1) as u8;
        let original = noise(20_000, mask, min_code_size as u64);
        let compressed =
            compress(&original, LzwConfig::new(min_code_size)).expect("compression failed");
        assert_eq!(
            decode(&compressed, min_code_size),
            original,
            "min code size {min_code_size}"
        );
    }
}

#[test]
fn test_lzw_image_like_rows() {
    // Horizontal gradient bands, typical of quantized screenshots
    let width = 320;
    let height = 240;
    let original: Vec<u8> = (0..width * height)
        .map(|i| ((i % width) / 20 * 36 + (i / width) / 40) as u8)
        .collect();
    let compressed = compress_gif(&original).expect("compression failed");
    assert!(compressed.len() < original.len() / 4);
    assert_eq!(decode(&compressed, 8), original);
}

#[test]
fn test_lzw_deterministic() {
    let original = noise(10_000, 0x3F, 5);
    assert_eq!(compress_gif(&original).unwrap(), compress_gif(&original).unwrap());
}

#[test]
fn test_lzw_symbol_above_code_size() {
    // With a 2-bit code size, 4 is the clear code and may not appear as data
    let result = compress(&[4], LzwConfig::new(2));
    assert!(matches!(
        result,
        Err(LzwError::InvalidSymbol {
            symbol: 4,
            offset: 0,
            clear_code: 4
        })
    ));

    let result = compress(&[0, 1, 200], LzwConfig::new(7));
    assert!(matches!(result, Err(LzwError::InvalidSymbol { symbol: 200, .. })));
}
