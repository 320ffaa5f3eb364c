#![no_main]

// Compares the BC1 block decoder against bcdec_rs. The two round interpolated palette entries
// differently, so channels may differ by one.

use dds_convert_bc::util::decode_bc1_block;
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc1Block {
    pub bytes: [u8; 8],
}

fuzz_target!(|block: Bc1Block| {
    let ours = decode_bc1_block(&block.bytes);

    let mut reference = [0u8; 4 * 16];
    bcdec_rs::bc1(&block.bytes, &mut reference, 4 * 4);

    for (index, expected) in reference.chunks_exact(4).enumerate() {
        let actual = ours.pixel(index % 4, index / 4).to_array();
        for (channel, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                a.abs_diff(*e) <= 1,
                "pixel {index} channel {channel}: {actual:?} != {expected:?}"
            );
        }
    }
});
