//! CRC-32 checksum engine
//!
//! ZIP records the CRC-32 of every entry's uncompressed bytes in both its
//! local file header and its central directory header.
//!
//! ## Algorithm
//!
//! Standard reflected CRC-32 (polynomial `0xEDB88320`, initial value and
//! final XOR `0xFFFFFFFF`), computed one byte at a time through a 256-entry
//! lookup table. The table is a pure function of the polynomial, so it is
//! built at compile time and shared read-only by every caller.

/// Reflected CRC-32 polynomial used by ZIP
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

static TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut index = 0;

    while index < 256 {
        let mut crc = index as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[index] = crc;
        index += 1;
    }

    table
}

/// Incremental CRC-32 digest
///
/// Feed bytes with [`Crc32::update`] in as many chunks as needed, then read
/// the checksum with [`Crc32::finalize`]. Chunking does not affect the result.
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32 {
    pub fn new() -> Self {
        Crc32 { state: 0xFFFF_FFFF }
    }

    pub fn update(&mut self, data: &[u8]) {
        let mut crc = self.state;
        for &byte in data {
            crc = TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
        }
        self.state = crc;
    }

    pub fn finalize(self) -> u32 {
        self.state ^ 0xFFFF_FFFF
    }
}

/// Compute the CRC-32 of a byte buffer
///
/// The empty buffer yields `0`.
pub fn crc32(data: &[u8]) -> u32 {
    let mut digest = Crc32::new();
    digest.update(data);
    digest.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty(b"", 0x0000_0000)]
    #[case::check_value(b"123456789", 0xCBF4_3926)]
    #[case::single_byte(b"a", 0xE8B7_BE43)]
    #[case::pangram(b"The quick brown fox jumps over the lazy dog", 0x414F_A339)]
    fn known_checksums(#[case] input: &[u8], #[case] expected: u32) {
        pretty_assertions::assert_eq!(crc32(input), expected);
    }

    #[test]
    fn table_starts_with_reference_values() {
        assert_eq!(TABLE[0], 0x0000_0000);
        assert_eq!(TABLE[1], 0x7707_3096);
        assert_eq!(TABLE[255], 0x2D02_EF8D);
    }

    proptest! {
        #[test]
        fn matches_reference_implementation(data in prop::collection::vec(any::<u8>(), 0..4096)) {
            let reference = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
            prop_assert_eq!(crc32(&data), reference.checksum(&data));
        }

        #[test]
        fn chunked_updates_match_single_pass(
            data in prop::collection::vec(any::<u8>(), 0..2048),
            split in 0usize..2048,
        ) {
            let split = split.min(data.len());
            let mut digest = Crc32::new();
            digest.update(&data[..split]);
            digest.update(&data[split..]);
            prop_assert_eq!(digest.finalize(), crc32(&data));
        }
    }
}
