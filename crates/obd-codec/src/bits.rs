//! Bit-level view over a byte buffer
//!
//! Bits are numbered most-significant first within each byte, bytes in
//! buffer order: bit 0 is the MSB of byte 0, bit 8 the MSB of byte 1.

use std::ops::RangeInclusive;

/// Read-only bit accessor over a borrowed byte slice
#[derive(Debug, Clone, Copy)]
pub struct BitView<'a> {
    bytes: &'a [u8],
}

impl<'a> BitView<'a> {
    /// Create a view over `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of bits in the view
    pub fn len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Whether the view covers no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read one bit.
    ///
    /// # Panics
    /// If `index` is outside the view. Callers compute bit positions from
    /// fixed layouts, so an out-of-range read is a layout bug.
    pub fn bit(&self, index: usize) -> bool {
        assert!(
            index < self.len(),
            "bit index {} out of range for {} bits",
            index,
            self.len()
        );
        (self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    /// First index holding `value`
    pub fn index_of(&self, value: bool) -> Option<usize> {
        self.iter().position(|bit| bit == value)
    }

    /// Fold an inclusive range of bits into an integer, first bit most significant.
    ///
    /// # Panics
    /// If the range leaves the view or spans more than 64 bits.
    pub fn value_at(&self, range: RangeInclusive<usize>) -> u64 {
        if range.is_empty() {
            return 0;
        }
        assert!(
            *range.end() < self.len(),
            "bit range {:?} out of range for {} bits",
            range,
            self.len()
        );
        assert!(range.end() - range.start() < 64, "bit range {:?} wider than 64 bits", range);
        range.fold(0, |acc, index| (acc << 1) | self.bit(index) as u64)
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterate bits in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + 'a {
        let bytes = self.bytes;
        (0..bytes.len() * 8).map(move |i| (bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_msb_first_order() {
        let view = BitView::new(&[0b1000_0000, 0b0000_0001]);
        assert_eq!(view.len(), 16);
        assert!(view.bit(0));
        assert!(!view.bit(1));
        assert!(view.bit(15));
        assert_eq!(view.index_of(true), Some(0));
        assert_eq!(view.index_of(false), Some(1));
    }

    #[test]
    fn test_value_at_spans_bytes() {
        let view = BitView::new(&[0x0F, 0xF0]);
        assert_eq!(view.value_at(4..=11), 0xFF);
        assert_eq!(view.value_at(1..=7), 0x0F);
        assert_eq!(view.value_at(12..=15), 0);
    }

    #[test]
    fn test_index_of_missing() {
        let view = BitView::new(&[0x00, 0x00]);
        assert_eq!(view.index_of(true), None);
        assert_eq!(view.count_ones(), 0);
        assert!(BitView::new(&[]).is_empty());
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        BitView::new(&[0xFF]).value_at(4..=8);
    }

    proptest! {
        #[test]
        fn prop_byte_reconstructs(byte in any::<u8>()) {
            let bytes = [byte];
            let view = BitView::new(&bytes);
            prop_assert_eq!(view.value_at(0..=7), byte as u64);
            prop_assert_eq!(view.count_ones(), byte.count_ones() as usize);
        }

        #[test]
        fn prop_each_byte_in_buffer(bytes in proptest::collection::vec(any::<u8>(), 1..16)) {
            let view = BitView::new(&bytes);
            for (i, byte) in bytes.iter().enumerate() {
                prop_assert_eq!(view.value_at(i * 8..=i * 8 + 7), *byte as u64);
            }
        }
    }
}
