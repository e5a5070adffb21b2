//! Bit addressing over byte buffers. Bit `i` of a buffer lives in byte `i / 8` at position
//! `7 - i % 8`, i.e. bits are numbered MSB-first in network order. Every stage of the transmit
//! chain addresses bits through these helpers instead of indexing bytes directly.

/// Value (0 or 1) of bit `i` of `buf`
#[inline]
pub fn get_bit(buf: &[u8], i: usize) -> u8 {
    (buf[i / 8] >> (7 - i % 8)) & 1
}

/// Set bit `i` of `buf` to `bit` (any nonzero value counts as 1)
#[inline]
pub fn set_bit(buf: &mut [u8], i: usize, bit: u8) {
    let mask = 1 << (7 - i % 8);
    if bit != 0 {
        buf[i / 8] |= mask;
    } else {
        buf[i / 8] &= !mask;
    }
}

/// Unsigned value of the `len` bits starting at bit `first`. The first bit addressed is the MSB
/// of the result. E.g. bits 1..4 of `0b0101_1100` give `0b101`.
pub fn bit_group(buf: &[u8], first: usize, len: usize) -> u32 {
    debug_assert!(len <= 32);
    (first..first + len).fold(0, |acc, i| (acc << 1) | get_bit(buf, i) as u32)
}

/// Even parity bit of the `len` bits starting at `first`: 1 if the number of ones is odd
pub fn even_parity(buf: &[u8], first: usize, len: usize) -> u8 {
    (first..first + len).fold(0, |acc, i| acc ^ get_bit(buf, i))
}

/// Mirror the bit order of one byte (LSB-first <-> MSB-first)
#[inline]
pub fn reverse_bits(b: u8) -> u8 {
    b.reverse_bits()
}

/// Mirror the bit order of every byte of `buf`. The MAC layer hands over its fields LSB-first
/// while the PHY numbers bits MSB-first, so this is applied once at the MAC -> PHY handoff.
pub fn reverse_bits_in_place(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        *b = reverse_bits(*b);
    }
}

/// Render the first `len` bits as a string of '0' and '1'. Handy for comparing against the bit
/// tables printed in the standard.
pub fn bits_to_string(buf: &[u8], len: usize) -> String {
    (0..len)
        .map(|i| if get_bit(buf, i) == 1 { '1' } else { '0' })
        .collect()
}

/// Parse a string of '0'/'1' (whitespace ignored) into a zero-padded byte buffer
pub fn bits_from_str(s: &str) -> Vec<u8> {
    let bits: Vec<u8> = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| (c == '1') as u8)
        .collect();
    let mut res = vec![0u8; (bits.len() + 7) / 8];
    for (i, b) in bits.iter().enumerate() {
        set_bit(&mut res, i, *b);
    }
    res
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn msb_first_addressing() {
        let buf = [0b1000_0001u8, 0b0100_0000];
        assert_eq!(get_bit(&buf, 0), 1);
        assert_eq!(get_bit(&buf, 1), 0);
        assert_eq!(get_bit(&buf, 7), 1);
        assert_eq!(get_bit(&buf, 9), 1);

        let mut buf = [0u8; 2];
        set_bit(&mut buf, 3, 1);
        set_bit(&mut buf, 15, 1);
        assert_eq!(buf, [0b0001_0000, 0b0000_0001]);
        set_bit(&mut buf, 3, 0);
        assert_eq!(buf, [0, 1]);
    }

    #[test]
    fn groups_and_parity() {
        let buf = [0b0101_1100u8, 0b1111_0000];
        assert_eq!(bit_group(&buf, 1, 3), 0b101);
        // Groups may straddle a byte boundary
        assert_eq!(bit_group(&buf, 6, 4), 0b0011);
        assert_eq!(even_parity(&buf, 0, 8), 0);
        assert_eq!(even_parity(&buf, 0, 9), 1);
    }

    #[test]
    fn bit_reversal() {
        assert_eq!(reverse_bits(0x04), 0x20);
        let mut buf = vec![0x01, 0x80, 0xF0];
        reverse_bits_in_place(&mut buf);
        assert_eq!(buf, vec![0x80, 0x01, 0x0F]);
    }

    #[test]
    fn string_conversion() {
        let buf = bits_from_str("1011 0001 001");
        assert_eq!(buf, vec![0b1011_0001, 0b0010_0000]);
        assert_eq!(bits_to_string(&buf, 11), "10110001001");
    }
}
