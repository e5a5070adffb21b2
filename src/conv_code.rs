use crate::bits::{get_bit, set_bit};
use crate::error::PhyError;
use crate::rate::CodingRate;

/// Generator polynomials of the K = 7 mother code (133 and 171 octal). Bit 6 of the register
/// holds the newest input bit.
pub const G0: u8 = 0x5B;
pub const G1: u8 = 0x79;

#[inline]
fn parity(x: u8) -> u8 {
    (x.count_ones() % 2) as u8
}

/// Rate-1/2 convolutional encoder. Encodes the first `n_bits` bits of `input` starting from the
/// all-zero state and returns `2 * n_bits` coded bits: output bit `2i` from `G0`, `2i + 1` from
/// `G1`. Out-of-place.
pub fn convolutional_encode(input: &[u8], n_bits: usize) -> Vec<u8> {
    debug_assert!(n_bits <= input.len() * 8);
    let mut res = vec![0u8; (2 * n_bits + 7) / 8];
    let mut reg = 0u8;
    for i in 0..n_bits {
        reg |= get_bit(input, i) << 6;
        set_bit(&mut res, 2 * i, parity(reg & G0));
        set_bit(&mut res, 2 * i + 1, parity(reg & G1));
        reg >>= 1;
    }
    res
}

/// Drop coded bits to reach `rate`. At 1/2 the input is returned as is, at 2/3 every 4th bit of
/// each period of 4 is dropped and at 3/4 the 4th and 5th of each period of 6. Out-of-place.
pub fn puncture(input: &[u8], rate: CodingRate) -> Result<Vec<u8>, PhyError> {
    // `granule` is the smallest number of input bytes that punctures to whole output bytes
    let (period, keep, granule): (usize, &[bool], usize) = match rate {
        CodingRate::Half => return Ok(input.to_vec()),
        CodingRate::TwoThirds => (4, &[true, true, true, false][..], 4),
        CodingRate::ThreeQuarters => (6, &[true, true, true, false, false, true][..], 3),
    };
    if input.len() % granule != 0 {
        return Err(PhyError::BufferSizeMismatch {
            stage: "puncturer",
            expected: (input.len() / granule + 1) * granule,
            actual: input.len(),
        });
    }
    let (num, den) = rate.puncture_ratio();
    let n_out = input.len() * 8 * num / den;

    let mut res = vec![0u8; n_out / 8];
    let mut out = 0;
    for i in (0..input.len() * 8).filter(|i| keep[i % period]) {
        set_bit(&mut res, out, get_bit(input, i));
        out += 1;
    }
    debug_assert_eq!(out, n_out);
    Ok(res)
}
