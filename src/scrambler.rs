//! Frame-synchronous scrambler (17.3.5.4): a 7-bit LFSR with generator x^7 + x^4 + 1. The same
//! operation scrambles and descrambles, provided both ends start from the same register state.

use crate::bits::{get_bit, set_bit};
use crate::error::PhyError;
use crate::tx_params::TAIL_BITS;

/// Initial register state used in the worked example of the standard
pub const DEFAULT_SEED: u8 = 0x5D;

/// Check that `seed` is a usable initial state: nonzero and no more than 7 bits
pub fn check_seed(seed: u8) -> Result<u8, PhyError> {
    if seed == 0 || seed > 0x7F {
        return Err(PhyError::InvalidScramblerSeed(seed));
    }
    Ok(seed)
}

/// Advance the register by one bit and return the scrambling bit
#[inline]
fn step(reg: &mut u8) -> u8 {
    let feedback = ((*reg >> 3) ^ (*reg >> 6)) & 1;
    *reg = ((*reg << 1) | feedback) & 0x7F;
    feedback
}

/// Scramble every bit of `buf` in place, MSB of the first byte first
pub fn scramble_in_place(buf: &mut [u8], seed: u8) {
    let mut reg = seed & 0x7F;
    for i in 0..buf.len() * 8 {
        let bit = get_bit(buf, i) ^ step(&mut reg);
        set_bit(buf, i, bit);
    }
}

/// Out-of-place version of `scramble_in_place`
pub fn scramble(input: &[u8], seed: u8) -> Vec<u8> {
    let mut res = input.to_vec();
    scramble_in_place(&mut res, seed);
    res
}

/// Zero the six tail bits of a scrambled DATA field of `n_data` bits, so the encoder returns to
/// the all-zero state. In place.
pub fn reset_tail_bits(buf: &mut [u8], n_data: usize, n_pad: usize) -> Result<(), PhyError> {
    if n_data > buf.len() * 8 || n_data < n_pad + TAIL_BITS {
        return Err(PhyError::BufferSizeMismatch {
            stage: "tail reset",
            expected: (n_data + 7) / 8,
            actual: buf.len(),
        });
    }
    let tail = n_data - n_pad - TAIL_BITS;
    for i in tail..tail + TAIL_BITS {
        set_bit(buf, i, 0);
    }
    Ok(())
}

/// Recover the initial scrambler state from a scrambled DATA field. The seven first SERVICE bits
/// are zero before scrambling, so they carry the first seven scrambling bits. After those seven
/// steps the register holds exactly these bits; running it backwards gives the seed.
pub fn recover_seed(scrambled: &[u8]) -> Result<u8, PhyError> {
    if scrambled.is_empty() {
        return Err(PhyError::BufferSizeMismatch {
            stage: "descrambler",
            expected: 1,
            actual: 0,
        });
    }
    let mut reg = (0..7).fold(0u8, |acc, i| (acc << 1) | get_bit(scrambled, i));
    for _ in 0..7 {
        // The bit shifted out was bit 6; it is recovered from the feedback that entered bit 0
        let lost = (reg ^ (reg >> 4)) & 1;
        reg = (reg >> 1) | (lost << 6);
    }
    Ok(reg)
}

/// Descramble a DATA field without knowing the seed. Service, PSDU and pad bits come back as they
/// were; the tail does not, since it was zeroed after scrambling.
pub fn descramble(scrambled: &[u8]) -> Result<Vec<u8>, PhyError> {
    let seed = recover_seed(scrambled)?;
    Ok(scramble(scrambled, seed))
}

/// Descramble with a known seed. Fails unless the buffer holds at least the SERVICE field.
pub fn descramble_with_seed(scrambled: &[u8], seed: u8) -> Result<Vec<u8>, PhyError> {
    if scrambled.len() < 2 {
        return Err(PhyError::BufferSizeMismatch {
            stage: "descrambler",
            expected: 2,
            actual: scrambled.len(),
        });
    }
    Ok(scramble(scrambled, seed))
}
