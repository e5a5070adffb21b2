//! Two-step block interleaver of 17.3.5.6. The first permutation spreads adjacent coded bits onto
//! non-adjacent subcarriers, the second alternates them between more and less significant bits of
//! the constellation.

use crate::bits::{get_bit, set_bit};
use crate::error::PhyError;

/// Where each bit of an `n_cbps` block goes: input bit `k` moves to output bit `perm[k]`
pub fn interleaver_permutation(n_cbps: usize, n_bpsc: usize) -> Vec<usize> {
    let s = std::cmp::max(n_bpsc / 2, 1);
    (0..n_cbps)
        .map(|k| {
            let i = (n_cbps / 16) * (k % 16) + k / 16;
            s * (i / s) + (i + n_cbps - 16 * i / n_cbps) % s
        })
        .collect()
}

fn check_blocks(stage: &'static str, input: &[u8], n_cbps: usize) -> Result<(), PhyError> {
    let n_bits = input.len() * 8;
    if n_bits % n_cbps != 0 {
        let block_bytes = n_cbps / 8;
        return Err(PhyError::BufferSizeMismatch {
            stage,
            expected: (n_bits / n_cbps + 1) * block_bytes,
            actual: input.len(),
        });
    }
    Ok(())
}

/// Interleave every `n_cbps` block of `input` (one OFDM symbol each). Out-of-place.
pub fn interleave(input: &[u8], n_cbps: usize, n_bpsc: usize) -> Result<Vec<u8>, PhyError> {
    check_blocks("interleaver", input, n_cbps)?;
    let perm = interleaver_permutation(n_cbps, n_bpsc);
    let mut res = vec![0u8; input.len()];
    for base in (0..input.len() * 8).step_by(n_cbps) {
        for (k, j) in perm.iter().enumerate() {
            set_bit(&mut res, base + j, get_bit(input, base + k));
        }
    }
    Ok(res)
}

/// Inverse of `interleave`. Out-of-place.
pub fn deinterleave(input: &[u8], n_cbps: usize, n_bpsc: usize) -> Result<Vec<u8>, PhyError> {
    check_blocks("deinterleaver", input, n_cbps)?;
    let perm = interleaver_permutation(n_cbps, n_bpsc);
    let mut res = vec![0u8; input.len()];
    for base in (0..input.len() * 8).step_by(n_cbps) {
        for (k, j) in perm.iter().enumerate() {
            set_bit(&mut res, base + k, get_bit(input, base + j));
        }
    }
    Ok(res)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bits::{bits_from_str, bits_to_string};
    use crate::rate::DataRate;
    use rand::Rng;

    #[test]
    fn permutations_are_bijections() {
        for rate in DataRate::ALL.iter() {
            let p = rate.profile();
            let mut perm = interleaver_permutation(p.n_cbps, p.n_bpsc);
            perm.sort();
            assert_eq!(perm, (0..p.n_cbps).collect::<Vec<_>>());
        }
    }

    #[test]
    fn interleaves_signal_field() {
        let encoded = bits_from_str("110100011010000100000010001111100111000000000000");
        let out = interleave(&encoded, 48, 1).unwrap();
        assert_eq!(
            bits_to_string(&out, 48),
            "100101001101000000010100100000110010010010010100"
        );
    }

    #[test]
    fn deinterleave_inverts_interleave() {
        let mut rng = rand::thread_rng();
        for rate in DataRate::ALL.iter() {
            let p = rate.profile();
            // Three symbols worth of coded bits
            let data: Vec<u8> = (0..3 * p.n_cbps / 8).map(|_| rng.gen()).collect();
            let out = interleave(&data, p.n_cbps, p.n_bpsc).unwrap();
            assert_eq!(deinterleave(&out, p.n_cbps, p.n_bpsc).unwrap(), data);
        }
    }

    #[test]
    fn partial_blocks_are_rejected() {
        assert_eq!(
            interleave(&[0u8; 7], 48, 1),
            Err(PhyError::BufferSizeMismatch {
                stage: "interleaver",
                expected: 12,
                actual: 7
            })
        );
        assert!(deinterleave(&[0u8; 30], 288, 6).is_err());
        assert!(interleave(&[], 96, 2).unwrap().is_empty());
    }
}
