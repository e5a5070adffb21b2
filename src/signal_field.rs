//! SIGNAL field: the single BPSK rate-1/2 symbol after the preamble that tells the receiver the
//! rate and length of the DATA field. It is neither scrambled nor tail-terminated through the
//! scrambler; its six trailing zero bits flush the encoder directly.

use crate::bits::{bit_group, even_parity, get_bit, set_bit};
use crate::conv_code::convolutional_encode;
use crate::error::PhyError;
use crate::interleaver::interleave;
use crate::mapper::modulate;
use crate::rate::DataRate;
use crate::symbol::{insert_pilots, Ofdm, GUARD_LEN, N_TONES};
use crate::tx_params::SYMBOL_LEN;
use crate::Sample;
use log::debug;

pub const SIGNAL_BITS: usize = 24;
/// Largest length the 12 bit LENGTH field can express
pub const MAX_LENGTH: usize = 4095;

/// The 24 SIGNAL bits in transmission order: RATE (R1..R4), a reserved zero, LENGTH (LSB first),
/// even parity over the first 17 bits and six zero tail bits
pub fn signal_bits(rate: DataRate, len: usize) -> Result<[u8; 3], PhyError> {
    if len > MAX_LENGTH {
        return Err(PhyError::PsduTooLarge {
            len,
            max: MAX_LENGTH,
        });
    }
    let code = rate.profile().signal_code;
    let mut res = [0u8; 3];
    for i in 0..4 {
        set_bit(&mut res, i, (code >> (3 - i)) & 1);
    }
    for i in 0..12 {
        set_bit(&mut res, 5 + i, ((len >> i) & 1) as u8);
    }
    let parity = even_parity(&res, 0, 17);
    set_bit(&mut res, 17, parity);
    Ok(res)
}

/// Recover rate and length from received SIGNAL bits. Only 20 MHz rates are reported, since the
/// RATE field is the same at 10 MHz.
pub fn parse_signal_bits(bits: &[u8; 3]) -> Result<(DataRate, usize), PhyError> {
    if even_parity(bits, 0, 18) != 0 {
        return Err(PhyError::InvalidSignalField("parity check failed"));
    }
    if get_bit(bits, 4) != 0 {
        return Err(PhyError::InvalidSignalField("reserved bit set"));
    }
    if bit_group(bits, 18, 6) != 0 {
        return Err(PhyError::InvalidSignalField("nonzero tail"));
    }
    let rate = DataRate::from_signal_code(bit_group(bits, 0, 4) as u8)?;
    let len = (0..12).fold(0, |acc, i| acc | (get_bit(bits, 5 + i) as usize) << i);
    Ok((rate, len))
}

/// Encoded and interleaved SIGNAL bits (48 bits, one BPSK symbol)
fn coded_signal_bits(bits: &[u8; 3]) -> Result<Vec<u8>, PhyError> {
    let p = DataRate::SIGNAL.profile();
    let encoded = convolutional_encode(bits, SIGNAL_BITS);
    interleave(&encoded, p.n_cbps, p.n_bpsc)
}

/// Windowed time domain SIGNAL symbol (81 samples) for a frame of `len` bytes at `rate`
pub fn generate_signal_field(
    ofdm: &Ofdm,
    rate: DataRate,
    len: usize,
) -> Result<Vec<Sample>, PhyError> {
    let bits = signal_bits(rate, len)?;
    debug!("SIGNAL for {} bytes at {}: {:02x?}", len, rate, bits);
    let coded = coded_signal_bits(&bits)?;
    let data = modulate(&coded, DataRate::SIGNAL.profile().modulation)?;
    let tones: [Sample; N_TONES] = insert_pilots(&data, 0);
    Ok(ofdm.synthesize(&tones, GUARD_LEN, SYMBOL_LEN + 1, 1.))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bits::{bits_from_str, bits_to_string};

    /// SIGNAL symbol of a 100 byte frame at 36 Mbps, as tabulated in the standard's example
    const SIGNAL_36MBPS_100: [(f64, f64); 81] = [
        (0.031, 0.000), (0.033, -0.044), (-0.002, -0.038), (-0.081, 0.084), (0.007, -0.100),
        (-0.001, -0.113), (-0.021, -0.005), (0.136, -0.105), (0.098, -0.044), (0.011, -0.002),
        (-0.033, 0.044), (-0.060, 0.124), (0.010, 0.097), (0.000, -0.008), (0.018, -0.083),
        (-0.069, 0.027), (-0.219, 0.000), (-0.069, -0.027), (0.018, 0.083), (0.000, 0.008),
        (0.010, -0.097), (-0.060, -0.124), (-0.033, -0.044), (0.011, 0.002), (0.098, 0.044),
        (0.136, 0.105), (-0.021, 0.005), (-0.001, 0.113), (0.007, 0.100), (-0.081, -0.084),
        (-0.002, 0.038), (0.033, 0.044), (0.063, 0.000), (0.057, 0.052), (0.016, 0.174),
        (0.035, 0.116), (-0.051, -0.202), (0.011, 0.036), (0.089, 0.209), (-0.049, -0.008),
        (-0.035, 0.044), (0.017, -0.059), (0.053, -0.017), (0.099, 0.100), (0.034, -0.148),
        (-0.003, -0.094), (-0.120, 0.042), (-0.136, -0.070), (-0.031, 0.000), (-0.136, 0.070),
        (-0.120, -0.042), (-0.003, 0.094), (0.034, 0.148), (0.099, -0.100), (0.053, 0.017),
        (0.017, 0.059), (-0.035, -0.044), (-0.049, 0.008), (0.089, -0.209), (0.011, -0.036),
        (-0.051, 0.202), (0.035, -0.116), (0.016, -0.174), (0.057, -0.052), (0.062, 0.000),
        (0.033, -0.044), (-0.002, -0.038), (-0.081, 0.084), (0.007, -0.100), (-0.001, -0.113),
        (-0.021, -0.005), (0.136, -0.105), (0.098, -0.044), (0.011, -0.002), (-0.033, 0.044),
        (-0.060, 0.124), (0.010, 0.097), (0.000, -0.008), (0.018, -0.083), (-0.069, 0.027),
        (-0.109, 0.000),
    ];

    #[test]
    fn signal_bits_for_36mbps() {
        let bits = signal_bits(DataRate::Bw20Mbps36, 100).unwrap();
        assert_eq!(bits_to_string(&bits, 24), "101100010011000000000000");
        assert_eq!(
            bits_to_string(&coded_signal_bits(&bits).unwrap(), 48),
            "100101001101000000010100100000110010010010010100"
        );
    }

    #[test]
    fn signal_symbol_matches_standard() {
        let samples = generate_signal_field(&Ofdm::new(), DataRate::Bw20Mbps36, 100).unwrap();
        assert_eq!(samples.len(), 81);
        for (s, (re, im)) in samples.iter().zip(SIGNAL_36MBPS_100.iter()) {
            assert!((s.re - re).abs() < 1e-3, "{} vs {}", s, re);
            assert!((s.im - im).abs() < 1e-3, "{} vs {}", s, im);
        }
    }

    #[test]
    fn half_clocked_rates_share_rate_bits() {
        assert_eq!(
            signal_bits(DataRate::Bw10Mbps18, 100),
            signal_bits(DataRate::Bw20Mbps36, 100)
        );
    }

    #[test]
    fn parse_recovers_rate_and_length() {
        for rate in DataRate::ALL[..8].iter() {
            for len in [0, 1, 100, 1500, 4095].iter() {
                let bits = signal_bits(*rate, *len).unwrap();
                assert_eq!(parse_signal_bits(&bits), Ok((*rate, *len)));
            }
        }
    }

    #[test]
    fn invalid_signal_fields() {
        assert_eq!(
            signal_bits(DataRate::Bw20Mbps6, 4096),
            Err(PhyError::PsduTooLarge {
                len: 4096,
                max: 4095
            })
        );

        let good = signal_bits(DataRate::Bw20Mbps54, 1234).unwrap();
        // Any single flipped bit among the first 18 breaks parity
        for i in 0..18 {
            let mut bad = good;
            bad[i / 8] ^= 0x80 >> (i % 8);
            assert!(parse_signal_bits(&bad).is_err());
        }
        let mut bad = good;
        bad[2] |= 0x01;
        assert_eq!(
            parse_signal_bits(&bad),
            Err(PhyError::InvalidSignalField("nonzero tail"))
        );

        // Rate code 0000 with a consistent parity bit
        let mut bits = [0u8; 3];
        bits.copy_from_slice(&bits_from_str("0000 0 000000000000 0 000000"));
        assert!(parse_signal_bits(&bits).is_err());
    }
}
