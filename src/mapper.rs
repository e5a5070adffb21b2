use crate::bits::bit_group;
use crate::error::{check_len, PhyError};
use crate::rate::Modulation;
use crate::Sample;

/// Data subcarriers per OFDM symbol
pub const N_DATA_TONES: usize = 48;

// Amplitude per group value (MSB first, Gray coded), normalised to unit mean energy
const BPSK: [f64; 2] = [-1., 1.];
const QPSK: [f64; 2] = [-0.707106781, 0.707106781];
const QAM16: [f64; 4] = [-0.948683298, -0.316227766, 0.948683298, 0.316227766];
const QAM64: [f64; 8] = [
    -1.08012345,
    -0.77151675,
    -0.15430335,
    -0.46291005,
    1.08012345,
    0.77151675,
    0.15430335,
    0.46291005,
];

/// Map one symbol's worth of interleaved bits (`48 * n_bpsc`) onto the 48 data subcarriers. The
/// first half of each group of `n_bpsc` bits selects I, the second half Q; BPSK only drives I.
pub fn modulate(bits: &[u8], modulation: Modulation) -> Result<[Sample; N_DATA_TONES], PhyError> {
    let n_bpsc = modulation.n_bpsc();
    check_len("mapper", N_DATA_TONES * n_bpsc / 8, bits.len())?;

    let table: &[f64] = match modulation {
        Modulation::Bpsk => &BPSK,
        Modulation::Qpsk => &QPSK,
        Modulation::Qam16 => &QAM16,
        Modulation::Qam64 => &QAM64,
    };
    let half = std::cmp::max(n_bpsc / 2, 1);

    let mut res = [Sample::new(0., 0.); N_DATA_TONES];
    for (idx, s) in res.iter_mut().enumerate() {
        let first = idx * n_bpsc;
        let i = table[bit_group(bits, first, half) as usize];
        let q = if modulation == Modulation::Bpsk {
            0.
        } else {
            table[bit_group(bits, first + half, half) as usize]
        };
        *s = Sample::new(i, q);
    }
    Ok(res)
}
