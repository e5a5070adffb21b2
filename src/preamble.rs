//! PLCP preamble: ten short training periods (8 us) followed by a double guard interval and two
//! long training periods (8 us), each 161 samples long including the trailing window sample.

use crate::symbol::{Ofdm, FFT_LEN, N_TONES};
use crate::Sample;
use num::Zero;

/// Length of each half of the preamble including the overlapping window sample
pub const TRAINING_LEN: usize = 161;
/// Guard interval in front of the two long training periods
pub const LONG_GUARD_LEN: usize = 32;

/// Short training tones, as multiples of (1 + j), for subcarriers -26..=26
pub const SHORT_TRAINING: [i8; N_TONES] = [
    0, 0, 1, 0, 0, 0, -1, 0, 0, 0, 1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0,
    -1, 0, 0, 0, -1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0,
];

/// Long training tones for subcarriers -26..=26
pub const LONG_TRAINING: [i8; N_TONES] = [
    1, 1, -1, -1, 1, 1, -1, 1, -1, 1, 1, 1, 1, 1, 1, -1, -1, 1, 1, -1, 1, -1, 1, 1, 1, 1, 0, 1,
    -1, -1, 1, 1, -1, 1, -1, 1, -1, -1, -1, -1, -1, 1, 1, -1, -1, 1, -1, 1, -1, 1, 1, 1, 1,
];

/// Only 12 of the 52 tones carry the short sequence; this brings its power up to that of the rest
/// of the frame
fn short_training_scale() -> f64 {
    (13. / 6.0f64).sqrt()
}

/// Both windowed halves of the preamble. The frame puts `short` at offset 0 and `long` at 160,
/// so that their window samples overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct Preamble {
    pub short: [Sample; TRAINING_LEN],
    pub long: [Sample; TRAINING_LEN],
}

impl Preamble {
    pub fn new(ofdm: &Ofdm) -> Self {
        let mut short_tones = [Sample::zero(); N_TONES];
        let mut long_tones = [Sample::zero(); N_TONES];
        for t in 0..N_TONES {
            let s = SHORT_TRAINING[t] as f64;
            short_tones[t] = Sample::new(s, s);
            long_tones[t] = Sample::new(LONG_TRAINING[t] as f64, 0.);
        }

        let mut res = Self {
            short: [Sample::zero(); TRAINING_LEN],
            long: [Sample::zero(); TRAINING_LEN],
        };
        res.short.copy_from_slice(&ofdm.synthesize(
            &short_tones,
            0,
            TRAINING_LEN,
            short_training_scale(),
        ));
        res.long.copy_from_slice(&ofdm.synthesize(
            &long_tones,
            LONG_GUARD_LEN,
            TRAINING_LEN,
            1.,
        ));
        res
    }

    /// One unwindowed period of the long training sequence, as a receiver would correlate against
    pub fn long_symbol(&self) -> [Sample; FFT_LEN] {
        let mut res = [Sample::zero(); FFT_LEN];
        res.copy_from_slice(&self.long[LONG_GUARD_LEN..LONG_GUARD_LEN + FFT_LEN]);
        res
    }
}

/// Generate the preamble with a freshly planned IFFT
pub fn generate_preamble() -> Preamble {
    Preamble::new(&Ofdm::new())
}
