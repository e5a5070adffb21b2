//! Assembly of one OFDM symbol: pilots and DC are added to the 48 data subcarriers, the 53 used
//! tones are laid out in IFFT order, transformed to the time domain and cyclically extended.

use crate::mapper::N_DATA_TONES;
use crate::Sample;
use log::trace;
use num::Zero;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

pub const FFT_LEN: usize = 64;
/// Tones -26..=26 including DC
pub const N_TONES: usize = 53;
/// Index of the DC tone within the 53 used tones
pub const DC_TONE: usize = 26;
/// Pilot tones (-21, -7, 7, 21). The last one is sent inverted.
pub const PILOT_TONES: [usize; 4] = [5, 19, 33, 47];
/// Guard interval of SIGNAL and DATA symbols
pub const GUARD_LEN: usize = 16;

/// Pilot polarity p_n for symbol n (17.3.5.9). This is the scrambler sequence for an all-ones
/// seed, with 0 -> 1 and 1 -> -1.
pub const POLARITY: [i8; 127] = [
    1, 1, 1, 1, -1, -1, -1, 1, -1, -1, -1, -1, 1, 1, -1, 1,
    -1, -1, 1, 1, -1, 1, 1, -1, 1, 1, 1, 1, 1, 1, -1, 1,
    1, 1, -1, 1, 1, -1, -1, 1, 1, 1, -1, 1, -1, -1, -1, 1,
    -1, 1, -1, -1, 1, -1, -1, 1, 1, 1, 1, 1, -1, -1, 1, 1,
    -1, -1, 1, -1, 1, -1, 1, 1, -1, -1, -1, 1, 1, -1, -1, -1,
    -1, 1, -1, -1, 1, -1, 1, 1, 1, 1, -1, 1, -1, 1, -1, 1,
    -1, -1, -1, -1, -1, 1, -1, 1, 1, -1, 1, -1, 1, 1, 1, -1,
    -1, 1, -1, -1, -1, 1, 1, 1, -1, -1, -1, -1, -1, -1, -1,
];

/// Spread the 48 data subcarriers over the 53 used tones, skipping the pilots and DC, and insert
/// the pilots of symbol `symbol_index` (0 is the SIGNAL field)
pub fn insert_pilots(data: &[Sample; N_DATA_TONES], symbol_index: usize) -> [Sample; N_TONES] {
    let p = POLARITY[symbol_index % POLARITY.len()] as f64;
    let mut res = [Sample::zero(); N_TONES];

    let data_tones = (0..N_TONES).filter(|t| *t != DC_TONE && !PILOT_TONES.contains(t));
    for (tone, d) in data_tones.zip(data.iter()) {
        res[tone] = *d;
    }
    for tone in &PILOT_TONES[..3] {
        res[*tone] = Sample::new(p, 0.);
    }
    res[PILOT_TONES[3]] = Sample::new(-p, 0.);
    res
}

/// Lay the used tones out in IFFT bin order. Tones 27..=52 (subcarriers 1..=26) go to bins
/// 1..=26, tones 0..=25 (subcarriers -26..=-1) to bins 38..=63. DC and the guard band stay empty.
pub fn map_to_ifft(tones: &[Sample; N_TONES]) -> [Sample; FFT_LEN] {
    let mut res = [Sample::zero(); FFT_LEN];
    res[1..=26].copy_from_slice(&tones[27..=52]);
    res[38..=63].copy_from_slice(&tones[0..=25]);
    res
}

/// Cyclically extend a 64 sample symbol to `out_len` samples, with the last `cp_length` samples
/// in front: `out[n] = time[(n - cp_length) mod 64]`
pub fn cyclic_extend(time: &[Sample; FFT_LEN], cp_length: usize, out_len: usize) -> Vec<Sample> {
    debug_assert!(cp_length <= FFT_LEN);
    (0..out_len)
        .map(|n| time[(n + FFT_LEN - cp_length) % FFT_LEN])
        .collect()
}

/// Halve the first and the last sample, so consecutive symbols overlap smoothly. In place.
pub fn apply_window(samples: &mut [Sample]) {
    if let Some(first) = samples.first_mut() {
        *first *= 0.5;
    }
    if let Some(last) = samples.last_mut() {
        *last *= 0.5;
    }
}

/// Planned 64 point inverse FFT. Immutable once built; `rustfft` allocates scratch per call, so
/// one instance can be shared by any number of threads.
#[derive(Clone)]
pub struct Ofdm {
    ifft: Arc<dyn Fft<f64>>,
}

impl Ofdm {
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        Self {
            ifft: planner.plan_fft_inverse(FFT_LEN),
        }
    }

    /// Time domain samples of the given IFFT bins, normalised by the FFT size
    pub fn ifft(&self, bins: &[Sample; FFT_LEN]) -> [Sample; FFT_LEN] {
        let mut buf = *bins;
        self.ifft.process(&mut buf);
        for s in buf.iter_mut() {
            *s /= FFT_LEN as f64;
        }
        buf
    }

    /// The time domain waveform of one windowed OFDM symbol: the tones are scaled by `scale`,
    /// mapped to IFFT bins, transformed, cyclically extended to `out_len` and windowed
    pub fn synthesize(
        &self,
        tones: &[Sample; N_TONES],
        cp_length: usize,
        out_len: usize,
        scale: f64,
    ) -> Vec<Sample> {
        let mut bins = map_to_ifft(tones);
        if scale != 1. {
            for b in bins.iter_mut() {
                *b *= scale;
            }
        }
        let time = self.ifft(&bins);
        let mut res = cyclic_extend(&time, cp_length, out_len);
        apply_window(&mut res);
        trace!("Synthesized symbol: cp {}, {} samples", cp_length, out_len);
        res
    }
}

impl Default for Ofdm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ramp() -> [Sample; N_DATA_TONES] {
        let mut data = [Sample::zero(); N_DATA_TONES];
        for (i, d) in data.iter_mut().enumerate() {
            *d = Sample::new(i as f64 + 10., 0.);
        }
        data
    }

    #[test]
    fn pilots_and_dc() {
        let tones = insert_pilots(&ramp(), 0);
        assert_eq!(tones[5], Sample::new(1., 0.));
        assert_eq!(tones[47], Sample::new(-1., 0.));
        assert_eq!(tones[DC_TONE], Sample::zero());
        // Data fills the remaining tones in order
        assert_eq!(tones[0].re, 10.);
        assert_eq!(tones[4].re, 14.);
        assert_eq!(tones[6].re, 15.);
        assert_eq!(tones[25].re, 33.);
        assert_eq!(tones[27].re, 34.);
        assert_eq!(tones[52].re, 57.);

        // p_4 = -1, and the polarity sequence wraps after 127 symbols
        let tones = insert_pilots(&ramp(), 4);
        assert_eq!(tones[19], Sample::new(-1., 0.));
        assert_eq!(tones[47], Sample::new(1., 0.));
        assert_eq!(insert_pilots(&ramp(), 131), tones);
    }

    #[test]
    fn ifft_bin_layout() {
        let mut tones = [Sample::zero(); N_TONES];
        for (i, t) in tones.iter_mut().enumerate() {
            *t = Sample::new(i as f64, 1.);
        }
        let bins = map_to_ifft(&tones);
        assert_eq!(bins[0], Sample::zero());
        assert_eq!(bins[1].re, 27.);
        assert_eq!(bins[26].re, 52.);
        assert!(bins[27..=37].iter().all(|b| *b == Sample::zero()));
        assert_eq!(bins[38].re, 0.);
        assert_eq!(bins[63].re, 25.);
    }

    #[test]
    fn single_tone_ifft() {
        // Subcarrier +1 becomes exp(2 pi j n / 64) / 64
        let mut bins = [Sample::zero(); FFT_LEN];
        bins[1] = Sample::new(1., 0.);
        let time = Ofdm::new().ifft(&bins);
        for (n, s) in time.iter().enumerate() {
            let phase = 2. * std::f64::consts::PI * n as f64 / FFT_LEN as f64;
            let expected = Sample::new(phase.cos(), phase.sin()) / 64.;
            assert!((s - expected).norm() < 1e-12);
        }
    }

    #[test]
    fn cyclic_extension_and_window() {
        let mut time = [Sample::zero(); FFT_LEN];
        for (i, t) in time.iter_mut().enumerate() {
            *t = Sample::new(i as f64, 0.);
        }
        let ext = cyclic_extend(&time, GUARD_LEN, 81);
        assert_eq!(ext.len(), 81);
        assert_eq!(ext[0].re, 48.);
        assert_eq!(ext[15].re, 63.);
        assert_eq!(ext[16].re, 0.);
        assert_eq!(ext[80].re, 0.);

        let ext = cyclic_extend(&time, 32, 161);
        assert_eq!(ext[0].re, 32.);
        assert_eq!(ext[32].re, 0.);
        assert_eq!(ext[96].re, 0.);
        assert_eq!(ext[160].re, 0.);

        let mut ext = cyclic_extend(&time, 0, 161);
        assert_eq!(ext[1].re, 1.);
        assert_eq!(ext[160].re, 32.);
        apply_window(&mut ext);
        assert_eq!(ext[160].re, 16.);
        assert_eq!(ext[1].re, 1.);
    }

    #[test]
    fn synthesize_matches_manual_steps() {
        let ofdm = Ofdm::new();
        let tones = insert_pilots(&ramp(), 1);
        let out = ofdm.synthesize(&tones, GUARD_LEN, 81, 2.);

        let time = ofdm.ifft(&map_to_ifft(&tones));
        assert!((out[0] - time[48]).norm() < 1e-12);
        assert!((out[1] - time[49] * 2.).norm() < 1e-12);
        assert!((out[16] - time[0] * 2.).norm() < 1e-12);
        assert!((out[80] - time[0]).norm() < 1e-12);
    }
}
