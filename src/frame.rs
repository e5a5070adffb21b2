//! Assembly of a complete PPDU: preamble, SIGNAL and the DATA symbols, overlapped by one sample at
//! every symbol boundary so the window tails add up.

use crate::bits::reverse_bits_in_place;
use crate::config::PhyConfig;
use crate::conv_code::{convolutional_encode, puncture};
use crate::error::{check_len, PhyError};
use crate::interleaver::interleave;
use crate::mapper::modulate;
use crate::preamble::Preamble;
use crate::rate::{DataRate, RateSelector};
use crate::scrambler::{check_seed, reset_tail_bits, scramble_in_place, DEFAULT_SEED};
use crate::signal_field::{generate_signal_field, MAX_LENGTH};
use crate::symbol::{insert_pilots, Ofdm, GUARD_LEN};
use crate::timing::StageTimer;
use crate::tx_params::{TxParameters, SYMBOL_LEN};
use crate::Sample;
use log::debug;
use num::Zero;
use std::convert::TryFrom;

/// Largest PSDU the SIGNAL LENGTH field can describe
pub const MAX_PSDU_LEN: usize = MAX_LENGTH;

/// Sample offsets of the frame sections
pub const LONG_OFFSET: usize = 2 * SYMBOL_LEN;
pub const SIGNAL_OFFSET: usize = 4 * SYMBOL_LEN;
pub const DATA_OFFSET: usize = 5 * SYMBOL_LEN;

/// The DATA field before scrambling: 16 zero SERVICE bits, the PSDU, and zeros for tail and pad.
/// The PSDU arrives in MAC bit order (LSB first) and is turned into transmission order here.
pub fn build_data_field(psdu: &[u8], tx: &TxParameters) -> Vec<u8> {
    let mut res = vec![0u8; tx.n_data_bytes];
    let payload = &mut res[2..2 + psdu.len()];
    payload.copy_from_slice(psdu);
    reverse_bits_in_place(payload);
    res
}

/// Scrambled DATA field with the tail reset, ready for the encoder
pub fn scrambled_data_field(
    psdu: &[u8],
    tx: &TxParameters,
    seed: u8,
) -> Result<Vec<u8>, PhyError> {
    let mut data = build_data_field(psdu, tx);
    scramble_in_place(&mut data, seed);
    reset_tail_bits(&mut data, tx.n_data, tx.n_pad)?;
    Ok(data)
}

/// Add `samples` into `frame` starting at `offset`. Neighbouring symbols share one sample, which
/// ends up as the sum of both windowed halves.
pub fn overlap_add(frame: &mut [Sample], samples: &[Sample], offset: usize) {
    for (f, s) in frame[offset..offset + samples.len()].iter_mut().zip(samples) {
        *f += s;
    }
}

/// Turns PSDUs into baseband frames. Holds the planned IFFT and the precomputed preamble, both
/// immutable, so a single encoder can serve concurrent callers through `&self`.
#[derive(Clone)]
pub struct FrameEncoder {
    ofdm: Ofdm,
    preamble: Preamble,
    scrambler_seed: u8,
    max_psdu_len: usize,
}

impl FrameEncoder {
    pub fn new() -> Self {
        let ofdm = Ofdm::new();
        let preamble = Preamble::new(&ofdm);
        Self {
            ofdm,
            preamble,
            scrambler_seed: DEFAULT_SEED,
            max_psdu_len: MAX_PSDU_LEN,
        }
    }

    pub fn from_config(config: &PhyConfig) -> Self {
        Self {
            scrambler_seed: config.scrambler_seed,
            max_psdu_len: config.max_psdu_len,
            ..Self::new()
        }
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    pub fn ofdm(&self) -> &Ofdm {
        &self.ofdm
    }

    pub fn scrambler_seed(&self) -> u8 {
        self.scrambler_seed
    }

    /// Encode `psdu` at `rate` with the configured scrambler seed
    pub fn encode(&self, psdu: &[u8], rate: DataRate) -> Result<Vec<Sample>, PhyError> {
        self.encode_with_seed(psdu, rate, self.scrambler_seed, &mut StageTimer::new())
    }

    /// Like `encode`, additionally charging the time spent in every stage to `timer`
    pub fn encode_profiled(
        &self,
        psdu: &[u8],
        rate: DataRate,
        timer: &mut StageTimer,
    ) -> Result<Vec<Sample>, PhyError> {
        self.encode_with_seed(psdu, rate, self.scrambler_seed, timer)
    }

    /// Encode with an explicit scrambler seed. The standard recommends a pseudo-random nonzero
    /// seed per frame; the receiver recovers it from the SERVICE field. Seeds outside 1..=127
    /// are rejected.
    pub fn encode_with_seed(
        &self,
        psdu: &[u8],
        rate: DataRate,
        seed: u8,
        timer: &mut StageTimer,
    ) -> Result<Vec<Sample>, PhyError> {
        if psdu.len() > self.max_psdu_len {
            return Err(PhyError::PsduTooLarge {
                len: psdu.len(),
                max: self.max_psdu_len,
            });
        }
        let seed = check_seed(seed)?;
        let tx = TxParameters::new(rate, psdu.len());
        let profile = rate.profile();
        debug!(
            "Encoding {} bytes at {}: {} symbols, {} pad bits, {} us",
            psdu.len(),
            rate,
            tx.n_sym,
            tx.n_pad,
            tx.duration_us
        );

        let data = timer.time("scramble", || scrambled_data_field(psdu, &tx, seed))?;
        let encoded = timer.time("encode", || convolutional_encode(&data, tx.n_data));
        let punctured = timer.time("puncture", || puncture(&encoded, profile.coding_rate))?;
        check_len("puncturer", tx.n_encoded_bytes, punctured.len())?;
        let interleaved = timer.time("interleave", || {
            interleave(&punctured, profile.n_cbps, profile.n_bpsc)
        })?;

        let mut frame = vec![Sample::zero(); tx.frame_len()];
        let signal = timer.time("signal", || {
            generate_signal_field(&self.ofdm, rate, psdu.len())
        })?;
        timer.time("assemble", || {
            overlap_add(&mut frame, &self.preamble.short, 0);
            overlap_add(&mut frame, &self.preamble.long, LONG_OFFSET);
            overlap_add(&mut frame, &signal, SIGNAL_OFFSET);
        });

        let symbol_bytes = profile.n_cbps / 8;
        for (k, bits) in interleaved.chunks(symbol_bytes).enumerate() {
            let data_tones = timer.time("map", || modulate(bits, profile.modulation))?;
            // Symbol 0 is the SIGNAL field
            let tones = timer.time("pilots", || insert_pilots(&data_tones, k + 1));
            let samples = timer.time("ifft", || {
                self.ofdm.synthesize(&tones, GUARD_LEN, SYMBOL_LEN + 1, 1.)
            });
            timer.time("assemble", || {
                overlap_add(&mut frame, &samples, DATA_OFFSET + k * SYMBOL_LEN)
            });
        }
        Ok(frame)
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode one frame with a default encoder. Callers encoding many frames should keep a
/// `FrameEncoder` around instead, which plans the IFFT and the preamble once.
pub fn encode_frame(psdu: &[u8], rate: RateSelector) -> Result<Vec<Sample>, PhyError> {
    let rate = DataRate::try_from(rate)?;
    FrameEncoder::new().encode(psdu, rate)
}

/// Number of samples `encode` produces for a PSDU of `len` bytes
pub fn frame_len(rate: DataRate, len: usize) -> usize {
    TxParameters::new(rate, len).frame_len()
}
