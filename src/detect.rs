//! Frame start detection on a raw sample stream. The short training sequence is found by its
//! periodicity (delay-and-correlate with a lag of one short period), which needs no knowledge of
//! the channel. The long training sequence is then located precisely by cross-correlating with
//! its known waveform.

use crate::preamble::generate_preamble;
use crate::symbol::FFT_LEN;
use crate::Sample;
use log::{debug, trace};
use num::Zero;

/// Period of the short training sequence
pub const SHORT_PERIOD: usize = 16;
/// Offset of the first full long training period from the start of the frame
pub const LONG_TRAINING_OFFSET: usize = 192;

pub const DEFAULT_SHORT_THRESHOLD: f64 = 1.2;
pub const DEFAULT_LONG_THRESHOLD: f64 = 2.0;
/// Windows with less energy than this are considered silence
const POWER_FLOOR: f64 = 1e-12;

// The lagged products span three short periods, the power estimate the newest two
const CORR_LEN: usize = 3 * SHORT_PERIOD;
const POWER_LEN: usize = 2 * SHORT_PERIOD;
const SHORT_WINDOW: usize = CORR_LEN + SHORT_PERIOD;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Autocorrelation to power ratio above which the short training sequence is reported. A
    /// clean short training sequence gives 1.5 and noise gives about 0.
    pub short_threshold: f64,
    /// Cross-correlation metric `rho^2 / (1 - rho^2)` above which the long training sequence is
    /// reported
    pub long_threshold: f64,
    /// Never look at more than this many window positions
    pub max_scan_len: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            short_threshold: DEFAULT_SHORT_THRESHOLD,
            long_threshold: DEFAULT_LONG_THRESHOLD,
            max_scan_len: usize::MAX,
        }
    }
}

#[inline]
fn lagged_product(samples: &[Sample], i: usize) -> f64 {
    (samples[i + SHORT_PERIOD] * samples[i].conj()).re
}

fn scan_short(samples: &[Sample], threshold: f64, max_scan_len: usize) -> Option<usize> {
    if samples.len() < SHORT_WINDOW || max_scan_len == 0 {
        return None;
    }
    let last = std::cmp::min(samples.len() - SHORT_WINDOW, max_scan_len.saturating_sub(1));

    // Sums for the window at t = 0. Later windows add the newest term and drop the oldest.
    let mut upper: f64 = (0..CORR_LEN).map(|k| lagged_product(samples, k)).sum();
    let mut lower: f64 = samples[SHORT_WINDOW - POWER_LEN..SHORT_WINDOW]
        .iter()
        .map(|s| s.norm_sqr())
        .sum();

    for t in 0..=last {
        if lower > POWER_FLOOR && upper / lower > threshold {
            trace!("Short training at {}: ratio {:.3}", t, upper / lower);
            return Some(t);
        }
        if t == last {
            break;
        }
        upper += lagged_product(samples, t + CORR_LEN) - lagged_product(samples, t);
        lower += samples[t + SHORT_WINDOW].norm_sqr()
            - samples[t + SHORT_WINDOW - POWER_LEN].norm_sqr();
    }
    None
}

/// Index of the first window whose lag-16 autocorrelation exceeds `threshold` times its power.
/// For window start `t` the autocorrelation sums `Re(s[t+k+16] * conj(s[t+k]))` over 48 lags and
/// the power sums `|s|^2` over the newest 32 samples `s[t+32..t+64]`.
pub fn detect_short_training(samples: &[Sample], threshold: f64) -> Option<usize> {
    scan_short(samples, threshold, usize::MAX)
}

/// Normalised cross-correlation metric of a 64 sample window against `reference`: with `rho`
/// the normalised correlation coefficient, `rho^2 / (1 - rho^2)` is the energy of the window
/// explained by the reference over the energy that is not. Infinite on an exact (scaled) match.
pub fn long_training_metric(window: &[Sample], reference: &[Sample; FFT_LEN]) -> f64 {
    debug_assert_eq!(window.len(), FFT_LEN);
    let energy: f64 = window.iter().map(|s| s.norm_sqr()).sum();
    if energy <= POWER_FLOOR {
        return 0.;
    }
    let ref_energy: f64 = reference.iter().map(|s| s.norm_sqr()).sum();
    let corr: Sample = window
        .iter()
        .zip(reference.iter())
        .map(|(s, r)| s * r.conj())
        .sum();
    let rho2 = corr.norm_sqr() / (energy * ref_energy);
    if rho2 >= 1. {
        f64::INFINITY
    } else {
        rho2 / (1. - rho2)
    }
}

fn scan_long(
    samples: &[Sample],
    reference: &[Sample; FFT_LEN],
    threshold: f64,
    max_scan_len: usize,
) -> Option<usize> {
    samples
        .windows(FFT_LEN)
        .take(max_scan_len)
        .position(|w| long_training_metric(w, reference) > threshold)
}

/// Index of the first 64 sample window that matches one period of the long training sequence
pub fn detect_long_training(samples: &[Sample], threshold: f64) -> Option<usize> {
    let reference = generate_preamble().long_symbol();
    scan_long(samples, &reference, threshold, usize::MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSyncState {
    /// Nothing found yet
    Idle,
    /// Short training sequence detected at this index
    ShortTrainingFound(usize),
    /// Start of the first long training period found. Indices are into the buffer passed to
    /// `FrameSync::process`.
    LongTrainingFound { short: usize, long: usize },
}

/// Two stage frame synchronisation over a buffer: first the coarse short training detection,
/// then the long training search starting from the short training hit
pub struct FrameSync {
    config: DetectorConfig,
    reference: [Sample; FFT_LEN],
    state: FrameSyncState,
}

impl FrameSync {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            config: *config,
            reference: generate_preamble().long_symbol(),
            state: FrameSyncState::Idle,
        }
    }

    pub fn state(&self) -> FrameSyncState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = FrameSyncState::Idle;
    }

    /// Short training detection bounded by the configured scan length
    pub fn detect_short(&self, samples: &[Sample]) -> Option<usize> {
        scan_short(samples, self.config.short_threshold, self.config.max_scan_len)
    }

    /// Long training detection bounded by the configured scan length
    pub fn detect_long(&self, samples: &[Sample]) -> Option<usize> {
        scan_long(
            samples,
            &self.reference,
            self.config.long_threshold,
            self.config.max_scan_len,
        )
    }

    /// Advance through as many stages as `samples` allows. The buffer is expected to grow (or
    /// stay the same) between calls, with indices always relative to its start. A buffer that
    /// ends before the short training hit leaves the state unchanged.
    pub fn process(&mut self, samples: &[Sample]) -> FrameSyncState {
        loop {
            match self.state {
                FrameSyncState::Idle => match self.detect_short(samples) {
                    Some(short) => {
                        debug!("Short training sequence at {}", short);
                        self.state = FrameSyncState::ShortTrainingFound(short);
                    }
                    None => return self.state,
                },
                FrameSyncState::ShortTrainingFound(short) => {
                    match samples.get(short..).and_then(|s| self.detect_long(s)) {
                        Some(offset) => {
                            debug!("Long training sequence at {}", short + offset);
                            self.state = FrameSyncState::LongTrainingFound {
                                short,
                                long: short + offset,
                            };
                        }
                        None => return self.state,
                    }
                }
                FrameSyncState::LongTrainingFound { .. } => return self.state,
            }
        }
    }

    /// Where the frame starts, once the long training sequence has been found
    pub fn frame_start(&self) -> Option<usize> {
        match self.state {
            FrameSyncState::LongTrainingFound { long, .. } => {
                Some(long.saturating_sub(LONG_TRAINING_OFFSET))
            }
            _ => None,
        }
    }
}
