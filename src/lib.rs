//! Baseband transmitter for IEEE 802.11a/g style OFDM frames, plus frame start detection for the
//! receive side. A frame has the following structure:
//! <Short Preamble> <Long Preamble> <SIGNAL> [<Data symbols> ...]
//!
//! Short Preamble:
//!  - 10 repeats of a 16 sample short training sequence
//!
//! Long Preamble:
//!  - <Guard Interval> 2 * <Long Training Sequence>
//!    The guard interval is 1/2 the size of the LTS, which is 64 samples long
//!
//! SIGNAL and every data symbol are 64 sample OFDM symbols with a 16 sample cyclic prefix. The
//! DATA bits go through scrambler -> convolutional encoder -> puncturer -> interleaver -> mapper
//! before the IFFT. Consecutive sections overlap by one windowed sample.

pub mod bits;
pub mod config;
pub mod conv_code;
pub mod detect;
pub mod error;
pub mod frame;
pub mod interleaver;
pub mod mapper;
pub mod preamble;
pub mod rate;
pub mod sample_io;
pub mod scrambler;
pub mod signal_field;
pub mod symbol;
#[cfg(test)]
mod test_vectors;
pub mod timing;
pub mod tx_params;

/// Complex baseband sample
pub type Sample = num::Complex<f64>;

pub use config::PhyConfig;
pub use detect::{detect_long_training, detect_short_training, DetectorConfig, FrameSync};
pub use error::PhyError;
pub use frame::{encode_frame, frame_len, FrameEncoder};
pub use preamble::{generate_preamble, Preamble};
pub use rate::{Bandwidth, DataRate, RateSelector};
pub use timing::StageTimer;
pub use tx_params::TxParameters;
