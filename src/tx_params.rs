use crate::rate::DataRate;

/// Number of SERVICE bits in front of the PSDU
pub const SERVICE_BITS: usize = 16;
/// Number of zero tail bits that flush the convolutional encoder
pub const TAIL_BITS: usize = 6;
/// Samples per OFDM symbol including guard interval, at the sample rate of the symbol clock
pub const SYMBOL_LEN: usize = 80;

/// Sizing of one frame: how many OFDM symbols a PSDU occupies at a given rate, and how long the
/// intermediate buffers of the transmit chain are
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxParameters {
    pub rate: DataRate,
    pub psdu_len: usize,
    /// Number of DATA OFDM symbols
    pub n_sym: usize,
    /// Bits in the DATA field (always a multiple of n_dbps)
    pub n_data: usize,
    /// Zero pad bits after the tail
    pub n_pad: usize,
    /// Bytes needed to hold the DATA field. For 9 Mbps (and 4.5 Mbps) with an odd symbol count
    /// `n_data` is not a multiple of 8, in which case the last nibble is unused.
    pub n_data_bytes: usize,
    /// Bytes after convolutional coding and puncturing (`n_sym * n_cbps / 8`)
    pub n_encoded_bytes: usize,
    /// Air time in microseconds: preamble, SIGNAL and DATA symbols
    pub duration_us: usize,
}

impl TxParameters {
    pub fn new(rate: DataRate, psdu_len: usize) -> Self {
        let profile = rate.profile();
        let payload_bits = SERVICE_BITS + 8 * psdu_len + TAIL_BITS;
        let n_sym = (payload_bits + profile.n_dbps - 1) / profile.n_dbps;
        let n_data = n_sym * profile.n_dbps;
        Self {
            rate,
            psdu_len,
            n_sym,
            n_data,
            n_pad: n_data - payload_bits,
            n_data_bytes: (n_data + 7) / 8,
            n_encoded_bytes: n_sym * profile.n_cbps / 8,
            // The preamble takes four symbol times, the SIGNAL field one
            duration_us: (5 + n_sym) * rate.bandwidth().symbol_duration_us(),
        }
    }

    /// First bit of the tail within the DATA field
    pub fn tail_offset(&self) -> usize {
        self.n_data - self.n_pad - TAIL_BITS
    }

    /// Number of samples of the assembled frame. Each symbol contributes 80 samples and the
    /// windowed tail of the last one adds a single trailing sample.
    pub fn frame_len(&self) -> usize {
        (5 + self.n_sym) * SYMBOL_LEN + 1
    }
}
