use failure::Fail;

/// Everything that can go wrong while building a frame. All of these are permanent input
/// validation failures; encoding is deterministic, so retrying with the same input is pointless.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum PhyError {
    /// The requested rate is not one of the 802.11a/g rates (or the SIGNAL rate code is unknown)
    #[fail(display = "unsupported data rate: {} kbps at {} MHz", kbps, bandwidth_mhz)]
    InvalidDataRate { bandwidth_mhz: u32, kbps: u32 },
    /// The PSDU does not fit the configured maximum (at most 4095, the SIGNAL length field limit)
    #[fail(display = "PSDU of {} bytes exceeds the maximum of {} bytes", len, max)]
    PsduTooLarge { len: usize, max: usize },
    /// A buffer handed to a stage does not have the size that stage requires
    #[fail(
        display = "{}: buffer size mismatch (expected {}, got {})",
        stage, expected, actual
    )]
    BufferSizeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Received SIGNAL bits that fail the parity check or have nonzero reserved/tail bits
    #[fail(display = "invalid SIGNAL field: {}", _0)]
    InvalidSignalField(&'static str),
    /// Scrambler seeds are nonzero 7 bit values; zero would leave the data unscrambled
    #[fail(display = "scrambler seed {} not in 1..=127", _0)]
    InvalidScramblerSeed(u8),
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),
}

/// Check that a stage received exactly `expected` elements
pub(crate) fn check_len(
    stage: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), PhyError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PhyError::BufferSizeMismatch {
            stage,
            expected,
            actual,
        })
    }
}
