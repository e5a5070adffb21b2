//! The 802.11a/g rate table (17.3.2.3, Table 17-4). Each supported rate maps to an immutable
//! `RateProfile`; the 10 MHz (half-clocked) rates reuse the profile of the 20 MHz rate with twice
//! the throughput and only differ in symbol duration.

use crate::error::PhyError;
use serde::Deserialize;
use std::convert::TryFrom;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modulation {
    Bpsk,
    Qpsk,
    Qam16,
    Qam64,
}

impl Modulation {
    /// Coded bits per subcarrier
    pub fn n_bpsc(&self) -> usize {
        match self {
            Modulation::Bpsk => 1,
            Modulation::Qpsk => 2,
            Modulation::Qam16 => 4,
            Modulation::Qam64 => 6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodingRate {
    /// r = 1/2, no puncturing
    Half,
    /// r = 2/3
    TwoThirds,
    /// r = 3/4
    ThreeQuarters,
}

impl CodingRate {
    /// Number of bits the punctured stream carries per `(numerator, denominator)` bits of the
    /// rate-1/2 mother code output
    pub fn puncture_ratio(&self) -> (usize, usize) {
        match self {
            CodingRate::Half => (1, 1),
            CodingRate::TwoThirds => (3, 4),
            CodingRate::ThreeQuarters => (2, 3),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Bandwidth {
    #[serde(rename = "20")]
    Mhz20,
    #[serde(rename = "10")]
    Mhz10,
}

impl Bandwidth {
    pub fn mhz(&self) -> u32 {
        match self {
            Bandwidth::Mhz20 => 20,
            Bandwidth::Mhz10 => 10,
        }
    }

    /// Duration of one OFDM symbol (including guard interval) in microseconds
    pub fn symbol_duration_us(&self) -> usize {
        match self {
            Bandwidth::Mhz20 => 4,
            Bandwidth::Mhz10 => 8,
        }
    }
}

/// Immutable parameters of one data rate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateProfile {
    pub modulation: Modulation,
    pub coding_rate: CodingRate,
    /// Coded bits per subcarrier
    pub n_bpsc: usize,
    /// Coded bits per OFDM symbol
    pub n_cbps: usize,
    /// Data bits per OFDM symbol
    pub n_dbps: usize,
    /// RATE field of the SIGNAL header (R1 is bit 3)
    pub signal_code: u8,
}

impl RateProfile {
    const fn new(
        modulation: Modulation,
        coding_rate: CodingRate,
        n_bpsc: usize,
        n_dbps: usize,
        signal_code: u8,
    ) -> Self {
        Self {
            modulation,
            coding_rate,
            n_bpsc,
            n_cbps: 48 * n_bpsc,
            n_dbps,
            signal_code,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    Bw20Mbps6,
    Bw20Mbps9,
    Bw20Mbps12,
    Bw20Mbps18,
    Bw20Mbps24,
    Bw20Mbps36,
    Bw20Mbps48,
    Bw20Mbps54,
    Bw10Mbps3,
    Bw10Mbps4_5,
    Bw10Mbps6,
    Bw10Mbps9,
    Bw10Mbps12,
    Bw10Mbps18,
    Bw10Mbps24,
    Bw10Mbps27,
}

impl DataRate {
    pub const ALL: [DataRate; 16] = [
        DataRate::Bw20Mbps6,
        DataRate::Bw20Mbps9,
        DataRate::Bw20Mbps12,
        DataRate::Bw20Mbps18,
        DataRate::Bw20Mbps24,
        DataRate::Bw20Mbps36,
        DataRate::Bw20Mbps48,
        DataRate::Bw20Mbps54,
        DataRate::Bw10Mbps3,
        DataRate::Bw10Mbps4_5,
        DataRate::Bw10Mbps6,
        DataRate::Bw10Mbps9,
        DataRate::Bw10Mbps12,
        DataRate::Bw10Mbps18,
        DataRate::Bw10Mbps24,
        DataRate::Bw10Mbps27,
    ];

    /// The rate used for the SIGNAL field
    pub const SIGNAL: DataRate = DataRate::Bw20Mbps6;

    pub fn profile(&self) -> RateProfile {
        use CodingRate::*;
        use DataRate::*;
        use Modulation::*;
        match self {
            Bw20Mbps6 | Bw10Mbps3 => RateProfile::new(Bpsk, Half, 1, 24, 0x0D),
            Bw20Mbps9 | Bw10Mbps4_5 => RateProfile::new(Bpsk, ThreeQuarters, 1, 36, 0x0F),
            Bw20Mbps12 | Bw10Mbps6 => RateProfile::new(Qpsk, Half, 2, 48, 0x05),
            Bw20Mbps18 | Bw10Mbps9 => RateProfile::new(Qpsk, ThreeQuarters, 2, 72, 0x07),
            Bw20Mbps24 | Bw10Mbps12 => RateProfile::new(Qam16, Half, 4, 96, 0x09),
            Bw20Mbps36 | Bw10Mbps18 => RateProfile::new(Qam16, ThreeQuarters, 4, 144, 0x0B),
            Bw20Mbps48 | Bw10Mbps24 => RateProfile::new(Qam64, TwoThirds, 6, 192, 0x01),
            Bw20Mbps54 | Bw10Mbps27 => RateProfile::new(Qam64, ThreeQuarters, 6, 216, 0x03),
        }
    }

    pub fn bandwidth(&self) -> Bandwidth {
        use DataRate::*;
        match self {
            Bw20Mbps6 | Bw20Mbps9 | Bw20Mbps12 | Bw20Mbps18 | Bw20Mbps24 | Bw20Mbps36
            | Bw20Mbps48 | Bw20Mbps54 => Bandwidth::Mhz20,
            _ => Bandwidth::Mhz10,
        }
    }

    /// Throughput in kbit/s
    pub fn kbps(&self) -> u32 {
        // n_dbps bits every symbol duration
        (self.profile().n_dbps * 1000 / self.bandwidth().symbol_duration_us()) as u32
    }

    /// Look up a 20 MHz rate from the RATE bits of a SIGNAL header
    pub fn from_signal_code(code: u8) -> Result<Self, PhyError> {
        DataRate::ALL[..8]
            .iter()
            .copied()
            .find(|r| r.profile().signal_code == code)
            .ok_or(PhyError::InvalidDataRate {
                bandwidth_mhz: 20,
                kbps: 0,
            })
    }
}

impl fmt::Display for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kbps = self.kbps();
        if kbps % 1000 == 0 {
            write!(f, "{} Mbps @ {} MHz", kbps / 1000, self.bandwidth().mhz())
        } else {
            write!(f, "{:.1} Mbps @ {} MHz", kbps as f64 / 1000., self.bandwidth().mhz())
        }
    }
}

/// A rate request as it arrives from a caller or a config file. Only becomes a `DataRate` once
/// validated against the rate table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct RateSelector {
    pub bandwidth: Bandwidth,
    pub kbps: u32,
}

impl RateSelector {
    /// A 20 MHz rate given in Mbit/s
    pub fn mbps(mbps: u32) -> Self {
        Self {
            bandwidth: Bandwidth::Mhz20,
            kbps: mbps * 1000,
        }
    }
}

impl TryFrom<RateSelector> for DataRate {
    type Error = PhyError;

    fn try_from(sel: RateSelector) -> Result<Self, PhyError> {
        DataRate::ALL
            .iter()
            .copied()
            .find(|r| r.bandwidth() == sel.bandwidth && r.kbps() == sel.kbps)
            .ok_or(PhyError::InvalidDataRate {
                bandwidth_mhz: sel.bandwidth.mhz(),
                kbps: sel.kbps,
            })
    }
}
