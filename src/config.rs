use crate::detect::{DetectorConfig, DEFAULT_LONG_THRESHOLD, DEFAULT_SHORT_THRESHOLD};
use crate::error::PhyError;
use crate::frame::MAX_PSDU_LEN;
use crate::rate::{DataRate, RateSelector};
use crate::scrambler::{check_seed, DEFAULT_SEED};
use serde::Deserialize;
use std::convert::TryFrom;
use std::path::Path;

/// Configuration as written in a JSON file. Everything but the rate is optional. Converted into
/// the validated `PhyConfig` before use.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhyConfigDes {
    /// Data rate of the DATA field, e.g. `{"bandwidth": "20", "kbps": 36000}`
    pub rate: RateSelector,
    /// Initial scrambler state (1 to 127)
    pub scrambler_seed: Option<u8>,
    /// Pick a fresh pseudo-random scrambler seed for every frame instead of `scrambler_seed`
    pub randomize_seed: Option<bool>,
    /// PSDUs longer than this are rejected. At most 4095.
    pub max_psdu_len: Option<usize>,
    pub short_threshold: Option<f64>,
    pub long_threshold: Option<f64>,
    /// Upper bound on the number of window positions a detector examines
    pub max_scan_len: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhyConfig {
    pub rate: DataRate,
    pub scrambler_seed: u8,
    pub randomize_seed: bool,
    pub max_psdu_len: usize,
    pub detector: DetectorConfig,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self {
            rate: DataRate::Bw20Mbps6,
            scrambler_seed: DEFAULT_SEED,
            randomize_seed: false,
            max_psdu_len: MAX_PSDU_LEN,
            detector: DetectorConfig::default(),
        }
    }
}

impl TryFrom<PhyConfigDes> for PhyConfig {
    type Error = PhyError;

    fn try_from(des: PhyConfigDes) -> Result<Self, PhyError> {
        let invalid = |msg: String| Err(PhyError::InvalidConfig(msg));

        let scrambler_seed = check_seed(des.scrambler_seed.unwrap_or(DEFAULT_SEED))
            .map_err(|e| PhyError::InvalidConfig(e.to_string()))?;
        let max_psdu_len = des.max_psdu_len.unwrap_or(MAX_PSDU_LEN);
        if max_psdu_len > MAX_PSDU_LEN {
            return invalid(format!(
                "max_psdu_len {} exceeds the limit of {}",
                max_psdu_len, MAX_PSDU_LEN
            ));
        }
        let detector = DetectorConfig {
            short_threshold: des.short_threshold.unwrap_or(DEFAULT_SHORT_THRESHOLD),
            long_threshold: des.long_threshold.unwrap_or(DEFAULT_LONG_THRESHOLD),
            max_scan_len: des.max_scan_len.unwrap_or(usize::MAX),
        };
        if !(detector.short_threshold > 0.) || !(detector.long_threshold > 0.) {
            return invalid("detection thresholds must be positive".to_string());
        }

        Ok(Self {
            rate: DataRate::try_from(des.rate)?,
            scrambler_seed,
            randomize_seed: des.randomize_seed.unwrap_or(false),
            max_psdu_len,
            detector,
        })
    }
}

impl PhyConfig {
    pub fn from_json(json: &str) -> Result<Self, PhyError> {
        let des: PhyConfigDes =
            serde_json::from_str(json).map_err(|e| PhyError::InvalidConfig(e.to_string()))?;
        Self::try_from(des)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PhyError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PhyError::InvalidConfig(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&json)
    }
}
