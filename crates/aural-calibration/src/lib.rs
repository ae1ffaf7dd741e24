//! Level metering, calibration-freshness checking, and per-speaker
//! delay/gain/FIR calibration (spec §4.1 level metering, §4.7 post-stage
//! step 6, §6 calibration freshness).

pub mod checksum;
pub mod freshness;
pub mod meter;
pub mod speaker_calibration;

pub use checksum::{compute_checksum, ChecksumBuilder, SpeakerAttributes};
pub use freshness::{check_freshness, CalibrationInfo, CalibrationWarning, DEFAULT_MAX_AGE_DAYS};
pub use meter::ReceiverMeterBank;
pub use speaker_calibration::SpeakerCalibration;
