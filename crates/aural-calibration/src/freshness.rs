//! Calibration freshness checking (spec §6): a layout's recorded checksum
//! and age are compared against what the core computes/observes now, and
//! any mismatch is surfaced as a warning rather than a hard failure.

use thiserror::Error;

/// A non-fatal condition found while checking a layout's calibration
/// metadata against the live scene.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CalibrationWarning {
    #[error("calibration checksum mismatch: layout records {recorded:#x}, scene computes {computed:#x}")]
    ChecksumMismatch { recorded: u64, computed: u64 },

    #[error("calibration is {age_days} days old, exceeding the {max_age_days}-day freshness threshold")]
    Stale { age_days: u32, max_age_days: u32 },

    #[error("layout calibrated for receiver type '{calibfor}', but the scene's receiver is '{actual}'")]
    ReceiverTypeMismatch { calibfor: String, actual: String },
}

/// The calibration metadata carried by a speaker layout (spec §3's
/// `caliblevel`/`calibdate`/`calibfor` attribute family, §6).
#[derive(Debug, Clone)]
pub struct CalibrationInfo {
    /// Day the layout was calibrated, as days since an arbitrary epoch —
    /// the core only ever compares differences, never an absolute date.
    pub calibdate_days: u32,
    /// Verbatim receiver-type identifier the layout was calibrated for.
    pub calibfor: String,
    /// Checksum recorded in the layout file at calibration time.
    pub checksum: u64,
}

/// Default freshness threshold per spec §6: 30 days.
pub const DEFAULT_MAX_AGE_DAYS: u32 = 30;

/// Checks `info` against the scene's freshly computed `checksum`, the
/// scene's actual receiver-type identifier, and the current day count,
/// returning every warning found (empty if calibration is current).
pub fn check_freshness(
    info: &CalibrationInfo,
    computed_checksum: u64,
    actual_receiver_type: &str,
    now_days: u32,
    max_age_days: u32,
) -> Vec<CalibrationWarning> {
    let mut warnings = Vec::new();

    if info.checksum != computed_checksum {
        warnings.push(CalibrationWarning::ChecksumMismatch { recorded: info.checksum, computed: computed_checksum });
    }

    let age_days = now_days.saturating_sub(info.calibdate_days);
    if age_days > max_age_days {
        warnings.push(CalibrationWarning::Stale { age_days, max_age_days });
    }

    if info.calibfor != actual_receiver_type {
        warnings.push(CalibrationWarning::ReceiverTypeMismatch {
            calibfor: info.calibfor.clone(),
            actual: actual_receiver_type.to_string(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_info() -> CalibrationInfo {
        CalibrationInfo { calibdate_days: 100, calibfor: "vbap2d".to_string(), checksum: 0xdead_beef }
    }

    #[test]
    fn matching_everything_produces_no_warnings() {
        let warnings = check_freshness(&fresh_info(), 0xdead_beef, "vbap2d", 105, DEFAULT_MAX_AGE_DAYS);
        assert!(warnings.is_empty());
    }

    #[test]
    fn mismatched_checksum_is_reported() {
        let warnings = check_freshness(&fresh_info(), 0xfeed_face, "vbap2d", 105, DEFAULT_MAX_AGE_DAYS);
        assert!(warnings.iter().any(|w| matches!(w, CalibrationWarning::ChecksumMismatch { .. })));
    }

    #[test]
    fn calibration_older_than_threshold_is_stale() {
        let warnings = check_freshness(&fresh_info(), 0xdead_beef, "vbap2d", 100 + 31, DEFAULT_MAX_AGE_DAYS);
        assert!(warnings.iter().any(|w| matches!(w, CalibrationWarning::Stale { .. })));
    }

    #[test]
    fn receiver_type_mismatch_is_reported() {
        let warnings = check_freshness(&fresh_info(), 0xdead_beef, "hrtf", 105, DEFAULT_MAX_AGE_DAYS);
        assert!(warnings.iter().any(|w| matches!(w, CalibrationWarning::ReceiverTypeMismatch { .. })));
    }
}
