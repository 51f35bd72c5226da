//! Assessment configuration
//!
//! Thresholds used by the scoring engine. The defaults reproduce the fixed
//! constants of the assessment model; overriding them is intended for
//! experimentation and tests.

use crate::error::AssessmentError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metrics strictly below this are flagged as vulnerabilities
pub const DEFAULT_VULNERABILITY_THRESHOLD: f64 = 60.0;

/// Metrics strictly below this receive medium/long-term guidance
pub const DEFAULT_GUIDANCE_THRESHOLD: f64 = 70.0;

/// Level fields (0-10) strictly above this count as "high"
pub const DEFAULT_ELEVATED_LEVEL: f64 = 7.0;

/// Emotional intensity strictly below this counts as a stable response
pub const DEFAULT_STABLE_INTENSITY: f64 = 7.0;

/// Recovery time normalization baseline (1 hour)
pub const DEFAULT_RECOVERY_BASELINE_SEC: f64 = 3600.0;

/// Event history retention window in days
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Longest accepted retention window (100 years)
pub const MAX_RETENTION_DAYS: u32 = 36_500;

/// Configuration for the assessment engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Vulnerability threshold (0-100)
    pub vulnerability_threshold: f64,
    /// Medium/long-term guidance threshold (0-100)
    pub guidance_threshold: f64,
    /// Bar for "high" level fields (0-10)
    pub elevated_level: f64,
    /// Bar for stable emotional intensity (0-10)
    pub stable_intensity: f64,
    /// Recovery time baseline in seconds
    pub recovery_baseline_sec: f64,
    /// Days of event history kept per user
    pub retention_days: u32,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            vulnerability_threshold: DEFAULT_VULNERABILITY_THRESHOLD,
            guidance_threshold: DEFAULT_GUIDANCE_THRESHOLD,
            elevated_level: DEFAULT_ELEVATED_LEVEL,
            stable_intensity: DEFAULT_STABLE_INTENSITY,
            recovery_baseline_sec: DEFAULT_RECOVERY_BASELINE_SEC,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl AssessmentConfig {
    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, AssessmentError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AssessmentError::ConfigError(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self, AssessmentError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AssessmentError::ConfigError(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json(&self) -> Result<String, AssessmentError> {
        serde_json::to_string_pretty(self).map_err(AssessmentError::JsonError)
    }

    /// Check that every threshold lies in its domain
    pub fn validate(&self) -> Result<(), AssessmentError> {
        check_range("vulnerability_threshold", self.vulnerability_threshold, 0.0, 100.0)?;
        check_range("guidance_threshold", self.guidance_threshold, 0.0, 100.0)?;
        check_range("elevated_level", self.elevated_level, 0.0, 10.0)?;
        check_range("stable_intensity", self.stable_intensity, 0.0, 10.0)?;

        if !self.recovery_baseline_sec.is_finite() || self.recovery_baseline_sec <= 0.0 {
            return Err(AssessmentError::ConfigError(format!(
                "recovery_baseline_sec must be positive, got {}",
                self.recovery_baseline_sec
            )));
        }
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(AssessmentError::ConfigError(format!(
                "retention_days must be within [1, {MAX_RETENTION_DAYS}], got {}",
                self.retention_days
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), AssessmentError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AssessmentError::ConfigError(format!(
            "{name} must be within [{min}, {max}], got {value}"
        )))
    }
}
