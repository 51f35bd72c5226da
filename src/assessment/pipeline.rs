//! Assessment pipeline orchestration
//!
//! This module provides the public API for a single assessment. It runs the
//! stages in order: validate → metrics → pathway map → vulnerabilities →
//! recommendations. Every call builds its own working values, so an
//! `Assessor` can be shared freely across threads.

use crate::assessment::input::{parse_input, validate_input};
use crate::assessment::metrics::MetricCalculator;
use crate::assessment::pathway::map_pathways;
use crate::assessment::recommendation::generate_recommendations;
use crate::assessment::types::{AssessmentReport, RawAssessmentInput};
use crate::assessment::vulnerability::detect_vulnerabilities;
use crate::config::AssessmentConfig;
use crate::error::AssessmentError;
use tracing::debug;

/// Assess raw input JSON and return the report as JSON (stateless, one-shot).
///
/// # Example
/// ```ignore
/// let report_json = assess_json(r#"{ "decisionPatterns": [{ "type": "rational" }] }"#)?;
/// ```
pub fn assess_json(input_json: &str) -> Result<String, AssessmentError> {
    let input = parse_input(input_json)?;
    let report = Assessor::new().assess(&input)?;
    serde_json::to_string_pretty(&report).map_err(AssessmentError::JsonError)
}

/// Assess raw input with default thresholds
pub fn assess(input: &RawAssessmentInput) -> Result<AssessmentReport, AssessmentError> {
    Assessor::new().assess(input)
}

/// Assessment engine bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct Assessor {
    config: AssessmentConfig,
}

impl Assessor {
    /// Create an assessor with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assessor with a validated configuration
    pub fn with_config(config: AssessmentConfig) -> Result<Self, AssessmentError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Validate the input and produce a full report
    pub fn assess(&self, input: &RawAssessmentInput) -> Result<AssessmentReport, AssessmentError> {
        // Stage 1: Validate records
        validate_input(input)?;

        // Stage 2: Calculate metrics
        let neural_metrics = MetricCalculator::new(&self.config).calculate(input);
        debug!(?neural_metrics, "calculated neural metrics");

        // Stage 3: Map pathways
        let pathway_map = map_pathways(&neural_metrics);

        // Stage 4: Detect vulnerabilities
        let vulnerabilities =
            detect_vulnerabilities(&neural_metrics, self.config.vulnerability_threshold);

        // Stage 5: Generate recommendations
        let recommendations = generate_recommendations(
            &neural_metrics,
            &vulnerabilities,
            self.config.guidance_threshold,
        );
        debug!(
            vulnerabilities = vulnerabilities.len(),
            short_term = recommendations.short_term.len(),
            "assessment complete"
        );

        Ok(AssessmentReport {
            neural_metrics,
            pathway_map,
            vulnerabilities,
            recommendations,
        })
    }
}
