//! Assessment input adapter
//!
//! Parses raw assessment JSON and validates record fields before scoring.

use crate::assessment::types::{
    AttentionRecord, DigitalBehaviorRecord, EmotionalResponseRecord, RawAssessmentInput,
};
use crate::error::AssessmentError;
use serde::Serialize;

/// Upper bound of every 0-10 level field
const MAX_LEVEL: f64 = 10.0;

/// A single validation problem, located by sequence name and record index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputIssue {
    pub sequence: &'static str,
    pub index: usize,
    pub message: String,
}

impl std::fmt::Display for InputIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.sequence, self.index, self.message)
    }
}

/// Parse raw assessment JSON without validating it
pub fn parse_input(json: &str) -> Result<RawAssessmentInput, AssessmentError> {
    serde_json::from_str(json)
        .map_err(|e| AssessmentError::ParseError(e.to_string()))
}

/// Validate every record and fail on the first problem
pub fn validate_input(input: &RawAssessmentInput) -> Result<(), AssessmentError> {
    match collect_issues(input).into_iter().next() {
        Some(issue) => Err(AssessmentError::InvalidInput(issue.to_string())),
        None => Ok(()),
    }
}

/// Validate every record and report all problems
pub fn collect_issues(input: &RawAssessmentInput) -> Vec<InputIssue> {
    let mut issues = Vec::new();

    if let Some(records) = &input.digital_behavior {
        for (index, record) in records.iter().enumerate() {
            check_behavior(record, index, &mut issues);
        }
    }
    if let Some(records) = &input.emotional_responses {
        for (index, record) in records.iter().enumerate() {
            check_emotion(record, index, &mut issues);
        }
    }
    if let Some(records) = &input.attention_metrics {
        for (index, record) in records.iter().enumerate() {
            check_attention(record, index, &mut issues);
        }
    }
    // Decision records carry only a label and a flag; serde already enforces both.

    issues
}

fn check_behavior(record: &DigitalBehaviorRecord, index: usize, issues: &mut Vec<InputIssue>) {
    const SEQ: &str = "digitalBehavior";
    check_level(SEQ, index, "focusLevel", record.focus_level, issues);
}

fn check_emotion(record: &EmotionalResponseRecord, index: usize, issues: &mut Vec<InputIssue>) {
    const SEQ: &str = "emotionalResponses";
    check_level(SEQ, index, "intensity", record.intensity, issues);
    check_time(SEQ, index, "recoveryTime", record.recovery_time, issues);
    check_level(SEQ, index, "awareness", record.awareness, issues);
    check_level(
        SEQ,
        index,
        "presentMomentAwareness",
        record.present_moment_awareness,
        issues,
    );
    check_level(SEQ, index, "regulation", record.regulation, issues);
    check_level(SEQ, index, "understanding", record.understanding, issues);
}

fn check_attention(record: &AttentionRecord, index: usize, issues: &mut Vec<InputIssue>) {
    const SEQ: &str = "attentionMetrics";
    let duration_ok = check_time(SEQ, index, "duration", record.duration, issues);
    let total_ok = check_time(SEQ, index, "totalTime", record.total_time, issues);

    if let (true, true, Some(duration), Some(total)) =
        (duration_ok, total_ok, record.duration, record.total_time)
    {
        if duration > total {
            issues.push(InputIssue {
                sequence: SEQ,
                index,
                message: format!("duration {duration} exceeds totalTime {total}"),
            });
        }
    }

    check_level(SEQ, index, "switchEfficiency", record.switch_efficiency, issues);
    check_level(SEQ, index, "sustainedFocus", record.sustained_focus, issues);
    check_level(SEQ, index, "selectiveFocus", record.selective_focus, issues);
    check_level(SEQ, index, "dividedFocus", record.divided_focus, issues);
}

/// Returns false when the value is present and out of range
fn check_level(
    sequence: &'static str,
    index: usize,
    field: &str,
    value: Option<f64>,
    issues: &mut Vec<InputIssue>,
) -> bool {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=MAX_LEVEL).contains(&v) => {
            issues.push(InputIssue {
                sequence,
                index,
                message: format!("{field} must be within [0, {MAX_LEVEL}], got {v}"),
            });
            false
        }
        _ => true,
    }
}

/// Returns false when the value is present and negative or non-finite
fn check_time(
    sequence: &'static str,
    index: usize,
    field: &str,
    value: Option<f64>,
    issues: &mut Vec<InputIssue>,
) -> bool {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            issues.push(InputIssue {
                sequence,
                index,
                message: format!("{field} must be a non-negative time, got {v}"),
            });
            false
        }
        _ => true,
    }
}
