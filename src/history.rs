//! Per-user event history
//!
//! Keeps the four raw event sequences with the time each record was submitted and
//! drops anything older than the retention window. The history is what the
//! persistence layer stores; `to_input` turns it into assessment input.

use crate::assessment::types::{
    AttentionRecord, DecisionRecord, DigitalBehaviorRecord, EmotionalResponseRecord,
    RawAssessmentInput,
};
use crate::config::DEFAULT_RETENTION_DAYS;
use crate::error::AssessmentError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A record with its submission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamped<T> {
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: T,
}

/// Rolling event history for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHistory {
    /// Records at or before `now - retention_days` are dropped
    retention_days: u32,
    #[serde(default)]
    digital_behavior: Vec<Timestamped<DigitalBehaviorRecord>>,
    #[serde(default)]
    emotional_responses: Vec<Timestamped<EmotionalResponseRecord>>,
    #[serde(default)]
    attention_metrics: Vec<Timestamped<AttentionRecord>>,
    #[serde(default)]
    decision_patterns: Vec<Timestamped<DecisionRecord>>,
}

impl Default for EventHistory {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_DAYS)
    }
}

impl EventHistory {
    /// Create an empty history with the given retention window in days
    pub fn new(retention_days: u32) -> Self {
        Self {
            retention_days,
            digital_behavior: Vec::new(),
            emotional_responses: Vec::new(),
            attention_metrics: Vec::new(),
            decision_patterns: Vec::new(),
        }
    }

    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    /// Change the retention window. Takes effect at the next record or prune.
    pub fn set_retention_days(&mut self, retention_days: u32) {
        self.retention_days = retention_days;
    }

    /// Oldest instant still excluded from the window. A window reaching past
    /// the representable date range keeps everything.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_days(i64::from(self.retention_days))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Append a digital behavior record and expire old behavior records
    pub fn record_behavior(&mut self, record: DigitalBehaviorRecord, now: DateTime<Utc>) {
        let cutoff = self.cutoff(now);
        push_and_expire(&mut self.digital_behavior, record, now, cutoff);
    }

    /// Append an emotional response and expire old responses
    pub fn record_emotion(&mut self, record: EmotionalResponseRecord, now: DateTime<Utc>) {
        let cutoff = self.cutoff(now);
        push_and_expire(&mut self.emotional_responses, record, now, cutoff);
    }

    /// Append an attention record and expire old attention records
    pub fn record_attention(&mut self, record: AttentionRecord, now: DateTime<Utc>) {
        let cutoff = self.cutoff(now);
        push_and_expire(&mut self.attention_metrics, record, now, cutoff);
    }

    /// Append a decision record and expire old decision records
    pub fn record_decision(&mut self, record: DecisionRecord, now: DateTime<Utc>) {
        let cutoff = self.cutoff(now);
        push_and_expire(&mut self.decision_patterns, record, now, cutoff);
    }

    /// Expire records in every sequence. Returns the number removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let cutoff = self.cutoff(now);
        expire(&mut self.digital_behavior, cutoff)
            + expire(&mut self.emotional_responses, cutoff)
            + expire(&mut self.attention_metrics, cutoff)
            + expire(&mut self.decision_patterns, cutoff)
    }

    /// Build assessment input. Empty sequences are left absent.
    pub fn to_input(&self) -> RawAssessmentInput {
        RawAssessmentInput {
            digital_behavior: records(&self.digital_behavior),
            emotional_responses: records(&self.emotional_responses),
            attention_metrics: records(&self.attention_metrics),
            decision_patterns: records(&self.decision_patterns),
        }
    }

    /// Total number of records across all sequences
    pub fn len(&self) -> usize {
        self.digital_behavior.len()
            + self.emotional_responses.len()
            + self.attention_metrics.len()
            + self.decision_patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load history from JSON. A zero retention window is rejected.
    pub fn from_json(json: &str) -> Result<Self, AssessmentError> {
        let history: Self = serde_json::from_str(json)?;
        if history.retention_days == 0 {
            return Err(AssessmentError::InvalidInput(
                "history retentionDays must be at least 1".to_string(),
            ));
        }
        Ok(history)
    }

    /// Serialize history to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clear all records, keeping the retention window
    pub fn clear(&mut self) {
        self.digital_behavior.clear();
        self.emotional_responses.clear();
        self.attention_metrics.clear();
        self.decision_patterns.clear();
    }
}

fn push_and_expire<T>(
    sequence: &mut Vec<Timestamped<T>>,
    record: T,
    now: DateTime<Utc>,
    cutoff: DateTime<Utc>,
) {
    sequence.push(Timestamped {
        recorded_at: now,
        record,
    });
    expire(sequence, cutoff);
}

fn expire<T>(sequence: &mut Vec<Timestamped<T>>, cutoff: DateTime<Utc>) -> usize {
    let before = sequence.len();
    sequence.retain(|entry| entry.recorded_at > cutoff);
    before - sequence.len()
}

fn records<T: Clone>(sequence: &[Timestamped<T>]) -> Option<Vec<T>> {
    if sequence.is_empty() {
        return None;
    }
    Some(sequence.iter().map(|entry| entry.record.clone()).collect())
}
