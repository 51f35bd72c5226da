//! Neural assessment service
//!
//! Ties the assessment engine to the persistence interfaces: records submitted
//! events into a user's rolling history, re-assesses, and keeps an assessment
//! log for history and progress queries.
//!
//! Submissions for the same user are load-modify-save against the store, so
//! concurrent submissions for one user are last-writer-wins unless the store
//! serializes them.

use crate::assessment::input::validate_input;
use crate::assessment::pipeline::Assessor;
use crate::assessment::types::{
    AssessmentReport, AttentionRecord, DecisionRecord, DigitalBehaviorRecord,
    EmotionalResponseRecord, NeuralMetric, PathwayMap, RawAssessmentInput, Vulnerability,
    VulnerabilityArea,
};
use crate::error::AssessmentError;
use crate::history::EventHistory;
use crate::store::{AssessmentRecord, AssessmentStore, EventStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Change between a user's two most recent assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub user_id: String,
    pub assessments_recorded: usize,
    pub latest_assessed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_assessed_at: Option<DateTime<Utc>>,
    /// Latest minus previous score, empty when there is no previous assessment
    pub metric_deltas: BTreeMap<NeuralMetric, f64>,
    /// Areas flagged previously but not anymore
    pub resolved_areas: Vec<VulnerabilityArea>,
    /// Areas flagged now but not previously
    pub emerging_areas: Vec<VulnerabilityArea>,
}

/// Service façade over an event/assessment store
pub struct NeuralService<S> {
    store: S,
    assessor: Assessor,
}

impl<S> NeuralService<S>
where
    S: EventStore + AssessmentStore,
{
    /// Create a service with default thresholds
    pub fn new(store: S) -> Self {
        Self {
            store,
            assessor: Assessor::new(),
        }
    }

    /// Create a service with a specific assessor
    pub fn with_assessor(store: S, assessor: Assessor) -> Self {
        Self { store, assessor }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a digital behavior event, then re-assess
    pub fn submit_behavior(
        &self,
        user_id: &str,
        record: DigitalBehaviorRecord,
        now: DateTime<Utc>,
    ) -> Result<AssessmentReport, AssessmentError> {
        let single = RawAssessmentInput {
            digital_behavior: Some(vec![record.clone()]),
            ..Default::default()
        };
        self.submit(user_id, &single, now, |history| {
            history.record_behavior(record, now)
        })
    }

    /// Record an emotional response, then re-assess
    pub fn submit_emotion(
        &self,
        user_id: &str,
        record: EmotionalResponseRecord,
        now: DateTime<Utc>,
    ) -> Result<AssessmentReport, AssessmentError> {
        let single = RawAssessmentInput {
            emotional_responses: Some(vec![record.clone()]),
            ..Default::default()
        };
        self.submit(user_id, &single, now, |history| {
            history.record_emotion(record, now)
        })
    }

    /// Record an attention observation, then re-assess
    pub fn submit_attention(
        &self,
        user_id: &str,
        record: AttentionRecord,
        now: DateTime<Utc>,
    ) -> Result<AssessmentReport, AssessmentError> {
        let single = RawAssessmentInput {
            attention_metrics: Some(vec![record.clone()]),
            ..Default::default()
        };
        self.submit(user_id, &single, now, |history| {
            history.record_attention(record, now)
        })
    }

    /// Record a decision, then re-assess
    pub fn submit_decision(
        &self,
        user_id: &str,
        record: DecisionRecord,
        now: DateTime<Utc>,
    ) -> Result<AssessmentReport, AssessmentError> {
        let single = RawAssessmentInput {
            decision_patterns: Some(vec![record.clone()]),
            ..Default::default()
        };
        self.submit(user_id, &single, now, |history| {
            history.record_decision(record, now)
        })
    }

    /// Assess the user's current history and log the result
    pub fn assess(&self, user_id: &str, now: DateTime<Utc>) -> Result<AssessmentReport, AssessmentError> {
        let report = self.evaluate(user_id, now)?;
        self.store
            .append_assessment(AssessmentRecord::new(user_id, now, report.clone()))?;
        info!(
            user_id,
            vulnerabilities = report.vulnerabilities.len(),
            "recorded assessment"
        );
        Ok(report)
    }

    /// Current pathway map, without logging an assessment
    pub fn pathway_map(&self, user_id: &str, now: DateTime<Utc>) -> Result<PathwayMap, AssessmentError> {
        Ok(self.evaluate(user_id, now)?.pathway_map)
    }

    /// Current vulnerabilities, without logging an assessment
    pub fn vulnerabilities(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Vulnerability>, AssessmentError> {
        Ok(self.evaluate(user_id, now)?.vulnerabilities)
    }

    /// Logged assessments, oldest first
    pub fn assessment_history(&self, user_id: &str) -> Result<Vec<AssessmentRecord>, AssessmentError> {
        self.store.list_assessments(user_id)
    }

    /// Compare the two most recent logged assessments
    pub fn track_progress(&self, user_id: &str) -> Result<ProgressReport, AssessmentError> {
        let records = self.store.list_assessments(user_id)?;
        let (latest, previous) = match records.as_slice() {
            [] => {
                return Err(AssessmentError::InsufficientHistory(format!(
                    "no assessments recorded for {user_id}"
                )))
            }
            [only] => (only, None),
            [.., prev, last] => (last, Some(prev)),
        };

        let latest_areas = areas(&latest.report.vulnerabilities);
        let (metric_deltas, previous_areas) = match previous {
            Some(prev) => {
                let deltas = NeuralMetric::ALL
                    .iter()
                    .map(|&m| {
                        let delta = latest.report.neural_metrics.get(m)
                            - prev.report.neural_metrics.get(m);
                        (m, delta)
                    })
                    .collect();
                (deltas, areas(&prev.report.vulnerabilities))
            }
            None => (BTreeMap::new(), Vec::new()),
        };

        let resolved_areas = previous_areas
            .iter()
            .filter(|a| !latest_areas.contains(*a))
            .copied()
            .collect();
        let emerging_areas = latest_areas
            .iter()
            .filter(|a| !previous_areas.contains(*a))
            .copied()
            .collect();

        Ok(ProgressReport {
            user_id: user_id.to_string(),
            assessments_recorded: records.len(),
            latest_assessed_at: latest.assessed_at,
            previous_assessed_at: previous.map(|p| p.assessed_at),
            metric_deltas,
            resolved_areas,
            emerging_areas,
        })
    }

    fn submit(
        &self,
        user_id: &str,
        single: &RawAssessmentInput,
        now: DateTime<Utc>,
        apply: impl FnOnce(&mut EventHistory),
    ) -> Result<AssessmentReport, AssessmentError> {
        if let Err(e) = validate_input(single) {
            warn!(user_id, error = %e, "rejected submitted record");
            return Err(e);
        }

        let mut history = self.load_or_default(user_id)?;
        apply(&mut history);
        self.store.save_history(user_id, &history)?;
        info!(user_id, records = history.len(), "stored submitted record");

        self.assess(user_id, now)
    }

    fn evaluate(&self, user_id: &str, now: DateTime<Utc>) -> Result<AssessmentReport, AssessmentError> {
        let mut history = self.load_or_default(user_id)?;
        let expired = history.prune(now);
        if expired > 0 {
            debug!(user_id, expired, "expired records outside retention window");
            self.store.save_history(user_id, &history)?;
        }
        self.assessor.assess(&history.to_input())
    }

    /// Stored histories are held to the configured window, whatever they carried
    fn load_or_default(&self, user_id: &str) -> Result<EventHistory, AssessmentError> {
        let retention_days = self.assessor.config().retention_days;
        let mut history = self
            .store
            .load_history(user_id)?
            .unwrap_or_else(|| EventHistory::new(retention_days));
        history.set_retention_days(retention_days);
        Ok(history)
    }
}

fn areas(vulnerabilities: &[Vulnerability]) -> Vec<VulnerabilityArea> {
    vulnerabilities.iter().map(|v| v.area).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::types::{BehaviorCategory, DecisionKind};
    use crate::config::AssessmentConfig;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn rational() -> DecisionRecord {
        DecisionRecord {
            kind: DecisionKind::Rational,
            planned: true,
        }
    }

    #[test]
    fn test_unknown_user_assesses_as_empty() {
        let service = NeuralService::new(MemoryStore::new());
        let report = service.assess("nobody", t0()).unwrap();
        assert_eq!(report.vulnerabilities.len(), 6);
        assert_eq!(service.assessment_history("nobody").unwrap().len(), 1);
    }

    #[test]
    fn test_submission_updates_scores() {
        let service = NeuralService::new(MemoryStore::new());

        let report = service.submit_decision("alice", rational(), t0()).unwrap();
        assert_eq!(report.neural_metrics.pfc_activation, 40.0);
        assert_eq!(report.neural_metrics.executive_function, 30.0);

        let report = service
            .submit_decision(
                "alice",
                DecisionRecord {
                    kind: DecisionKind::Emotional,
                    planned: false,
                },
                t0() + Duration::minutes(5),
            )
            .unwrap();
        assert_eq!(report.neural_metrics.pfc_activation, 20.0);

        let report = service
            .submit_behavior(
                "alice",
                DigitalBehaviorRecord {
                    category: BehaviorCategory::Productive,
                    focus_level: Some(9.0),
                    goal_directed: true,
                },
                t0() + Duration::minutes(10),
            )
            .unwrap();
        assert_eq!(report.neural_metrics.pfc_activation, 50.0);
        assert_eq!(service.assessment_history("alice").unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_submission_not_stored() {
        let service = NeuralService::new(MemoryStore::new());
        let err = service
            .submit_emotion(
                "alice",
                EmotionalResponseRecord {
                    intensity: Some(15.0),
                    ..Default::default()
                },
                t0(),
            )
            .unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidInput(_)));
        assert!(service.store().load_history("alice").unwrap().is_none());
        assert!(service.assessment_history("alice").unwrap().is_empty());
    }

    #[test]
    fn test_old_events_expire() {
        let service = NeuralService::new(MemoryStore::new());
        service.submit_decision("alice", rational(), t0()).unwrap();

        let later = t0() + Duration::days(31);
        let vulnerabilities = service.vulnerabilities("alice", later).unwrap();
        assert_eq!(vulnerabilities.len(), 6);

        let history = service.store().load_history("alice").unwrap().unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_custom_retention() {
        let config = AssessmentConfig {
            retention_days: 2,
            ..Default::default()
        };
        let service =
            NeuralService::with_assessor(MemoryStore::new(), Assessor::with_config(config).unwrap());
        service.submit_decision("alice", rational(), t0()).unwrap();

        let map = service.pathway_map("alice", t0() + Duration::days(1)).unwrap();
        assert_eq!(map.cognitive_control.strength, 40.0);

        let map = service.pathway_map("alice", t0() + Duration::days(3)).unwrap();
        assert_eq!(map.cognitive_control.strength, 0.0);
    }

    #[test]
    fn test_stored_history_uses_configured_window() {
        let config = AssessmentConfig {
            retention_days: 2,
            ..Default::default()
        };
        let service =
            NeuralService::with_assessor(MemoryStore::new(), Assessor::with_config(config).unwrap());

        let mut stale = EventHistory::new(365);
        stale.record_decision(rational(), t0());
        service.store().save_history("alice", &stale).unwrap();

        let map = service.pathway_map("alice", t0() + Duration::days(3)).unwrap();
        assert_eq!(map.cognitive_control.strength, 0.0);

        let history = service.store().load_history("alice").unwrap().unwrap();
        assert!(history.is_empty());
        assert_eq!(history.retention_days(), 2);
    }

    #[test]
    fn test_large_configured_window_does_not_panic() {
        let config = AssessmentConfig {
            retention_days: crate::config::MAX_RETENTION_DAYS,
            ..Default::default()
        };
        let service =
            NeuralService::with_assessor(MemoryStore::new(), Assessor::with_config(config).unwrap());

        let report = service.submit_decision("alice", rational(), t0()).unwrap();
        assert_eq!(report.neural_metrics.pfc_activation, 40.0);
    }

    #[test]
    fn test_oversized_window_rejected_by_config() {
        let err = AssessmentConfig::from_json(r#"{ "retention_days": 100000000 }"#).unwrap_err();
        assert!(matches!(err, AssessmentError::ConfigError(_)));
    }

    #[test]
    fn test_views_do_not_log_assessments() {
        let service = NeuralService::new(MemoryStore::new());
        service.pathway_map("alice", t0()).unwrap();
        service.vulnerabilities("alice", t0()).unwrap();
        assert!(service.assessment_history("alice").unwrap().is_empty());
    }

    #[test]
    fn test_progress_requires_an_assessment() {
        let service = NeuralService::new(MemoryStore::new());
        let err = service.track_progress("alice").unwrap_err();
        assert!(matches!(err, AssessmentError::InsufficientHistory(_)));
    }

    #[test]
    fn test_progress_single_assessment() {
        let service = NeuralService::new(MemoryStore::new());
        service.assess("alice", t0()).unwrap();

        let progress = service.track_progress("alice").unwrap();
        assert_eq!(progress.assessments_recorded, 1);
        assert!(progress.previous_assessed_at.is_none());
        assert!(progress.metric_deltas.is_empty());
        assert!(progress.resolved_areas.is_empty());
        assert_eq!(progress.emerging_areas.len(), 6);
    }

    #[test]
    fn test_progress_between_assessments() {
        let service = NeuralService::new(MemoryStore::new());
        service.assess("alice", t0()).unwrap();

        service.submit_decision("alice", rational(), t0() + Duration::hours(1)).unwrap();
        for _ in 0..3 {
            service
                .submit_behavior(
                    "alice",
                    DigitalBehaviorRecord {
                        category: BehaviorCategory::Productive,
                        focus_level: Some(9.0),
                        goal_directed: true,
                    },
                    t0() + Duration::hours(2),
                )
                .unwrap();
        }

        let progress = service.track_progress("alice").unwrap();
        assert_eq!(progress.assessments_recorded, 5);
        // The last two assessments differ by one more productive record only
        assert_eq!(progress.metric_deltas[&NeuralMetric::PfcActivation], 0.0);
        assert!(progress.resolved_areas.is_empty());
        assert!(progress.emerging_areas.is_empty());
    }

    #[test]
    fn test_progress_resolves_areas() {
        let service = NeuralService::new(MemoryStore::new());
        service.assess("alice", t0()).unwrap();
        service
            .submit_behavior(
                "alice",
                DigitalBehaviorRecord {
                    category: BehaviorCategory::Productive,
                    focus_level: Some(9.0),
                    goal_directed: true,
                },
                t0() + Duration::hours(1),
            )
            .unwrap();
        service.submit_decision("alice", rational(), t0() + Duration::hours(1)).unwrap();

        // pfc = 40 + 30 = 70, executive = 30 + 40 = 70: both areas clear
        let progress = service.track_progress("alice").unwrap();
        assert_eq!(progress.metric_deltas[&NeuralMetric::PfcActivation], 40.0);
        assert_eq!(
            progress.resolved_areas,
            vec![
                VulnerabilityArea::CognitiveControl,
                VulnerabilityArea::ExecutiveFunction,
            ]
        );
        assert!(progress.emerging_areas.is_empty());
    }
}
