//! Persistence interfaces
//!
//! The engine itself never performs I/O. These traits describe what the
//! surrounding service needs from storage; `MemoryStore` is an in-process
//! implementation used by tests and the CLI.

use crate::assessment::types::AssessmentReport;
use crate::error::AssessmentError;
use crate::history::EventHistory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// A stored assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: String,
    pub assessed_at: DateTime<Utc>,
    pub report: AssessmentReport,
}

impl AssessmentRecord {
    /// Wrap a report with a fresh identifier
    pub fn new(user_id: &str, assessed_at: DateTime<Utc>, report: AssessmentReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            assessed_at,
            report,
        }
    }
}

/// Storage for per-user event histories
pub trait EventStore: Send + Sync {
    /// Load a user's history, `None` if nothing was ever stored
    fn load_history(&self, user_id: &str) -> Result<Option<EventHistory>, AssessmentError>;

    /// Replace a user's history
    fn save_history(&self, user_id: &str, history: &EventHistory) -> Result<(), AssessmentError>;
}

/// Storage for assessment results
pub trait AssessmentStore: Send + Sync {
    /// Append an assessment to its user's record list
    fn append_assessment(&self, record: AssessmentRecord) -> Result<(), AssessmentError>;

    /// A user's assessments, oldest first
    fn list_assessments(&self, user_id: &str) -> Result<Vec<AssessmentRecord>, AssessmentError>;
}

/// In-memory store guarded by read/write locks
#[derive(Debug, Default)]
pub struct MemoryStore {
    histories: RwLock<HashMap<String, EventHistory>>,
    assessments: RwLock<HashMap<String, Vec<AssessmentRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored history
    pub fn user_count(&self) -> Result<usize, AssessmentError> {
        let histories = self.histories.read().map_err(poisoned)?;
        Ok(histories.len())
    }
}

impl EventStore for MemoryStore {
    fn load_history(&self, user_id: &str) -> Result<Option<EventHistory>, AssessmentError> {
        let histories = self.histories.read().map_err(poisoned)?;
        Ok(histories.get(user_id).cloned())
    }

    fn save_history(&self, user_id: &str, history: &EventHistory) -> Result<(), AssessmentError> {
        let mut histories = self.histories.write().map_err(poisoned)?;
        histories.insert(user_id.to_string(), history.clone());
        Ok(())
    }
}

impl AssessmentStore for MemoryStore {
    fn append_assessment(&self, record: AssessmentRecord) -> Result<(), AssessmentError> {
        let mut assessments = self.assessments.write().map_err(poisoned)?;
        assessments
            .entry(record.user_id.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    fn list_assessments(&self, user_id: &str) -> Result<Vec<AssessmentRecord>, AssessmentError> {
        let assessments = self.assessments.read().map_err(poisoned)?;
        Ok(assessments.get(user_id).cloned().unwrap_or_default())
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> AssessmentError {
    AssessmentError::StoreError(format!("lock poisoned: {e}"))
}
