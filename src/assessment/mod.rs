//! Neural assessment module
//!
//! This module converts raw behavioral, emotional, attention and decision events
//! into six neural metrics, a pathway map, vulnerability findings and tiered
//! recommendations.
//!
//! Pipeline: Input JSON → Input adapter → Metrics → Pathways → Vulnerabilities → Recommendations

pub mod input;
pub mod metrics;
pub mod pathway;
pub mod pipeline;
pub mod recommendation;
pub mod types;
pub mod vulnerability;

pub use input::{collect_issues, parse_input, validate_input, InputIssue};
pub use pipeline::{assess, assess_json, Assessor};
pub use types::{
    AssessmentReport, AttentionKind, AttentionRecord, BehaviorCategory, DecisionKind,
    DecisionRecord, DigitalBehaviorRecord, EmotionalResponseRecord, NeuralMetric, NeuralMetrics,
    PathwayMap, PathwayNode, RawAssessmentInput, Recommendations, Vulnerability,
    VulnerabilityArea,
};
pub use vulnerability::CATALOG;
