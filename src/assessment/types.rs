//! Assessment data types
//!
//! This module defines the raw event records that feed the assessment engine and
//! the metrics, pathway map, vulnerabilities and recommendations it produces.
//! Field names follow the camelCase wire format used by the transport layer.

use serde::{Deserialize, Serialize};

/// Digital behavior category label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BehaviorCategory {
    Productive,
    Social,
    Entertainment,
    Communication,
    #[default]
    #[serde(other)]
    Other,
}

/// Decision style label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecisionKind {
    Rational,
    Emotional,
    Impulsive,
    Intuitive,
    #[default]
    #[serde(other)]
    Other,
}

/// Attention episode label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttentionKind {
    Focused,
    MindWandering,
    TaskSwitch,
    #[default]
    #[serde(other)]
    Other,
}

/// A single digital behavior observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalBehaviorRecord {
    /// Behavior category
    #[serde(rename = "type", default)]
    pub category: BehaviorCategory,
    /// Focus level (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_level: Option<f64>,
    /// Whether the activity served an explicit goal
    #[serde(default)]
    pub goal_directed: bool,
}

/// A single emotional response observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalResponseRecord {
    /// Response intensity (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    /// Time to return to baseline, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_time: Option<f64>,
    /// Awareness of the emotion (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awareness: Option<f64>,
    /// Present-moment awareness (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_moment_awareness: Option<f64>,
    /// Self-reported regulation (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulation: Option<f64>,
    /// Whether the expression fit the situation
    #[serde(default)]
    pub expression_appropriate: bool,
    /// Understanding of the emotion's cause (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub understanding: Option<f64>,
}

/// A single attention observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionRecord {
    /// Focused time within the observation window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Length of the observation window (same unit as `duration`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    /// Episode label
    #[serde(rename = "type", default)]
    pub kind: AttentionKind,
    /// Task switch efficiency (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_efficiency: Option<f64>,
    /// Sustained focus (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustained_focus: Option<f64>,
    /// Selective focus (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective_focus: Option<f64>,
    /// Divided focus (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divided_focus: Option<f64>,
}

/// A single decision observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    /// Decision style
    #[serde(rename = "type", default)]
    pub kind: DecisionKind,
    /// Whether the decision was planned ahead
    #[serde(default)]
    pub planned: bool,
}

/// Raw input to one assessment.
///
/// A sequence that is `None` (or empty) contributes nothing to the scores that
/// depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssessmentInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_behavior: Option<Vec<DigitalBehaviorRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_responses: Option<Vec<EmotionalResponseRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention_metrics: Option<Vec<AttentionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_patterns: Option<Vec<DecisionRecord>>,
}

/// One of the six neural metrics, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NeuralMetric {
    PfcActivation,
    AmygdalaRegulation,
    DefaultModeNetwork,
    ExecutiveFunction,
    EmotionalRegulation,
    AttentionControl,
}

impl NeuralMetric {
    /// All metrics in canonical order
    pub const ALL: [NeuralMetric; 6] = [
        NeuralMetric::PfcActivation,
        NeuralMetric::AmygdalaRegulation,
        NeuralMetric::DefaultModeNetwork,
        NeuralMetric::ExecutiveFunction,
        NeuralMetric::EmotionalRegulation,
        NeuralMetric::AttentionControl,
    ];

    /// Wire name of the metric
    pub fn name(self) -> &'static str {
        match self {
            NeuralMetric::PfcActivation => "pfcActivation",
            NeuralMetric::AmygdalaRegulation => "amygdalaRegulation",
            NeuralMetric::DefaultModeNetwork => "defaultModeNetwork",
            NeuralMetric::ExecutiveFunction => "executiveFunction",
            NeuralMetric::EmotionalRegulation => "emotionalRegulation",
            NeuralMetric::AttentionControl => "attentionControl",
        }
    }
}

/// The six neural metric scores, each in [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeuralMetrics {
    pub pfc_activation: f64,
    pub amygdala_regulation: f64,
    pub default_mode_network: f64,
    pub executive_function: f64,
    pub emotional_regulation: f64,
    pub attention_control: f64,
}

impl NeuralMetrics {
    /// Score for a single metric
    pub fn get(&self, metric: NeuralMetric) -> f64 {
        match metric {
            NeuralMetric::PfcActivation => self.pfc_activation,
            NeuralMetric::AmygdalaRegulation => self.amygdala_regulation,
            NeuralMetric::DefaultModeNetwork => self.default_mode_network,
            NeuralMetric::ExecutiveFunction => self.executive_function,
            NeuralMetric::EmotionalRegulation => self.emotional_regulation,
            NeuralMetric::AttentionControl => self.attention_control,
        }
    }

    /// Build metrics with every field set to the same score
    pub fn uniform(score: f64) -> Self {
        Self {
            pfc_activation: score,
            amygdala_regulation: score,
            default_mode_network: score,
            executive_function: score,
            emotional_regulation: score,
            attention_control: score,
        }
    }
}

/// A pathway node: one metric as strength, two related metrics as connections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayNode {
    pub strength: f64,
    /// Serialized as a JSON object whose keys keep this order
    #[serde(with = "ordered_connections")]
    pub connections: Vec<(NeuralMetric, f64)>,
}

mod ordered_connections {
    use super::NeuralMetric;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(
        connections: &[(NeuralMetric, f64)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(connections.len()))?;
        for (metric, value) in connections {
            map.serialize_entry(metric, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(NeuralMetric, f64)>, D::Error> {
        struct ConnectionsVisitor;

        impl<'de> Visitor<'de> for ConnectionsVisitor {
            type Value = Vec<(NeuralMetric, f64)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of metric names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut connections = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    connections.push(entry);
                }
                Ok(connections)
            }
        }

        deserializer.deserialize_map(ConnectionsVisitor)
    }
}

/// Fixed three-node grouping of the neural metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayMap {
    pub cognitive_control: PathwayNode,
    pub emotional_processing: PathwayNode,
    pub self_awareness: PathwayNode,
}

/// Area label attached to a vulnerability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VulnerabilityArea {
    #[serde(rename = "Cognitive Control")]
    CognitiveControl,
    #[serde(rename = "Emotional Processing")]
    EmotionalProcessing,
    #[serde(rename = "Self-Awareness")]
    SelfAwareness,
    #[serde(rename = "Executive Function")]
    ExecutiveFunction,
    #[serde(rename = "Emotional Regulation")]
    EmotionalRegulation,
    #[serde(rename = "Attention Control")]
    AttentionControl,
}

impl VulnerabilityArea {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            VulnerabilityArea::CognitiveControl => "Cognitive Control",
            VulnerabilityArea::EmotionalProcessing => "Emotional Processing",
            VulnerabilityArea::SelfAwareness => "Self-Awareness",
            VulnerabilityArea::ExecutiveFunction => "Executive Function",
            VulnerabilityArea::EmotionalRegulation => "Emotional Regulation",
            VulnerabilityArea::AttentionControl => "Attention Control",
        }
    }

    /// The metric this area is flagged from
    pub fn metric(self) -> NeuralMetric {
        match self {
            VulnerabilityArea::CognitiveControl => NeuralMetric::PfcActivation,
            VulnerabilityArea::EmotionalProcessing => NeuralMetric::AmygdalaRegulation,
            VulnerabilityArea::SelfAwareness => NeuralMetric::DefaultModeNetwork,
            VulnerabilityArea::ExecutiveFunction => NeuralMetric::ExecutiveFunction,
            VulnerabilityArea::EmotionalRegulation => NeuralMetric::EmotionalRegulation,
            VulnerabilityArea::AttentionControl => NeuralMetric::AttentionControl,
        }
    }
}

/// A metric flagged below the vulnerability threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub area: VulnerabilityArea,
    pub description: String,
    pub impact: String,
    pub recommendations: Vec<String>,
}

/// Recommendations bucketed by horizon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub short_term: Vec<String>,
    pub medium_term: Vec<String>,
    pub long_term: Vec<String>,
}

impl Recommendations {
    /// True when no horizon carries a recommendation
    pub fn is_empty(&self) -> bool {
        self.short_term.is_empty() && self.medium_term.is_empty() && self.long_term.is_empty()
    }
}

/// Result of one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub neural_metrics: NeuralMetrics,
    pub pathway_map: PathwayMap,
    pub vulnerabilities: Vec<Vulnerability>,
    pub recommendations: Recommendations,
}
