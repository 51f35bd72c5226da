//! Vulnerability detection
//!
//! Flags every metric strictly below the vulnerability threshold, in canonical
//! metric order, with the fixed description, impact and remediation list for
//! its area.

use crate::assessment::types::{NeuralMetrics, Vulnerability, VulnerabilityArea};

/// Static description of one vulnerability area
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub area: VulnerabilityArea,
    pub description: &'static str,
    pub impact: &'static str,
    pub recommendations: [&'static str; 3],
}

impl CatalogEntry {
    fn to_vulnerability(self) -> Vulnerability {
        Vulnerability {
            area: self.area,
            description: self.description.to_string(),
            impact: self.impact.to_string(),
            recommendations: self.recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Vulnerability catalog in canonical metric order
pub const CATALOG: [CatalogEntry; 6] = [
    CatalogEntry {
        area: VulnerabilityArea::CognitiveControl,
        description: "Reduced prefrontal cortex activation",
        impact: "May affect decision-making and impulse control",
        recommendations: [
            "Practice mindfulness meditation",
            "Engage in cognitive training exercises",
            "Implement structured decision-making processes",
        ],
    },
    CatalogEntry {
        area: VulnerabilityArea::EmotionalProcessing,
        description: "Difficulty regulating emotional responses",
        impact: "May lead to increased stress and anxiety",
        recommendations: [
            "Practice emotion regulation techniques",
            "Develop stress management strategies",
            "Engage in regular physical exercise",
        ],
    },
    CatalogEntry {
        area: VulnerabilityArea::SelfAwareness,
        description: "Reduced default mode network activity",
        impact: "May affect self-reflection and introspection",
        recommendations: [
            "Practice mindfulness meditation",
            "Engage in journaling",
            "Schedule regular self-reflection time",
        ],
    },
    CatalogEntry {
        area: VulnerabilityArea::ExecutiveFunction,
        description: "Challenges with planning and organization",
        impact: "May affect goal achievement and task completion",
        recommendations: [
            "Use task management tools",
            "Break down complex tasks",
            "Practice time management techniques",
        ],
    },
    CatalogEntry {
        area: VulnerabilityArea::EmotionalRegulation,
        description: "Difficulty managing emotional responses",
        impact: "May affect relationships and well-being",
        recommendations: [
            "Learn emotion regulation techniques",
            "Practice emotional awareness",
            "Develop healthy coping strategies",
        ],
    },
    CatalogEntry {
        area: VulnerabilityArea::AttentionControl,
        description: "Challenges with focus and attention",
        impact: "May affect productivity and learning",
        recommendations: [
            "Practice focused attention exercises",
            "Implement distraction management strategies",
            "Create an optimal work environment",
        ],
    },
];

/// Detect vulnerabilities for metrics strictly below `threshold`
pub fn detect_vulnerabilities(metrics: &NeuralMetrics, threshold: f64) -> Vec<Vulnerability> {
    CATALOG
        .iter()
        .filter(|entry| metrics.get(entry.area.metric()) < threshold)
        .map(|entry| entry.to_vulnerability())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::types::NeuralMetric;
    use crate::config::DEFAULT_VULNERABILITY_THRESHOLD;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_follows_metric_order() {
        let metrics: Vec<NeuralMetric> = CATALOG.iter().map(|e| e.area.metric()).collect();
        assert_eq!(metrics, NeuralMetric::ALL.to_vec());
    }

    #[test]
    fn test_no_vulnerabilities_when_healthy() {
        let metrics = NeuralMetrics::uniform(80.0);
        assert!(detect_vulnerabilities(&metrics, DEFAULT_VULNERABILITY_THRESHOLD).is_empty());
    }

    #[test]
    fn test_single_low_metric() {
        let metrics = NeuralMetrics {
            pfc_activation: 50.0,
            ..NeuralMetrics::uniform(80.0)
        };

        let found = detect_vulnerabilities(&metrics, DEFAULT_VULNERABILITY_THRESHOLD);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].area, VulnerabilityArea::CognitiveControl);
        assert_eq!(found[0].description, "Reduced prefrontal cortex activation");
        assert_eq!(found[0].recommendations.len(), 3);
    }

    #[test]
    fn test_threshold_is_strict() {
        let metrics = NeuralMetrics::uniform(60.0);
        assert!(detect_vulnerabilities(&metrics, DEFAULT_VULNERABILITY_THRESHOLD).is_empty());

        let metrics = NeuralMetrics::uniform(59.999);
        assert_eq!(
            detect_vulnerabilities(&metrics, DEFAULT_VULNERABILITY_THRESHOLD).len(),
            6
        );
    }

    #[test]
    fn test_emission_order() {
        let metrics = NeuralMetrics {
            attention_control: 10.0,
            default_mode_network: 20.0,
            pfc_activation: 30.0,
            ..NeuralMetrics::uniform(90.0)
        };

        let areas: Vec<VulnerabilityArea> =
            detect_vulnerabilities(&metrics, DEFAULT_VULNERABILITY_THRESHOLD)
                .into_iter()
                .map(|v| v.area)
                .collect();
        assert_eq!(
            areas,
            vec![
                VulnerabilityArea::CognitiveControl,
                VulnerabilityArea::SelfAwareness,
                VulnerabilityArea::AttentionControl,
            ]
        );
    }
}
