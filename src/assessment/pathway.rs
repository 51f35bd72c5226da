//! Neural pathway mapping
//!
//! Arranges the six metrics into three fixed pathway nodes.

use crate::assessment::types::{NeuralMetric, NeuralMetrics, PathwayMap, PathwayNode};

/// Build the pathway map for a set of metrics
pub fn map_pathways(metrics: &NeuralMetrics) -> PathwayMap {
    PathwayMap {
        cognitive_control: node(
            metrics,
            NeuralMetric::PfcActivation,
            [NeuralMetric::ExecutiveFunction, NeuralMetric::AttentionControl],
        ),
        emotional_processing: node(
            metrics,
            NeuralMetric::AmygdalaRegulation,
            [NeuralMetric::EmotionalRegulation, NeuralMetric::DefaultModeNetwork],
        ),
        self_awareness: node(
            metrics,
            NeuralMetric::DefaultModeNetwork,
            [NeuralMetric::EmotionalRegulation, NeuralMetric::ExecutiveFunction],
        ),
    }
}

fn node(metrics: &NeuralMetrics, strength: NeuralMetric, links: [NeuralMetric; 2]) -> PathwayNode {
    PathwayNode {
        strength: metrics.get(strength),
        connections: links.into_iter().map(|m| (m, metrics.get(m))).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn distinct_metrics() -> NeuralMetrics {
        NeuralMetrics {
            pfc_activation: 10.0,
            amygdala_regulation: 20.0,
            default_mode_network: 30.0,
            executive_function: 40.0,
            emotional_regulation: 50.0,
            attention_control: 60.0,
        }
    }

    #[test]
    fn test_node_strengths() {
        let map = map_pathways(&distinct_metrics());
        assert_eq!(map.cognitive_control.strength, 10.0);
        assert_eq!(map.emotional_processing.strength, 20.0);
        assert_eq!(map.self_awareness.strength, 30.0);
    }

    #[test]
    fn test_node_connections() {
        let map = map_pathways(&distinct_metrics());

        let cognitive: Vec<_> = map.cognitive_control.connections.into_iter().collect();
        assert_eq!(
            cognitive,
            vec![
                (NeuralMetric::ExecutiveFunction, 40.0),
                (NeuralMetric::AttentionControl, 60.0),
            ]
        );

        let emotional: Vec<_> = map.emotional_processing.connections.into_iter().collect();
        assert_eq!(
            emotional,
            vec![
                (NeuralMetric::EmotionalRegulation, 50.0),
                (NeuralMetric::DefaultModeNetwork, 30.0),
            ]
        );

        let awareness: Vec<_> = map.self_awareness.connections.into_iter().collect();
        assert_eq!(
            awareness,
            vec![
                (NeuralMetric::EmotionalRegulation, 50.0),
                (NeuralMetric::ExecutiveFunction, 40.0),
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let map = map_pathways(&distinct_metrics());
        let value = serde_json::to_value(&map).unwrap();

        assert_eq!(value["cognitiveControl"]["strength"], 10.0);
        assert_eq!(value["cognitiveControl"]["connections"]["executiveFunction"], 40.0);
        assert_eq!(value["cognitiveControl"]["connections"]["attentionControl"], 60.0);
        assert_eq!(value["selfAwareness"]["connections"]["emotionalRegulation"], 50.0);
    }

    #[test]
    fn test_connections_serialize_in_listing_order() {
        let map = map_pathways(&distinct_metrics());
        let json = serde_json::to_string(&map.emotional_processing).unwrap();

        let regulation = json.find("emotionalRegulation").unwrap();
        let dmn = json.find("defaultModeNetwork").unwrap();
        assert!(regulation < dmn, "{json}");
    }
}
