//! Recommendation generation
//!
//! Short-term advice comes from detected vulnerabilities; medium- and long-term
//! advice is keyed off a softer guidance threshold on four of the metrics.

use crate::assessment::types::{NeuralMetrics, Recommendations, Vulnerability};

/// Recommendations taken from each vulnerability for the short term
const SHORT_TERM_PER_VULNERABILITY: usize = 2;

const PFC_MEDIUM_TERM: [&str; 2] = [
    "Implement a daily cognitive training routine",
    "Practice structured problem-solving exercises",
];

const AMYGDALA_MEDIUM_TERM: [&str; 2] = [
    "Develop a comprehensive stress management plan",
    "Practice regular emotion regulation exercises",
];

const DMN_LONG_TERM: [&str; 2] = [
    "Establish a regular mindfulness practice",
    "Develop a personal growth and development plan",
];

const EXECUTIVE_LONG_TERM: [&str; 2] = [
    "Create a long-term goal achievement system",
    "Develop advanced planning and organization skills",
];

/// Generate recommendations. `guidance_threshold` is compared with strict `<`.
pub fn generate_recommendations(
    metrics: &NeuralMetrics,
    vulnerabilities: &[Vulnerability],
    guidance_threshold: f64,
) -> Recommendations {
    let short_term = vulnerabilities
        .iter()
        .flat_map(|v| v.recommendations.iter().take(SHORT_TERM_PER_VULNERABILITY).cloned())
        .collect();

    let mut medium_term = Vec::new();
    if metrics.pfc_activation < guidance_threshold {
        medium_term.extend(PFC_MEDIUM_TERM.iter().map(|s| s.to_string()));
    }
    if metrics.amygdala_regulation < guidance_threshold {
        medium_term.extend(AMYGDALA_MEDIUM_TERM.iter().map(|s| s.to_string()));
    }

    let mut long_term = Vec::new();
    if metrics.default_mode_network < guidance_threshold {
        long_term.extend(DMN_LONG_TERM.iter().map(|s| s.to_string()));
    }
    if metrics.executive_function < guidance_threshold {
        long_term.extend(EXECUTIVE_LONG_TERM.iter().map(|s| s.to_string()));
    }

    Recommendations {
        short_term,
        medium_term,
        long_term,
    }
}
