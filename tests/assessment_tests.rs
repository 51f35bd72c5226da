use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::thread;

use telos_neural::assessment::{
    parse_input, AttentionRecord, DecisionKind, DecisionRecord, VulnerabilityArea,
};
use telos_neural::{assess, assess_json, Assessor, MemoryStore, NeuralService};

const EPS: f64 = 1e-9;

/// pfcActivation = 0.75 * 40 + 1.0 * 30 = 60
fn pfc_at_sixty() -> String {
    json!({
        "decisionPatterns": [
            { "type": "rational" },
            { "type": "rational" },
            { "type": "rational" },
            { "type": "emotional" }
        ],
        "attentionMetrics": [
            { "duration": 10, "totalTime": 10 }
        ]
    })
    .to_string()
}

#[test]
fn test_two_thirds_rational_decisions() {
    let input = parse_input(
        r#"{ "decisionPatterns": [{ "type": "rational" }, { "type": "rational" }, { "type": "emotional" }] }"#,
    )
    .unwrap();
    let report = assess(&input).unwrap();

    assert!((report.neural_metrics.pfc_activation - 26.67).abs() < 0.01);
    assert_eq!(report.vulnerabilities.len(), 6);
    assert_eq!(report.vulnerabilities[0].area, VulnerabilityArea::CognitiveControl);
    assert_eq!(
        report.recommendations.short_term[..2].to_vec(),
        vec![
            "Practice mindfulness meditation".to_string(),
            "Engage in cognitive training exercises".to_string(),
        ]
    );
}

#[test]
fn test_vulnerability_threshold_is_strict() {
    let report = assess(&parse_input(&pfc_at_sixty()).unwrap()).unwrap();

    assert!((report.neural_metrics.pfc_activation - 60.0).abs() < EPS);
    assert!(!report
        .vulnerabilities
        .iter()
        .any(|v| v.area == VulnerabilityArea::CognitiveControl));
    assert_eq!(report.vulnerabilities.len(), 5);

    // Still under the guidance threshold of 70
    assert_eq!(
        report.recommendations.medium_term[..2].to_vec(),
        vec![
            "Implement a daily cognitive training routine".to_string(),
            "Practice structured problem-solving exercises".to_string(),
        ]
    );
}

#[test]
fn test_guidance_threshold_is_strict() {
    // pfcActivation = 1.0 * 40 + 1.0 * 30 = 70
    let input = json!({
        "decisionPatterns": [{ "type": "rational" }],
        "attentionMetrics": [{ "duration": 30, "totalTime": 30 }]
    });
    let report = assess(&parse_input(&input.to_string()).unwrap()).unwrap();

    assert!((report.neural_metrics.pfc_activation - 70.0).abs() < EPS);
    assert_eq!(
        report.recommendations.medium_term,
        vec![
            "Develop a comprehensive stress management plan".to_string(),
            "Practice regular emotion regulation exercises".to_string(),
        ]
    );
}

#[test]
fn test_report_wire_format() {
    let json = assess_json(&pfc_at_sixty()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();

    let metrics = report["neuralMetrics"].as_object().unwrap();
    let keys: Vec<&str> = metrics.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "amygdalaRegulation",
            "attentionControl",
            "defaultModeNetwork",
            "emotionalRegulation",
            "executiveFunction",
            "pfcActivation",
        ]
    );

    let cognitive = &report["pathwayMap"]["cognitiveControl"];
    assert_eq!(cognitive["strength"], 60.0);
    assert!(cognitive["connections"]["executiveFunction"].is_number());
    assert!(cognitive["connections"]["attentionControl"].is_number());

    assert_eq!(report["vulnerabilities"][0]["area"], "Emotional Processing");
    assert!(report["recommendations"]["longTerm"].is_array());
}

#[test]
fn test_malformed_input_rejected() {
    assert!(assess_json("{ not json").is_err());
    assert!(assess_json(r#"{ "attentionMetrics": [{ "duration": 90, "totalTime": 60 }] }"#).is_err());
    assert!(assess_json(r#"{ "emotionalResponses": [{ "recoveryTime": -5 }] }"#).is_err());
}

#[test]
fn test_unknown_labels_accepted() {
    let input = parse_input(
        r#"{ "decisionPatterns": [{ "type": "gut-feeling" }], "digitalBehavior": [{ "type": "gaming" }] }"#,
    )
    .unwrap();
    let report = assess(&input).unwrap();
    assert_eq!(report.neural_metrics.pfc_activation, 0.0);
}

#[test]
fn test_shared_assessor_across_threads() {
    let input = Arc::new(parse_input(&pfc_at_sixty()).unwrap());
    let assessor = Arc::new(Assessor::new());
    let expected = assessor.assess(&input).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let input = Arc::clone(&input);
            let assessor = Arc::clone(&assessor);
            thread::spawn(move || assessor.assess(&input).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_service_across_threads() {
    let service = Arc::new(NeuralService::new(MemoryStore::new()));
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let user = format!("user-{n}");
                for i in 0..5 {
                    let at = start + Duration::minutes(i);
                    service
                        .submit_decision(
                            &user,
                            DecisionRecord {
                                kind: DecisionKind::Rational,
                                planned: true,
                            },
                            at,
                        )
                        .unwrap();
                    service
                        .submit_attention(
                            &user,
                            AttentionRecord {
                                duration: Some(30.0),
                                total_time: Some(60.0),
                                ..Default::default()
                            },
                            at,
                        )
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.store().user_count().unwrap(), 4);
    for n in 0..4 {
        let user = format!("user-{n}");
        assert_eq!(service.assessment_history(&user).unwrap().len(), 10);

        // 1.0 * 40 + 0.5 * 30
        let report = service.assess(&user, start + Duration::hours(1)).unwrap();
        assert!((report.neural_metrics.pfc_activation - 55.0).abs() < EPS);
    }
}
