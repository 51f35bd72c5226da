//! Neural metric calculation
//!
//! Each metric is a sum of two or three weighted sub-scores whose weights total
//! 100. A sub-score only contributes when its source sequence is present and
//! non-empty; the remaining weights are not renormalized. The sum is clamped to
//! [0, 100].

use crate::assessment::types::{
    AttentionKind, BehaviorCategory, DecisionKind, NeuralMetrics, RawAssessmentInput,
};
use crate::config::AssessmentConfig;

const MAX_SCORE: f64 = 100.0;

// pfcActivation
const PFC_RATIONAL_WEIGHT: f64 = 40.0;
const PFC_FOCUS_TIME_WEIGHT: f64 = 30.0;
const PFC_PRODUCTIVE_WEIGHT: f64 = 30.0;

// amygdalaRegulation
const AMYGDALA_STABLE_WEIGHT: f64 = 40.0;
const AMYGDALA_RECOVERY_WEIGHT: f64 = 30.0;
const AMYGDALA_AWARENESS_WEIGHT: f64 = 30.0;

// defaultModeNetwork
const DMN_ON_TASK_WEIGHT: f64 = 40.0;
const DMN_FOCUSED_ACTIVITY_WEIGHT: f64 = 30.0;
const DMN_PRESENT_MOMENT_WEIGHT: f64 = 30.0;

// executiveFunction
const EXEC_PLANNED_WEIGHT: f64 = 30.0;
const EXEC_SWITCH_WEIGHT: f64 = 30.0;
const EXEC_GOAL_DIRECTED_WEIGHT: f64 = 40.0;

// emotionalRegulation
const EMO_REGULATION_WEIGHT: f64 = 40.0;
const EMO_EXPRESSION_WEIGHT: f64 = 30.0;
const EMO_UNDERSTANDING_WEIGHT: f64 = 30.0;

// attentionControl
const ATTN_SUSTAINED_WEIGHT: f64 = 40.0;
const ATTN_SELECTIVE_WEIGHT: f64 = 30.0;
const ATTN_DIVIDED_WEIGHT: f64 = 30.0;

/// Calculator for the six neural metrics
pub struct MetricCalculator<'a> {
    config: &'a AssessmentConfig,
}

impl<'a> MetricCalculator<'a> {
    pub fn new(config: &'a AssessmentConfig) -> Self {
        Self { config }
    }

    /// Calculate all six metrics into a freshly built `NeuralMetrics`
    pub fn calculate(&self, input: &RawAssessmentInput) -> NeuralMetrics {
        NeuralMetrics {
            pfc_activation: self.pfc_activation(input),
            amygdala_regulation: self.amygdala_regulation(input),
            default_mode_network: self.default_mode_network(input),
            executive_function: self.executive_function(input),
            emotional_regulation: self.emotional_regulation(input),
            attention_control: self.attention_control(input),
        }
    }

    /// Rational decisions (40), focused share of attention time (30), productive behavior (30)
    pub fn pfc_activation(&self, input: &RawAssessmentInput) -> f64 {
        let mut score = 0.0;

        if let Some(decisions) = present(&input.decision_patterns) {
            score += share(decisions, |d| d.kind == DecisionKind::Rational) * PFC_RATIONAL_WEIGHT;
        }

        if let Some(attention) = present(&input.attention_metrics) {
            // Time ratio over records carrying both fields, not a record count
            let (focused, total) = attention
                .iter()
                .filter_map(|m| Some((m.duration?, m.total_time?)))
                .fold((0.0, 0.0), |(f, t), (d, tt)| (f + d, t + tt));
            if total > 0.0 {
                score += (focused / total) * PFC_FOCUS_TIME_WEIGHT;
            }
        }

        if let Some(behavior) = present(&input.digital_behavior) {
            score += share(behavior, |b| b.category == BehaviorCategory::Productive)
                * PFC_PRODUCTIVE_WEIGHT;
        }

        clamp_score(score)
    }

    /// Stable intensity (40), recovery vs baseline (30), high awareness (30)
    pub fn amygdala_regulation(&self, input: &RawAssessmentInput) -> f64 {
        let mut score = 0.0;

        if let Some(responses) = present(&input.emotional_responses) {
            let stable_bar = self.config.stable_intensity;
            score += share(responses, |e| e.intensity.is_some_and(|v| v < stable_bar))
                * AMYGDALA_STABLE_WEIGHT;

            // May go negative for recoveries slower than the baseline; the final clamp bounds it
            if let Some(avg_recovery) = mean(responses.iter().filter_map(|e| e.recovery_time)) {
                score += (1.0 - avg_recovery / self.config.recovery_baseline_sec)
                    * AMYGDALA_RECOVERY_WEIGHT;
            }

            score += share(responses, |e| self.is_elevated(e.awareness)) * AMYGDALA_AWARENESS_WEIGHT;
        }

        clamp_score(score)
    }

    /// Episodes not spent mind-wandering (40), focused activities (30), present-moment awareness (30)
    pub fn default_mode_network(&self, input: &RawAssessmentInput) -> f64 {
        let mut score = 0.0;

        if let Some(attention) = present(&input.attention_metrics) {
            let wandering = share(attention, |m| m.kind == AttentionKind::MindWandering);
            score += (1.0 - wandering) * DMN_ON_TASK_WEIGHT;
        }

        if let Some(behavior) = present(&input.digital_behavior) {
            score += share(behavior, |b| self.is_elevated(b.focus_level))
                * DMN_FOCUSED_ACTIVITY_WEIGHT;
        }

        if let Some(responses) = present(&input.emotional_responses) {
            score += share(responses, |e| self.is_elevated(e.present_moment_awareness))
                * DMN_PRESENT_MOMENT_WEIGHT;
        }

        clamp_score(score)
    }

    /// Planned decisions (30), efficient task switches (30), goal-directed behavior (40)
    pub fn executive_function(&self, input: &RawAssessmentInput) -> f64 {
        let mut score = 0.0;

        if let Some(decisions) = present(&input.decision_patterns) {
            score += share(decisions, |d| d.planned) * EXEC_PLANNED_WEIGHT;
        }

        if let Some(attention) = present(&input.attention_metrics) {
            score += share(attention, |m| self.is_elevated(m.switch_efficiency)) * EXEC_SWITCH_WEIGHT;
        }

        if let Some(behavior) = present(&input.digital_behavior) {
            score += share(behavior, |b| b.goal_directed) * EXEC_GOAL_DIRECTED_WEIGHT;
        }

        clamp_score(score)
    }

    /// High regulation (40), appropriate expression (30), high understanding (30)
    pub fn emotional_regulation(&self, input: &RawAssessmentInput) -> f64 {
        let mut score = 0.0;

        if let Some(responses) = present(&input.emotional_responses) {
            score += share(responses, |e| self.is_elevated(e.regulation)) * EMO_REGULATION_WEIGHT;
            score += share(responses, |e| e.expression_appropriate) * EMO_EXPRESSION_WEIGHT;
            score += share(responses, |e| self.is_elevated(e.understanding)) * EMO_UNDERSTANDING_WEIGHT;
        }

        clamp_score(score)
    }

    /// Sustained (40), selective (30) and divided (30) focus
    pub fn attention_control(&self, input: &RawAssessmentInput) -> f64 {
        let mut score = 0.0;

        if let Some(attention) = present(&input.attention_metrics) {
            score += share(attention, |m| self.is_elevated(m.sustained_focus)) * ATTN_SUSTAINED_WEIGHT;
            score += share(attention, |m| self.is_elevated(m.selective_focus)) * ATTN_SELECTIVE_WEIGHT;
            score += share(attention, |m| self.is_elevated(m.divided_focus)) * ATTN_DIVIDED_WEIGHT;
        }

        clamp_score(score)
    }

    /// A missing level never counts as elevated
    fn is_elevated(&self, level: Option<f64>) -> bool {
        level.is_some_and(|v| v > self.config.elevated_level)
    }
}

/// An empty sequence is treated the same as an absent one
fn present<T>(sequence: &Option<Vec<T>>) -> Option<&[T]> {
    sequence.as_deref().filter(|s| !s.is_empty())
}

/// Fraction of records matching `predicate`. Callers pass non-empty slices.
fn share<T>(records: &[T], predicate: impl Fn(&T) -> bool) -> f64 {
    let matching = records.iter().filter(|r| predicate(r)).count();
    matching as f64 / records.len() as f64
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, MAX_SCORE)
}
