//! Treatment decision logic
//!
//! Turns binary deficiency predictions and an optional soil-health score into
//! a severity tier and a single treatment plan. Everything here is pure.

use std::fmt;

use crate::models::{DeficiencyCategory, PredictionSet, SeverityTier, TreatmentPlan};
use crate::treatments::{self, HEALTHY_SOIL_LABEL, MAINTENANCE};

const POOR_HEALTH_BELOW: f64 = 0.4;
const FAIR_HEALTH_BELOW: f64 = 0.6;
const POOR_HEALTH_PENALTY: u32 = 20;
const FAIR_HEALTH_PENALTY: u32 = 10;

const SUSTAINABILITY_TREATED: u8 = 95;
const SUSTAINABILITY_HEALTHY: u8 = 100;

/// Severity score: weights of detected deficiencies plus a soil-health penalty
///
/// Only keys present in the treatment table contribute a weight.
pub fn severity_score(predictions: &PredictionSet, soil_health: Option<f64>) -> u32 {
    let mut score: u32 = predictions
        .iter()
        .filter(|&(_, indicator)| indicator == 1)
        .filter_map(|(key, _)| treatments::lookup(key))
        .map(|record| record.severity_weight)
        .sum();

    if let Some(health) = soil_health {
        if health < POOR_HEALTH_BELOW {
            score += POOR_HEALTH_PENALTY;
        } else if health < FAIR_HEALTH_BELOW {
            score += FAIR_HEALTH_PENALTY;
        }
    }

    score
}

/// Tier for a severity score
pub fn tier_for_score(score: u32) -> SeverityTier {
    match score {
        50.. => SeverityTier::Severe,
        25..=49 => SeverityTier::Moderate,
        10..=24 => SeverityTier::Mild,
        _ => SeverityTier::None,
    }
}

pub fn classify_severity(predictions: &PredictionSet, soil_health: Option<f64>) -> SeverityTier {
    tier_for_score(severity_score(predictions, soil_health))
}

type ConcernRule = fn(&PredictionSet, Option<f64>) -> bool;

fn multiple_detected(p: &PredictionSet, _: Option<f64>) -> bool {
    p.is_detected(DeficiencyCategory::MultipleDeficiency)
}

fn zinc_detected(p: &PredictionSet, _: Option<f64>) -> bool {
    p.is_detected(DeficiencyCategory::ZincDeficiency)
}

fn iron_detected(p: &PredictionSet, _: Option<f64>) -> bool {
    p.is_detected(DeficiencyCategory::IronDeficiency)
}

fn soil_health_low(_: &PredictionSet, soil_health: Option<f64>) -> bool {
    soil_health.is_some_and(|h| h < FAIR_HEALTH_BELOW)
}

/// Concern rules in priority order; the first match wins
pub const CONCERN_PRIORITY: [(ConcernRule, DeficiencyCategory); 4] = [
    (multiple_detected, DeficiencyCategory::MultipleDeficiency),
    (zinc_detected, DeficiencyCategory::ZincDeficiency),
    (iron_detected, DeficiencyCategory::IronDeficiency),
    (soil_health_low, DeficiencyCategory::SoilHealthImprovement),
];

/// Primary concern, or `None` when the soil needs maintenance only
pub fn select_concern(
    predictions: &PredictionSet,
    soil_health: Option<f64>,
) -> Option<DeficiencyCategory> {
    CONCERN_PRIORITY
        .iter()
        .find(|(rule, _)| rule(predictions, soil_health))
        .map(|&(_, category)| category)
}

/// Build the treatment plan for one set of predictions
pub fn generate_treatment_plan(
    predictions: &PredictionSet,
    soil_health: Option<f64>,
) -> TreatmentPlan {
    let concern = select_concern(predictions, soil_health);
    let severity = classify_severity(predictions, soil_health);

    match concern {
        Some(category) => {
            let record = treatments::treatment_for(category);
            TreatmentPlan {
                primary_concern: category.label(),
                category: Some(category),
                severity,
                solutions: record.solutions,
                cost_estimate: record.cost_band,
                timeline: record.timeline,
                sustainability_score: SUSTAINABILITY_TREATED,
                farmer_friendly: true,
                chemical_free: true,
            }
        }
        None => TreatmentPlan {
            primary_concern: HEALTHY_SOIL_LABEL,
            category: None,
            // no concern means nothing to treat, whatever the score says
            severity: SeverityTier::None,
            solutions: MAINTENANCE.solutions,
            cost_estimate: MAINTENANCE.cost_band,
            timeline: MAINTENANCE.timeline,
            sustainability_score: SUSTAINABILITY_HEALTHY,
            farmer_friendly: true,
            chemical_free: true,
        },
    }
}

/// Format raw predictions as a status table
pub fn format_prediction_table(predictions: &PredictionSet) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<26} {:<12} {:<8}\n", "Deficiency", "Status", "Severity"));
    output.push_str(&format!("{}\n", "-".repeat(48)));

    for (key, indicator) in predictions.iter() {
        let label = DeficiencyCategory::from_key(key)
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| key.replace('_', " "));
        let (status, severity) = if indicator == 1 {
            ("DETECTED", "High")
        } else {
            ("Normal", "None")
        };
        output.push_str(&format!("{:<26} {:<12} {:<8}\n", label, status, severity));
    }

    output
}

impl fmt::Display for TreatmentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Organic Treatment Plan ===")?;
        writeln!(f, "Primary issue:  {}", self.primary_concern)?;
        writeln!(f, "Severity:       {}", self.severity)?;
        writeln!(f, "Timeline:       {}", self.timeline)?;
        writeln!(f, "Cost:           {}", self.cost_estimate)?;
        writeln!(f, "Sustainability: {}/100", self.sustainability_score)?;
        writeln!(f)?;

        writeln!(f, "Recommended organic solutions:")?;
        for (i, solution) in self.solutions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, solution)?;
        }

        Ok(())
    }
}
