//! Pipeline tests: soil sample -> features -> model -> treatment plan

use std::sync::atomic::{AtomicBool, Ordering};

use soil_advisor::features::feature_vector;
use soil_advisor::predictor::DEFAULT_SOIL_HEALTH_TARGET;
use soil_advisor::{
    AnalysisError, DeficiencyCategory, FeatureConfig, LinearSoilModel, ModelError, SeverityTier,
    SoilModel, SoilSample, run_analysis,
};

/// Fixed predictions for the three deficiency targets plus a health score
struct FixedModel {
    zinc: f64,
    iron: f64,
    multiple: f64,
    health: f64,
}

impl SoilModel for FixedModel {
    fn predict(&self, _features: &[f64], target: &str) -> Result<f64, ModelError> {
        match target {
            "zinc_deficiency" => Ok(self.zinc),
            "iron_deficiency" => Ok(self.iron),
            "multiple_deficiency" => Ok(self.multiple),
            DEFAULT_SOIL_HEALTH_TARGET => Ok(self.health),
            other => Err(ModelError::UnknownTarget(other.to_string())),
        }
    }
}

/// Succeeds until switched off, then fails on the iron target
struct FlakyModel {
    broken: AtomicBool,
}

impl SoilModel for FlakyModel {
    fn predict(&self, features: &[f64], target: &str) -> Result<f64, ModelError> {
        if self.broken.load(Ordering::SeqCst) && target == "iron_deficiency" {
            return Err(ModelError::DimensionMismatch {
                target: target.to_string(),
                expected: 12,
                actual: features.len(),
            });
        }
        Ok(if target == DEFAULT_SOIL_HEALTH_TARGET { 0.2 } else { 1.0 })
    }
}

fn default_features() -> Vec<f64> {
    feature_vector(&SoilSample::default()).to_vec()
}

#[test]
fn zinc_only_with_good_health_is_moderate() {
    let model = FixedModel { zinc: 1.0, iron: 0.0, multiple: 0.0, health: 0.75 };
    let report = run_analysis(&model, &FeatureConfig::default(), &default_features()).unwrap();

    let plan = &report.treatment_plan;
    assert_eq!(plan.category, Some(DeficiencyCategory::ZincDeficiency));
    assert_eq!(plan.primary_concern, "Zinc Deficiency");
    assert_eq!(plan.severity, SeverityTier::Moderate);
}

#[test]
fn poor_health_without_deficiency_is_mild() {
    let model = FixedModel { zinc: 0.0, iron: 0.0, multiple: 0.0, health: 0.3 };
    let report = run_analysis(&model, &FeatureConfig::default(), &default_features()).unwrap();

    let plan = &report.treatment_plan;
    assert_eq!(plan.category, Some(DeficiencyCategory::SoilHealthImprovement));
    assert_eq!(plan.severity, SeverityTier::Mild);
    assert_eq!(plan.cost_estimate, "₹3,000-6,000/acre");
    assert_eq!(plan.sustainability_score, 95);
}

#[test]
fn everything_detected_is_severe_multiple() {
    let model = FixedModel { zinc: 1.0, iron: 1.0, multiple: 1.0, health: 0.1 };
    let report = run_analysis(&model, &FeatureConfig::default(), &default_features()).unwrap();

    let plan = &report.treatment_plan;
    assert_eq!(plan.category, Some(DeficiencyCategory::MultipleDeficiency));
    assert_eq!(plan.severity, SeverityTier::Severe);
    assert_eq!(plan.solutions[0], "Comprehensive organic soil restoration program");
}

#[test]
fn model_failure_reports_no_plan() {
    let model = FlakyModel { broken: AtomicBool::new(false) };
    let config = FeatureConfig::default();
    let features = default_features();

    let first = run_analysis(&model, &config, &features).unwrap();
    assert_eq!(first.treatment_plan.severity, SeverityTier::Severe);

    model.broken.store(true, Ordering::SeqCst);
    let second = run_analysis(&model, &config, &features);
    match second {
        Err(AnalysisError::ModelInvocation { target, source }) => {
            assert_eq!(target, "iron_deficiency");
            assert!(matches!(source, ModelError::DimensionMismatch { .. }));
        }
        Ok(report) => panic!("expected failure, got plan {:?}", report.treatment_plan),
        Err(other) => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn sample_model_end_to_end() {
    let model = LinearSoilModel::sample();
    let config = FeatureConfig::default();

    let healthy = SoilSample {
        nitrogen: 150.0,
        phosphorus: 70.0,
        potassium: 90.0,
        ph: 7.0,
        ..SoilSample::default()
    };
    let report = run_analysis(&model, &config, &feature_vector(&healthy)).unwrap();
    assert_eq!(report.treatment_plan.category, None);
    assert_eq!(report.treatment_plan.severity, SeverityTier::None);
    assert_eq!(report.treatment_plan.sustainability_score, 100);

    let depleted = SoilSample {
        nitrogen: 10.0,
        phosphorus: 10.0,
        potassium: 10.0,
        ph: 8.2,
        ..SoilSample::default()
    };
    let report = run_analysis(&model, &config, &feature_vector(&depleted)).unwrap();
    assert_eq!(
        report.treatment_plan.category,
        Some(DeficiencyCategory::MultipleDeficiency)
    );
    assert_eq!(report.treatment_plan.severity, SeverityTier::Severe);
}

#[test]
fn report_serializes_to_json() {
    let model = FixedModel { zinc: 0.0, iron: 1.0, multiple: 0.0, health: 0.5 };
    let report = run_analysis(&model, &FeatureConfig::default(), &default_features()).unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["predictions"]["iron_deficiency"], 1);
    assert_eq!(json["treatment_plan"]["primary_concern"], "Iron Deficiency");
    assert_eq!(json["treatment_plan"]["category"], "iron_deficiency");
    assert_eq!(json["treatment_plan"]["severity"], "Moderate");
    assert_eq!(json["health_status"], "Fair");
}
