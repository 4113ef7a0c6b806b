//! End-to-end analysis: model predictions in, treatment plan out

use serde::Serialize;
use tracing::{debug, info};

use crate::engine;
use crate::error::AnalysisError;
use crate::models::{HealthStatus, PredictionSet, TreatmentPlan};
use crate::predictor::{FeatureConfig, SoilModel};

/// Classifier outputs at or above this are read as "detected"
const DETECTION_THRESHOLD: f64 = 0.5;

/// Result of a successful analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub predictions: PredictionSet,
    pub soil_health_predicted: Option<f64>,
    pub health_status: Option<HealthStatus>,
    pub treatment_plan: TreatmentPlan,
}

/// Run every configured target through the model and build the plan
///
/// Fails as a whole if any target fails; no partial report is returned.
pub fn run_analysis(
    model: &dyn SoilModel,
    config: &FeatureConfig,
    features: &[f64],
) -> Result<AnalysisReport, AnalysisError> {
    if features.len() != config.feature_names.len() {
        return Err(AnalysisError::FeatureMismatch {
            expected: config.feature_names.len(),
            actual: features.len(),
        });
    }

    let mut predictions = PredictionSet::new();
    let mut soil_health_predicted = None;

    for target in &config.target_variables {
        let value = model
            .predict(features, target)
            .map_err(|source| AnalysisError::ModelInvocation {
                target: target.clone(),
                source,
            })?;
        debug!(name = %target, value, "prediction");

        if *target == config.soil_health_target {
            soil_health_predicted = Some(value);
        } else {
            let indicator = u8::from(value >= DETECTION_THRESHOLD);
            predictions.insert(target.clone(), indicator);
        }
    }

    let treatment_plan = engine::generate_treatment_plan(&predictions, soil_health_predicted);

    info!(
        concern = treatment_plan.primary_concern,
        severity = %treatment_plan.severity,
        soil_health = ?soil_health_predicted,
        "analysis complete"
    );

    Ok(AnalysisReport {
        predictions,
        soil_health_predicted,
        health_status: soil_health_predicted.map(HealthStatus::from_score),
        treatment_plan,
    })
}
