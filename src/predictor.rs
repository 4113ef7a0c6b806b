//! Prediction model collaborator
//!
//! The decision engine only depends on [`SoilModel`]. [`LinearSoilModel`] is
//! the JSON-backed implementation the command line uses: one linear model per
//! target, each with an optional standard scaler.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;
use crate::features::FEATURE_NAMES;

pub const DEFAULT_SOIL_HEALTH_TARGET: &str = "soil_health_score";

/// Capability interface for an opaque, pre-trained model
pub trait SoilModel: Send + Sync {
    /// Predict a single target for one feature vector
    fn predict(&self, features: &[f64], target: &str) -> Result<f64, ModelError>;
}

/// Feature and target layout the model was trained with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub feature_names: Vec<String>,
    pub target_variables: Vec<String>,
    /// Regression target holding the continuous soil-health score
    #[serde(default = "default_soil_health_target")]
    pub soil_health_target: String,
}

fn default_soil_health_target() -> String {
    DEFAULT_SOIL_HEALTH_TARGET.to_string()
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            target_variables: vec![
                "zinc_deficiency".to_string(),
                "iron_deficiency".to_string(),
                "multiple_deficiency".to_string(),
                DEFAULT_SOIL_HEALTH_TARGET.to_string(),
            ],
            soil_health_target: default_soil_health_target(),
        }
    }
}

impl FeatureConfig {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        read_json(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Binary output, 1.0 when the logistic probability reaches 0.5
    Classifier,
    /// Continuous output clamped to [0, 1]
    Regressor,
}

/// Per-feature standardisation, `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTarget {
    pub kind: TargetKind,
    pub weights: Vec<f64>,
    pub bias: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
}

impl LinearTarget {
    fn predict(&self, target: &str, features: &[f64]) -> Result<f64, ModelError> {
        let mismatch = |expected: usize| ModelError::DimensionMismatch {
            target: target.to_string(),
            expected,
            actual: features.len(),
        };

        if features.len() != self.weights.len() {
            return Err(mismatch(self.weights.len()));
        }

        let scaled: Vec<f64> = match &self.scaler {
            Some(scaler) => {
                if scaler.mean.len() != features.len() || scaler.scale.len() != features.len() {
                    return Err(mismatch(scaler.mean.len().min(scaler.scale.len())));
                }
                features
                    .iter()
                    .zip(scaler.mean.iter().zip(&scaler.scale))
                    .enumerate()
                    .map(|(index, (x, (mean, scale)))| {
                        if *scale == 0.0 {
                            Err(ModelError::InvalidScale {
                                target: target.to_string(),
                                index,
                            })
                        } else {
                            Ok((x - mean) / scale)
                        }
                    })
                    .collect::<Result<_, _>>()?
            }
            None => features.to_vec(),
        };

        let z: f64 = scaled.iter().zip(&self.weights).map(|(x, w)| x * w).sum::<f64>() + self.bias;

        Ok(match self.kind {
            TargetKind::Classifier => {
                let probability = 1.0 / (1.0 + (-z).exp());
                if probability >= 0.5 { 1.0 } else { 0.0 }
            }
            TargetKind::Regressor => z.clamp(0.0, 1.0),
        })
    }
}

/// Linear models keyed by target name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearSoilModel {
    pub targets: BTreeMap<String, LinearTarget>,
}

impl LinearSoilModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let model: Self = read_json(path)?;
        debug!(path = %path.display(), targets = model.targets.len(), "loaded model");
        Ok(model)
    }

    /// Small hand-tuned model over the default feature layout
    ///
    /// Flags zinc when nitrogen and potassium are both low, iron when pH is
    /// alkaline, multiple deficiency when all of N, P and K are low, and
    /// passes the composite score straight through as soil health.
    pub fn sample() -> Self {
        // N, P, K, ph, temperature, humidity, rainfall, N:P, N:K, P:K, composite
        let mut targets = BTreeMap::new();

        targets.insert(
            "zinc_deficiency".to_string(),
            LinearTarget {
                kind: TargetKind::Classifier,
                weights: vec![-0.04, 0.0, -0.03, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                bias: 3.5,
                scaler: None,
            },
        );
        targets.insert(
            "iron_deficiency".to_string(),
            LinearTarget {
                kind: TargetKind::Classifier,
                weights: vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                bias: -15.0,
                scaler: None,
            },
        );
        targets.insert(
            "multiple_deficiency".to_string(),
            LinearTarget {
                kind: TargetKind::Classifier,
                weights: vec![-0.05, -0.05, -0.05, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                bias: 3.0,
                scaler: None,
            },
        );
        targets.insert(
            DEFAULT_SOIL_HEALTH_TARGET.to_string(),
            LinearTarget {
                kind: TargetKind::Regressor,
                weights: vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
                bias: 0.0,
                scaler: None,
            },
        );

        Self { targets }
    }
}

impl SoilModel for LinearSoilModel {
    fn predict(&self, features: &[f64], target: &str) -> Result<f64, ModelError> {
        let model = self
            .targets
            .get(target)
            .ok_or_else(|| ModelError::UnknownTarget(target.to_string()))?;
        model.predict(target, features)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::feature_vector;
    use crate::models::SoilSample;
    use approx::assert_relative_eq;

    fn single_feature(kind: TargetKind, weight: f64, bias: f64) -> LinearTarget {
        LinearTarget {
            kind,
            weights: vec![weight],
            bias,
            scaler: None,
        }
    }

    #[test]
    fn test_classifier_threshold() {
        let target = single_feature(TargetKind::Classifier, 1.0, -2.0);
        assert_eq!(target.predict("t", &[1.0]).unwrap(), 0.0);
        assert_eq!(target.predict("t", &[2.0]).unwrap(), 1.0);
        assert_eq!(target.predict("t", &[3.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_regressor_is_clamped() {
        let target = single_feature(TargetKind::Regressor, 0.5, 0.0);
        assert_relative_eq!(target.predict("t", &[1.0]).unwrap(), 0.5);
        assert_eq!(target.predict("t", &[4.0]).unwrap(), 1.0);
        assert_eq!(target.predict("t", &[-4.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_scaler_applied() {
        let target = LinearTarget {
            scaler: Some(StandardScaler {
                mean: vec![10.0],
                scale: vec![4.0],
            }),
            ..single_feature(TargetKind::Regressor, 1.0, 0.0)
        };
        assert_relative_eq!(target.predict("t", &[12.0]).unwrap(), 0.5);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let target = LinearTarget {
            scaler: Some(StandardScaler {
                mean: vec![0.0],
                scale: vec![0.0],
            }),
            ..single_feature(TargetKind::Regressor, 1.0, 0.0)
        };
        assert!(matches!(
            target.predict("t", &[1.0]),
            Err(ModelError::InvalidScale { index: 0, .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let target = single_feature(TargetKind::Classifier, 1.0, 0.0);
        match target.predict("zinc", &[1.0, 2.0]) {
            Err(ModelError::DimensionMismatch { expected, actual, .. }) => {
                assert_eq!((expected, actual), (1, 2));
            }
            other => panic!("expected dimension mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_target() {
        let model = LinearSoilModel::sample();
        assert!(matches!(
            model.predict(&[0.0; 11], "boron_deficiency"),
            Err(ModelError::UnknownTarget(name)) if name == "boron_deficiency"
        ));
    }

    #[test]
    fn test_sample_model_covers_default_config() {
        let model = LinearSoilModel::sample();
        let config = FeatureConfig::default();
        let features = feature_vector(&SoilSample::default());
        assert_eq!(features.len(), config.feature_names.len());
        for target in &config.target_variables {
            assert!(model.predict(&features, target).is_ok(), "{}", target);
        }
    }

    #[test]
    fn test_sample_model_behaviour() {
        let model = LinearSoilModel::sample();

        let rich = feature_vector(&SoilSample {
            nitrogen: 120.0,
            phosphorus: 60.0,
            potassium: 80.0,
            ph: 6.8,
            ..SoilSample::default()
        });
        assert_eq!(model.predict(&rich, "zinc_deficiency").unwrap(), 0.0);
        assert_eq!(model.predict(&rich, "iron_deficiency").unwrap(), 0.0);
        assert_eq!(model.predict(&rich, "multiple_deficiency").unwrap(), 0.0);

        let depleted = feature_vector(&SoilSample {
            nitrogen: 10.0,
            phosphorus: 10.0,
            potassium: 10.0,
            ph: 8.2,
            ..SoilSample::default()
        });
        assert_eq!(model.predict(&depleted, "zinc_deficiency").unwrap(), 1.0);
        assert_eq!(model.predict(&depleted, "iron_deficiency").unwrap(), 1.0);
        assert_eq!(model.predict(&depleted, "multiple_deficiency").unwrap(), 1.0);

        let health = model.predict(&depleted, DEFAULT_SOIL_HEALTH_TARGET).unwrap();
        assert_relative_eq!(health, depleted[10]);
    }

    #[test]
    fn test_load_from_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let config_path = dir.path().join("feature_config.json");

        let model = LinearSoilModel::sample();
        fs::write(&model_path, serde_json::to_string_pretty(&model).unwrap()).unwrap();
        fs::write(
            &config_path,
            r#"{"feature_names": ["a", "b"], "target_variables": ["zinc_deficiency"]}"#,
        )
        .unwrap();

        assert_eq!(LinearSoilModel::load(&model_path).unwrap(), model);

        let config = FeatureConfig::load(&config_path).unwrap();
        assert_eq!(config.feature_names, vec!["a", "b"]);
        assert_eq!(config.soil_health_target, DEFAULT_SOIL_HEALTH_TARGET);
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            LinearSoilModel::load(&missing),
            Err(ModelError::Io { path, .. }) if path == missing
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            FeatureConfig::load(&broken),
            Err(ModelError::Parse { .. })
        ));
    }
}
