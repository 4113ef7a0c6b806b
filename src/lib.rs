//! Soil nutrient deficiency analysis and organic treatment planning
//!
//! A pre-trained model predicts deficiencies from soil measurements; the
//! decision engine turns those predictions into one chemical-free treatment
//! plan with a severity tier.

pub mod analysis;
pub mod assistant;
pub mod engine;
pub mod error;
pub mod features;
pub mod models;
pub mod predictor;
pub mod treatments;

pub use analysis::{AnalysisReport, run_analysis};
pub use error::{AnalysisError, ModelError, SampleError};
pub use models::{DeficiencyCategory, PredictionSet, SeverityTier, SoilSample, TreatmentPlan};
pub use predictor::{FeatureConfig, LinearSoilModel, SoilModel};
