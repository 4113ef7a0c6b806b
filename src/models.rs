//! Data models for soil samples, predictions and treatment plans

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SampleError;

/// Deficiency categories known to the treatment table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeficiencyCategory {
    ZincDeficiency,
    IronDeficiency,
    MultipleDeficiency,
    SoilHealthImprovement,
}

impl DeficiencyCategory {
    pub const ALL: [DeficiencyCategory; 4] = [
        DeficiencyCategory::ZincDeficiency,
        DeficiencyCategory::IronDeficiency,
        DeficiencyCategory::MultipleDeficiency,
        DeficiencyCategory::SoilHealthImprovement,
    ];

    /// Key as used by the treatment table and the model targets
    pub fn key(self) -> &'static str {
        match self {
            DeficiencyCategory::ZincDeficiency => "zinc_deficiency",
            DeficiencyCategory::IronDeficiency => "iron_deficiency",
            DeficiencyCategory::MultipleDeficiency => "multiple_deficiency",
            DeficiencyCategory::SoilHealthImprovement => "soil_health_improvement",
        }
    }

    /// Display label ("zinc_deficiency" -> "Zinc Deficiency")
    pub fn label(self) -> &'static str {
        match self {
            DeficiencyCategory::ZincDeficiency => "Zinc Deficiency",
            DeficiencyCategory::IronDeficiency => "Iron Deficiency",
            DeficiencyCategory::MultipleDeficiency => "Multiple Deficiency",
            DeficiencyCategory::SoilHealthImprovement => "Soil Health Improvement",
        }
    }

    /// Look up any table key, including the soil-health fallback
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Look up a key the model can emit. `soil_health_improvement` is
    /// only ever a fallback concern, never a prediction.
    pub fn from_prediction_key(key: &str) -> Option<Self> {
        match Self::from_key(key)? {
            DeficiencyCategory::SoilHealthImprovement => None,
            category => Some(category),
        }
    }
}

impl fmt::Display for DeficiencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static remediation data for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreatmentRecord {
    pub solutions: &'static [&'static str], // display order
    pub cost_band: &'static str,
    pub timeline: &'static str,
    pub severity_weight: u32,
}

/// Binary deficiency predictions keyed by model target name
///
/// Missing keys read as 0. Unknown keys are kept so the raw model output can
/// still be shown, but they never carry a severity weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionSet(BTreeMap<String, u8>);

impl PredictionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, indicator: u8) {
        self.0.insert(key.into(), indicator);
    }

    /// Indicator for `key`, 0 when absent
    pub fn indicator(&self, key: &str) -> u8 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn is_detected(&self, category: DeficiencyCategory) -> bool {
        self.indicator(category.key()) == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u8)> for PredictionSet {
    fn from_iter<I: IntoIterator<Item = (K, u8)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Severity tier derived from the severity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityTier {
    None,
    Mild,
    Moderate,
    Severe,
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityTier::None => write!(f, "None"),
            SeverityTier::Mild => write!(f, "Mild"),
            SeverityTier::Moderate => write!(f, "Moderate"),
            SeverityTier::Severe => write!(f, "Severe"),
        }
    }
}

/// Recommendation produced for one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreatmentPlan {
    pub primary_concern: &'static str,
    /// `None` when the soil needs maintenance only
    pub category: Option<DeficiencyCategory>,
    pub severity: SeverityTier,
    pub solutions: &'static [&'static str],
    pub cost_estimate: &'static str,
    pub timeline: &'static str,
    pub sustainability_score: u8,
    pub farmer_friendly: bool,
    pub chemical_free: bool,
}

/// Qualitative band for a predicted soil-health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthStatus {
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            HealthStatus::Excellent
        } else if score > 0.6 {
            HealthStatus::Good
        } else if score > 0.4 {
            HealthStatus::Fair
        } else {
            HealthStatus::Poor
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "Excellent"),
            HealthStatus::Good => write!(f, "Good"),
            HealthStatus::Fair => write!(f, "Fair"),
            HealthStatus::Poor => write!(f, "Poor"),
        }
    }
}

/// Raw field measurements entered by the farmer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub nitrogen: f64,   // kg/hectare
    pub phosphorus: f64, // kg/hectare
    pub potassium: f64,  // kg/hectare
    pub ph: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
}

impl SoilSample {
    /// Accepted input ranges, inclusive
    pub const RANGES: [(&'static str, f64, f64); 7] = [
        ("nitrogen", 0.0, 300.0),
        ("phosphorus", 0.0, 200.0),
        ("potassium", 0.0, 300.0),
        ("ph", 3.0, 10.0),
        ("temperature", 5.0, 50.0),
        ("humidity", 10.0, 100.0),
        ("rainfall", 0.0, 500.0),
    ];

    fn values(&self) -> [f64; 7] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.ph,
            self.temperature_c,
            self.humidity_pct,
            self.rainfall_mm,
        ]
    }

    /// Reject values outside the accepted ranges (NaN included)
    pub fn validate(&self) -> Result<(), SampleError> {
        for (&(field, min, max), value) in Self::RANGES.iter().zip(self.values()) {
            if !(min..=max).contains(&value) {
                return Err(SampleError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl Default for SoilSample {
    fn default() -> Self {
        Self {
            nitrogen: 50.0,
            phosphorus: 50.0,
            potassium: 50.0,
            ph: 6.5,
            temperature_c: 25.0,
            humidity_pct: 70.0,
            rainfall_mm: 100.0,
        }
    }
}
