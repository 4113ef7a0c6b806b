//! Feature vector derivation for the prediction model

use crate::models::SoilSample;

/// Number of model input features
pub const FEATURE_COUNT: usize = 11;

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "N",
    "P",
    "K",
    "ph",
    "temperature",
    "humidity",
    "rainfall",
    "N_P_ratio",
    "N_K_ratio",
    "P_K_ratio",
    "soil_health_score",
];

/// Nutrient ratios (N:P, N:K, P:K), zero when the denominator nutrient is absent
pub fn nutrient_ratios(n: f64, p: f64, k: f64) -> (f64, f64, f64) {
    let n_p = if p > 0.0 { n / (p + 1.0) } else { 0.0 };
    let n_k = if k > 0.0 { n / (k + 1.0) } else { 0.0 };
    let p_k = if k > 0.0 { p / (k + 1.0) } else { 0.0 };
    (n_p, n_k, p_k)
}

/// Composite soil-health estimate from NPK and pH, capped at 1.0
pub fn composite_health_score(n: f64, p: f64, k: f64, ph: f64) -> f64 {
    let ph_term = 1.0 - (ph - 7.0).abs() / 3.0;
    ((n / 200.0 + p / 80.0 + k / 90.0 + ph_term) / 4.0).min(1.0)
}

/// Build the model input vector for a sample
pub fn feature_vector(sample: &SoilSample) -> [f64; FEATURE_COUNT] {
    let SoilSample {
        nitrogen: n,
        phosphorus: p,
        potassium: k,
        ph,
        temperature_c,
        humidity_pct,
        rainfall_mm,
    } = *sample;

    let (n_p, n_k, p_k) = nutrient_ratios(n, p, k);

    [
        n,
        p,
        k,
        ph,
        temperature_c,
        humidity_pct,
        rainfall_mm,
        n_p,
        n_k,
        p_k,
        composite_health_score(n, p, k, ph),
    ]
}
