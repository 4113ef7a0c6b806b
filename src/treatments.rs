//! Organic treatment table
//!
//! Every record is `'static` and read-only; lookups never allocate.

use crate::models::{DeficiencyCategory, TreatmentRecord};

static ZINC_DEFICIENCY: TreatmentRecord = TreatmentRecord {
    solutions: &[
        "Apply zinc-rich vermicompost (5-10 kg/acre)",
        "Use seaweed extract foliar spray (2-3 times/season)",
        "Incorporate zinc-accumulating legume cover crops (cowpea, chickpea)",
        "Apply bone meal organic fertilizer (2-3 kg/acre)",
        "Use organic mulching with zinc-rich materials",
        "Implement crop rotation with zinc-efficient varieties",
    ],
    cost_band: "₹2,000-4,000/acre",
    timeline: "3-6 months",
    severity_weight: 25,
};

static IRON_DEFICIENCY: TreatmentRecord = TreatmentRecord {
    solutions: &[
        "Apply iron-rich kitchen waste compost",
        "Use mycorrhizal fungi inoculation for better iron uptake",
        "Foliar spray with organic iron chelate solution",
        "Apply blood meal organic fertilizer (1-2 kg/acre)",
        "Improve soil drainage to prevent waterlogging",
        "Use green manure crops rich in iron",
    ],
    cost_band: "₹1,500-3,500/acre",
    timeline: "2-4 months",
    severity_weight: 20,
};

static MULTIPLE_DEFICIENCY: TreatmentRecord = TreatmentRecord {
    solutions: &[
        "Comprehensive organic soil restoration program",
        "Apply aged farmyard manure (10-15 tons/hectare)",
        "Implement diverse crop rotation with nitrogen-fixing legumes",
        "Use biochar for soil structure and nutrient improvement",
        "Establish permanent organic matter cycling system",
        "Apply rock phosphate and potash for long-term nutrition",
    ],
    cost_band: "₹8,000-15,000/acre",
    timeline: "6-12 months",
    severity_weight: 40,
};

static SOIL_HEALTH_IMPROVEMENT: TreatmentRecord = TreatmentRecord {
    solutions: &[
        "Increase organic matter through systematic composting",
        "Apply premium vermicompost (2-3 tons/hectare)",
        "Use effective microorganisms (EM) soil solution",
        "Implement no-till or minimal tillage practices",
        "Apply organic biofertilizers (Rhizobium, Azotobacter)",
        "Create permanent mulch cover system",
    ],
    cost_band: "₹3,000-6,000/acre",
    timeline: "4-8 months",
    severity_weight: 15,
};

/// Maintenance advice for soil with no detected concern
pub static MAINTENANCE: TreatmentRecord = TreatmentRecord {
    solutions: &[
        "Continue sustainable farming practices",
        "Regular soil testing and monitoring",
        "Maintain organic matter levels through composting",
    ],
    cost_band: "₹500-1,500/acre (maintenance)",
    timeline: "Ongoing maintenance",
    severity_weight: 0,
};

pub const HEALTHY_SOIL_LABEL: &str = "None - Soil in excellent condition";

/// Treatment record for a category
pub fn treatment_for(category: DeficiencyCategory) -> &'static TreatmentRecord {
    match category {
        DeficiencyCategory::ZincDeficiency => &ZINC_DEFICIENCY,
        DeficiencyCategory::IronDeficiency => &IRON_DEFICIENCY,
        DeficiencyCategory::MultipleDeficiency => &MULTIPLE_DEFICIENCY,
        DeficiencyCategory::SoilHealthImprovement => &SOIL_HEALTH_IMPROVEMENT,
    }
}

/// Treatment record for a raw table key, if the key is in the table
pub fn lookup(key: &str) -> Option<&'static TreatmentRecord> {
    DeficiencyCategory::from_key(key).map(treatment_for)
}

/// All table entries in category order
pub fn all() -> impl Iterator<Item = (DeficiencyCategory, &'static TreatmentRecord)> {
    DeficiencyCategory::ALL
        .into_iter()
        .map(|category| (category, treatment_for(category)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_six_solutions() {
        for (category, record) in all() {
            assert_eq!(record.solutions.len(), 6, "{} solutions", category);
        }
        assert_eq!(MAINTENANCE.solutions.len(), 3);
    }

    #[test]
    fn test_severity_weights() {
        let weights: Vec<u32> = all().map(|(_, r)| r.severity_weight).collect();
        assert_eq!(weights, vec![25, 20, 40, 15]);
    }

    #[test]
    fn test_lookup_by_key() {
        let record = lookup("multiple_deficiency").unwrap();
        assert_eq!(record.timeline, "6-12 months");
        assert!(lookup("nitrogen_deficiency").is_none());
    }
}
