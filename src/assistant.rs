//! Offline farming assistant
//!
//! Routes a free-text question to one of a few canned answers by keyword.
//! Keywords match anywhere in the question, case-insensitively, and topics
//! are tried in order.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    SoilNutrition,
    OrganicFarming,
    CostEffective,
    Welcome,
}

const SOIL_NUTRITION: &str = "\
Soil Nutrition Advice:

For soil nutrition issues, I recommend:
1. Test your soil regularly to understand nutrient levels
2. Use organic compost to improve soil health
3. Apply vermicompost for natural nutrient enrichment
4. Consider crop rotation to maintain soil fertility
5. Use green manure crops like legumes

For specific deficiency issues, run a soil analysis to get personalized recommendations.";

const ORGANIC_FARMING: &str = "\
Organic Farming Solutions:

For organic farming practices:
1. Composting: Create nutrient-rich compost from kitchen waste
2. Vermicompost: Use earthworms for natural soil improvement
3. Neem-based solutions: Natural pest control methods
4. Crop rotation: Prevent soil depletion and pest buildup
5. Mulching: Retain soil moisture and suppress weeds

These methods are cost-effective and environmentally friendly!";

const COST_EFFECTIVE: &str = "\
Cost-Effective Farming:

For budget-friendly farming:
1. Start small with organic methods
2. Make your own compost from farm waste
3. Use local resources and traditional knowledge
4. Group farming to reduce input costs
5. Government schemes for financial support

The soil analysis provides cost estimates for all recommended treatments.";

const WELCOME: &str = "\
Welcome to the soil advisor!

I'm here to help with your farming questions! You can ask about:
- Soil nutrition and deficiency issues
- Organic farming methods
- Cost-effective solutions
- Crop-specific advice
- Sustainable agriculture practices

For detailed analysis, run a soil analysis first, then ask specific questions based on your results!";

static TOPIC_PATTERNS: LazyLock<Vec<(Topic, Regex)>> = LazyLock::new(|| {
    [
        (Topic::SoilNutrition, r"(?i)soil|nutrient|deficiency"),
        (Topic::OrganicFarming, r"(?i)organic|chemical|pesticide"),
        (Topic::CostEffective, r"(?i)cost|price|expensive|budget"),
    ]
    .into_iter()
    .filter_map(|(topic, pattern)| Regex::new(pattern).ok().map(|re| (topic, re)))
    .collect()
});

/// Topic a question is routed to
pub fn classify(question: &str) -> Topic {
    TOPIC_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(question))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Welcome)
}

pub fn answer(topic: Topic) -> &'static str {
    match topic {
        Topic::SoilNutrition => SOIL_NUTRITION,
        Topic::OrganicFarming => ORGANIC_FARMING,
        Topic::CostEffective => COST_EFFECTIVE,
        Topic::Welcome => WELCOME,
    }
}

pub fn respond(question: &str) -> &'static str {
    answer(classify(question))
}
