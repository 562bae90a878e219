use serde::{Deserialize, Serialize};

/// Eligibility category for the 30% ruling.
///
/// Each category has its own salary threshold per year (see
/// [`RulingThresholds`](super::RulingThresholds)). Unknown categories are
/// treated as [`RulingCategory::Other`], the least generous policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RulingCategory {
    /// Scientific researchers at designated institutions.
    ResearchWorker,
    /// Employees under 30 holding a Dutch-equivalent master's degree.
    YoungProfessional,
    #[default]
    #[serde(other)]
    Other,
}

impl RulingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResearchWorker => "researchWorker",
            Self::YoungProfessional => "youngProfessional",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "researchWorker" | "research_worker" | "research-worker" => Self::ResearchWorker,
            "youngProfessional" | "young_professional" | "young-professional" => {
                Self::YoungProfessional
            }
            "other" => Self::Other,
            unknown => {
                tracing::debug!(category = unknown, "unknown 30% ruling category; using 'other'");
                Self::Other
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_camel_and_snake_case() {
        assert_eq!(RulingCategory::parse("researchWorker"), RulingCategory::ResearchWorker);
        assert_eq!(RulingCategory::parse("young_professional"), RulingCategory::YoungProfessional);
    }

    #[test]
    fn unknown_category_falls_back_to_other() {
        assert_eq!(RulingCategory::parse("astronaut"), RulingCategory::Other);
        assert_eq!(RulingCategory::parse(""), RulingCategory::Other);
    }
}
