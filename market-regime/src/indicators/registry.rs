//! Immutable map of scored indicators for one run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{IndicatorName, IndicatorResult};

/// Scored indicators keyed by name, iterated in report order.
///
/// Built once from the scorer outputs; indicators that could not be scored
/// are absent and read as a neutral 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorRegistry {
    results: BTreeMap<IndicatorName, IndicatorResult>,
}

impl IndicatorRegistry {
    pub fn get(&self, name: IndicatorName) -> Option<&IndicatorResult> {
        self.results.get(&name)
    }

    pub fn contains(&self, name: IndicatorName) -> bool {
        self.results.contains_key(&name)
    }

    /// Score of `name`, or 0 when it was not scored.
    pub fn score_or_neutral(&self, name: IndicatorName) -> f64 {
        self.results.get(&name).map(|r| r.score).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorResult> {
        self.results.values()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FromIterator<IndicatorResult> for IndicatorRegistry {
    fn from_iter<I: IntoIterator<Item = IndicatorResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().map(|r| (r.name, r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::types::IndicatorDetails;

    fn ratio(score: f64) -> IndicatorResult {
        IndicatorResult::new(
            IndicatorName::SectorRotation,
            score,
            IndicatorDetails::SectorRotation { ratio: 2.3 },
        )
    }

    #[test]
    fn test_missing_reads_neutral() {
        let registry: IndicatorRegistry = std::iter::once(ratio(0.3)).collect();
        assert_eq!(registry.score_or_neutral(IndicatorName::SectorRotation), 0.3);
        assert_eq!(registry.score_or_neutral(IndicatorName::Vix), 0.0);
        assert!(!registry.contains(IndicatorName::Vix));
    }

    #[test]
    fn test_serializes_keyed_by_name() {
        let registry: IndicatorRegistry = std::iter::once(ratio(0.3)).collect();
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["Sector_Rotation"]["score"], 0.3);
        assert_eq!(json["Sector_Rotation"]["details"]["ratio"], 2.3);
    }
}
