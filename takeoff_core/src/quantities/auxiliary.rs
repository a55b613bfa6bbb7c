//! Per-profile counts and weights (the auxiliary section table).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Entity;
use crate::units::round_weight;

/// Count and accumulated weight for one profile name
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionTally {
    pub count: u32,
    pub total_weight: f64,
}

/// Profile name -> tally, sorted by name
pub type NamedQuantityAggregate = BTreeMap<String, SectionTally>;

/// Tally profile definitions and the weights named after them.
///
/// The first pass registers every `ProfileName` of `profile_entities` and
/// counts its occurrences. The second pass adds `WeightValue` of each entry
/// of `weight_entities` whose `Name` is an already registered profile;
/// weights under any other name are ignored. Weights are rounded to
/// 2 decimals after both passes.
///
/// Returns the total count (sum of all per-profile counts) and the table.
pub fn auxiliary_aggregate(profile_entities: &[&Entity], weight_entities: &[&Entity]) -> (u32, NamedQuantityAggregate) {
    let mut table = NamedQuantityAggregate::new();

    for profile in profile_entities {
        let Some(name) = profile.text("ProfileName") else {
            tracing::debug!(entity = profile.id, "profile without ProfileName");
            continue;
        };
        table.entry(name.to_string()).or_default().count += 1;
    }

    for weight in weight_entities {
        let Some(tally) = weight.name().and_then(|name| table.get_mut(name)) else {
            continue;
        };
        tally.total_weight += weight.number("WeightValue").unwrap_or(0.0);
    }

    for tally in table.values_mut() {
        tally.total_weight = round_weight(tally.total_weight);
    }

    let total = table.values().map(|tally| tally.count).sum();
    (total, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u64, name: &str) -> Entity {
        Entity::new(id, "IfcStructuralProfileProperties").with_attribute("ProfileName", name)
    }

    fn weight(id: u64, name: &str, value: f64) -> Entity {
        Entity::new(id, "IfcQuantityWeight")
            .with_attribute("Name", name)
            .with_attribute("WeightValue", value)
    }

    #[test]
    fn test_counts_and_weights() {
        let profiles = [profile(1, "W8x31"), profile(2, "W8x31"), profile(3, "HSS4x4")];
        let weights = [
            weight(10, "W8x31", 310.111),
            weight(11, "W8x31", 20.0),
            weight(12, "HSS4x4", 1.005),
        ];
        let profiles: Vec<&Entity> = profiles.iter().collect();
        let weights: Vec<&Entity> = weights.iter().collect();

        let (total, table) = auxiliary_aggregate(&profiles, &weights);
        assert_eq!(total, 3);
        assert_eq!(table["W8x31"], SectionTally { count: 2, total_weight: 330.11 });
        assert_eq!(table["HSS4x4"].count, 1);
    }

    #[test]
    fn test_unregistered_weight_names_are_ignored() {
        let profiles = [profile(1, "C6x8.2")];
        let weights = [weight(2, "W12x26", 999.0), weight(3, "C6x8.2", 41.0)];
        let profiles: Vec<&Entity> = profiles.iter().collect();
        let weights: Vec<&Entity> = weights.iter().collect();

        let (total, table) = auxiliary_aggregate(&profiles, &weights);
        assert_eq!(total, 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table["C6x8.2"].total_weight, 41.0);
    }

    #[test]
    fn test_total_equals_sum_of_counts() {
        let profiles: Vec<Entity> = (0..7).map(|i| profile(i, if i % 3 == 0 { "A" } else { "B" })).collect();
        let refs: Vec<&Entity> = profiles.iter().collect();
        let (total, table) = auxiliary_aggregate(&refs, &[]);
        assert_eq!(total, table.values().map(|t| t.count).sum::<u32>());
        assert_eq!(total, 7);
        assert_eq!(table["A"].total_weight, 0.0);
    }
}
