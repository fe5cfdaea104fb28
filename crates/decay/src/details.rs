//! Display metadata for a single nuclide

use serde::Serialize;

use crate::dataset::Dataset;
use crate::half_life::readable_half_life;

/// Everything shown for one node of a decay-chain diagram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuclideDetails {
    pub label: String,
    pub half_life: String,
    pub half_life_seconds: Option<f64>,
    pub atomic_mass: f64,
    pub atomic_number: u32,
    pub mass_number: u32,
    pub decay_modes: Vec<String>,
    /// Branching fractions in percent, aligned with `decay_modes`
    pub branching_fractions: Vec<f64>,
    pub progeny: Vec<String>,
}

impl NuclideDetails {
    /// Best-effort lookup; `None` when the dataset has nothing for `name`
    pub fn lookup(dataset: &Dataset, name: &str) -> Option<Self> {
        let record = dataset.get(name)?;
        let decays = record.decays.iter().filter(|d| d.branching > 0.0);

        Some(Self {
            label: record.name.to_string(),
            half_life: readable_half_life(record.half_life),
            half_life_seconds: record.half_life,
            atomic_mass: record.atomic_mass,
            atomic_number: record.z,
            mass_number: record.a,
            decay_modes: decays.clone().map(|d| d.mode.to_string()).collect(),
            branching_fractions: decays.clone().map(|d| percent(d.branching)).collect(),
            progeny: decays.map(|d| d.progeny.to_string()).collect(),
        })
    }
}

fn percent(fraction: f64) -> f64 {
    (fraction * 100.0 * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_branching_nuclide() {
        let details = NuclideDetails::lookup(Dataset::embedded(), "Bi-212").unwrap();
        assert_eq!(details.label, "Bi-212");
        assert_eq!(details.half_life, "1.009 h");
        assert_eq!(details.atomic_number, 83);
        assert_eq!(details.mass_number, 212);
        assert_eq!(details.decay_modes, vec!["β-", "α"]);
        assert_eq!(details.branching_fractions, vec![64.06, 35.94]);
        assert_eq!(details.progeny, vec!["Po-212", "Tl-208"]);
    }

    #[test]
    fn test_lookup_stable() {
        let details = NuclideDetails::lookup(Dataset::embedded(), "Pb-208").unwrap();
        assert_eq!(details.half_life, "stable");
        assert_eq!(details.half_life_seconds, None);
        assert!(details.decay_modes.is_empty());
        assert!(details.progeny.is_empty());
    }

    #[test]
    fn test_lookup_missing_is_none() {
        assert!(NuclideDetails::lookup(Dataset::embedded(), "Og-294").is_none());
        assert!(NuclideDetails::lookup(Dataset::embedded(), "not a nuclide").is_none());
    }

    #[test]
    fn test_serializes_flat() {
        let details = NuclideDetails::lookup(Dataset::embedded(), "Co-60").unwrap();
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["label"], "Co-60");
        assert_eq!(json["progeny"][0], "Ni-60");
        assert_eq!(json["branching_fractions"][0], 100.0);
    }
}
