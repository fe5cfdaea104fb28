//! Nuclide inventories and their evolution over time

use common::{QuantityUnit, UnitCategory, YUnit, AVOGADRO};
use indexmap::IndexMap;
use tracing::debug;

use crate::chain::topological_order;
use crate::dataset::{Dataset, NuclideRecord};
use crate::error::DecayError;
use crate::solver::DecayMatrix;
use crate::Result;

/// Atom counts keyed by canonical nuclide name
#[derive(Debug, Clone)]
pub struct Inventory<'d> {
    dataset: &'d Dataset,
    atoms: IndexMap<&'static str, f64>,
}

impl<'d> Inventory<'d> {
    pub fn new(dataset: &'d Dataset) -> Self {
        Self {
            dataset,
            atoms: IndexMap::new(),
        }
    }

    /// Add `quantity` of `isotope`, expressed in `unit`
    ///
    /// Adding the same nuclide twice accumulates.
    pub fn add(&mut self, isotope: &str, quantity: f64, unit: QuantityUnit) -> Result<()> {
        let record = self.dataset.nuclide(isotope)?;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DecayError::InvalidQuantity {
                nuclide: record.name.to_string(),
                value: quantity,
            });
        }

        let atoms = atoms_from(record, quantity, unit)?;
        *self.atoms.entry(record.name).or_insert(0.0) += atoms;
        Ok(())
    }

    /// Nuclides added so far, in insertion order
    pub fn nuclides(&self) -> Vec<&'static str> {
        self.atoms.keys().copied().collect()
    }

    pub fn atoms(&self, name: &str) -> Option<f64> {
        self.atoms.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Decay the inventory to each of `times` (seconds)
    ///
    /// The result covers every progeny of every nuclide in the inventory.
    pub fn evolve(&self, times: &[f64]) -> Result<Evolution> {
        if self.atoms.is_empty() {
            return Err(DecayError::EmptyInventory);
        }
        if let Some(bad) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(DecayError::InvalidTime(*bad));
        }

        let roots: Vec<&'static NuclideRecord> = self
            .atoms
            .keys()
            .filter_map(|name| self.dataset.get(name))
            .collect();
        let order = topological_order(self.dataset, &roots);
        let matrix = DecayMatrix::build(&order)?;

        let n0: Vec<f64> = order
            .iter()
            .map(|r| self.atoms.get(r.name).copied().unwrap_or(0.0))
            .collect();
        let coefficients = matrix.coefficients(&n0);
        let atoms = times.iter().map(|t| matrix.at(&coefficients, *t)).collect();

        debug!(
            inputs = self.atoms.len(),
            nuclides = order.len(),
            samples = times.len(),
            "Evolved inventory"
        );

        Ok(Evolution {
            nuclides: order,
            times: times.to_vec(),
            atoms,
        })
    }
}

fn atoms_from(record: &NuclideRecord, quantity: f64, unit: QuantityUnit) -> Result<f64> {
    let base = quantity * unit.to_base();
    match unit.category() {
        UnitCategory::Activity => {
            if record.is_stable() {
                if quantity == 0.0 {
                    return Ok(0.0);
                }
                return Err(DecayError::ActivityOfStable(record.name.to_string()));
            }
            Ok(base / record.decay_constant())
        }
        UnitCategory::Mass => Ok(base / record.atomic_mass * AVOGADRO),
        UnitCategory::Amount | UnitCategory::Fraction => Ok(base * AVOGADRO),
    }
}

/// Atom counts of an inventory sampled at a series of times
#[derive(Debug, Clone)]
pub struct Evolution {
    /// Decay order: parents before progeny
    nuclides: Vec<&'static NuclideRecord>,
    times: Vec<f64>,
    /// `atoms[sample][nuclide]`
    atoms: Vec<Vec<f64>>,
}

impl Evolution {
    pub fn nuclide_names(&self) -> Vec<&'static str> {
        self.nuclides.iter().map(|r| r.name).collect()
    }

    /// Sample times in seconds
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Every nuclide's series converted to `unit`, in decay order
    pub fn series(&self, unit: YUnit) -> IndexMap<&'static str, Vec<f64>> {
        let converted: Vec<Vec<f64>> = self
            .atoms
            .iter()
            .map(|row| self.convert_sample(row, unit))
            .collect();

        self.nuclides
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                (
                    record.name,
                    converted.iter().map(|sample| sample[idx]).collect(),
                )
            })
            .collect()
    }

    fn convert_sample(&self, atoms: &[f64], unit: YUnit) -> Vec<f64> {
        match unit {
            YUnit::Quantity(q) => {
                let scale = q.to_base();
                self.nuclides
                    .iter()
                    .zip(atoms)
                    .map(|(r, n)| quantity_of(r, *n, q.category()) / scale)
                    .collect()
            }
            YUnit::ActivityFraction => fractions(self.nuclides.iter().zip(atoms).map(|(r, n)| {
                quantity_of(r, *n, UnitCategory::Activity)
            })),
            YUnit::MassFraction => fractions(
                self.nuclides
                    .iter()
                    .zip(atoms)
                    .map(|(r, n)| quantity_of(r, *n, UnitCategory::Mass)),
            ),
            YUnit::MoleFraction => fractions(atoms.iter().copied()),
        }
    }
}

/// Base-unit quantity (Bq, g or mol) held by `atoms` atoms of `record`
fn quantity_of(record: &NuclideRecord, atoms: f64, category: UnitCategory) -> f64 {
    match category {
        UnitCategory::Activity => record.decay_constant() * atoms,
        UnitCategory::Mass => atoms * record.atomic_mass / AVOGADRO,
        UnitCategory::Amount | UnitCategory::Fraction => atoms / AVOGADRO,
    }
}

fn fractions(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let values: Vec<f64> = values.collect();
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter().map(|v| v / total).collect()
    } else {
        vec![0.0; values.len()]
    }
}

/// `samples` log-spaced times from `span / 1000` to `span`
pub fn log_times(span: f64, samples: usize) -> Vec<f64> {
    let start = span * 1e-3;
    match samples {
        0 => Vec::new(),
        1 => vec![span],
        _ => {
            let (lo, hi) = (start.log10(), span.log10());
            let step = (hi - lo) / (samples - 1) as f64;
            (0..samples)
                .map(|i| 10f64.powf(lo + step * i as f64))
                .collect()
        }
    }
}
