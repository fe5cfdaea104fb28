//! Closed-form solution of the linear decay equations
//!
//! For nuclides in topological order the decay matrix `M` is lower triangular
//! with `-λᵢ` on the diagonal and `bₖᵢ·λₖ` below it. Its eigenvectors form a
//! unit lower-triangular matrix `C`, so
//!
//! ```text
//! N(t) = C · diag(e^{-λt}) · C⁻¹ · N₀
//! ```
//!
//! `C` and `C⁻¹` are built once per set of nuclides and reused for every time.

use std::collections::HashMap;

use crate::dataset::NuclideRecord;
use crate::error::DecayError;
use crate::Result;

/// Eigen-decomposition of the decay matrix for an ordered set of nuclides
#[derive(Debug, Clone)]
pub struct DecayMatrix {
    lambda: Vec<f64>,
    c: Vec<Vec<f64>>,
    c_inv: Vec<Vec<f64>>,
}

impl DecayMatrix {
    /// `order` must list parents before progeny (see [`crate::chain::topological_order`])
    pub fn build(order: &[&NuclideRecord]) -> Result<Self> {
        let n = order.len();
        let index: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name, i))
            .collect();
        let lambda: Vec<f64> = order.iter().map(|r| r.decay_constant()).collect();

        // production[i][k]: rate at which nuclide k feeds nuclide i
        let mut production = vec![vec![0.0; n]; n];
        for (k, record) in order.iter().enumerate() {
            for decay in record.decays {
                if let Some(&i) = index.get(decay.progeny) {
                    production[i][k] += decay.branching * lambda[k];
                }
            }
        }

        let mut c = vec![vec![0.0; n]; n];
        for j in 0..n {
            c[j][j] = 1.0;
            for i in (j + 1)..n {
                let sum: f64 = (j..i).map(|k| production[i][k] * c[k][j]).sum();
                if sum == 0.0 {
                    continue;
                }
                let denominator = lambda[i] - lambda[j];
                if denominator == 0.0 {
                    return Err(DecayError::DegenerateDecayConstants {
                        parent: order[j].name.to_string(),
                        progeny: order[i].name.to_string(),
                    });
                }
                c[i][j] = sum / denominator;
            }
        }

        let mut c_inv = vec![vec![0.0; n]; n];
        for i in 0..n {
            c_inv[i][i] = 1.0;
            for j in 0..i {
                c_inv[i][j] = -(j..i).map(|k| c[i][k] * c_inv[k][j]).sum::<f64>();
            }
        }

        Ok(Self { lambda, c, c_inv })
    }

    pub fn len(&self) -> usize {
        self.lambda.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lambda.is_empty()
    }

    /// Project initial atom counts onto the eigenbasis (`C⁻¹ · N₀`)
    pub fn coefficients(&self, n0: &[f64]) -> Vec<f64> {
        self.c_inv
            .iter()
            .map(|row| row.iter().zip(n0).map(|(a, b)| a * b).sum())
            .collect()
    }

    /// Atom counts at `t` seconds from coefficients returned by [`Self::coefficients`]
    pub fn at(&self, coefficients: &[f64], t: f64) -> Vec<f64> {
        let decayed: Vec<f64> = coefficients
            .iter()
            .zip(&self.lambda)
            .map(|(y, l)| y * (-l * t).exp())
            .collect();
        self.c
            .iter()
            .map(|row| {
                let value: f64 = row.iter().zip(&decayed).map(|(a, b)| a * b).sum();
                // Cancellation can leave tiny negative residue
                value.max(0.0)
            })
            .collect()
    }

    pub fn evolve(&self, n0: &[f64], t: f64) -> Vec<f64> {
        self.at(&self.coefficients(n0), t)
    }
}
