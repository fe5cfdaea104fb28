//! Decay library error types

use thiserror::Error;

/// Errors raised while looking up nuclides or evolving inventories
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecayError {
    /// The string does not describe a nuclide at all
    #[error("{0} is not a valid nuclide string")]
    InvalidNuclide(String),

    /// Well-formed nuclide that the embedded dataset does not carry
    #[error("{0} is not in the decay dataset")]
    UnknownNuclide(String),

    /// Quantity is negative, NaN or infinite
    #[error("Quantity for {nuclide} must be a finite non-negative number, got {value}")]
    InvalidQuantity { nuclide: String, value: f64 },

    /// Stable nuclides have no activity to convert from
    #[error("{0} is stable and cannot be specified as an activity")]
    ActivityOfStable(String),

    /// Nothing to evolve
    #[error("Inventory contains no nuclides")]
    EmptyInventory,

    /// Decay time is negative, NaN or infinite
    #[error("Decay time must be finite and non-negative, got {0}")]
    InvalidTime(f64),

    /// Parent and progeny share a decay constant
    #[error("Degenerate decay constants for {parent} and {progeny}")]
    DegenerateDecayConstants { parent: String, progeny: String },
}
