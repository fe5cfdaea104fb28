//! Radioactive decay library for DecayViz
//!
//! This crate carries the nuclear data and the decay computations the HTTP
//! layer orchestrates:
//!
//! - [`element`] - Element symbol table
//! - [`nuclide`] - Nuclide identifiers and name parsing
//! - [`dataset`] - Embedded half-lives, atomic masses and decay modes
//! - [`half_life`] - Human-readable half-life formatting
//! - [`chain`] - Decay chain graphs rooted at one nuclide
//! - [`details`] - Best-effort per-nuclide display metadata
//! - [`solver`] - Closed-form solution of the decay equations
//! - [`inventory`] - Nuclide inventories and their time evolution
//!
//! # Quick Start
//!
//! ```
//! use common::QuantityUnit;
//! use decay::{Dataset, Inventory};
//!
//! let dataset = Dataset::embedded();
//! let mut inventory = Inventory::new(dataset);
//! inventory.add("Cs-137", 1.0, QuantityUnit::Bq).unwrap();
//!
//! let evolution = inventory.evolve(&[0.0, 86_400.0]).unwrap();
//! assert_eq!(evolution.nuclide_names(), vec!["Cs-137", "Ba-137m", "Ba-137"]);
//! ```

pub mod chain;
pub mod dataset;
pub mod details;
pub mod element;
pub mod error;
pub mod half_life;
pub mod inventory;
pub mod nuclide;
pub mod solver;

pub use chain::{ChainEdge, ChainNode, DecayChain};
pub use dataset::{Dataset, DecayMode, NuclideRecord};
pub use details::NuclideDetails;
pub use error::DecayError;
pub use half_life::readable_half_life;
pub use inventory::{log_times, Evolution, Inventory};
pub use nuclide::NuclideId;
pub use solver::DecayMatrix;

/// Result type for decay operations
pub type Result<T> = std::result::Result<T, DecayError>;
