//! Common types and utilities for DecayViz
//!
//! This crate provides the unit vocabulary shared by the decay library,
//! the renderer and the HTTP layer.
//!
//! # Modules
//!
//! - [`error`] - Common error types
//! - [`units`] - Closed unit enumerations (time, quantity, y-axis) and axis labels

pub mod error;
pub mod units;

pub use error::{Error, Result};
pub use units::{
    axis_label_for_code, units_catalog, QuantityUnit, TimeUnit, UnitCategory, UnitsCatalog,
    YUnit, AVOGADRO,
};
