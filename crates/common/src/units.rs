//! Unit vocabulary
//!
//! Every unit accepted over the wire is a closed enumeration parsed from its
//! short code (`"Bq"`, `"kg"`, `"activity_frac"`, ...). Serde goes through the
//! same code tables, so an unknown code is rejected at the boundary and never
//! travels further as a free-form string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Avogadro constant (1/mol)
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Seconds in one year (365.2422 days)
const SECONDS_PER_YEAR: f64 = 365.2422 * 86_400.0;

/// Curie in becquerels
const CURIE: f64 = 3.7e10;

/// Category a quantity or y-axis unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Activity,
    Mass,
    Amount,
    Fraction,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 4] = [
        UnitCategory::Activity,
        UnitCategory::Mass,
        UnitCategory::Amount,
        UnitCategory::Fraction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Activity => "activity",
            UnitCategory::Mass => "mass",
            UnitCategory::Amount => "amount",
            UnitCategory::Fraction => "fraction",
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Time unit for the evolution time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Years,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 5] = [
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
        TimeUnit::Years,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Years => "y",
        }
    }

    /// Length of one unit in seconds
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Days => 86_400.0,
            TimeUnit::Years => SECONDS_PER_YEAR,
        }
    }

    pub fn axis_label(&self) -> String {
        format!("Time ({})", self.code())
    }

    pub fn parse(code: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|u| u.code() == code)
            .ok_or_else(|| Error::unknown_unit("time unit", code, &Self::codes()))
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|u| u.code()).collect()
    }
}

// ---------------------------------------------------------------------------
// Quantities (activity, mass, amount)
// ---------------------------------------------------------------------------

/// Unit of an absolute nuclide quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuantityUnit {
    Bq,
    KBq,
    MBq,
    GBq,
    TBq,
    PBq,
    Ci,
    MCi,
    UCi,
    NCi,
    PCi,
    Gram,
    Milligram,
    Microgram,
    Nanogram,
    Picogram,
    Kilogram,
    Mol,
    Mmol,
    Umol,
    Nmol,
    Pmol,
    Kmol,
    Num,
}

impl QuantityUnit {
    pub const ALL: [QuantityUnit; 24] = [
        QuantityUnit::Bq,
        QuantityUnit::KBq,
        QuantityUnit::MBq,
        QuantityUnit::GBq,
        QuantityUnit::TBq,
        QuantityUnit::PBq,
        QuantityUnit::Ci,
        QuantityUnit::MCi,
        QuantityUnit::UCi,
        QuantityUnit::NCi,
        QuantityUnit::PCi,
        QuantityUnit::Gram,
        QuantityUnit::Milligram,
        QuantityUnit::Microgram,
        QuantityUnit::Nanogram,
        QuantityUnit::Picogram,
        QuantityUnit::Kilogram,
        QuantityUnit::Mol,
        QuantityUnit::Mmol,
        QuantityUnit::Umol,
        QuantityUnit::Nmol,
        QuantityUnit::Pmol,
        QuantityUnit::Kmol,
        QuantityUnit::Num,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            QuantityUnit::Bq => "Bq",
            QuantityUnit::KBq => "kBq",
            QuantityUnit::MBq => "MBq",
            QuantityUnit::GBq => "GBq",
            QuantityUnit::TBq => "TBq",
            QuantityUnit::PBq => "PBq",
            QuantityUnit::Ci => "Ci",
            QuantityUnit::MCi => "mCi",
            QuantityUnit::UCi => "uCi",
            QuantityUnit::NCi => "nCi",
            QuantityUnit::PCi => "pCi",
            QuantityUnit::Gram => "g",
            QuantityUnit::Milligram => "mg",
            QuantityUnit::Microgram => "ug",
            QuantityUnit::Nanogram => "ng",
            QuantityUnit::Picogram => "pg",
            QuantityUnit::Kilogram => "kg",
            QuantityUnit::Mol => "mol",
            QuantityUnit::Mmol => "mmol",
            QuantityUnit::Umol => "umol",
            QuantityUnit::Nmol => "nmol",
            QuantityUnit::Pmol => "pmol",
            QuantityUnit::Kmol => "kmol",
            QuantityUnit::Num => "num",
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            QuantityUnit::Bq
            | QuantityUnit::KBq
            | QuantityUnit::MBq
            | QuantityUnit::GBq
            | QuantityUnit::TBq
            | QuantityUnit::PBq
            | QuantityUnit::Ci
            | QuantityUnit::MCi
            | QuantityUnit::UCi
            | QuantityUnit::NCi
            | QuantityUnit::PCi => UnitCategory::Activity,
            QuantityUnit::Gram
            | QuantityUnit::Milligram
            | QuantityUnit::Microgram
            | QuantityUnit::Nanogram
            | QuantityUnit::Picogram
            | QuantityUnit::Kilogram => UnitCategory::Mass,
            QuantityUnit::Mol
            | QuantityUnit::Mmol
            | QuantityUnit::Umol
            | QuantityUnit::Nmol
            | QuantityUnit::Pmol
            | QuantityUnit::Kmol
            | QuantityUnit::Num => UnitCategory::Amount,
        }
    }

    /// Size of one unit in the category's base unit (Bq, g or mol)
    pub fn to_base(&self) -> f64 {
        match self {
            QuantityUnit::Bq => 1.0,
            QuantityUnit::KBq => 1e3,
            QuantityUnit::MBq => 1e6,
            QuantityUnit::GBq => 1e9,
            QuantityUnit::TBq => 1e12,
            QuantityUnit::PBq => 1e15,
            QuantityUnit::Ci => CURIE,
            QuantityUnit::MCi => CURIE * 1e-3,
            QuantityUnit::UCi => CURIE * 1e-6,
            QuantityUnit::NCi => CURIE * 1e-9,
            QuantityUnit::PCi => CURIE * 1e-12,
            QuantityUnit::Gram => 1.0,
            QuantityUnit::Milligram => 1e-3,
            QuantityUnit::Microgram => 1e-6,
            QuantityUnit::Nanogram => 1e-9,
            QuantityUnit::Picogram => 1e-12,
            QuantityUnit::Kilogram => 1e3,
            QuantityUnit::Mol => 1.0,
            QuantityUnit::Mmol => 1e-3,
            QuantityUnit::Umol => 1e-6,
            QuantityUnit::Nmol => 1e-9,
            QuantityUnit::Pmol => 1e-12,
            QuantityUnit::Kmol => 1e3,
            QuantityUnit::Num => 1.0 / AVOGADRO,
        }
    }

    /// Human-readable axis label for this unit
    pub fn axis_label(&self) -> String {
        match self.category() {
            UnitCategory::Activity => format!("Activity ({})", self.code()),
            UnitCategory::Mass => format!("Mass ({})", self.code()),
            _ if *self == QuantityUnit::Num => "Number of atoms".to_string(),
            _ => format!("Amount ({})", self.code()),
        }
    }

    pub fn parse(code: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|u| u.code() == code)
            .ok_or_else(|| Error::unknown_unit("quantity unit", code, &Self::codes()))
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|u| u.code()).collect()
    }

    pub fn codes_in(category: UnitCategory) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|u| u.category() == category)
            .map(|u| u.code())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Y axis
// ---------------------------------------------------------------------------

/// Output unit of the evolution chart's y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum YUnit {
    /// An absolute quantity (activity, mass or amount)
    Quantity(QuantityUnit),
    ActivityFraction,
    MassFraction,
    MoleFraction,
}

impl YUnit {
    const FRACTIONS: [YUnit; 3] = [
        YUnit::ActivityFraction,
        YUnit::MassFraction,
        YUnit::MoleFraction,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            YUnit::Quantity(unit) => unit.code(),
            YUnit::ActivityFraction => "activity_frac",
            YUnit::MassFraction => "mass_frac",
            YUnit::MoleFraction => "mol_frac",
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            YUnit::Quantity(unit) => unit.category(),
            _ => UnitCategory::Fraction,
        }
    }

    /// Fraction units plot on a linear axis starting at zero
    pub fn is_fraction(&self) -> bool {
        self.category() == UnitCategory::Fraction
    }

    pub fn axis_label(&self) -> String {
        match self {
            YUnit::Quantity(unit) => unit.axis_label(),
            YUnit::ActivityFraction => "Activity fraction".to_string(),
            YUnit::MassFraction => "Mass fraction".to_string(),
            YUnit::MoleFraction => "Mole fraction".to_string(),
        }
    }

    pub fn all() -> Vec<YUnit> {
        QuantityUnit::ALL
            .iter()
            .map(|u| YUnit::Quantity(*u))
            .chain(Self::FRACTIONS)
            .collect()
    }

    pub fn parse(code: &str) -> Result<Self> {
        if let Some(fraction) = Self::FRACTIONS.iter().find(|u| u.code() == code) {
            return Ok(*fraction);
        }
        QuantityUnit::parse(code)
            .map(YUnit::Quantity)
            .map_err(|_| Error::unknown_unit("y unit", code, &Self::codes()))
    }

    pub fn codes() -> Vec<&'static str> {
        Self::all().iter().map(|u| u.code()).collect()
    }

    pub fn codes_in(category: UnitCategory) -> Vec<&'static str> {
        Self::all()
            .iter()
            .filter(|u| u.category() == category)
            .map(|u| u.code())
            .collect()
    }
}

impl Default for QuantityUnit {
    fn default() -> Self {
        QuantityUnit::Bq
    }
}

impl Default for YUnit {
    fn default() -> Self {
        YUnit::Quantity(QuantityUnit::Bq)
    }
}

/// Axis label for a raw unit code
///
/// Unrecognised codes fall back to a generic `Amount (<code>)` label.
pub fn axis_label_for_code(code: &str) -> String {
    YUnit::parse(code)
        .map(|unit| unit.axis_label())
        .unwrap_or_else(|_| format!("Amount ({})", code))
}

/// Legal values for the time axis and the y axis, grouped by category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnitsCatalog {
    pub time_units: Vec<&'static str>,
    pub y_units: YUnitGroups,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YUnitGroups {
    pub activity: Vec<&'static str>,
    pub mass: Vec<&'static str>,
    pub amount: Vec<&'static str>,
    pub fraction: Vec<&'static str>,
}

pub fn units_catalog() -> UnitsCatalog {
    UnitsCatalog {
        time_units: TimeUnit::codes(),
        y_units: YUnitGroups {
            activity: YUnit::codes_in(UnitCategory::Activity),
            mass: YUnit::codes_in(UnitCategory::Mass),
            amount: YUnit::codes_in(UnitCategory::Amount),
            fraction: YUnit::codes_in(UnitCategory::Fraction),
        },
    }
}

// ---------------------------------------------------------------------------
// String conversions shared by serde and FromStr
// ---------------------------------------------------------------------------

macro_rules! code_conversions {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.code().to_string()
            }
        }
    };
}

code_conversions!(TimeUnit);
code_conversions!(QuantityUnit);
code_conversions!(YUnit);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_unit_codes() {
        assert_eq!(TimeUnit::codes(), vec!["s", "m", "h", "d", "y"]);
        assert_eq!(TimeUnit::parse("d"), Ok(TimeUnit::Days));
        assert_eq!(TimeUnit::Hours.seconds(), 3600.0);
        assert!(TimeUnit::parse("week").is_err());
    }

    #[test]
    fn test_quantity_unit_roundtrip_codes() {
        for unit in QuantityUnit::ALL {
            assert_eq!(QuantityUnit::parse(unit.code()), Ok(unit));
        }
        assert!(QuantityUnit::parse("bq").is_err());
    }

    #[test]
    fn test_quantity_unit_factors() {
        assert_eq!(QuantityUnit::Ci.to_base(), 3.7e10);
        assert_eq!(QuantityUnit::Kilogram.to_base(), 1000.0);
        assert!((QuantityUnit::Num.to_base() * AVOGADRO - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_y_unit_categories() {
        assert_eq!(YUnit::parse("Bq"), Ok(YUnit::Quantity(QuantityUnit::Bq)));
        assert_eq!(YUnit::parse("mass_frac"), Ok(YUnit::MassFraction));
        assert!(YUnit::parse("mass_frac").unwrap().is_fraction());
        assert!(!YUnit::parse("kg").unwrap().is_fraction());
        assert_eq!(YUnit::parse("num").unwrap().category(), UnitCategory::Amount);

        let err = YUnit::parse("furlong").unwrap_err();
        assert!(err.to_string().contains("furlong"));
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(axis_label_for_code("Bq"), "Activity (Bq)");
        assert_eq!(axis_label_for_code("kg"), "Mass (kg)");
        assert_eq!(axis_label_for_code("mol"), "Amount (mol)");
        assert_eq!(axis_label_for_code("num"), "Number of atoms");
        assert_eq!(axis_label_for_code("activity_frac"), "Activity fraction");
        assert_eq!(axis_label_for_code("mol_frac"), "Mole fraction");
        assert_eq!(axis_label_for_code("widgets"), "Amount (widgets)");
    }

    #[test]
    fn test_units_catalog_has_four_categories() {
        let catalog = units_catalog();
        assert_eq!(catalog.time_units, vec!["s", "m", "h", "d", "y"]);
        assert_eq!(
            catalog.y_units.activity,
            vec!["Bq", "kBq", "MBq", "GBq", "TBq", "PBq", "Ci", "mCi", "uCi", "nCi", "pCi"]
        );
        assert_eq!(catalog.y_units.mass, vec!["g", "mg", "ug", "ng", "pg", "kg"]);
        assert_eq!(
            catalog.y_units.amount,
            vec!["mol", "mmol", "umol", "nmol", "pmol", "kmol", "num"]
        );
        assert_eq!(
            catalog.y_units.fraction,
            vec!["activity_frac", "mass_frac", "mol_frac"]
        );
    }

    #[test]
    fn test_serde_uses_codes() {
        let unit: YUnit = serde_json::from_str("\"activity_frac\"").unwrap();
        assert_eq!(unit, YUnit::ActivityFraction);
        assert_eq!(serde_json::to_string(&TimeUnit::Years).unwrap(), "\"y\"");
        assert!(serde_json::from_str::<QuantityUnit>("\"lbs\"").is_err());
    }
}
