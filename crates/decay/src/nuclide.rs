//! Nuclide identifiers
//!
//! Accepted spellings: `U-238`, `U238`, `238U`, `u-238`, and metastable forms
//! such as `Tc-99m`, `Tc99m`, `99mTc`. The canonical form is `Sym-Am`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::element;
use crate::error::DecayError;
use crate::Result;

/// A nuclide identified by atomic number, mass number and isomeric state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NuclideId {
    pub z: u32,
    pub a: u32,
    /// `Some('m')` / `Some('n')` for metastable states
    pub state: Option<char>,
}

impl NuclideId {
    pub fn parse(input: &str) -> Result<Self> {
        let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let invalid = || DecayError::InvalidNuclide(input.trim().to_string());

        let parts = if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
            split_mass_first(&cleaned)
        } else {
            split_symbol_first(&cleaned)
        };
        let (symbol, mass, state) = parts.ok_or_else(invalid)?;

        let z = element::atomic_number(symbol).ok_or_else(invalid)?;
        let a: u32 = mass.parse().map_err(|_| invalid())?;
        if a < z {
            return Err(invalid());
        }

        Ok(Self { z, a, state })
    }

    pub fn symbol(&self) -> &'static str {
        // z is validated on construction
        element::symbol(self.z).unwrap_or("?")
    }

    /// Canonical `Sym-Am` name
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NuclideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.symbol(), self.a)?;
        if let Some(state) = self.state {
            write!(f, "{}", state)?;
        }
        Ok(())
    }
}

impl FromStr for NuclideId {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_state(s: &str) -> Option<Option<char>> {
    match s {
        "" => Some(None),
        "m" | "M" => Some(Some('m')),
        "n" | "N" => Some(Some('n')),
        _ => None,
    }
}

/// `U-238`, `U238`, `Tc-99m`
fn split_symbol_first(s: &str) -> Option<(&str, &str, Option<char>)> {
    let letters = s.find(|c: char| !c.is_ascii_alphabetic())?;
    let (symbol, rest) = s.split_at(letters);
    let rest = rest.strip_prefix('-').unwrap_or(rest);
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (mass, suffix) = rest.split_at(digits);
    if symbol.is_empty() || mass.is_empty() {
        return None;
    }
    Some((symbol, mass, parse_state(suffix)?))
}

/// `238U`, `99mTc`
fn split_mass_first(s: &str) -> Option<(&str, &str, Option<char>)> {
    let digits = s.find(|c: char| !c.is_ascii_digit())?;
    let (mass, rest) = s.split_at(digits);
    let rest = rest.strip_prefix('-').unwrap_or(rest);
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if element::atomic_number(rest).is_some() {
        return Some((rest, mass, None));
    }
    let (state, symbol) = rest.split_at(1);
    let state = parse_state(state)?;
    element::atomic_number(symbol)?;
    Some((symbol, mass, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(input: &str) -> String {
        NuclideId::parse(input).unwrap().canonical()
    }

    #[test]
    fn test_parse_symbol_first() {
        assert_eq!(canonical("U-238"), "U-238");
        assert_eq!(canonical("U238"), "U-238");
        assert_eq!(canonical("u-238"), "U-238");
        assert_eq!(canonical(" Tc-99m "), "Tc-99m");
        assert_eq!(canonical("ba137M"), "Ba-137m");
    }

    #[test]
    fn test_parse_mass_first() {
        assert_eq!(canonical("238U"), "U-238");
        assert_eq!(canonical("99mTc"), "Tc-99m");
        assert_eq!(canonical("24Na"), "Na-24");
        assert_eq!(canonical("237Np"), "Np-237");
        assert_eq!(canonical("99Mo"), "Mo-99");
    }

    #[test]
    fn test_parse_fields() {
        let id = NuclideId::parse("Pa-234m").unwrap();
        assert_eq!(id.z, 91);
        assert_eq!(id.a, 234);
        assert_eq!(id.state, Some('m'));
        assert_eq!(id.symbol(), "Pa");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "-", "U", "238", "Xx-12", "U-23x", "U-10", "99qTc", "U--238"] {
            assert!(
                matches!(NuclideId::parse(bad), Err(DecayError::InvalidNuclide(_))),
                "{bad} should be rejected"
            );
        }
    }
}
