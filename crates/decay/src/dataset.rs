//! Embedded nuclear data
//!
//! Half-lives, atomic masses and decay modes for the natural uranium, actinium
//! and thorium series, the neptunium series entered through Am-241/Pu-241, and
//! a set of medical and industrial nuclides. Values follow ICRP Publication 107;
//! minor branches below 1e-5 are folded into the dominant mode.
//!
//! Every progeny named by a decay mode is itself present in the table.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::DecayError;
use crate::nuclide::NuclideId;
use crate::Result;

const SECOND: f64 = 1.0;
const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 365.2422 * DAY;

/// One decay path out of a nuclide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayMode {
    /// Mode symbol: `α`, `β-`, `β+&EC`, `EC`, `IT`
    pub mode: &'static str,
    /// Canonical name of the nuclide produced
    pub progeny: &'static str,
    /// Probability of this path, in `(0, 1]`
    pub branching: f64,
}

/// Data for one nuclide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NuclideRecord {
    pub name: &'static str,
    pub z: u32,
    pub a: u32,
    /// Half-life in seconds, `None` when stable
    pub half_life: Option<f64>,
    /// Atomic mass in g/mol
    pub atomic_mass: f64,
    pub decays: &'static [DecayMode],
}

impl NuclideRecord {
    pub fn is_stable(&self) -> bool {
        self.half_life.is_none()
    }

    /// Decay constant in 1/s (zero for stable nuclides)
    pub fn decay_constant(&self) -> f64 {
        match self.half_life {
            Some(t) => std::f64::consts::LN_2 / t,
            None => 0.0,
        }
    }
}

const fn mode(mode: &'static str, progeny: &'static str, branching: f64) -> DecayMode {
    DecayMode {
        mode,
        progeny,
        branching,
    }
}

const fn radioactive(
    name: &'static str,
    z: u32,
    a: u32,
    half_life: f64,
    atomic_mass: f64,
    decays: &'static [DecayMode],
) -> NuclideRecord {
    NuclideRecord {
        name,
        z,
        a,
        half_life: Some(half_life),
        atomic_mass,
        decays,
    }
}

const fn stable(name: &'static str, z: u32, a: u32, atomic_mass: f64) -> NuclideRecord {
    NuclideRecord {
        name,
        z,
        a,
        half_life: None,
        atomic_mass,
        decays: &[],
    }
}

const RECORDS: &[NuclideRecord] = &[
    // Uranium series
    radioactive("U-238", 92, 238, 4.468e9 * YEAR, 238.050_788_3, &[mode("α", "Th-234", 1.0)]),
    radioactive("Th-234", 90, 234, 24.10 * DAY, 234.043_601_4, &[mode("β-", "Pa-234m", 1.0)]),
    radioactive(
        "Pa-234m",
        91,
        234,
        1.159 * MINUTE,
        234.043_308_1,
        &[mode("β-", "U-234", 0.9984), mode("IT", "Pa-234", 0.0016)],
    ),
    radioactive("Pa-234", 91, 234, 6.70 * HOUR, 234.043_308_1, &[mode("β-", "U-234", 1.0)]),
    radioactive("U-234", 92, 234, 2.455e5 * YEAR, 234.040_952_3, &[mode("α", "Th-230", 1.0)]),
    radioactive("Th-230", 90, 230, 7.538e4 * YEAR, 230.033_134_1, &[mode("α", "Ra-226", 1.0)]),
    radioactive("Ra-226", 88, 226, 1600.0 * YEAR, 226.025_410_3, &[mode("α", "Rn-222", 1.0)]),
    radioactive("Rn-222", 86, 222, 3.8235 * DAY, 222.017_578_2, &[mode("α", "Po-218", 1.0)]),
    radioactive(
        "Po-218",
        84,
        218,
        3.098 * MINUTE,
        218.008_973_5,
        &[mode("α", "Pb-214", 0.9998), mode("β-", "At-218", 0.0002)],
    ),
    radioactive(
        "At-218",
        85,
        218,
        1.5 * SECOND,
        218.008_694_9,
        &[mode("α", "Bi-214", 0.999), mode("β-", "Rn-218", 0.001)],
    ),
    radioactive("Rn-218", 86, 218, 35.0e-3 * SECOND, 218.005_601_3, &[mode("α", "Po-214", 1.0)]),
    radioactive("Pb-214", 82, 214, 26.8 * MINUTE, 213.999_805_4, &[mode("β-", "Bi-214", 1.0)]),
    radioactive(
        "Bi-214",
        83,
        214,
        19.9 * MINUTE,
        213.998_712_0,
        &[mode("β-", "Po-214", 0.99979), mode("α", "Tl-210", 0.00021)],
    ),
    radioactive("Po-214", 84, 214, 164.3e-6 * SECOND, 213.995_201_4, &[mode("α", "Pb-210", 1.0)]),
    radioactive("Tl-210", 81, 210, 1.30 * MINUTE, 209.990_073_5, &[mode("β-", "Pb-210", 1.0)]),
    radioactive("Pb-210", 82, 210, 22.20 * YEAR, 209.984_188_5, &[mode("β-", "Bi-210", 1.0)]),
    radioactive("Bi-210", 83, 210, 5.012 * DAY, 209.984_120_4, &[mode("β-", "Po-210", 1.0)]),
    radioactive("Po-210", 84, 210, 138.376 * DAY, 209.982_873_7, &[mode("α", "Pb-206", 1.0)]),
    stable("Pb-206", 82, 206, 205.974_465_3),
    // Actinium series
    radioactive("U-235", 92, 235, 7.04e8 * YEAR, 235.043_929_9, &[mode("α", "Th-231", 1.0)]),
    radioactive("Th-231", 90, 231, 25.52 * HOUR, 231.036_304_3, &[mode("β-", "Pa-231", 1.0)]),
    radioactive("Pa-231", 91, 231, 3.276e4 * YEAR, 231.035_884_0, &[mode("α", "Ac-227", 1.0)]),
    radioactive(
        "Ac-227",
        89,
        227,
        21.772 * YEAR,
        227.027_752_1,
        &[mode("β-", "Th-227", 0.9862), mode("α", "Fr-223", 0.0138)],
    ),
    radioactive("Th-227", 90, 227, 18.68 * DAY, 227.027_704_1, &[mode("α", "Ra-223", 1.0)]),
    radioactive("Fr-223", 87, 223, 22.00 * MINUTE, 223.019_735_9, &[mode("β-", "Ra-223", 1.0)]),
    radioactive("Ra-223", 88, 223, 11.43 * DAY, 223.018_502_2, &[mode("α", "Rn-219", 1.0)]),
    radioactive("Rn-219", 86, 219, 3.96 * SECOND, 219.009_480_2, &[mode("α", "Po-215", 1.0)]),
    radioactive("Po-215", 84, 215, 1.781e-3 * SECOND, 214.999_420_0, &[mode("α", "Pb-211", 1.0)]),
    radioactive("Pb-211", 82, 211, 36.1 * MINUTE, 210.988_737_0, &[mode("β-", "Bi-211", 1.0)]),
    radioactive(
        "Bi-211",
        83,
        211,
        2.14 * MINUTE,
        210.987_269_5,
        &[mode("α", "Tl-207", 0.99724), mode("β-", "Po-211", 0.00276)],
    ),
    radioactive("Po-211", 84, 211, 0.516 * SECOND, 210.986_653_2, &[mode("α", "Pb-207", 1.0)]),
    radioactive("Tl-207", 81, 207, 4.77 * MINUTE, 206.977_419_0, &[mode("β-", "Pb-207", 1.0)]),
    stable("Pb-207", 82, 207, 206.975_896_9),
    // Thorium series
    radioactive("Th-232", 90, 232, 1.405e10 * YEAR, 232.038_055_3, &[mode("α", "Ra-228", 1.0)]),
    radioactive("Ra-228", 88, 228, 5.75 * YEAR, 228.031_070_3, &[mode("β-", "Ac-228", 1.0)]),
    radioactive("Ac-228", 89, 228, 6.15 * HOUR, 228.031_021_1, &[mode("β-", "Th-228", 1.0)]),
    radioactive("Th-228", 90, 228, 1.9116 * YEAR, 228.028_741_1, &[mode("α", "Ra-224", 1.0)]),
    radioactive("Ra-224", 88, 224, 3.66 * DAY, 224.020_211_8, &[mode("α", "Rn-220", 1.0)]),
    radioactive("Rn-220", 86, 220, 55.6 * SECOND, 220.011_394_0, &[mode("α", "Po-216", 1.0)]),
    radioactive("Po-216", 84, 216, 0.145 * SECOND, 216.001_915_0, &[mode("α", "Pb-212", 1.0)]),
    radioactive("Pb-212", 82, 212, 10.64 * HOUR, 211.991_897_5, &[mode("β-", "Bi-212", 1.0)]),
    radioactive(
        "Bi-212",
        83,
        212,
        60.55 * MINUTE,
        211.991_285_7,
        &[mode("β-", "Po-212", 0.6406), mode("α", "Tl-208", 0.3594)],
    ),
    radioactive("Po-212", 84, 212, 0.299e-6 * SECOND, 211.988_868_0, &[mode("α", "Pb-208", 1.0)]),
    radioactive("Tl-208", 81, 208, 3.053 * MINUTE, 207.982_018_7, &[mode("β-", "Pb-208", 1.0)]),
    stable("Pb-208", 82, 208, 207.976_652_1),
    // Neptunium series
    radioactive("Pu-241", 94, 241, 14.29 * YEAR, 241.056_851_5, &[mode("β-", "Am-241", 1.0)]),
    radioactive("Am-241", 95, 241, 432.6 * YEAR, 241.056_829_1, &[mode("α", "Np-237", 1.0)]),
    radioactive("Np-237", 93, 237, 2.144e6 * YEAR, 237.048_173_4, &[mode("α", "Pa-233", 1.0)]),
    radioactive("Pa-233", 91, 233, 26.975 * DAY, 233.040_247_3, &[mode("β-", "U-233", 1.0)]),
    radioactive("U-233", 92, 233, 1.592e5 * YEAR, 233.039_635_2, &[mode("α", "Th-229", 1.0)]),
    radioactive("Th-229", 90, 229, 7340.0 * YEAR, 229.031_763_8, &[mode("α", "Ra-225", 1.0)]),
    radioactive("Ra-225", 88, 225, 14.9 * DAY, 225.023_612_0, &[mode("β-", "Ac-225", 1.0)]),
    radioactive("Ac-225", 89, 225, 10.0 * DAY, 225.023_229_0, &[mode("α", "Fr-221", 1.0)]),
    radioactive("Fr-221", 87, 221, 4.9 * MINUTE, 221.014_255_0, &[mode("α", "At-217", 1.0)]),
    radioactive("At-217", 85, 217, 32.3e-3 * SECOND, 217.004_718_9, &[mode("α", "Bi-213", 1.0)]),
    radioactive(
        "Bi-213",
        83,
        213,
        45.59 * MINUTE,
        213.006_710_9,
        &[mode("β-", "Po-213", 0.9791), mode("α", "Tl-209", 0.0209)],
    ),
    radioactive("Po-213", 84, 213, 4.2e-6 * SECOND, 212.992_857_3, &[mode("α", "Pb-209", 1.0)]),
    radioactive("Tl-209", 81, 209, 2.161 * MINUTE, 208.985_359_0, &[mode("β-", "Pb-209", 1.0)]),
    radioactive("Pb-209", 82, 209, 3.253 * HOUR, 208.981_090_1, &[mode("β-", "Bi-209", 1.0)]),
    stable("Bi-209", 83, 209, 208.980_398_7),
    // Plutonium feeding the natural series
    radioactive("Pu-239", 94, 239, 2.411e4 * YEAR, 239.052_163_4, &[mode("α", "U-235", 1.0)]),
    radioactive("Pu-238", 94, 238, 87.7 * YEAR, 238.049_559_9, &[mode("α", "U-234", 1.0)]),
    // Light and fission-product nuclides
    radioactive("H-3", 1, 3, 12.32 * YEAR, 3.016_049_278, &[mode("β-", "He-3", 1.0)]),
    stable("He-3", 2, 3, 3.016_029_320),
    radioactive("C-14", 6, 14, 5700.0 * YEAR, 14.003_241_988, &[mode("β-", "N-14", 1.0)]),
    stable("N-14", 7, 14, 14.003_074_004),
    radioactive("F-18", 9, 18, 109.77 * MINUTE, 18.000_938_0, &[mode("β+&EC", "O-18", 1.0)]),
    stable("O-18", 8, 18, 17.999_159_613),
    radioactive("Na-22", 11, 22, 2.6018 * YEAR, 21.994_436_4, &[mode("β+&EC", "Ne-22", 1.0)]),
    stable("Ne-22", 10, 22, 21.991_385_114),
    radioactive("P-32", 15, 32, 14.263 * DAY, 31.973_907_27, &[mode("β-", "S-32", 1.0)]),
    stable("S-32", 16, 32, 31.972_071_174),
    radioactive(
        "K-40",
        19,
        40,
        1.248e9 * YEAR,
        39.963_998_166,
        &[mode("β-", "Ca-40", 0.8928), mode("β+&EC", "Ar-40", 0.1072)],
    ),
    stable("Ca-40", 20, 40, 39.962_590_863),
    stable("Ar-40", 18, 40, 39.962_383_124),
    radioactive("Fe-55", 26, 55, 2.737 * YEAR, 54.938_293_4, &[mode("EC", "Mn-55", 1.0)]),
    stable("Mn-55", 25, 55, 54.938_045_1),
    radioactive("Co-60", 27, 60, 5.2713 * YEAR, 59.933_817_1, &[mode("β-", "Ni-60", 1.0)]),
    stable("Ni-60", 28, 60, 59.930_786_4),
    radioactive("Ni-63", 28, 63, 101.2 * YEAR, 62.929_669_4, &[mode("β-", "Cu-63", 1.0)]),
    stable("Cu-63", 29, 63, 62.929_597_5),
    radioactive("Kr-85", 36, 85, 10.776 * YEAR, 84.912_527_3, &[mode("β-", "Rb-85", 1.0)]),
    stable("Rb-85", 37, 85, 84.911_789_738),
    radioactive("Sr-90", 38, 90, 28.79 * YEAR, 89.907_738_0, &[mode("β-", "Y-90", 1.0)]),
    radioactive("Y-90", 39, 90, 64.10 * HOUR, 89.907_151_9, &[mode("β-", "Zr-90", 1.0)]),
    stable("Zr-90", 40, 90, 89.904_697_7),
    radioactive(
        "Mo-99",
        42,
        99,
        65.94 * HOUR,
        98.907_711_6,
        &[mode("β-", "Tc-99m", 0.876), mode("β-", "Tc-99", 0.124)],
    ),
    radioactive(
        "Tc-99m",
        43,
        99,
        6.015 * HOUR,
        98.906_254_7,
        &[mode("IT", "Tc-99", 0.999963), mode("β-", "Ru-99", 0.000037)],
    ),
    radioactive("Tc-99", 43, 99, 2.111e5 * YEAR, 98.906_254_7, &[mode("β-", "Ru-99", 1.0)]),
    stable("Ru-99", 44, 99, 98.905_939_3),
    radioactive(
        "I-131",
        53,
        131,
        8.0252 * DAY,
        130.906_124_6,
        &[mode("β-", "Xe-131", 0.9883), mode("β-", "Xe-131m", 0.0117)],
    ),
    radioactive("Xe-131m", 54, 131, 11.84 * DAY, 130.905_082_4, &[mode("IT", "Xe-131", 1.0)]),
    stable("Xe-131", 54, 131, 130.905_082_4),
    radioactive("Xe-133", 54, 133, 5.2475 * DAY, 132.905_910_7, &[mode("β-", "Cs-133", 1.0)]),
    stable("Cs-133", 55, 133, 132.905_451_933),
    radioactive("Cs-134", 55, 134, 2.0648 * YEAR, 133.906_718_475, &[mode("β-", "Ba-134", 1.0)]),
    stable("Ba-134", 56, 134, 133.904_508_4),
    radioactive(
        "Cs-137",
        55,
        137,
        30.1671 * YEAR,
        136.907_089_5,
        &[mode("β-", "Ba-137m", 0.944), mode("β-", "Ba-137", 0.056)],
    ),
    radioactive("Ba-137m", 56, 137, 2.552 * MINUTE, 136.905_827_4, &[mode("IT", "Ba-137", 1.0)]),
    stable("Ba-137", 56, 137, 136.905_827_4),
    radioactive(
        "Ir-192",
        77,
        192,
        73.829 * DAY,
        191.962_605_0,
        &[mode("β-", "Pt-192", 0.9513), mode("EC", "Os-192", 0.0487)],
    ),
    stable("Pt-192", 78, 192, 191.961_038_0),
    stable("Os-192", 76, 192, 191.961_480_7),
];

/// Indexed view over the embedded nuclide records
#[derive(Debug)]
pub struct Dataset {
    name: &'static str,
    index: HashMap<&'static str, &'static NuclideRecord>,
}

impl Dataset {
    /// The dataset compiled into this crate
    pub fn embedded() -> &'static Dataset {
        static EMBEDDED: OnceLock<Dataset> = OnceLock::new();
        EMBEDDED.get_or_init(|| Dataset {
            name: "icrp107-subset",
            index: RECORDS.iter().map(|r| (r.name, r)).collect(),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parse any accepted spelling and return the matching record
    pub fn nuclide(&self, input: &str) -> Result<&'static NuclideRecord> {
        let id = NuclideId::parse(input)?;
        let canonical = id.canonical();
        self.index
            .get(canonical.as_str())
            .copied()
            .ok_or(DecayError::UnknownNuclide(canonical))
    }

    /// Look up an already canonical name
    pub fn get(&self, canonical: &str) -> Option<&'static NuclideRecord> {
        self.index.get(canonical).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All records in table order
    pub fn records(&self) -> impl Iterator<Item = &'static NuclideRecord> {
        RECORDS.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_every_progeny_is_present() {
        let dataset = Dataset::embedded();
        for record in dataset.records() {
            for decay in record.decays {
                assert!(
                    dataset.get(decay.progeny).is_some(),
                    "{} decays into missing {}",
                    record.name,
                    decay.progeny
                );
            }
        }
    }

    #[test]
    fn test_branching_fractions_sum_to_one() {
        for record in Dataset::embedded().records() {
            if record.is_stable() {
                assert!(record.decays.is_empty(), "{} is stable", record.name);
                continue;
            }
            let total: f64 = record.decays.iter().map(|d| d.branching).sum();
            assert!((total - 1.0).abs() < 1e-9, "{} sums to {}", record.name, total);
        }
    }

    #[test]
    fn test_names_match_identifiers() {
        for record in Dataset::embedded().records() {
            let id = NuclideId::parse(record.name).unwrap();
            assert_eq!(id.canonical(), record.name);
            assert_eq!((id.z, id.a), (record.z, record.a), "{}", record.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let dataset = Dataset::embedded();
        assert_eq!(dataset.len(), RECORDS.len());
    }

    #[test]
    fn test_lookup_accepts_aliases() {
        let dataset = Dataset::embedded();
        assert_eq!(dataset.nuclide("238U").unwrap().name, "U-238");
        assert_eq!(dataset.nuclide("tc99m").unwrap().name, "Tc-99m");
        assert_matches!(
            dataset.nuclide("Og-294"),
            Err(DecayError::UnknownNuclide(name)) if name == "Og-294"
        );
        assert_matches!(dataset.nuclide("unobtainium"), Err(DecayError::InvalidNuclide(_)));
    }

    #[test]
    fn test_decay_constant() {
        let co60 = Dataset::embedded().get("Co-60").unwrap();
        let expected = std::f64::consts::LN_2 / (5.2713 * YEAR);
        assert!((co60.decay_constant() - expected).abs() / expected < 1e-12);
        assert_eq!(Dataset::embedded().get("Ni-60").unwrap().decay_constant(), 0.0);
    }
}
