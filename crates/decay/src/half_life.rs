//! Human-readable half-lives

const YEAR: f64 = 365.2422 * 86_400.0;

/// (upper bound in seconds, unit size in seconds, suffix)
const SCALES: &[(f64, f64, &str)] = &[
    (1e-9, 1e-12, "ps"),
    (1e-6, 1e-9, "ns"),
    (1e-3, 1e-6, "μs"),
    (1.0, 1e-3, "ms"),
    (60.0, 1.0, "s"),
    (3_600.0, 60.0, "m"),
    (86_400.0, 3_600.0, "h"),
    (YEAR, 86_400.0, "d"),
    (1e3 * YEAR, YEAR, "y"),
    (1e6 * YEAR, 1e3 * YEAR, "ky"),
    (1e9 * YEAR, 1e6 * YEAR, "My"),
    (1e12 * YEAR, 1e9 * YEAR, "By"),
];

/// Format a half-life in seconds, e.g. `4.468 By`, `24.1 d`, `stable`
pub fn readable_half_life(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return "stable".to_string();
    };
    // A value that rounds up to the next unit moves to that unit
    for &(bound, size, suffix) in SCALES {
        let value = seconds / size;
        if round_significant(value, 4) < bound / size * (1.0 - 1e-9) {
            return format!("{} {}", significant(value, 4), suffix);
        }
    }
    format!("{} Ty", significant(seconds / (1e12 * YEAR), 4))
}

fn decimals(value: f64, digits: i32) -> usize {
    let magnitude = value.abs().log10().floor() as i32;
    (digits - 1 - magnitude).max(0) as usize
}

fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals(value, digits) as i32);
    (value * factor).round() / factor
}

/// Round to `digits` significant figures and drop trailing zeros
fn significant(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let text = format!("{:.*}", decimals(value, digits), value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_half_lives() {
        assert_eq!(readable_half_life(None), "stable");
        assert_eq!(readable_half_life(Some(4.468e9 * YEAR)), "4.468 By");
        assert_eq!(readable_half_life(Some(24.10 * 86_400.0)), "24.1 d");
        assert_eq!(readable_half_life(Some(164.3e-6)), "164.3 μs");
        assert_eq!(readable_half_life(Some(0.299e-6)), "299 ns");
        assert_eq!(readable_half_life(Some(1600.0 * YEAR)), "1.6 ky");
        assert_eq!(readable_half_life(Some(6.015 * 3_600.0)), "6.015 h");
        assert_eq!(readable_half_life(Some(55.6)), "55.6 s");
    }

    #[test]
    fn test_rounding_carries_into_next_unit() {
        assert_eq!(readable_half_life(Some(999.99 * YEAR)), "1 ky");
        assert_eq!(readable_half_life(Some(999.9 * YEAR)), "999.9 y");
        assert_eq!(readable_half_life(Some(59.9999)), "1 m");
        assert_eq!(readable_half_life(Some(999.96e-6)), "1 ms");
        assert_eq!(readable_half_life(Some(0.0)), "0 ps");
    }

    #[test]
    fn test_significant() {
        assert_eq!(significant(1234.6, 4), "1235");
        assert_eq!(significant(0.012345, 3), "0.0123");
        assert_eq!(significant(2.0, 4), "2");
        assert_eq!(round_significant(999.96, 4), 1000.0);
    }
}
