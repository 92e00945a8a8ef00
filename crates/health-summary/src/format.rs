use analysis_core::Ratio;

pub const UNDEFINED: &str = "n/a";

/// Percentage to one decimal place, e.g. `0.4` -> `40.0%`.
pub fn format_pct(value: Ratio) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => UNDEFINED.to_string(),
    }
}

/// Plain ratio to two decimal places, e.g. `2.0` -> `2.00`.
pub fn format_ratio(value: Ratio) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.2}", v),
        None => UNDEFINED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(Some(0.4)), "40.0%");
        assert_eq!(format_pct(Some(0.16666)), "16.7%");
        assert_eq!(format_pct(Some(-0.052)), "-5.2%");
        assert_eq!(format_pct(None), "n/a");
        assert_eq!(format_pct(Some(f64::NAN)), "n/a");
        assert_eq!(format_pct(Some(f64::INFINITY)), "n/a");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Some(2.0)), "2.00");
        assert_eq!(format_ratio(Some(80.0 / 120.0)), "0.67");
        assert_eq!(format_ratio(None), "n/a");
        assert_eq!(format_ratio(Some(f64::NEG_INFINITY)), "n/a");
    }
}
