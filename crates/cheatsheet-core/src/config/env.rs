#[must_use]
pub(super) fn read_raw_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Parses a ratio in `0.0..=1.0`. Anything else, including NaN, is `None`.
#[must_use]
pub(super) fn parse_unit_f64(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| (0.0..=1.0).contains(value))
}

#[must_use]
pub(super) fn parse_enabled_default_true(raw: Option<&str>) -> bool {
    !matches!(
        raw.map(|value| value.trim().to_ascii_lowercase())
            .as_deref(),
        Some("off" | "none" | "no" | "0" | "false")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ratio_parser_accepts_bounds_and_rejects_the_rest() {
        assert_eq!(parse_unit_f64(Some("0")), Some(0.0));
        assert_eq!(parse_unit_f64(Some(" 1.0 ")), Some(1.0));
        assert_eq!(parse_unit_f64(Some("0.55")), Some(0.55));
        assert_eq!(parse_unit_f64(Some("1.5")), None);
        assert_eq!(parse_unit_f64(Some("-0.1")), None);
        assert_eq!(parse_unit_f64(Some("NaN")), None);
        assert_eq!(parse_unit_f64(Some("high")), None);
        assert_eq!(parse_unit_f64(None), None);
    }

    #[test]
    fn enabled_flag_defaults_to_true() {
        assert!(parse_enabled_default_true(None));
        assert!(parse_enabled_default_true(Some("on")));
        assert!(parse_enabled_default_true(Some("yes")));
        assert!(parse_enabled_default_true(Some("")));
    }

    #[test]
    fn enabled_flag_recognizes_disabling_values() {
        for raw in ["off", "OFF", "none", "no", "0", " false "] {
            assert!(!parse_enabled_default_true(Some(raw)), "{raw}");
        }
    }
}
