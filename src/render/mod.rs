//! Non-interactive renderers for a drawing surface

pub mod json;
pub mod svg;

/// Format a coordinate without trailing zeros, at most 3 decimals
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let s = format!("{:.3}", rounded);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(500.0), "500");
        assert_eq!(fmt_num(37.5), "37.5");
        assert_eq!(fmt_num(500.0 / 12.0), "41.667");
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0001), "0");
    }
}
