use super::types::{Point, QuadCurve};

/// Serialize a curve as an SVG path.
///
/// Format: `M 250 0 Q 120.5 -30 0 250`
///
/// Coordinates are rounded to two decimals; whole numbers print without a
/// fractional part.
pub fn curve_to_path(curve: &QuadCurve) -> String {
    format!(
        "M {} Q {} {}",
        format_point(curve.start),
        format_point(curve.control),
        format_point(curve.end)
    )
}

fn format_point(p: Point) -> String {
    format!("{} {}", format_number(p.x), format_number(p.y))
}

fn format_number(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    // Avoid "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Parse a path produced by [`curve_to_path`].
///
/// Returns `None` if the string is malformed.
pub fn path_to_curve(s: &str) -> Option<QuadCurve> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != 8 || tokens[0] != "M" || tokens[3] != "Q" {
        return None;
    }
    let num = |i: usize| tokens[i].parse::<f64>().ok();
    Some(QuadCurve {
        start: Point::new(num(1)?, num(2)?),
        control: Point::new(num(4)?, num(5)?),
        end: Point::new(num(6)?, num(7)?),
    })
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_format_number_integer() {
        assert_eq!(format_number(250.0), "250");
    }

    #[test]
    fn test_format_number_rounds_to_two_decimals() {
        assert_eq!(format_number(120.456), "120.46");
    }

    #[test]
    fn test_format_number_negative_zero() {
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_parse_rejects_missing_command() {
        assert_eq!(path_to_curve("0 0 Q 1 1 2 2"), None);
    }

    #[test]
    fn test_parse_rejects_garbage_number() {
        assert_eq!(path_to_curve("M 0 x Q 1 1 2 2"), None);
    }
}
