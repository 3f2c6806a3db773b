//! Value formatting and HTML escaping for tooltips.

use chrono::DateTime;

/// Formats numeric measure values for display.
pub trait MeasureFormatter: std::fmt::Debug {
    /// Format one value.
    fn format(&self, value: f64) -> String;
}

/// Short, magnitude-aware number formatting.
///
/// | magnitude        | output                         |
/// |------------------|--------------------------------|
/// | ≥ 1e12           | exponent, 2 decimals (`1.23e+12`) |
/// | ≥ 1e5            | SI prefix, 2 significant digits (`120k`) |
/// | ≥ 100            | no decimals                    |
/// | ≥ 1              | no decimals if integral, else 2 |
/// | < 1e-5           | 3 significant digits           |
/// | otherwise        | up to 5 decimals               |
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartNumber;

impl MeasureFormatter for SmartNumber {
    fn format(&self, d: f64) -> String {
        if !d.is_finite() {
            return "NA".to_string();
        }
        let abs = d.abs();
        if abs >= 1e12 {
            js_exponential(d, 2)
        } else if abs >= 100_000.0 {
            si_prefix(d, 2)
        } else if abs >= 100.0 {
            format!("{d:.0}")
        } else if abs >= 1.0 {
            if d.fract() == 0.0 {
                format!("{d:.0}")
            } else {
                format!("{d:.2}")
            }
        } else if abs == 0.0 {
            "0".to_string()
        } else if abs < 0.000_01 {
            js_precision(d, 3)
        } else {
            let decimals = (2 - abs.log10().trunc() as i32).min(5).max(0) as usize;
            format!("{d:.decimals$}")
        }
    }
}

/// `toExponential`-style output: `1.23e+12`, `4.00e-7`.
fn js_exponential(d: f64, decimals: usize) -> String {
    let s = format!("{d:.decimals$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

/// `toPrecision`-style output with `digits` significant digits.
fn js_precision(d: f64, digits: i32) -> String {
    let exponent = d.abs().log10().floor() as i32;
    if exponent < -6 || exponent >= digits {
        js_exponential(d, (digits - 1) as usize)
    } else {
        let decimals = (digits - 1 - exponent).max(0) as usize;
        format!("{d:.decimals$}")
    }
}

/// Decimal places keeping `digits` significant digits of `x`.
fn significant_decimals(x: f64, digits: i32) -> i32 {
    if x == 0.0 {
        return digits - 1;
    }
    digits - (1 + x.abs().log10().floor() as i32)
}

fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals.abs());
    if decimals >= 0 {
        (x * factor).round() / factor
    } else {
        (x / factor).round() * factor
    }
}

const SI_PREFIXES: [(i32, &str); 5] = [(0, ""), (3, "k"), (6, "M"), (9, "G"), (12, "T")];

/// SI-prefixed output with `digits` significant digits: `120k`, `1.5M`.
fn si_prefix(d: f64, digits: i32) -> String {
    let rounded = round_to(d.abs(), significant_decimals(d, digits));
    let magnitude = 1 + (1e-12 + rounded.log10()).floor() as i32;
    let power = (((magnitude - 1) as f64 / 3.0).floor() as i32 * 3).clamp(0, 12);
    let symbol = SI_PREFIXES
        .iter()
        .find(|(p, _)| *p == power)
        .map_or("", |(_, s)| *s);

    let scaled = d / 10f64.powi(power);
    let scaled = round_to(scaled, significant_decimals(scaled, digits));
    let decimals = significant_decimals(scaled * (1.0 + 1e-15), digits).clamp(0, 20) as usize;
    format!("{scaled:.decimals$}{symbol}")
}

/// Format an epoch-millisecond timestamp as `YYYY-MM-DD` (UTC).
#[must_use]
pub fn format_date(timestamp_ms: f64) -> String {
    if !timestamp_ms.is_finite() {
        return "NA".to_string();
    }
    DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map_or_else(|| "NA".to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

/// Escape text for interpolation into HTML.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const ALLOWED_TAGS: [&str; 3] = ["strong", "br", "hr"];

/// Keep only the tooltip markup (`strong`, `br`, `hr`, attributes dropped);
/// every other `<` is escaped.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('>').and_then(|end| allowed_tag(&tail[1..end]).map(|t| (end, t))) {
            Some((end, tag)) => {
                out.push_str(&tag);
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str("&lt;");
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn allowed_tag(inner: &str) -> Option<String> {
    let inner = inner.trim();
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };
    let name: String = body
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return None;
    }
    Some(match (name.as_str(), closing) {
        ("strong", true) => "</strong>".to_string(),
        ("strong", false) => "<strong>".to_string(),
        (void, _) => format!("<{void} />"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Smart Number Tests =====

    #[test]
    fn test_smart_number_ranges() {
        let f = SmartNumber;
        assert_eq!(f.format(0.0), "0");
        assert_eq!(f.format(42.0), "42");
        assert_eq!(f.format(3.14159), "3.14");
        assert_eq!(f.format(-7.5), "-7.50");
        assert_eq!(f.format(123.4), "123");
        assert_eq!(f.format(99_999.0), "99999");
        assert_eq!(f.format(0.5), "0.500");
        assert_eq!(f.format(0.05), "0.050");
        assert_eq!(f.format(0.000_5), "0.00050");
    }

    #[test]
    fn test_smart_number_si() {
        let f = SmartNumber;
        assert_eq!(f.format(123_456.0), "120k");
        assert_eq!(f.format(1_500_000.0), "1.5M");
        assert_eq!(f.format(999_999.0), "1.0M");
        assert_eq!(f.format(-2_000_000_000.0), "-2.0G");
    }

    #[test]
    fn test_smart_number_exponents() {
        let f = SmartNumber;
        assert_eq!(f.format(1.234e12), "1.23e+12");
        assert_eq!(f.format(1.234e-6), "0.00000123");
        assert_eq!(f.format(4e-8), "4.00e-8");
    }

    #[test]
    fn test_smart_number_non_finite() {
        assert_eq!(SmartNumber.format(f64::NAN), "NA");
        assert_eq!(SmartNumber.format(f64::INFINITY), "NA");
    }

    // ===== Date Tests =====

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0.0), "1970-01-01");
        assert_eq!(format_date(1_700_000_000_000.0), "2023-11-14");
        assert_eq!(format_date(f64::NAN), "NA");
    }

    // ===== HTML Tests =====

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_sanitize_keeps_tooltip_markup() {
        let html = "x: <strong>1</strong><br /><hr/>y: <strong>2</strong><br/>";
        assert_eq!(
            sanitize_html(html),
            "x: <strong>1</strong><br /><hr />y: <strong>2</strong><br />"
        );
    }

    #[test]
    fn test_sanitize_escapes_other_tags() {
        assert_eq!(
            sanitize_html("<script>alert(1)</script><strong onclick=\"x\">a</strong>"),
            "&lt;script>alert(1)&lt;/script><strong>a</strong>"
        );
        assert_eq!(sanitize_html("a < b"), "a &lt; b");
    }

    #[test]
    fn test_sanitize_is_stable_on_escaped_text() {
        let escaped = html_escape("<img src=x>");
        assert_eq!(sanitize_html(&escaped), escaped);
    }
}
