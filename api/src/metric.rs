//! Parsers for the formatted metric strings the result endpoint emits
//! (`"120ms"`, `"3.1s"`, `"90%"`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)(ms|s)$").expect("valid duration pattern"));

static PASS_RATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(?:\.[0-9]+)?%$").expect("valid pass rate pattern"));

/// Parse a duration string into milliseconds. Seconds are scaled by 1000.
pub fn parse_duration_ms(raw: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::Duration(raw.to_string());
    let caps = DURATION_RE.captures(raw).ok_or_else(invalid)?;
    let value: f64 = caps[1].parse().map_err(|_| invalid())?;

    Ok(match &caps[2] {
        "s" => value * 1000.0,
        _ => value,
    })
}

/// Parse a percentage string into a whole number. A fractional part is
/// dropped, so `"92.7%"` reads as 92.
pub fn parse_pass_rate(raw: &str) -> Result<u32, ParseError> {
    let invalid = || ParseError::PassRate(raw.to_string());
    let caps = PASS_RATE_RE.captures(raw).ok_or_else(invalid)?;
    caps[1].parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milliseconds_pass_through() {
        assert_eq!(parse_duration_ms("120ms"), Ok(120.0));
        assert_eq!(parse_duration_ms("0ms"), Ok(0.0));
    }

    #[test]
    fn seconds_scale_to_milliseconds() {
        assert_eq!(parse_duration_ms("3.1s"), Ok(3100.0));
        assert_eq!(parse_duration_ms("0.5s"), Ok(500.0));
        assert_eq!(parse_duration_ms("22s"), Ok(22_000.0));
    }

    #[test]
    fn garbage_is_a_typed_error() {
        assert_eq!(
            parse_duration_ms("abc"),
            Err(ParseError::Duration("abc".into()))
        );
        assert!(parse_duration_ms("").is_err());
        assert!(parse_duration_ms("12").is_err());
        assert!(parse_duration_ms("1.s").is_err());
        assert!(parse_duration_ms(" 120ms").is_err());
        assert!(parse_duration_ms("-5ms").is_err());
    }

    #[test]
    fn pass_rate_reads_whole_percent() {
        assert_eq!(parse_pass_rate("90%"), Ok(90));
        assert_eq!(parse_pass_rate("100%"), Ok(100));
        assert_eq!(parse_pass_rate("92.7%"), Ok(92));
    }

    #[test]
    fn pass_rate_rejects_missing_sign() {
        assert_eq!(parse_pass_rate("90"), Err(ParseError::PassRate("90".into())));
        assert!(parse_pass_rate("n/a").is_err());
    }
}
