//! Stop code extraction from provider subject lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::StopCode;

use super::error::ExtractionError;

/// Fixed provider pattern for subject lines.
///
/// Carris subjects carry the stop code after either the Portuguese
/// "paragem" or the English "stop code" marker, e.g.
/// "Informação da paragem 758" or "Arrivals for stopcode 758".
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:stop\s*code|paragem)\s*[:#]?\s*(?P<stopcode>[0-9]+)")
        .expect("subject pattern is valid")
});

/// Extract the stop code a message pertains to from its subject line.
pub fn extract_stop_code(subject: &str) -> Result<StopCode, ExtractionError> {
    let captures = SUBJECT_RE
        .captures(subject)
        .ok_or_else(|| ExtractionError::NoStopCode {
            subject: subject.to_string(),
        })?;

    // The pattern only guarantees "some digits"; length validation
    // lives in StopCode itself.
    let digits = &captures["stopcode"];
    Ok(StopCode::parse(digits)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_english_marker() {
        let stop = extract_stop_code("Arrivals for stopcode 758").unwrap();
        assert_eq!(stop.as_str(), "758");
    }

    #[test]
    fn extracts_with_separated_marker() {
        let stop = extract_stop_code("Re: stop code: 712").unwrap();
        assert_eq!(stop.as_str(), "712");
    }

    #[test]
    fn extracts_from_portuguese_marker() {
        let stop = extract_stop_code("Informação da paragem 00123").unwrap();
        assert_eq!(stop.as_str(), "00123");
    }

    #[test]
    fn marker_is_case_insensitive() {
        let stop = extract_stop_code("PARAGEM 758").unwrap();
        assert_eq!(stop.as_str(), "758");
    }

    #[test]
    fn surrounding_text_is_ignored() {
        let stop = extract_stop_code("FW: Carris - stopcode 758 - próximos autocarros").unwrap();
        assert_eq!(stop.as_str(), "758");
    }

    #[test]
    fn missing_marker_is_an_error() {
        let err = extract_stop_code("Weekly newsletter").unwrap_err();
        assert!(matches!(err, ExtractionError::NoStopCode { .. }));
    }

    #[test]
    fn marker_without_digits_is_an_error() {
        let err = extract_stop_code("paragem desconhecida").unwrap_err();
        assert!(matches!(err, ExtractionError::NoStopCode { .. }));
    }

    #[test]
    fn overlong_digits_are_an_error() {
        let err = extract_stop_code("stopcode 123456789").unwrap_err();
        assert!(matches!(err, ExtractionError::BadStopCode(_)));
    }
}
