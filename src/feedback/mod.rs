//! Structured Feedback Module
//!
//! Machine-readable error reports for editors and scripts, printed by
//! `ringc --format json` when a file fails to lex or parse.

use serde::{Deserialize, Serialize};

use crate::utils::{Error, Location};

/// A structured error report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code (e.g., "E0101")
    pub code: String,

    /// Diagnostic kind, e.g. "InvalidFloat"
    pub kind: String,

    /// Human-readable message
    pub message: String,

    /// Where the error was raised; absent for I/O failures
    pub location: Option<Location>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expected: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub found: Option<String>,
}

impl ErrorReport {
    /// Create an error report from a front-end error
    pub fn from_error(error: &Error) -> Self {
        let (code, kind) = error_code(error);
        let (expected, found) = match error {
            Error::ExpectedFound { expected, found, .. } => {
                (Some(expected.clone()), Some(found.clone()))
            }
            _ => (None, None),
        };

        Self {
            code: code.to_string(),
            kind: kind.to_string(),
            message: error.to_string(),
            location: error.location().cloned(),
            expected,
            found,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// E00xx input, E01xx lexical, E02xx syntax
fn error_code(error: &Error) -> (&'static str, &'static str) {
    match error {
        Error::Io { .. } => ("E0001", "Io"),
        Error::InvalidFloat { .. } => ("E0101", "InvalidFloat"),
        Error::InvalidNumber { .. } => ("E0102", "InvalidNumber"),
        Error::InvalidString { .. } => ("E0103", "InvalidString"),
        Error::InvalidToken { .. } => ("E0104", "InvalidToken"),
        Error::ExpectedFound { .. } => ("E0201", "ExpectedFound"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expected_found_report() {
        let err = Error::ExpectedFound {
            expected: "Tkn_Rparen".to_string(),
            found: "Tkn_Then".to_string(),
            location: Location::new("main.ri", Position::new(3, 12)),
        };
        let report = ErrorReport::from_error(&err);

        assert_eq!(report.code, "E0201");
        assert_eq!(report.kind, "ExpectedFound");
        assert_eq!(report.expected.as_deref(), Some("Tkn_Rparen"));
        assert_eq!(report.found.as_deref(), Some("Tkn_Then"));
        assert_eq!(report.location.map(|l| l.position), Some(Position::new(3, 12)));
    }

    #[test]
    fn test_lexical_codes() {
        let at = Location::new("a.ri", Position::start());
        let cases = [
            (Error::InvalidFloat { location: at.clone() }, "E0101"),
            (Error::InvalidNumber { location: at.clone() }, "E0102"),
            (Error::InvalidString { location: at.clone() }, "E0103"),
            (Error::InvalidToken { location: at }, "E0104"),
        ];
        for (err, code) in cases {
            let report = ErrorReport::from_error(&err);
            assert_eq!(report.code, code);
            assert!(report.expected.is_none());
        }
    }

    #[test]
    fn test_json_shape() {
        let err = Error::Io {
            path: "gone.ri".to_string(),
            message: "not found".to_string(),
        };
        let json: serde_json::Value = serde_json::from_str(&ErrorReport::from_error(&err).to_json()).unwrap();

        assert_eq!(json["code"], "E0001");
        assert_eq!(json["kind"], "Io");
        assert_eq!(json["message"], "Cannot open file: gone.ri (not found)");
        assert!(json["location"].is_null());
        assert!(json.get("expected").is_none());
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let err = Error::InvalidToken {
            location: Location::new("b.ri", Position::new(2, 5)),
        };
        let report = ErrorReport::from_error(&err);
        let back: ErrorReport = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(back, report);
    }
}
