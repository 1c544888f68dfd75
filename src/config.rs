//! Runtime settings.
//!
//! The command line is fixed, so everything tunable comes from the
//! environment and is read once at start-up.

use std::env;

pub const LOG_VAR: &str = "IPPCODE_PARSE_LOG";
pub const DIAGNOSTICS_VAR: &str = "IPPCODE_PARSE_DIAGNOSTICS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticFormat {
    /// `ERROR: <message>`
    #[default]
    Text,
    /// One JSON object per failure.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// stderrlog verbosity (0 = error … 4 = trace); `None` keeps logging off.
    pub verbosity: Option<usize>,
    pub diagnostics: DiagnosticFormat,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(LOG_VAR).ok().as_deref(),
            env::var(DIAGNOSTICS_VAR).ok().as_deref(),
        )
    }

    /// Unknown values fall back to the defaults.
    pub fn from_values(log: Option<&str>, diagnostics: Option<&str>) -> Self {
        let verbosity = match log.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("error") => Some(0),
            Some("warn") => Some(1),
            Some("info") => Some(2),
            Some("debug") => Some(3),
            Some("trace") => Some(4),
            _ => None,
        };

        let diagnostics = match diagnostics.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => DiagnosticFormat::Json,
            _ => DiagnosticFormat::Text,
        };

        Self {
            verbosity,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values() {
        let test_cases = vec![
            ((None, None), Settings::default()),
            (
                (Some("debug"), Some("json")),
                Settings {
                    verbosity: Some(3),
                    diagnostics: DiagnosticFormat::Json,
                },
            ),
            (
                (Some(" TRACE "), Some("text")),
                Settings {
                    verbosity: Some(4),
                    diagnostics: DiagnosticFormat::Text,
                },
            ),
            ((Some("off"), Some("yaml")), Settings::default()),
            ((Some("loud"), None), Settings::default()),
        ];

        for ((log, diag), expected) in test_cases {
            assert_eq!(Settings::from_values(log, diag), expected);
        }
    }
}
