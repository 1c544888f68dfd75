//! Turns a failure into its diagnostic line and exit status.

use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::config::DiagnosticFormat;
use crate::error::ParseError;

#[derive(Debug, Serialize)]
struct Diagnostic<'a> {
    code: u8,
    kind: &'a str,
    line: Option<usize>,
    message: String,
}

/// Render the single diagnostic line for `err`, or `None` when the
/// failure class is reported by exit status alone.
pub fn format_diagnostic(err: &ParseError, format: DiagnosticFormat) -> Option<String> {
    if matches!(err, ParseError::Usage) {
        return None;
    }

    let text = format!("ERROR: {err}");
    let line = match format {
        DiagnosticFormat::Text => text,
        DiagnosticFormat::Json => serde_json::to_string(&Diagnostic {
            code: err.exit_code(),
            kind: err.kind(),
            line: err.line(),
            message: err.to_string(),
        })
        .unwrap_or(text),
    };
    Some(line)
}

/// Report `err` on `sink` and return the exit status to end the process with.
pub fn report_to<W: Write>(err: &ParseError, format: DiagnosticFormat, mut sink: W) -> ExitCode {
    if let Some(line) = format_diagnostic(err, format) {
        // stderr going away must not change the exit status
        let _ = writeln!(sink, "{line}");
    }
    ExitCode::from(err.exit_code())
}

pub fn report(err: &ParseError, format: DiagnosticFormat) -> ExitCode {
    report_to(err, format, io::stderr().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Opcode;

    #[test]
    fn test_text_diagnostic() {
        let err = ParseError::UnknownOpcode {
            line: 3,
            mnemonic: "FOOBAR".into(),
        };
        assert_eq!(
            format_diagnostic(&err, DiagnosticFormat::Text).as_deref(),
            Some("ERROR: line 3: unknown opcode `FOOBAR`")
        );
    }

    #[test]
    fn test_json_diagnostic() {
        let err = ParseError::WrongArity {
            line: 2,
            opcode: Opcode::Add,
            expected: 3,
            found: 2,
        };
        let line = format_diagnostic(&err, DiagnosticFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["code"], 23);
        assert_eq!(value["kind"], "SyntaxError");
        assert_eq!(value["line"], 2);
        assert_eq!(value["message"], "line 2: ADD takes 3 operand(s), found 2");

        let missing = format_diagnostic(&ParseError::HeaderMissing, DiagnosticFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&missing).unwrap();
        assert!(value["line"].is_null());
    }

    #[test]
    fn test_usage_is_silent() {
        let mut sink = Vec::<u8>::new();
        let code = report_to(&ParseError::Usage, DiagnosticFormat::Text, &mut sink);
        assert_eq!(code, ExitCode::from(10));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_single_line_on_sink() {
        let mut sink = Vec::<u8>::new();
        let code = report_to(&ParseError::HeaderMissing, DiagnosticFormat::Text, &mut sink);
        assert_eq!(code, ExitCode::from(21));
        assert_eq!(String::from_utf8(sink).unwrap(), "ERROR: missing header\n");
    }
}
