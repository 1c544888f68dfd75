//! Gate for the leading `.IPPcode22` marker line.

use crate::error::{ParseError, ParseResult};
use crate::model::{HEADER_MARKER, SourceLine};

#[derive(Debug, Default)]
pub struct HeaderGate {
    accepted: bool,
}

impl HeaderGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once the marker line has been seen.
    pub fn is_closed(&self) -> bool {
        self.accepted
    }

    /// Check the first non-empty line. It must be the marker and nothing else.
    pub fn accept(&mut self, line: &SourceLine) -> ParseResult<()> {
        match line.tokens.as_slice() {
            [marker] if marker.eq_ignore_ascii_case(HEADER_MARKER) => {
                self.accepted = true;
                log::info!("header accepted on line {}", line.number);
                Ok(())
            }
            _ => Err(ParseError::HeaderMalformed {
                line: line.number,
                found: line.tokens.join(" "),
            }),
        }
    }

    /// Called at end of input.
    pub fn finish(&self) -> ParseResult<()> {
        if self.accepted {
            Ok(())
        } else {
            Err(ParseError::HeaderMissing)
        }
    }
}
