//! The functional core: source text in, XML document out.
//!
//! Lines flow normaliser → header gate → grammar table → operand
//! validators → writer. The first failure stops the run and nothing
//! is emitted.
pub mod grammar;
pub mod header;
pub mod lexer;
pub mod operand;

use std::io::{self, BufRead};

use crate::error::{ParseError, ParseResult};
use crate::model::{Instruction, SourceLine};
use crate::writer::xml::XmlWriter;

use header::HeaderGate;

/// Everything one parse run owns.
pub struct ParseState {
    header: HeaderGate,
    writer: XmlWriter,
}

impl Default for ParseState {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseState {
    pub fn new() -> Self {
        Self {
            header: HeaderGate::new(),
            writer: XmlWriter::new(),
        }
    }

    /// Check the end-of-input conditions and hand out the document.
    pub fn finish(self) -> ParseResult<String> {
        self.header.finish()?;
        log::info!("parsed {} instruction(s)", self.writer.instruction_count());
        Ok(self.writer.finish())
    }
}

/// Turn a body line into a validated instruction.
pub fn validate_instruction(line: &SourceLine) -> ParseResult<Instruction> {
    let (opcode, kinds) = grammar::lookup(line)?;

    let operands = kinds
        .iter()
        .zip(&line.tokens[1..])
        .enumerate()
        .map(|(i, (kind, token))| {
            operand::validate(*kind, token).map_err(|reason| ParseError::InvalidOperand {
                line: line.number,
                position: i + 1,
                kind: *kind,
                token: token.clone(),
                reason,
            })
        })
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(Instruction { opcode, operands })
}

/// Feed one normalised line through the pipeline.
pub fn parse_line(state: &mut ParseState, line: SourceLine) -> ParseResult<()> {
    log::trace!("line {}: {:?}", line.number, line.tokens);

    if !state.header.is_closed() {
        return state.header.accept(&line);
    }

    let instruction = validate_instruction(&line)?;
    let order = state.writer.append(&instruction);
    log::debug!(
        "line {} -> instruction {} {}",
        line.number,
        order,
        instruction.opcode
    );
    Ok(())
}

/// Code part of one raw line: everything before the first `#`, decoded.
///
/// Comments are cut on bytes so they may hold text in any encoding; only
/// the remainder has to be UTF-8. `#` never occurs inside a multi-byte
/// UTF-8 sequence.
fn decode_code_part(number: usize, bytes: &[u8]) -> ParseResult<&str> {
    let code = match bytes.iter().position(|&b| b == b'#') {
        Some(end) => &bytes[..end],
        None => bytes,
    };
    std::str::from_utf8(code).map_err(|e| ParseError::InputRead {
        line: number,
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

/// Run the whole front end over `reader`.
pub fn parse_source<R: BufRead>(mut reader: R) -> ParseResult<String> {
    let mut state = ParseState::new();
    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        number += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ParseError::InputRead {
                line: number,
                source,
            })?;
        if read == 0 {
            break;
        }

        let raw = decode_code_part(number, &buf)?;
        if let Some(line) = lexer::normalize(number, raw) {
            parse_line(&mut state, line)?;
        }
    }

    state.finish()
}

pub fn parse_str(src: &str) -> ParseResult<String> {
    parse_source(src.as_bytes())
}
