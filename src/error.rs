//! Failure taxonomy of the front end.
//!
//! Every variant is fatal. The pipeline threads it back up with `?` and
//! only `reporter` turns it into a diagnostic and an exit code.

use std::io;
use thiserror::Error;

use crate::model::{ArgKind, Opcode};

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid command-line arguments")]
    Usage,

    #[error("line {line}: cannot read input: {source}")]
    InputRead {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output: {0}")]
    OutputWrite(#[source] io::Error),

    #[error("missing header")]
    HeaderMissing,

    #[error("line {line}: wrong header `{found}`")]
    HeaderMalformed { line: usize, found: String },

    #[error("line {line}: unknown opcode `{mnemonic}`")]
    UnknownOpcode { line: usize, mnemonic: String },

    #[error("line {line}: {opcode} takes {expected} operand(s), found {found}")]
    WrongArity {
        line: usize,
        opcode: Opcode,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: operand {position} `{token}` is not a valid {kind}: {reason}")]
    InvalidOperand {
        line: usize,
        position: usize,
        kind: ArgKind,
        token: String,
        reason: OperandError,
    },
}

/// Why a single operand token was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    #[error("bad identifier")]
    Identifier,
    #[error("missing or unknown frame prefix")]
    Frame,
    #[error("expected one of int, string, nil, bool")]
    TypeName,
    #[error("expected <type>@<value>")]
    MissingAt,
    #[error("unknown constant type `{0}`")]
    ConstantType(String),
    #[error("malformed int literal")]
    Int,
    #[error("expected true or false")]
    Bool,
    #[error("nil constant must be nil@nil")]
    Nil,
    #[error("malformed escape sequence")]
    Escape,
    #[error("forbidden character {0:?} in string")]
    StringChar(char),
}

impl ParseError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            ParseError::Usage => 10,
            ParseError::InputRead { .. } => 11,
            ParseError::OutputWrite(_) => 12,
            ParseError::HeaderMissing | ParseError::HeaderMalformed { .. } => 21,
            ParseError::UnknownOpcode { .. } => 22,
            ParseError::WrongArity { .. } | ParseError::InvalidOperand { .. } => 23,
        }
    }

    /// Short class name, used by the JSON diagnostic format.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::Usage => "UsageError",
            ParseError::InputRead { .. } => "InputError",
            ParseError::OutputWrite(_) => "OutputError",
            ParseError::HeaderMissing => "HeaderMissing",
            ParseError::HeaderMalformed { .. } => "HeaderMalformed",
            ParseError::UnknownOpcode { .. } => "UnknownOpcode",
            ParseError::WrongArity { .. } | ParseError::InvalidOperand { .. } => "SyntaxError",
        }
    }

    /// Source line the failure points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::InputRead { line, .. }
            | ParseError::HeaderMalformed { line, .. }
            | ParseError::UnknownOpcode { line, .. }
            | ParseError::WrongArity { line, .. }
            | ParseError::InvalidOperand { line, .. } => Some(*line),
            ParseError::Usage | ParseError::OutputWrite(_) | ParseError::HeaderMissing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let test_cases = vec![
            (ParseError::Usage, 10),
            (
                ParseError::InputRead {
                    line: 1,
                    source: io::Error::new(io::ErrorKind::InvalidData, "bad utf-8"),
                },
                11,
            ),
            (ParseError::OutputWrite(io::ErrorKind::BrokenPipe.into()), 12),
            (ParseError::HeaderMissing, 21),
            (
                ParseError::HeaderMalformed {
                    line: 1,
                    found: "MOVE".into(),
                },
                21,
            ),
            (
                ParseError::UnknownOpcode {
                    line: 2,
                    mnemonic: "FOOBAR".into(),
                },
                22,
            ),
            (
                ParseError::WrongArity {
                    line: 2,
                    opcode: Opcode::Add,
                    expected: 3,
                    found: 2,
                },
                23,
            ),
            (
                ParseError::InvalidOperand {
                    line: 2,
                    position: 1,
                    kind: ArgKind::Var,
                    token: "a".into(),
                    reason: OperandError::Frame,
                },
                23,
            ),
        ];

        for (err, code) in test_cases {
            assert_eq!(err.exit_code(), code, "{err}");
        }
    }

    #[test]
    fn test_messages_carry_line() {
        let err = ParseError::InvalidOperand {
            line: 4,
            position: 2,
            kind: ArgKind::Symb,
            token: "string@a\\10b".into(),
            reason: OperandError::Escape,
        };
        assert_eq!(err.line(), Some(4));
        assert_eq!(
            err.to_string(),
            "line 4: operand 2 `string@a\\10b` is not a valid symb: malformed escape sequence"
        );
        assert_eq!(err.kind(), "SyntaxError");
    }
}
