//! Opcode grammar table: which operand kinds each opcode takes.

use crate::error::{ParseError, ParseResult};
use crate::model::{ArgKind, Opcode, SourceLine};

use ArgKind::{Label, Symb, Type, Var};

const NONE: &[ArgKind] = &[];
const LABEL: &[ArgKind] = &[Label];
const SYMB: &[ArgKind] = &[Symb];
const VAR: &[ArgKind] = &[Var];
const VAR_SYMB: &[ArgKind] = &[Var, Symb];
const VAR_TYPE: &[ArgKind] = &[Var, Type];
const LABEL_SYMB_SYMB: &[ArgKind] = &[Label, Symb, Symb];
const VAR_SYMB_SYMB: &[ArgKind] = &[Var, Symb, Symb];

/// Operand kinds for `op`, positionally.
pub fn signature(op: Opcode) -> &'static [ArgKind] {
    match op {
        Opcode::CreateFrame | Opcode::PushFrame | Opcode::PopFrame | Opcode::Return | Opcode::Break => {
            NONE
        }
        Opcode::Label | Opcode::Jump | Opcode::Call => LABEL,
        Opcode::Exit | Opcode::DPrint | Opcode::Write | Opcode::PushS => SYMB,
        Opcode::DefVar | Opcode::PopS => VAR,
        Opcode::Move | Opcode::Type | Opcode::StrLen | Opcode::Int2Char | Opcode::Not => VAR_SYMB,
        Opcode::Read => VAR_TYPE,
        Opcode::JumpIfEq | Opcode::JumpIfNeq => LABEL_SYMB_SYMB,
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::IDiv
        | Opcode::And
        | Opcode::Or
        | Opcode::Lt
        | Opcode::Gt
        | Opcode::Eq
        | Opcode::StrI2Int
        | Opcode::Concat
        | Opcode::GetChar
        | Opcode::SetChar => VAR_SYMB_SYMB,
    }
}

/// Resolve the mnemonic of `line` and check its operand count.
///
/// Returns the opcode together with its signature; the operand tokens are
/// `line.tokens[1..]`, one per signature entry.
pub fn lookup(line: &SourceLine) -> ParseResult<(Opcode, &'static [ArgKind])> {
    let Some((mnemonic, operands)) = line.tokens.split_first() else {
        return Err(ParseError::UnknownOpcode {
            line: line.number,
            mnemonic: String::new(),
        });
    };

    let opcode: Opcode = mnemonic.parse().map_err(|_| ParseError::UnknownOpcode {
        line: line.number,
        mnemonic: mnemonic.clone(),
    })?;

    let kinds = signature(opcode);
    if operands.len() != kinds.len() {
        return Err(ParseError::WrongArity {
            line: line.number,
            opcode,
            expected: kinds.len(),
            found: operands.len(),
        });
    }

    Ok((opcode, kinds))
}
