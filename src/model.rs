use std::fmt;
use std::str::FromStr;

/// Value of the `language` attribute on the document root.
pub const LANGUAGE: &str = "IPPCode22";

/// Upper-cased form of the marker line every source must start with.
pub const HEADER_MARKER: &str = ".IPPCODE22";

/// One non-empty input line after comment stripping and tokenisation.
///
/// Lives only until it is turned into an `Instruction` (or accepted as
/// the header), so it keeps the raw text around for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based position in the input stream.
    pub number: usize,
    pub raw: String,
    pub tokens: Vec<String>,
}

/// ─────────────────────────────────────────────────────
/// Opcodes
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // frames & calls
    CreateFrame,
    PushFrame,
    PopFrame,
    Return,
    Break,
    Label,
    Jump,
    Call,
    // single operand
    Exit,
    DPrint,
    Write,
    PushS,
    DefVar,
    PopS,
    // var symb
    Move,
    Type,
    StrLen,
    Int2Char,
    Not,
    Read,
    // conditional jumps
    JumpIfEq,
    JumpIfNeq,
    // var symb symb
    Add,
    Sub,
    Mul,
    IDiv,
    And,
    Or,
    Lt,
    Gt,
    Eq,
    StrI2Int,
    Concat,
    GetChar,
    SetChar,
}

impl Opcode {
    /// Every opcode the language knows, in table order.
    pub const ALL: [Opcode; 35] = [
        Opcode::CreateFrame,
        Opcode::PushFrame,
        Opcode::PopFrame,
        Opcode::Return,
        Opcode::Break,
        Opcode::Label,
        Opcode::Jump,
        Opcode::Call,
        Opcode::Exit,
        Opcode::DPrint,
        Opcode::Write,
        Opcode::PushS,
        Opcode::DefVar,
        Opcode::PopS,
        Opcode::Move,
        Opcode::Type,
        Opcode::StrLen,
        Opcode::Int2Char,
        Opcode::Not,
        Opcode::Read,
        Opcode::JumpIfEq,
        Opcode::JumpIfNeq,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::IDiv,
        Opcode::And,
        Opcode::Or,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::Eq,
        Opcode::StrI2Int,
        Opcode::Concat,
        Opcode::GetChar,
        Opcode::SetChar,
    ];

    /// Canonical (upper case) mnemonic, as written to the `opcode` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Opcode::CreateFrame => "CREATEFRAME",
            Opcode::PushFrame => "PUSHFRAME",
            Opcode::PopFrame => "POPFRAME",
            Opcode::Return => "RETURN",
            Opcode::Break => "BREAK",
            Opcode::Label => "LABEL",
            Opcode::Jump => "JUMP",
            Opcode::Call => "CALL",
            Opcode::Exit => "EXIT",
            Opcode::DPrint => "DPRINT",
            Opcode::Write => "WRITE",
            Opcode::PushS => "PUSHS",
            Opcode::DefVar => "DEFVAR",
            Opcode::PopS => "POPS",
            Opcode::Move => "MOVE",
            Opcode::Type => "TYPE",
            Opcode::StrLen => "STRLEN",
            Opcode::Int2Char => "INT2CHAR",
            Opcode::Not => "NOT",
            Opcode::Read => "READ",
            Opcode::JumpIfEq => "JUMPIFEQ",
            Opcode::JumpIfNeq => "JUMPIFNEQ",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::IDiv => "IDIV",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Lt => "LT",
            Opcode::Gt => "GT",
            Opcode::Eq => "EQ",
            Opcode::StrI2Int => "STRI2INT",
            Opcode::Concat => "CONCAT",
            Opcode::GetChar => "GETCHAR",
            Opcode::SetChar => "SETCHAR",
        }
    }
}

impl FromStr for Opcode {
    type Err = String;

    /// Mnemonics are case-insensitive on input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown opcode `{s}`"))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operand slot kinds used by the grammar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Label,
    Var,
    /// Variable or constant.
    Symb,
    Type,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Label => "label",
            ArgKind::Var => "var",
            ArgKind::Symb => "symb",
            ArgKind::Type => "type",
        };
        f.write_str(name)
    }
}

/// ─────────────────────────────────────────────────────
/// Operands
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Global,
    Local,
    Temporary,
}

impl Frame {
    pub fn prefix(self) -> &'static str {
        match self {
            Frame::Global => "GF",
            Frame::Local => "LF",
            Frame::Temporary => "TF",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Frame> {
        match prefix {
            "GF" => Some(Frame::Global),
            "LF" => Some(Frame::Local),
            "TF" => Some(Frame::Temporary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub frame: Frame,
    pub name: String,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.frame.prefix(), self.name)
    }
}

/// Typed literal. `Int` keeps its source digits, no range is implied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Int(String),
    Bool(bool),
    /// Raw value with `\ddd` escapes left undecoded.
    String(String),
    Nil,
}

/// Bare type keyword, only valid as the second operand of READ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    String,
    Nil,
    Bool,
}

impl TypeName {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::String => "string",
            TypeName::Nil => "nil",
            TypeName::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Label(String),
    Variable(Variable),
    Constant(Constant),
    Type(TypeName),
}

impl Operand {
    /// Value of the `type` attribute on the `argN` element.
    pub fn type_attr(&self) -> &'static str {
        match self {
            Operand::Label(_) => "label",
            Operand::Variable(_) => "var",
            Operand::Type(_) => "type",
            Operand::Constant(Constant::Int(_)) => "int",
            Operand::Constant(Constant::Bool(_)) => "bool",
            Operand::Constant(Constant::String(_)) => "string",
            Operand::Constant(Constant::Nil) => "nil",
        }
    }

    /// Unescaped text content of the `argN` element.
    pub fn text(&self) -> String {
        match self {
            Operand::Label(name) => name.clone(),
            Operand::Variable(var) => var.to_string(),
            Operand::Type(ty) => ty.as_str().to_string(),
            Operand::Constant(Constant::Int(digits)) => digits.clone(),
            Operand::Constant(Constant::Bool(b)) => b.to_string(),
            Operand::Constant(Constant::String(s)) => s.clone(),
            Operand::Constant(Constant::Nil) => "nil".to_string(),
        }
    }
}

/// One validated instruction. Its `order` is handed out by the writer
/// when the instruction is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
}
