//! Operand validators, one small predicate per operand syntax.
//!
//! All checks are single left-to-right scans over the token, so even an
//! adversarial line is validated in linear time.

use crate::error::OperandError;
use crate::model::{ArgKind, Constant, Frame, Operand, TypeName, Variable};
use crate::processor::lexer::is_separator;

/// Characters allowed to start an identifier (labels and variable names).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '-' | '$' | '&' | '%' | '*' | '!' | '?')
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// C0 control characters cannot appear in an XML 1.0 document.
fn is_c0_control(c: char) -> bool {
    c < ' '
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_ident_char),
        _ => false,
    }
}

/// Validate `token` as an operand of `kind`.
pub fn validate(kind: ArgKind, token: &str) -> Result<Operand, OperandError> {
    match kind {
        ArgKind::Label => label(token).map(Operand::Label),
        ArgKind::Var => variable(token).map(Operand::Variable),
        ArgKind::Type => type_name(token).map(Operand::Type),
        ArgKind::Symb => symbol(token),
    }
}

pub fn label(token: &str) -> Result<String, OperandError> {
    if is_identifier(token) {
        Ok(token.to_string())
    } else {
        Err(OperandError::Identifier)
    }
}

pub fn variable(token: &str) -> Result<Variable, OperandError> {
    let (prefix, name) = token.split_once('@').ok_or(OperandError::Frame)?;
    let frame = Frame::from_prefix(prefix).ok_or(OperandError::Frame)?;
    // only the first character is restricted, the rest is free-form
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => {}
        _ => return Err(OperandError::Identifier),
    }
    if chars.any(|c| is_separator(c) || is_c0_control(c)) {
        return Err(OperandError::Identifier);
    }
    Ok(Variable {
        frame,
        name: name.to_string(),
    })
}

pub fn type_name(token: &str) -> Result<TypeName, OperandError> {
    match token {
        "int" => Ok(TypeName::Int),
        "string" => Ok(TypeName::String),
        "nil" => Ok(TypeName::Nil),
        "bool" => Ok(TypeName::Bool),
        _ => Err(OperandError::TypeName),
    }
}

/// Variable or typed constant.
pub fn symbol(token: &str) -> Result<Operand, OperandError> {
    // anything that looks frame-qualified is held to the variable rule
    if ["GF", "LF", "TF"].iter().any(|p| token.starts_with(p)) {
        return variable(token).map(Operand::Variable);
    }
    constant(token).map(Operand::Constant)
}

pub fn constant(token: &str) -> Result<Constant, OperandError> {
    let (subtype, value) = token.split_once('@').ok_or(OperandError::MissingAt)?;
    match subtype {
        "nil" if value == "nil" => Ok(Constant::Nil),
        "nil" => Err(OperandError::Nil),
        "bool" => match value {
            "true" => Ok(Constant::Bool(true)),
            "false" => Ok(Constant::Bool(false)),
            _ => Err(OperandError::Bool),
        },
        "int" if is_int_literal(value) => Ok(Constant::Int(value.to_string())),
        "int" => Err(OperandError::Int),
        "string" => check_string_literal(value).map(|()| Constant::String(value.to_string())),
        other => Err(OperandError::ConstantType(other.to_string())),
    }
}

/// `0`, or an optionally signed decimal without leading zeros.
pub fn is_int_literal(value: &str) -> bool {
    if value == "0" {
        return true;
    }
    let digits = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);
    let mut chars = digits.chars();
    match chars.next() {
        Some('1'..='9') => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Plain characters except `\`, whitespace, control characters and `#`;
/// a backslash must be followed by exactly three decimal digits.
pub fn check_string_literal(value: &str) -> Result<(), OperandError> {
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                for _ in 0..3 {
                    match chars.next() {
                        Some(d) if d.is_ascii_digit() => {}
                        _ => return Err(OperandError::Escape),
                    }
                }
            }
            '#' => return Err(OperandError::StringChar(c)),
            c if is_separator(c) || is_c0_control(c) => return Err(OperandError::StringChar(c)),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let test_cases = vec![
            ("loop", true),
            ("_start", true),
            ("$end-2", true),
            ("&amp", true),
            ("?!*%", true),
            ("a1b2", true),
            ("1abc", false),
            ("", false),
            ("GF@x", false),
            ("lab.el", false),
            ("čau", false),
        ];

        for (token, ok) in test_cases {
            assert_eq!(label(token).is_ok(), ok, "token: {token:?}");
        }
    }

    #[test]
    fn test_variables() {
        assert_eq!(
            variable("GF@a"),
            Ok(Variable {
                frame: Frame::Global,
                name: "a".into()
            })
        );
        assert_eq!(variable("TF@_tmp-1").map(|v| v.frame), Ok(Frame::Temporary));
        assert_eq!(variable("LF@&x").map(|v| v.to_string()), Ok("LF@&x".into()));
        for token in ["GF@a.b", "GF@x<y", "LF@a@b", "TF@_1:ž"] {
            assert_eq!(
                variable(token).map(|v| v.to_string()),
                Ok(token.to_string()),
                "token: {token:?}"
            );
        }

        let test_cases = vec![
            ("a", OperandError::Frame),
            ("gf@a", OperandError::Frame),
            ("XF@a", OperandError::Frame),
            ("GF@", OperandError::Identifier),
            ("GF@1a", OperandError::Identifier),
            ("GF@.a", OperandError::Identifier),
            ("GF@a\u{1}b", OperandError::Identifier),
        ];

        for (token, err) in test_cases {
            assert_eq!(variable(token), Err(err), "token: {token:?}");
        }
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name("int"), Ok(TypeName::Int));
        assert_eq!(type_name("bool"), Ok(TypeName::Bool));
        assert_eq!(type_name("INT"), Err(OperandError::TypeName));
        assert_eq!(type_name("int@1"), Err(OperandError::TypeName));
    }

    #[test]
    fn test_int_literals() {
        let test_cases = vec![
            ("0", true),
            ("42", true),
            ("-7", true),
            ("+10", true),
            ("123456789012345678901234567890", true),
            ("007", false),
            ("-0", false),
            ("+0", false),
            ("0x1F", false),
            ("1.5", false),
            ("", false),
            ("-", false),
            ("12a", false),
        ];

        for (value, ok) in test_cases {
            assert_eq!(is_int_literal(value), ok, "value: {value:?}");
        }
    }

    #[test]
    fn test_string_literals() {
        let test_cases = vec![
            ("", Ok(())),
            ("hello", Ok(())),
            ("ab\\010cd", Ok(())),
            ("\\032\\092", Ok(())),
            ("a@b<c>&", Ok(())),
            ("žluťoučký", Ok(())),
            ("ab\\10cd", Err(OperandError::Escape)),
            ("ab\\1", Err(OperandError::Escape)),
            ("trailing\\", Err(OperandError::Escape)),
            ("a\\n", Err(OperandError::Escape)),
            ("a#b", Err(OperandError::StringChar('#'))),
            ("a\tb", Err(OperandError::StringChar('\t'))),
            ("a\u{1}b", Err(OperandError::StringChar('\u{1}'))),
            ("\u{1f}", Err(OperandError::StringChar('\u{1f}'))),
        ];

        for (value, expected) in test_cases {
            assert_eq!(check_string_literal(value), expected, "value: {value:?}");
        }
    }

    #[test]
    fn test_symbols() {
        let test_cases = vec![
            ("int@42", Ok(Operand::Constant(Constant::Int("42".into())))),
            ("bool@true", Ok(Operand::Constant(Constant::Bool(true)))),
            ("nil@nil", Ok(Operand::Constant(Constant::Nil))),
            ("string@", Ok(Operand::Constant(Constant::String(String::new())))),
            (
                "string@a@b",
                Ok(Operand::Constant(Constant::String("a@b".into()))),
            ),
            (
                "LF@x",
                Ok(Operand::Variable(Variable {
                    frame: Frame::Local,
                    name: "x".into(),
                })),
            ),
            ("GFx", Err(OperandError::Frame)),
            ("nil@null", Err(OperandError::Nil)),
            ("bool@True", Err(OperandError::Bool)),
            ("int@", Err(OperandError::Int)),
            ("float@1.0", Err(OperandError::ConstantType("float".into()))),
            ("Int@1", Err(OperandError::ConstantType("Int".into()))),
            ("42", Err(OperandError::MissingAt)),
        ];

        for (token, expected) in test_cases {
            assert_eq!(symbol(token), expected, "token: {token:?}");
        }
    }

    #[test]
    fn test_validate_dispatch() {
        assert_eq!(
            validate(ArgKind::Label, "end"),
            Ok(Operand::Label("end".into()))
        );
        assert_eq!(
            validate(ArgKind::Type, "string"),
            Ok(Operand::Type(TypeName::String))
        );
        // a constant is not a variable
        assert_eq!(validate(ArgKind::Var, "int@1"), Err(OperandError::Frame));
        // a bare type keyword is not a symbol
        assert_eq!(validate(ArgKind::Symb, "int"), Err(OperandError::MissingAt));
    }
}
