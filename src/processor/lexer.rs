//! Line normaliser.
//!
//! Each raw input line is broken into whitespace-separated tokens.
//! Nothing is interpreted here: `MOVE`, `GF@x` and `int@1` all come out
//! as plain strings, the grammar table and operand validators decide
//! what they mean later.
//
//  Lexical items (informal):
//
//      line     ::= token* comment?
//      token    ::= [^ \t\r\n\v\f#]+
//      comment  ::= '#' .*            (discarded)

use std::iter::Peekable;
use std::str::Chars;

use crate::model::SourceLine;

/// Token separators. ASCII only, a non-breaking space is part of a token.
pub fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c')
}

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
        }
    }

    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F, buf: &mut String) {
        while let Some(c) = self.peek_char() {
            if pred(c) {
                buf.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek_char() {
            if is_separator(c) {
                self.next_char();
            } else {
                break;
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_separators();

        match self.peek_char()? {
            // comment runs to end of line
            '#' => {
                while self.next_char().is_some() {}
                None
            }
            _ => {
                let mut token = String::new();
                self.consume_while(|c| !is_separator(c) && c != '#', &mut token);
                Some(token)
            }
        }
    }
}

/// Normalise one raw line. Blank and comment-only lines yield `None`.
pub fn normalize(number: usize, raw: &str) -> Option<SourceLine> {
    let tokens: Vec<String> = Lexer::new(raw).collect();
    if tokens.is_empty() {
        return None;
    }
    Some(SourceLine {
        number,
        raw: raw.to_string(),
        tokens,
    })
}
