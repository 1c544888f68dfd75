//! In-memory XML document for one parse run.
//!
//! Instructions are appended as they are validated; the text only leaves
//! this type through `finish`, so a failed run never produces a partial
//! document.

use std::borrow::Cow;

use crate::model::{Instruction, LANGUAGE, Opcode, Operand};

pub struct XmlWriter {
    buf: String,
    next_order: usize,
    /// A start tag has been written up to its attributes and still needs
    /// either `>` (children follow) or `/>` (empty element).
    pending_start: bool,
    in_instruction: bool,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWriter {
    pub fn new() -> Self {
        let mut buf = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        buf.push_str("<program language=\"");
        buf.push_str(&escape_attr(LANGUAGE));
        buf.push('"');
        Self {
            buf,
            next_order: 1,
            pending_start: true,
            in_instruction: false,
        }
    }

    fn close_start_tag(&mut self) {
        if self.pending_start {
            self.buf.push('>');
            self.pending_start = false;
        }
    }

    /// Open an `<instruction>` element and return the order number it got.
    pub fn begin_instruction(&mut self, opcode: Opcode) -> usize {
        debug_assert!(!self.in_instruction, "instruction left open");
        self.close_start_tag();

        let order = self.next_order;
        self.next_order += 1;

        self.buf.push_str("<instruction order=\"");
        self.buf.push_str(&order.to_string());
        self.buf.push_str("\" opcode=\"");
        self.buf.push_str(opcode.as_str());
        self.buf.push('"');
        self.pending_start = true;
        self.in_instruction = true;
        order
    }

    /// Append `<argN type="…">value</argN>`; `position` is 1-based.
    pub fn append_operand(&mut self, position: usize, operand: &Operand) {
        self.close_start_tag();
        let text = operand.text();
        self.buf.push_str(&format!(
            "<arg{position} type=\"{}\">{}</arg{position}>",
            operand.type_attr(),
            escape_text(&text)
        ));
    }

    pub fn close_instruction(&mut self) {
        if self.pending_start {
            self.buf.push_str("/>");
            self.pending_start = false;
        } else {
            self.buf.push_str("</instruction>");
        }
        self.in_instruction = false;
    }

    /// Write a whole validated instruction; returns its order.
    pub fn append(&mut self, instruction: &Instruction) -> usize {
        let order = self.begin_instruction(instruction.opcode);
        for (i, operand) in instruction.operands.iter().enumerate() {
            self.append_operand(i + 1, operand);
        }
        self.close_instruction();
        order
    }

    /// Number of instructions written so far.
    pub fn instruction_count(&self) -> usize {
        self.next_order - 1
    }

    /// Close the root element and hand out the finished document.
    pub fn finish(mut self) -> String {
        debug_assert!(!self.in_instruction, "instruction left open");
        if self.pending_start {
            self.buf.push_str("/>");
        } else {
            self.buf.push_str("</program>");
        }
        self.buf.push('\n');
        self.buf
    }
}

/// Escape character data.
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape(s, false)
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s, true)
}

fn escape(s: &str, quote: bool) -> Cow<'_, str> {
    let needs = |c: char| matches!(c, '&' | '<' | '>') || (quote && c == '"');
    if !s.chars().any(needs) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
