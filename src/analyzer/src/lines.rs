//! Logical line assembly.
//!
//! Turns the physical lines of a Dockerfile into logical instructions:
//! blank lines and comments are dropped, and lines ending with `\` are
//! joined with the lines that follow them.

use std::io::BufRead;

use dockerlayers_core::error::{AnalyzeError, Result};

/// One logical instruction line before keyword parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInstruction {
    /// 1-based number of the first physical line.
    pub line: usize,
    /// Continuation-joined text with comments removed.
    pub text: String,
}

/// Assemble logical instructions from the full text of a Dockerfile.
pub fn assemble(content: &str) -> Result<Vec<RawInstruction>> {
    let mut assembler = LineAssembler::default();
    for (idx, line) in content.lines().enumerate() {
        assembler.push(idx + 1, line);
    }
    assembler.finish()
}

/// Assemble logical instructions from a line reader, reading it once.
pub fn assemble_reader<R: BufRead>(reader: R) -> Result<Vec<RawInstruction>> {
    let mut assembler = LineAssembler::default();
    for (idx, line) in reader.lines().enumerate() {
        assembler.push(idx + 1, &line?);
    }
    assembler.finish()
}

#[derive(Debug, Default)]
struct LineAssembler {
    instructions: Vec<RawInstruction>,
    current: String,
    start_line: usize,
}

impl LineAssembler {
    fn push(&mut self, line_num: usize, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        let content = strip_inline_comment(trimmed);
        if content.is_empty() {
            return;
        }

        if self.current.is_empty() {
            self.start_line = line_num;
        } else {
            self.current.push(' ');
        }

        let (part, continues) = strip_continuation(content);
        self.current.push_str(part);

        if !continues {
            self.instructions.push(RawInstruction {
                line: self.start_line,
                text: std::mem::take(&mut self.current),
            });
        }
    }

    fn finish(self) -> Result<Vec<RawInstruction>> {
        if !self.current.is_empty() {
            return Err(AnalyzeError::UnterminatedContinuation);
        }
        Ok(self.instructions)
    }
}

/// Split off a trailing `\`, reporting whether the line continues.
fn strip_continuation(line: &str) -> (&str, bool) {
    match line.strip_suffix('\\') {
        Some(rest) => (rest.trim(), true),
        None => (line, false),
    }
}

/// Drop a `#` comment that starts the line or follows whitespace.
///
/// A `#` glued to the preceding token (as in a URL fragment) is kept.
fn strip_inline_comment(line: &str) -> &str {
    let mut prev: Option<char> = None;
    for (pos, ch) in line.char_indices() {
        if ch == '#' && prev.map_or(true, char::is_whitespace) {
            return line[..pos].trim();
        }
        prev = Some(ch);
    }
    line
}
