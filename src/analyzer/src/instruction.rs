//! Keyword/argument split for logical instruction lines.

use serde::Serialize;

use crate::lines::RawInstruction;

/// A logical line split into its keyword and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedInstruction {
    /// 1-based source line of the instruction.
    pub line: usize,
    /// Uppercased instruction keyword (`FROM`, `RUN`, ...). Empty for a blank line.
    pub keyword: String,
    /// Trimmed text after the keyword.
    pub args: String,
    /// Trimmed logical line in its original case, for display.
    pub raw: String,
}

/// Parse one logical line. Never fails.
pub fn parse_instruction(raw: &RawInstruction) -> ParsedInstruction {
    let trimmed = raw.text.trim();
    let (keyword, args) = split_first_word(trimmed);
    ParsedInstruction {
        line: raw.line,
        keyword: keyword.to_uppercase(),
        args: args.to_string(),
        raw: trimmed.to_string(),
    }
}

/// Split a string into the first word and the rest.
fn split_first_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.find(char::is_whitespace) {
        Some(pos) => (&s[..pos], s[pos..].trim()),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: usize, text: &str) -> RawInstruction {
        RawInstruction {
            line,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_uppercases_keyword() {
        let parsed = parse_instruction(&raw(3, "run  apt-get update "));
        assert_eq!(
            parsed,
            ParsedInstruction {
                line: 3,
                keyword: "RUN".to_string(),
                args: "apt-get update".to_string(),
                raw: "run  apt-get update".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_keyword_only() {
        let parsed = parse_instruction(&raw(1, "ONBUILD"));
        assert_eq!(parsed.keyword, "ONBUILD");
        assert_eq!(parsed.args, "");
        assert_eq!(parsed.raw, "ONBUILD");
    }

    #[test]
    fn test_parse_blank_line() {
        let parsed = parse_instruction(&raw(9, "   "));
        assert_eq!(parsed.keyword, "");
        assert_eq!(parsed.args, "");
        assert_eq!(parsed.line, 9);
    }

    #[test]
    fn test_parse_tab_separator() {
        let parsed = parse_instruction(&raw(2, "COPY\t--from=build /out /app"));
        assert_eq!(parsed.keyword, "COPY");
        assert_eq!(parsed.args, "--from=build /out /app");
    }

    #[test]
    fn test_parse_keeps_json_args() {
        let parsed = parse_instruction(&raw(5, r#"CMD ["./run", "--port", "80"]"#));
        assert_eq!(parsed.keyword, "CMD");
        assert_eq!(parsed.args, r#"["./run", "--port", "80"]"#);
    }

    #[test]
    fn test_split_first_word() {
        assert_eq!(split_first_word("FROM alpine AS x"), ("FROM", "alpine AS x"));
        assert_eq!(split_first_word("  USER  "), ("USER", ""));
        assert_eq!(split_first_word(""), ("", ""));
    }
}
