use std::fmt;
use std::num::IntErrorKind;

use crate::{
    config::Config,
    error::{AsmError, Error},
    label::Labels,
};

/// Directive that emits one raw byte.
pub const DATA: &str = "data";

// ----------------------------------------------------------------------------
// Line

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based
    pub line_no: usize,
    pub label: Option<String>,
    pub op: Option<String>,
    pub arg: Option<Imm>,
    /// Assigned by label collection
    pub addr: Option<u8>,
}

impl Line {
    /// `[label:] [op [arg]] [; comment]`. Blank and comment-only lines give `None`.
    pub fn parse(raw: &str, line_no: usize, cfg: &Config) -> Result<Option<Line>, AsmError> {
        let err = |msg: String| AsmError::new(line_no, Error::LexError(msg));

        let code = match raw.find(cfg.comment_marker) {
            Some(idx) => &raw[..idx],
            None => raw,
        };
        let mut words: Vec<&str> = code.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }

        // main:  /  main:add
        let mut label = None;
        let first = words[0];
        if let Some((head, tail)) = first.split_once(':') {
            if !is_ident(head) {
                return Err(err(format!("Invalid label name: `{}`", head)));
            }
            label = Some(head.to_string());
            if tail.is_empty() {
                words.remove(0);
            } else {
                words[0] = tail;
            }
        }

        let (op, arg) = match words.as_slice() {
            [] => (None, None),
            [op] => (Some(*op), None),
            [op, arg] => (Some(*op), Some(*arg)),
            [_, _, extra, ..] => return Err(err(format!("Unexpected token: `{}`", extra))),
        };

        if let Some(op) = op {
            if !is_ident(op) {
                return Err(err(format!("Invalid operation: `{}`", op)));
            }
        }
        let arg = arg.map(Imm::parse).transpose().map_err(|kind| AsmError::new(line_no, kind))?;

        Ok(Some(Line {
            line_no,
            label,
            op: op.map(str::to_string),
            arg,
            addr: None,
        }))
    }

    /// Lines with an operation occupy one word.
    pub fn has_word(&self) -> bool {
        self.op.is_some()
    }

    pub fn is_data(&self) -> bool {
        self.op
            .as_deref()
            .is_some_and(|op| op.eq_ignore_ascii_case(DATA))
    }
}

/// Parse every line, collecting all syntax errors.
pub fn parse(src: &str, cfg: &Config) -> Result<Vec<Line>, Vec<AsmError>> {
    let mut lines = vec![];
    let mut errors = vec![];
    for (idx, raw) in src.lines().enumerate() {
        match Line::parse(raw, idx + 1, cfg) {
            Ok(Some(line)) => lines.push(line),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }
    if errors.is_empty() {
        Ok(lines)
    } else {
        Err(errors)
    }
}

// ----------------------------------------------------------------------------
// Immidiate

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(u32),
    Ident(String),
}

impl Imm {
    fn parse(s: &str) -> Result<Imm, Error> {
        if s.starts_with(|c: char| c.is_ascii_digit()) {
            return parse_with_prefix(s)
                .map(Imm::Literal)
                .ok_or_else(|| Error::LexError(format!("Cannot parse `{}` as number", s)));
        }
        if is_ident(s) {
            Ok(Imm::Ident(s.to_string()))
        } else {
            Err(Error::LexError(format!("Invalid operand: `{}`", s)))
        }
    }

    pub fn resolve(&self, labels: &Labels) -> Result<u32, Error> {
        match self {
            Imm::Literal(v) => Ok(*v),
            Imm::Ident(s) => match labels.get(s) {
                Some(v) => Ok(v.into()),
                None => Err(Error::UndefinedSymbol(s.clone())),
            },
        }
    }
}

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imm::Literal(v) => write!(f, "{}", v),
            Imm::Ident(s) => write!(f, "{}", s),
        }
    }
}

/// Digits valid for their radix always give a literal; values past `u32::MAX` saturate.
fn parse_with_prefix(s: &str) -> Option<u32> {
    let (radix, num) = match s.get(0..2) {
        Some("0b" | "0B") => (2, &s[2..]),
        Some("0o" | "0O") => (8, &s[2..]),
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };
    if num.is_empty() || !num.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    match u32::from_str_radix(num, radix) {
        Ok(v) => Some(v),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u32::MAX),
        Err(_) => None,
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(head) if head.is_ascii_alphabetic() || head == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw: &str) -> Option<Line> {
        Line::parse(raw, 1, &Config::default()).unwrap()
    }

    fn lex_error(raw: &str) -> String {
        match Line::parse(raw, 9, &Config::default()) {
            Err(AsmError { line: 9, kind: Error::LexError(msg) }) => msg,
            other => panic!("expected lex error for {raw:?}, got {other:?}"),
        }
    }

    macro_rules! test_line {
        ($($name:ident: $raw:expr => ($label:expr, $op:expr, $arg:expr),)*) => {
            $(
                #[test]
                fn $name() {
                    let line = line($raw).unwrap();
                    assert_eq!(
                        (line.label.as_deref(), line.op.as_deref(), line.arg),
                        ($label, $op, $arg)
                    );
                }
            )*
        }
    }

    test_line! {
        test_bare_op: "add" => (None, Some("add"), None),
        test_op_decimal: "ldac 5" => (None, Some("ldac"), Some(Imm::Literal(5))),
        test_op_hex: "ldac 0xF" => (None, Some("ldac"), Some(Imm::Literal(15))),
        test_op_hex_upper: "ldac 0X0a" => (None, Some("ldac"), Some(Imm::Literal(10))),
        test_op_binary: "ldbc 0b101" => (None, Some("ldbc"), Some(Imm::Literal(5))),
        test_op_octal: "ldbc 0o17" => (None, Some("ldbc"), Some(Imm::Literal(15))),
        test_op_label: "br loop" => (None, Some("br"), Some(Imm::Ident("loop".to_string()))),
        test_label_op: "loop: brz end" => (Some("loop"), Some("brz"), Some(Imm::Ident("end".to_string()))),
        test_label_glued: "loop:sub" => (Some("loop"), Some("sub"), None),
        test_label_only: "end:" => (Some("end"), None, None),
        test_comment: "  stam 3 ; store it" => (None, Some("stam"), Some(Imm::Literal(3))),
        test_comment_no_space: "add;x" => (None, Some("add"), None),
        test_tabs: "\tl_1:\tldam\t0" => (Some("l_1"), Some("ldam"), Some(Imm::Literal(0))),
        test_large_literal: "ldac 300" => (None, Some("ldac"), Some(Imm::Literal(300))),
        test_huge_literal: "ldac 99999999999" => (None, Some("ldac"), Some(Imm::Literal(u32::MAX))),
        test_huge_hex_literal: "data 0x1FFFFFFFF" => (None, Some("data"), Some(Imm::Literal(u32::MAX))),
    }

    #[test]
    fn blank_lines() {
        assert_eq!(line(""), None);
        assert_eq!(line("    \t"), None);
        assert_eq!(line("; only a comment"), None);
        assert_eq!(line("   ;"), None);
    }

    #[test]
    fn custom_comment_marker() {
        let cfg = Config {
            comment_marker: '#',
            ..Config::default()
        };
        let line = Line::parse("ldac 1 # one", 4, &cfg).unwrap().unwrap();
        assert_eq!(line.line_no, 4);
        assert_eq!(line.arg, Some(Imm::Literal(1)));
        assert_eq!(Line::parse("# nothing", 5, &cfg).unwrap(), None);
        // `;` is not special any more
        assert!(Line::parse("add ; x", 6, &cfg).is_err());
    }

    #[test]
    fn malformed_lines() {
        assert!(lex_error("ldac 1 2").contains("`2`"));
        assert!(lex_error("1abc: add").contains("label"));
        assert!(lex_error(": add").contains("label"));
        assert!(lex_error("3 4").contains("operation"));
        assert!(lex_error("ldac -1").contains("`-1`"));
        assert!(lex_error("ldac 0xZZ").contains("`0xZZ`"));
        assert!(lex_error("ldac 12ab").contains("`12ab`"));
        assert!(lex_error("ldac 0x").contains("`0x`"));
        assert!(lex_error("ldac 0x+5").contains("`0x+5`"));
        assert!(lex_error("a: b: add").contains("`b:`"));
    }

    #[test]
    fn data_directive() {
        assert!(line("data 0xFF").unwrap().is_data());
        assert!(line("x: DATA 1").unwrap().is_data());
        assert!(!line("add").unwrap().is_data());
        assert!(!line("x:").unwrap().has_word());
    }

    #[test]
    fn parse_collects_all_errors() {
        let src = "ldac 1\nldac -1\n\n; fine\nbr 1 2\nadd\n";
        let errors = parse(src, &Config::default()).unwrap_err();
        let lines: Vec<usize> = errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![2, 5]);
    }

    #[test]
    fn parse_skips_blank_lines() {
        let src = "start: ldac 1\r\n\r\n  ; c\r\nadd\r\n";
        let lines = parse(src, &Config::default()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_no, 1);
        assert_eq!(lines[1].line_no, 4);
        assert_eq!(lines[1].op.as_deref(), Some("add"));
    }
}
