//! Symbolic constants defined by header directives.
//!
//! Directive lines such as `BUF_SIZE equ 4096`, `%define BUF_SIZE 4096` or
//! `#define BUF_SIZE (1 << 12)` declare names that other parts of the
//! document (BSS region sizes in particular) may refer to. Values may be
//! integer literals, other constants, or small arithmetic expressions over
//! both.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::path;

// --- Compiled regexes (one-time via LazyLock) ---

static NASM_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*%(?:define|xdefine|assign)\s+([A-Za-z_][A-Za-z0-9_]*)\s+(.+?)\s*$")
        .expect("NASM_DEFINE must compile")
});

static C_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*define\s+([A-Za-z_][A-Za-z0-9_]*)\s+(.+?)\s*$")
        .expect("C_DEFINE must compile")
});

static GAS_EQU: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\.(?:equ|set)\s+([A-Za-z_][A-Za-z0-9_]*)\s*,\s*(.+?)\s*$")
        .expect("GAS_EQU must compile")
});

static NASM_EQU: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([A-Za-z_][A-Za-z0-9_]*)\s*:?\s+equ\s+(.+?)\s*$")
        .expect("NASM_EQU must compile")
});

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+?)\s*$").expect("ASSIGNMENT must compile")
});

/// A constant definition found in a directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDef {
    pub name: String,
    /// Unevaluated value text.
    pub expr: String,
    /// Path of the directive that defines it.
    pub path: String,
}

/// Constants declared by a document's header directives.
///
/// A later definition of the same name replaces an earlier one, the way an
/// assembler preprocessor treats redefinition.
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    defs: Vec<ConstantDef>,
    by_name: HashMap<String, usize>,
}

impl ConstantTable {
    /// Collect constant definitions from raw directive lines.
    pub fn from_directives(directives: &[String], base_path: &str) -> Self {
        let mut table = Self::default();
        for (i, line) in directives.iter().enumerate() {
            if let Some((name, expr)) = parse_directive(line) {
                table.by_name.insert(name.clone(), table.defs.len());
                table.defs.push(ConstantDef {
                    name,
                    expr,
                    path: path::index(base_path, i),
                });
            }
        }
        table
    }

    /// All definitions in directive order, including shadowed ones.
    pub fn definitions(&self) -> &[ConstantDef] {
        &self.defs
    }

    /// Whether `name` is defined by any directive.
    pub fn is_defined(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The effective definition of `name`.
    pub fn get(&self, name: &str) -> Option<&ConstantDef> {
        self.by_name.get(name).map(|&i| &self.defs[i])
    }

    /// Evaluate `name` to an integer.
    ///
    /// Returns `None` for undefined names, malformed expressions, negative
    /// results, overflow and definition cycles.
    pub fn resolve(&self, name: &str) -> Option<u64> {
        let mut visiting = Vec::new();
        self.resolve_inner(name, &mut visiting)
            .and_then(|v| u64::try_from(v).ok())
    }

    fn resolve_inner<'a>(&'a self, name: &'a str, visiting: &mut Vec<&'a str>) -> Option<i128> {
        if visiting.contains(&name) {
            return None;
        }
        let def = self.get(name)?;
        visiting.push(name);
        let tokens = lex_expr(&def.expr)?;
        let mut parser = ExprParser {
            tokens: &tokens,
            pos: 0,
            table: self,
            visiting: &mut *visiting,
        };
        let value = parser.expr()?;
        let done = parser.pos == tokens.len();
        visiting.pop();
        if done {
            Some(value)
        } else {
            None
        }
    }
}

/// Extract `(name, value)` from a directive line, if it defines a constant.
pub fn parse_directive(line: &str) -> Option<(String, String)> {
    let line = strip_comment(line);
    for re in [&*NASM_DEFINE, &*C_DEFINE, &*GAS_EQU, &*NASM_EQU, &*ASSIGNMENT] {
        if let Some(caps) = re.captures(line) {
            return Some((caps[1].to_string(), caps[2].to_string()));
        }
    }
    None
}

fn strip_comment(line: &str) -> &str {
    let end = [line.find(';'), line.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    &line[..end]
}

/// Parse an integer literal.
///
/// Accepts decimal, `0x` hex, `0b` binary and `h`-suffixed hex (`1000h`).
/// Underscores are ignored as digit separators.
pub fn parse_int_literal(text: &str) -> Option<u64> {
    let s: String = text.trim().chars().filter(|c| *c != '_').collect();
    let lower = s.to_ascii_lowercase();
    if lower.is_empty() {
        return None;
    }
    if let Some(hex) = lower.strip_prefix("0x") {
        return u64::from_str_radix(hex, 16).ok();
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        if !bin.is_empty() && bin.chars().all(|c| c == '0' || c == '1') {
            return u64::from_str_radix(bin, 2).ok();
        }
    }
    if let Some(hex) = lower.strip_suffix('h') {
        if hex.starts_with(|c: char| c.is_ascii_digit()) {
            return u64::from_str_radix(hex, 16).ok();
        }
    }
    if lower.chars().all(|c| c.is_ascii_digit()) {
        return lower.parse().ok();
    }
    None
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(i128),
    Ident(String),
    Op(&'static str),
    Open,
    Close,
}

fn lex_expr(expr: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            tokens.push(Token::Num(i128::from(parse_int_literal(&text)?)));
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else {
            let next = chars.get(i + 1).copied();
            let (token, width) = match (c, next) {
                ('<', Some('<')) => (Token::Op("<<"), 2),
                ('>', Some('>')) => (Token::Op(">>"), 2),
                ('+', _) => (Token::Op("+"), 1),
                ('-', _) => (Token::Op("-"), 1),
                ('*', _) => (Token::Op("*"), 1),
                ('/', _) => (Token::Op("/"), 1),
                ('(', _) => (Token::Open, 1),
                (')', _) => (Token::Close, 1),
                _ => return None,
            };
            tokens.push(token);
            i += width;
        }
    }
    Some(tokens)
}

struct ExprParser<'t, 'a> {
    tokens: &'t [Token],
    pos: usize,
    table: &'a ConstantTable,
    visiting: &'t mut Vec<&'a str>,
}

impl ExprParser<'_, '_> {
    fn peek_op(&self) -> Option<&'static str> {
        match self.tokens.get(self.pos) {
            Some(Token::Op(op)) => Some(*op),
            _ => None,
        }
    }

    fn expr(&mut self) -> Option<i128> {
        let mut value = self.additive()?;
        while let Some(op @ ("<<" | ">>")) = self.peek_op() {
            self.pos += 1;
            let rhs = u32::try_from(self.additive()?).ok().filter(|s| *s < 64)?;
            value = if op == "<<" {
                value.checked_shl(rhs)?
            } else {
                value.checked_shr(rhs)?
            };
        }
        Some(value)
    }

    fn additive(&mut self) -> Option<i128> {
        let mut value = self.term()?;
        while let Some(op @ ("+" | "-")) = self.peek_op() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == "+" {
                value.checked_add(rhs)?
            } else {
                value.checked_sub(rhs)?
            };
        }
        Some(value)
    }

    fn term(&mut self) -> Option<i128> {
        let mut value = self.unary()?;
        while let Some(op @ ("*" | "/")) = self.peek_op() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == "*" {
                value.checked_mul(rhs)?
            } else {
                value.checked_div(rhs)?
            };
        }
        Some(value)
    }

    fn unary(&mut self) -> Option<i128> {
        if self.peek_op() == Some("-") {
            self.pos += 1;
            return self.unary()?.checked_neg();
        }
        self.primary()
    }

    fn primary(&mut self) -> Option<i128> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        match token {
            Token::Num(n) => Some(n),
            Token::Ident(name) => {
                let def = self.table.get(&name)?;
                self.table.resolve_inner(&def.name, self.visiting)
            }
            Token::Open => {
                let value = self.expr()?;
                match self.tokens.get(self.pos) {
                    Some(Token::Close) => {
                        self.pos += 1;
                        Some(value)
                    }
                    _ => None,
                }
            }
            Token::Op(_) | Token::Close => None,
        }
    }
}
