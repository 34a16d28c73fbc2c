//! Double-brace action dialect.
//!
//! Template bodies are written with `{{.Key}}`-style actions:
//!
//! ```text
//! var port = {{.Port}};
//! {{if .IncludeCache}}builder.AddRedis("redis");{{end}}
//! {{range .Services}}- {{.}}
//! {{else}}no services
//! {{end}}
//! ```
//!
//! [`lower`] rewrites such a body into MiniJinja source, which the renderer
//! then compiles and executes. Lowering checks block structure and variable
//! declarations up front; unknown context keys are caught at execution time
//! by MiniJinja's strict undefined handling.
//!
//! Trim markers are applied to the surrounding text while lowering, so the
//! generated source never uses MiniJinja whitespace control.

use thiserror::Error;

/// A malformed or unsupported action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

type LowerResult<T> = std::result::Result<T, SyntaxError>;

/// Lowers a template body to MiniJinja source.
///
/// # Errors
/// Returns a [`SyntaxError`] naming the line of the first offending action.
pub fn lower(source: &str) -> LowerResult<String> {
    let mut lowerer = Lowerer::new(source);
    lowerer.run()?;
    Ok(lowerer.out)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// `.`, `.A` or `.A.B`; empty path is the bare dot.
    Field(Vec<String>),
    /// `$`, `$x` or `$x.A`; empty name is the root.
    Var { name: String, path: Vec<String> },
    /// Literal already in MiniJinja form.
    Literal(String),
    Ident(String),
    LParen,
    RParen,
    Pipe,
    Comma,
    Declare,
    Assign,
}

#[derive(Debug)]
enum BlockKind {
    If,
    /// `item` is the loop variable the dot is bound to.
    Range { item: String },
}

#[derive(Debug)]
struct Block {
    kind: BlockKind,
    line: usize,
    in_else: bool,
    /// Variables declared inside this block.
    vars: Vec<String>,
}

struct Lowerer<'a> {
    source: &'a str,
    out: String,
    blocks: Vec<Block>,
    /// Variables declared at the top level.
    globals: Vec<String>,
    loop_counter: usize,
}

impl<'a> Lowerer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            out: String::with_capacity(source.len() + source.len() / 4),
            blocks: Vec::new(),
            globals: Vec::new(),
            loop_counter: 0,
        }
    }

    fn run(&mut self) -> LowerResult<()> {
        let source = self.source;
        let mut offset = 0;
        // Set by a ` -}}` marker; trims the leading whitespace of the next text.
        let mut trim_next = false;
        while let Some(found) = source[offset..].find("{{") {
            let start = offset + found;
            let line = line_at(source, start);
            let body_start = start + 2;
            let close = find_close(&source[body_start..]).ok_or_else(|| SyntaxError {
                line,
                message: "unclosed action".to_string(),
            })?;
            let (body, trim) = split_trim(&source[body_start..body_start + close]);

            let mut text = &source[offset..start];
            if trim_next {
                text = text.trim_start_matches(is_space);
            }
            if trim.left {
                text = text.trim_end_matches(is_space);
            }
            self.push_text(text);
            self.action(body, line)?;

            trim_next = trim.right;
            offset = body_start + close + 2;
        }
        let mut text = &source[offset..];
        if trim_next {
            text = text.trim_start_matches(is_space);
        }
        self.push_text(text);

        if let Some(block) = self.blocks.last() {
            let keyword = match block.kind {
                BlockKind::If => "if",
                BlockKind::Range { .. } => "range",
            };
            return Err(SyntaxError {
                line: block.line,
                message: format!("unclosed {{{{{keyword}}}}} action"),
            });
        }
        Ok(())
    }

    /// Emits literal text. MiniJinja delimiters are written through string
    /// expressions so they never open a tag or comment.
    fn push_text(&mut self, text: &str) {
        let mut rest = text;
        while let Some(pos) = rest.find('{') {
            let (before, after) = rest.split_at(pos);
            self.out.push_str(before);
            match after.as_bytes().get(1) {
                Some(b'%' | b'#') => {
                    self.out.push_str(&format!("{{{{ \"{}\" }}}}", &after[..2]));
                    rest = &after[2..];
                }
                // A trailing `{` would fuse with the next action's `{{`.
                None => {
                    self.out.push_str("{{ \"{\" }}");
                    rest = "";
                }
                Some(_) => {
                    self.out.push('{');
                    rest = &after[1..];
                }
            }
        }
        self.out.push_str(rest);
    }

    fn action(&mut self, body: &str, line: usize) -> LowerResult<()> {
        let body = body.trim();
        if body.starts_with("/*") {
            if !body.ends_with("*/") {
                return Err(err(line, "unterminated comment"));
            }
            return Ok(());
        }

        let tokens = tokenize(body, line)?;
        match tokens.first() {
            None => Err(err(line, "missing value for command")),
            Some(Token::Ident(keyword)) => match keyword.as_str() {
                "if" => self.open_if(&tokens[1..], line),
                "else" => self.else_branch(&tokens[1..], line),
                "end" => self.end(&tokens[1..], line),
                "range" => self.open_range(&tokens[1..], line),
                "break" | "continue" => self.loop_control(keyword, &tokens[1..], line),
                "with" | "define" | "template" | "block" => Err(err(
                    line,
                    &format!("{{{{{keyword}}}}} actions are not supported"),
                )),
                _ => self.output(&tokens, line),
            },
            Some(Token::Var { name, path })
                if path.is_empty()
                    && !name.is_empty()
                    && matches!(tokens.get(1), Some(Token::Declare | Token::Assign)) =>
            {
                let declare = tokens[1] == Token::Declare;
                self.assign(name, declare, &tokens[2..], line)
            }
            Some(_) => self.output(&tokens, line),
        }
    }

    fn push_tag(&mut self, inner: &str) {
        self.out.push_str("{% ");
        self.out.push_str(inner);
        self.out.push_str(" %}");
    }

    fn output(&mut self, tokens: &[Token], line: usize) -> LowerResult<()> {
        let expr = self.expression(tokens, line)?;
        self.out.push_str(&format!("{{{{ {expr} }}}}"));
        Ok(())
    }

    fn open_if(&mut self, tokens: &[Token], line: usize) -> LowerResult<()> {
        let expr = self.expression(tokens, line)?;
        self.push_tag(&format!("if {expr}"));
        self.blocks.push(Block {
            kind: BlockKind::If,
            line,
            in_else: false,
            vars: Vec::new(),
        });
        Ok(())
    }

    fn else_branch(&mut self, tokens: &[Token], line: usize) -> LowerResult<()> {
        let chained_if = match tokens.first() {
            None => false,
            Some(Token::Ident(kw)) if kw == "if" => true,
            Some(Token::Ident(kw)) if kw == "with" || kw == "range" => {
                return Err(err(line, &format!("{{{{else {kw}}}}} is not supported")))
            }
            Some(_) => return Err(err(line, "unexpected tokens after else")),
        };

        let block = self
            .blocks
            .last()
            .ok_or_else(|| err(line, "{{else}} without {{if}} or {{range}}"))?;
        if block.in_else {
            return Err(err(line, "{{else}} after {{else}}"));
        }

        if chained_if {
            if !matches!(block.kind, BlockKind::If) {
                return Err(err(line, "{{else if}} inside {{range}}"));
            }
            let expr = self.expression(&tokens[1..], line)?;
            self.push_tag(&format!("elif {expr}"));
        } else {
            self.push_tag("else");
        }

        if let Some(block) = self.blocks.last_mut() {
            block.vars.clear();
            block.in_else = !chained_if;
        }
        Ok(())
    }

    fn end(&mut self, tokens: &[Token], line: usize) -> LowerResult<()> {
        if !tokens.is_empty() {
            return Err(err(line, "unexpected tokens after end"));
        }
        let block = self
            .blocks
            .pop()
            .ok_or_else(|| err(line, "{{end}} without an open block"))?;
        let tag = match block.kind {
            BlockKind::If => "endif",
            BlockKind::Range { .. } => "endfor",
        };
        self.push_tag(tag);
        Ok(())
    }

    fn open_range(&mut self, tokens: &[Token], line: usize) -> LowerResult<()> {
        // range [$index,] [$item] := pipeline
        let (index, item, rest) = match tokens {
            [Token::Var { name: i, path: ip }, Token::Comma, Token::Var { name: v, path: vp }, Token::Declare, rest @ ..]
                if ip.is_empty() && vp.is_empty() && !i.is_empty() && !v.is_empty() =>
            {
                (Some(i.clone()), Some(v.clone()), rest)
            }
            [Token::Var { name: v, path: vp }, Token::Declare, rest @ ..]
                if vp.is_empty() && !v.is_empty() =>
            {
                (None, Some(v.clone()), rest)
            }
            _ => (None, None, tokens),
        };

        // Evaluated in the enclosing scope, before the loop variables exist.
        let expr = self.expression(rest, line)?;

        let item = match item {
            Some(name) => name,
            None => {
                self.loop_counter += 1;
                format!("__item{}", self.loop_counter)
            }
        };
        self.push_tag(&format!("for {item} in {expr}"));
        if let Some(index) = &index {
            self.push_tag(&format!("set {index} = loop.index0"));
        }

        let mut vars = vec![item.clone()];
        vars.extend(index);
        self.blocks.push(Block {
            kind: BlockKind::Range { item },
            line,
            in_else: false,
            vars,
        });
        Ok(())
    }

    fn loop_control(&mut self, keyword: &str, tokens: &[Token], line: usize) -> LowerResult<()> {
        if !tokens.is_empty() {
            return Err(err(line, &format!("unexpected tokens after {keyword}")));
        }
        let in_loop = self
            .blocks
            .iter()
            .any(|b| matches!(b.kind, BlockKind::Range { .. }) && !b.in_else);
        if !in_loop {
            return Err(err(line, &format!("{{{{{keyword}}}}} outside {{{{range}}}}")));
        }
        self.push_tag(keyword);
        Ok(())
    }

    fn assign(
        &mut self,
        name: &str,
        declare: bool,
        tokens: &[Token],
        line: usize,
    ) -> LowerResult<()> {
        if !declare {
            if !self.is_declared(name) {
                return Err(err(line, &format!("undefined variable ${name}")));
            }
            // MiniJinja scopes `set` to the loop iteration, so the outer
            // variable would silently keep its old value.
            if self.declared_outside_loop(name) {
                return Err(err(
                    line,
                    &format!("cannot assign ${name} inside {{{{range}}}}; it is declared outside the loop"),
                ));
            }
        }
        let expr = self.expression(tokens, line)?;
        if declare {
            match self.blocks.last_mut() {
                Some(block) => block.vars.push(name.to_string()),
                None => self.globals.push(name.to_string()),
            }
        }
        self.push_tag(&format!("set {name} = {expr}"));
        Ok(())
    }

    fn is_declared(&self, name: &str) -> bool {
        self.globals.iter().any(|v| v == name)
            || self
                .blocks
                .iter()
                .any(|b| b.vars.iter().any(|v| v == name))
    }

    /// Whether the innermost declaration of `name` sits outside the innermost
    /// enclosing range.
    fn declared_outside_loop(&self, name: &str) -> bool {
        for block in self.blocks.iter().rev() {
            if block.vars.iter().any(|v| v == name) {
                return false;
            }
            if matches!(block.kind, BlockKind::Range { .. }) {
                return true;
            }
        }
        false
    }

    /// Loop variable the dot is currently bound to, if inside a range body.
    fn dot(&self) -> Option<&str> {
        self.blocks.iter().rev().find_map(|b| match &b.kind {
            BlockKind::Range { item } if !b.in_else => Some(item.as_str()),
            _ => None,
        })
    }

    fn expression(&self, tokens: &[Token], line: usize) -> LowerResult<String> {
        if tokens.is_empty() {
            return Err(err(line, "missing value for command"));
        }
        let mut parser = ExprParser {
            tokens,
            pos: 0,
            lowerer: self,
            line,
        };
        let expr = parser.pipeline()?;
        if parser.pos < tokens.len() {
            return Err(err(line, "unexpected tokens at end of action"));
        }
        Ok(expr)
    }
}

/// Whitespace trim markers of one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Trim {
    left: bool,
    right: bool,
}

/// Strips `- ` / ` -` trim markers from an action body.
fn split_trim(body: &str) -> (&str, Trim) {
    let mut trim = Trim::default();
    let mut body = body;
    if let Some(rest) = body.strip_prefix('-') {
        if rest.starts_with(is_space) {
            trim.left = true;
            body = rest;
        }
    }
    if let Some(rest) = body.strip_suffix('-') {
        if rest.ends_with(is_space) {
            trim.right = true;
            body = rest;
        }
    }
    (body, trim)
}

/// Whitespace as trim markers see it.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

struct ExprParser<'t, 'l, 's> {
    tokens: &'t [Token],
    pos: usize,
    lowerer: &'l Lowerer<'s>,
    line: usize,
}

impl ExprParser<'_, '_, '_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn pipeline(&mut self) -> LowerResult<String> {
        let expr = self.command()?;
        if self.peek() == Some(&Token::Pipe) {
            return Err(err(self.line, "pipelines with '|' are not supported"));
        }
        Ok(expr)
    }

    fn command(&mut self) -> LowerResult<String> {
        if let Some(Token::Ident(name)) = self.peek() {
            if is_function(name) {
                let name = name.clone();
                self.pos += 1;
                let mut args = Vec::new();
                while !matches!(self.peek(), None | Some(Token::RParen | Token::Pipe)) {
                    args.push(self.operand()?);
                }
                return self.call(&name, args);
            }
        }

        let operand = self.operand()?;
        if !matches!(self.peek(), None | Some(Token::RParen | Token::Pipe)) {
            return Err(err(self.line, "unexpected operand; function name expected"));
        }
        Ok(operand)
    }

    fn operand(&mut self) -> LowerResult<String> {
        let line = self.line;
        let token = self
            .next()
            .cloned()
            .ok_or_else(|| err(line, "missing operand"))?;
        match token {
            Token::Field(path) => match self.lowerer.dot() {
                Some(item) => Ok(access(item, &path)),
                None if path.is_empty() => Err(err(
                    line,
                    "bare '.' is only supported inside {{range}}",
                )),
                None => Ok(path.join(".")),
            },
            Token::Var { name, path } if name.is_empty() => {
                if path.is_empty() {
                    Err(err(line, "bare '$' is not supported; use $.Key"))
                } else {
                    Ok(path.join("."))
                }
            }
            Token::Var { name, path } => {
                if !self.lowerer.is_declared(&name) {
                    return Err(err(line, &format!("undefined variable ${name}")));
                }
                Ok(access(&name, &path))
            }
            Token::Literal(lit) => Ok(lit),
            Token::Ident(ident) => match ident.as_str() {
                "true" | "false" => Ok(ident),
                "nil" => Ok("none".to_string()),
                f if is_function(f) => Err(err(
                    line,
                    &format!("function '{f}' used as an argument must be parenthesized"),
                )),
                other => Err(err(line, &format!("function \"{other}\" not defined"))),
            },
            Token::LParen => {
                let inner = self.pipeline()?;
                match self.next() {
                    Some(Token::RParen) => Ok(format!("({inner})")),
                    _ => Err(err(line, "unclosed '('")),
                }
            }
            Token::RParen => Err(err(line, "unexpected ')'")),
            Token::Pipe => Err(err(line, "unexpected '|'")),
            Token::Comma => Err(err(line, "unexpected ','")),
            Token::Declare | Token::Assign => Err(err(line, "unexpected assignment")),
        }
    }

    fn call(&self, name: &str, args: Vec<String>) -> LowerResult<String> {
        let arity = |expected: usize| -> LowerResult<()> {
            if args.len() == expected {
                Ok(())
            } else {
                Err(err(
                    self.line,
                    &format!(
                        "wrong number of args for {name}: want {expected} got {}",
                        args.len()
                    ),
                ))
            }
        };
        let at_least = |min: usize| -> LowerResult<()> {
            if args.len() >= min {
                Ok(())
            } else {
                Err(err(
                    self.line,
                    &format!(
                        "wrong number of args for {name}: want at least {min} got {}",
                        args.len()
                    ),
                ))
            }
        };

        let binary = |op: &str| format!("({} {op} {})", args[0], args[1]);
        match name {
            "eq" => {
                at_least(2)?;
                let first = &args[0];
                let alternatives: Vec<String> = args[1..]
                    .iter()
                    .map(|other| format!("{first} == {other}"))
                    .collect();
                Ok(format!("({})", alternatives.join(" or ")))
            }
            "ne" => arity(2).map(|_| binary("!=")),
            "lt" => arity(2).map(|_| binary("<")),
            "le" => arity(2).map(|_| binary("<=")),
            "gt" => arity(2).map(|_| binary(">")),
            "ge" => arity(2).map(|_| binary(">=")),
            "and" => at_least(1).map(|_| format!("({})", args.join(" and "))),
            "or" => at_least(1).map(|_| format!("({})", args.join(" or "))),
            "not" => arity(1).map(|_| format!("(not {})", args[0])),
            "len" => arity(1).map(|_| format!("({}|length)", args[0])),
            "index" => arity(2).map(|_| format!("{}[{}]", args[0], args[1])),
            _ => Err(err(self.line, &format!("function \"{name}\" not defined"))),
        }
    }
}

fn is_function(name: &str) -> bool {
    matches!(
        name,
        "eq" | "ne" | "lt" | "le" | "gt" | "ge" | "and" | "or" | "not" | "len" | "index"
    )
}

fn access(base: &str, path: &[String]) -> String {
    let mut expr = base.to_string();
    for part in path {
        expr.push('.');
        expr.push_str(part);
    }
    expr
}

fn err(line: usize, message: &str) -> SyntaxError {
    SyntaxError {
        line,
        message: message.to_string(),
    }
}

fn line_at(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Finds the closing `}}` of an action body, skipping quoted literals.
/// Comments close at the first `*/` followed by `}}` or ` -}}`.
fn find_close(body: &str) -> Option<usize> {
    if let Some(open) = comment_start(body) {
        let mut from = open + 2;
        while let Some(found) = body[from..].find("*/") {
            let after = from + found + 2;
            let rest = &body[after..];
            if rest.starts_with("}}") {
                return Some(after);
            }
            let spaced = rest.trim_start_matches(is_space);
            if spaced.len() < rest.len() && spaced.starts_with("-}}") {
                return Some(after + (rest.len() - spaced.len()) + 1);
            }
            from = after;
        }
        return None;
    }

    let bytes = body.as_bytes();
    let mut i = 0;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' && q != b'`' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => {
                if b == b'"' || b == b'`' || b == b'\'' {
                    quote = Some(b);
                } else if b == b'}' && bytes.get(i + 1) == Some(&b'}') {
                    return Some(i);
                }
            }
        }
        i += 1;
    }
    None
}

/// Offset of the `/*` opening a comment action, if the body is one.
fn comment_start(body: &str) -> Option<usize> {
    if body.starts_with("/*") {
        return Some(0);
    }
    let rest = body.strip_prefix('-')?;
    let spaced = rest.trim_start_matches(is_space);
    (spaced.len() < rest.len() && spaced.starts_with("/*")).then(|| body.len() - spaced.len())
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn tokenize(body: &str, line: usize) -> LowerResult<Vec<Token>> {
    let chars: Vec<char> = body.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let read_ident = |start: usize| -> (String, usize) {
        let mut end = start;
        while end < chars.len() && is_ident_char(chars[end]) {
            end += 1;
        }
        (chars[start..end].iter().collect(), end)
    };
    let read_path = |mut pos: usize| -> (Vec<String>, usize) {
        let mut path = Vec::new();
        while pos + 1 < chars.len() && chars[pos] == '.' && is_ident_start(chars[pos + 1]) {
            let (name, end) = read_ident(pos + 1);
            path.push(name);
            pos = end;
        }
        (path, pos)
    };

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '.' => {
                let (path, end) = read_path(i);
                if path.is_empty() {
                    i += 1;
                } else {
                    i = end;
                }
                tokens.push(Token::Field(path));
            }
            '$' => {
                let (name, end) = read_ident(i + 1);
                let (path, end) = read_path(end);
                tokens.push(Token::Var { name, path });
                i = end;
            }
            '"' => {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(err(line, "unterminated quoted string"));
                }
                i += 1;
                tokens.push(Token::Literal(chars[start..i].iter().collect()));
            }
            '`' => {
                let start = i + 1;
                let end = chars[start..]
                    .iter()
                    .position(|&c| c == '`')
                    .map(|p| start + p)
                    .ok_or_else(|| err(line, "unterminated raw quoted string"))?;
                let raw: String = chars[start..end].iter().collect();
                let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
                tokens.push(Token::Literal(format!("\"{escaped}\"")));
                i = end + 1;
            }
            '\'' => return Err(err(line, "character constants are not supported")),
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '|' => {
                tokens.push(Token::Pipe);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            ':' if chars.get(i + 1) == Some(&'=') => {
                tokens.push(Token::Declare);
                i += 2;
            }
            '=' => {
                tokens.push(Token::Assign);
                i += 1;
            }
            c if c.is_ascii_digit()
                || ((c == '-' || c == '+')
                    && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) =>
            {
                let start = i;
                i += 1;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.' || chars[i] == '_') {
                    i += 1;
                }
                let number: String = chars[start..i].iter().filter(|&&c| c != '_').collect();
                tokens.push(Token::Literal(number.trim_start_matches('+').to_string()));
            }
            c if is_ident_start(c) => {
                let (name, end) = read_ident(i);
                tokens.push(Token::Ident(name));
                i = end;
            }
            other => {
                return Err(err(
                    line,
                    &format!("unexpected {other:?} in action"),
                ))
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_close_skips_strings() {
        assert_eq!(find_close(".Port}} rest"), Some(5));
        assert_eq!(find_close("\"}}\"}}"), Some(4));
        assert_eq!(find_close(".Port"), None);
    }

    #[test]
    fn test_find_close_comments() {
        assert_eq!(find_close("/* don't */}} x"), Some(11));
        assert_eq!(find_close("- /* a }} b */ -}}"), Some(16));
        assert_eq!(find_close("/* open"), None);
    }

    #[test]
    fn test_split_trim() {
        assert_eq!(
            split_trim("- .Port -"),
            (" .Port ", Trim { left: true, right: true })
        );
        assert_eq!(split_trim("-3"), ("-3", Trim::default()));
    }

    #[test]
    fn test_tokenize_paths_and_vars() {
        let tokens = tokenize("eq $.Database .A.B $x.Y", 1).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("eq".to_string()),
                Token::Var {
                    name: String::new(),
                    path: vec!["Database".to_string()]
                },
                Token::Field(vec!["A".to_string(), "B".to_string()]),
                Token::Var {
                    name: "x".to_string(),
                    path: vec!["Y".to_string()]
                },
            ]
        );
    }

    #[test]
    fn test_line_at() {
        assert_eq!(line_at("a\nb\nc", 0), 1);
        assert_eq!(line_at("a\nb\nc", 4), 3);
    }
}
