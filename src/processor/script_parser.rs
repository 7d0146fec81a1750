//! Parser that consumes the line lexer and builds a `ScriptDocument`.
//!
//! Conditionals are built on an explicit stack. `{`, `}` and `else` shift or
//! reduce the top builder; every other statement is appended to the active
//! branch of the innermost open conditional, or to the document body.

use super::ast::{FieldDef, FieldId, ScriptDocument, Statement};
use super::lexer::{Lexer, Token};
use crate::error::ParseError;
use log::debug;

/// Parses one document. On error nothing of the partial document survives.
pub fn parse(src: &str, name: &str) -> Result<ScriptDocument, ParseError> {
    let mut p = Parser::new(src, name);
    for line in Lexer::new(src) {
        let line = line?;
        for token in line.tokens {
            p.feed(token, line.number)?;
        }
    }
    Ok(p.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arm {
    Then,
    Else,
}

#[derive(Debug)]
struct CondBuilder {
    condition: String,
    then_branch: Vec<Statement>,
    else_branch: Vec<Statement>,
    arm: Arm,
    /// The active arm was opened with `{`.
    braced: bool,
    /// The then-arm was closed by `}`; only `else` may still reopen it.
    awaiting_else: bool,
}

impl CondBuilder {
    fn new(condition: String) -> Self {
        Self {
            condition,
            then_branch: Vec::new(),
            else_branch: Vec::new(),
            arm: Arm::Then,
            braced: false,
            awaiting_else: false,
        }
    }

    fn active(&mut self) -> &mut Vec<Statement> {
        match self.arm {
            Arm::Then => &mut self.then_branch,
            Arm::Else => &mut self.else_branch,
        }
    }

    fn build(self) -> Statement {
        Statement::If {
            condition: self.condition,
            then_branch: self.then_branch,
            else_branch: self.else_branch,
        }
    }
}

struct Parser {
    doc: ScriptDocument,
    stack: Vec<CondBuilder>,
    seen_header: bool,
    in_body: bool,
    /// Field declared by the previous statement line, still open for the
    /// "literal seeds the initial value" rule.
    pending_field: Option<FieldId>,
}

impl Parser {
    fn new(src: &str, name: &str) -> Self {
        Self {
            doc: ScriptDocument::new(name, src),
            stack: Vec::new(),
            seen_header: false,
            in_body: false,
            pending_field: None,
        }
    }

    fn feed(&mut self, token: Token, line: usize) -> Result<(), ParseError> {
        if !self.seen_header {
            return match token {
                Token::Header => {
                    self.seen_header = true;
                    Ok(())
                }
                other => Err(ParseError::MissingHeader {
                    line,
                    text: describe(&other),
                }),
            };
        }

        match token {
            Token::Header => {}
            Token::Working(path) => {
                self.doc.targets.push(path);
                self.in_body = true;
            }
            Token::Using { alias, canonical } => {
                let canonical = canonical.unwrap_or_else(|| alias.clone());
                self.doc.aliases.insert(alias, canonical);
            }
            other if !self.in_body => {
                debug!(
                    "{}: line {line}: ignoring {:?} before any `Working` target",
                    self.doc.name, other
                );
            }
            Token::Ask(path) => {
                if let Some(field) = self.doc.fields.values_mut().next_back() {
                    field.bound_property = Some(path);
                }
            }
            other => {
                let pending = self.pending_field.take();
                self.statement(other, pending);
            }
        }
        Ok(())
    }

    fn statement(&mut self, token: Token, pending: Option<FieldId>) {
        match token {
            Token::Open => {
                if let Some(top) = self.stack.last_mut() {
                    if !top.awaiting_else && !top.braced && top.active().is_empty() {
                        top.braced = true;
                    }
                }
            }
            Token::Close => self.close(),
            Token::Else => {
                if let Some(top) = self.stack.last_mut() {
                    top.arm = Arm::Else;
                    top.braced = false;
                    top.awaiting_else = false;
                }
            }
            Token::If(condition) => {
                self.reduce_closed();
                self.stack.push(CondBuilder::new(condition));
            }
            Token::Field(label) => {
                let id = FieldId(self.doc.fields.len() as u32 + 1);
                self.doc.fields.insert(id, FieldDef::new(&label));
                self.pending_field = Some(id);
                debug!("{}: defined field `{label}` as {id}", self.doc.name);
            }
            Token::FieldAssign(property) => {
                // no field declared yet: nothing to bind, stay silent
                if let Some(&field) = self.doc.fields.keys().next_back() {
                    self.push(Statement::FieldAssignment { property, field });
                }
            }
            Token::Assign { property, value } => {
                if let Some(field) = pending.and_then(|id| self.doc.fields.get_mut(&id)) {
                    if !value.is_empty() {
                        field.initial_value = value.clone();
                    }
                }
                self.push(Statement::LiteralAssignment {
                    property,
                    literal: value,
                });
            }
            Token::Command(text) => self.push(Statement::RawCommand { text }),
            Token::Header | Token::Working(_) | Token::Using { .. } | Token::Ask(_) => {
                unreachable!("handled in feed")
            }
        }
    }

    fn push(&mut self, stmt: Statement) {
        self.reduce_closed();
        match self.stack.last_mut() {
            Some(top) => top.active().push(stmt),
            None => self.doc.body.push(stmt),
        }
    }

    /// Finalizes conditionals whose then-arm closed and got no `else`.
    fn reduce_closed(&mut self) {
        while self.stack.last().is_some_and(|top| top.awaiting_else) {
            self.reduce();
        }
    }

    fn reduce(&mut self) {
        if let Some(top) = self.stack.pop() {
            let stmt = top.build();
            match self.stack.last_mut() {
                Some(parent) => parent.active().push(stmt),
                None => self.doc.body.push(stmt),
            }
        }
    }

    fn close(&mut self) {
        self.reduce_closed();
        let Some(top) = self.stack.last_mut() else {
            // body brace or unmatched `}`
            return;
        };
        if top.arm == Arm::Then && top.braced {
            top.awaiting_else = true;
        } else {
            self.reduce();
        }
    }

    fn finish(mut self) -> ScriptDocument {
        while !self.stack.is_empty() {
            self.reduce();
        }
        self.doc
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Header => "GameScript".into(),
        Token::Working(p) => format!("Working {p}"),
        Token::Using { alias, .. } => format!("using {alias}"),
        Token::Open => "{".into(),
        Token::Close => "}".into(),
        Token::If(c) => format!("if {c}"),
        Token::Else => "else".into(),
        Token::Field(l) => format!("line \"{l}\""),
        Token::Ask(p) => format!("line.ask {p}"),
        Token::FieldAssign(p) => format!("{p} = [line]"),
        Token::Assign { property, value } => format!("{property} = {value}"),
        Token::Command(t) => t.clone(),
    }
}
